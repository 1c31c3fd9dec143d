//! # Repository Module
//!
//! One repository per backend resource.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  client.bills().week(range)                                    │
//! │       ▼                                                                 │
//! │  BillRepository                                                        │
//! │  ├── create_week(&[NewBill])                                           │
//! │  ├── week / year / for_party / in_range / for_party_all                │
//! │  ├── update(&Bill) / update_total_np(range, amount)                    │
//! │  └── delete(id)                                                        │
//! │       │                                                                 │
//! │       │  HTTP + JSON (wire.rs)                                         │
//! │       ▼                                                                 │
//! │  Backend REST service                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PartyRepository`] - Party create, list, delete
//! - [`BillRepository`] - Weekly bill CRUD and aggregate queries
//! - [`DashboardRepository`] - Owner-wide summary
//! - [`PaymentRepository`] - Subscription order creation and verification

pub mod bill;
pub mod dashboard;
pub mod party;
pub mod payment;

pub use bill::BillRepository;
pub use dashboard::DashboardRepository;
pub use party::PartyRepository;
pub use payment::PaymentRepository;
