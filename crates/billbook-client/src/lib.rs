//! # billbook-client: Backend REST Client
//!
//! Async client for the billing backend. All persistence, aggregation and
//! authorization happen server side; this crate turns those endpoints into
//! typed calls returning billbook-core values.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        billbook-client                                  │
//! │                                                                         │
//! │  ┌───────────────┐    ┌─────────────────┐    ┌───────────────────────┐ │
//! │  │   client.rs   │    │  repository/    │    │       wire.rs         │ │
//! │  │ BillbookClient│───►│ party, bill,    │───►│ camelCase JSON ◄──►   │ │
//! │  │ reqwest pool  │    │ dashboard,      │    │ billbook-core types   │ │
//! │  │ base url      │    │ payment         │    │                       │ │
//! │  └───────────────┘    └─────────────────┘    └───────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use billbook_client::{BillbookClient, ClientConfig};
//!
//! let client = BillbookClient::new(ClientConfig::new(
//!     "https://billing.example.com",
//!     "owner@example.com",
//! ))?;
//! for party in client.parties().list().await? {
//!     println!("{} {}", party.code, party.name);
//! }
//! ```
//!
//! One user action issues one request and awaits it. There is no retry or
//! caching layer.

pub mod client;
pub mod error;
pub mod repository;
pub mod wire;

pub use client::{BillbookClient, ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use repository::payment::OrderRequest;
pub use repository::{BillRepository, DashboardRepository, PartyRepository, PaymentRepository};
