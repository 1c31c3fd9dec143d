//! # Application State
//!
//! The CLI holds no long-lived state besides its configuration; the
//! backend client is built from it once per invocation.

pub mod config;

pub use config::AppConfig;
