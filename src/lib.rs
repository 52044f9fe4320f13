//! FinanzCLI - Terminal client for the FinanzApp personal finance tracker
//!
//! This library provides the core functionality of the `finanz` binary: a
//! typed client for the FinanzApp REST backend, an offline fallback that
//! answers lookups with mock records, and AI-assisted transaction entry
//! from text, receipt photos and voice notes.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: HTTP client, bearer-token handling and transport abstraction
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Wire models (users, categories, currencies, transactions, ...)
//! - `storage`: Session persistence
//! - `services`: Business logic layer, one service per backend resource
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//! - `export`: Local CSV, JSON and YAML export
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use finanz::config::{paths::FinanzPaths, settings::Settings};
//!
//! let paths = FinanzPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanzError, FinanzResult};
