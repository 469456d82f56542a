//! Kharcha - personal expense tracker
//!
//! Keeps expenses, trips and monthly budgets per user (a "principal",
//! identified by email), answers filtered and sorted queries over them, and
//! derives spending summaries and budget status.
//!
//! # Architecture
//!
//! - `config`: paths and user settings
//! - `error`: the crate error type
//! - `models`: expenses, trips, budgets, money and ids
//! - `storage`: key-value persistence of per-principal collections
//! - `services`: filtering, sorting, selection and budget logic
//! - `reports`: aggregation over expense collections
//! - `session`: the mutation surface front ends talk to
//! - `audit`: JSONL audit log
//! - `export`: CSV, JSON and YAML export
//! - `cli` / `display`: the command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use kharcha::config::paths::KharchaPaths;
//! use kharcha::models::Principal;
//! use kharcha::session::Session;
//!
//! let paths = KharchaPaths::new()?;
//! let session = Session::open(&paths, Principal::parse("ravi@example.com"))?;
//! println!("{} expenses", session.expenses().len());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{KharchaError, KharchaResult};
