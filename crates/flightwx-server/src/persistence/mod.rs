//! Persistence layer for the flightwx server.
//!
//! SQLite-backed storage for collected weather readings. Computed routes and
//! risk assessments are never stored.

pub mod db;
pub mod weather;

pub use db::{init_database, Database};
