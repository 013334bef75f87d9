//! Shared library surface for the flightwx server and its tests.

pub mod api;
pub mod config;
pub mod loops;
pub mod persistence;
pub mod state;
pub mod weather_source;
