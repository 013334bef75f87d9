//! flightwx CLI - command line tools for route ranking and weather risk.
//!
//! Binaries:
//! - plan_route: rank waypoint orderings locally or through a server
//! - assess_risk: classify a reading file locally or score stored weather on a server

pub mod client;
pub mod report;

pub use client::FlightWxClient;
