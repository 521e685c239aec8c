//! Shared types for `netmap`.
//!
//! Everything the scanner produces or consumes lives here so that the
//! engine crates and the binary agree on one data model.

pub mod config;
pub mod error;
pub mod heuristics;
pub mod network;
pub mod snapshot;
