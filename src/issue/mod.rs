//! Issue tracking for the tracker service.
//!
//! Issues are created, listed, read, and updated under a small status
//! lifecycle with optional user assignment. The module follows hexagonal
//! architecture:
//!
//! - Domain types and lifecycle rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
