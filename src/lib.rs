//! Issue tracker: a small HTTP service for tracking work items.
//!
//! Issues are created, listed, read, and updated through a JSON API. Each
//! issue moves through a constrained status lifecycle and may be assigned to
//! one of a fixed set of users.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Orchestration of domain rules over a port
//!
//! # Modules
//!
//! - [`issue`]: Issue domain, store port, in-memory adapter, and service
//! - [`api`]: axum router exposing the service over HTTP
//! - [`config`]: Layered server settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod issue;
pub mod telemetry;
