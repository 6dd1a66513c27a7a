//! Step definitions for issue lifecycle BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
