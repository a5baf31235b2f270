//! Domain logic for the harvest log backend.
//!
//! This crate is pure: no database access, no async, no I/O. The HTTP and
//! persistence layers (`harvestlog-api`, `harvestlog-db`) build on the types
//! and functions defined here.

pub mod error;
pub mod import;
pub mod types;
