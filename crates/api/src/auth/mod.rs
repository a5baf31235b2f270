//! Token handling for the API.
//!
//! Login, refresh, and account management live in the external auth
//! service; this module only validates the access tokens it issues (and
//! generates them for tests and local tooling).

pub mod jwt;
