//! HTTP handlers, grouped by feature.

pub mod harvest_import;
pub mod plants;
