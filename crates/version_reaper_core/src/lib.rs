//! Shared version reaper domain primitives.
//!
//! This crate owns the function/alias/version records, the marker-driven
//! pagination sequence, and the rules deciding which versions are protected.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod pagination;
pub mod records;
pub mod selection;
