//! AWS-oriented adapters and handlers for reaping unreferenced Lambda versions.
//!
//! This crate owns runtime integration details (the Lambda entry point, the
//! function catalog seam over the Lambda control plane, and invocation
//! configuration). Selection rules and pagination live in
//! `version_reaper_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
