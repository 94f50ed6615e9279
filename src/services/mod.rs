//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the marketplace data and per-visitor session state so
//! route handlers can stay focused on protocol translation and gating.

pub mod catalog;
pub mod estimator;
pub mod listings;
pub mod session;
