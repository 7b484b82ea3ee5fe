//! Test utilities for Athenaeum services.
//!
//! Import from test code only.

pub mod auth;
