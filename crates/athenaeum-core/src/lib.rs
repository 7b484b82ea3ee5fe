//! Service plumbing shared by Athenaeum binaries: configuration loading,
//! tracing setup, health checks, HTTP middleware, and small serde / sea-query
//! helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
