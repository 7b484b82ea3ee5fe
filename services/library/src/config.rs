use athenaeum_auth_types::token::DEFAULT_TOKEN_TTL_SECS;
use athenaeum_core::config::Config;
use serde::Deserialize;

/// Library service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing and validating bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3114). Env var: `LIBRARY_PORT`.
    #[serde(default = "default_port")]
    pub library_port: u16,
    /// Access-token lifetime in seconds. Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Apply pending migrations at startup. Env var: `RUN_MIGRATIONS`.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    3114
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_run_migrations() -> bool {
    true
}

impl Config for LibraryConfig {}
