//! Bind address and storage backend selection.

use crate::env_var;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve from the in-memory user store instead of Postgres.
    pub in_memory: bool,
    /// Admin account to create at startup when serving in memory.
    pub seed_admin_email: Option<String>,
    pub log_to_file: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            in_memory: lookup("STOCKWISE_IN_MEMORY")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            seed_admin_email: lookup("STOCKWISE_SEED_ADMIN_EMAIL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            log_to_file: lookup("LOG_TO_FILE")
                .map(|v| !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
