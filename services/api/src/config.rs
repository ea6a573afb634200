use anyhow::Context as _;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
const DEFAULT_SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `FOODGRAM_PORT`.
    pub port: u16,
    /// Access token lifetime (default 7 days). Env var: `TOKEN_TTL_SECS`.
    pub token_ttl_secs: u64,
    /// Attachment name of the shopping list download.
    /// Env var: `SHOPPING_LIST_FILENAME`.
    pub shopping_list_filename: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable optional values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL is not set")?,
            jwt_secret: lookup("JWT_SECRET").context("JWT_SECRET is not set")?,
            port: lookup("FOODGRAM_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            token_ttl_secs: lookup("TOKEN_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            shopping_list_filename: lookup("SHOPPING_LIST_FILENAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHOPPING_LIST_FILENAME.to_owned()),
        })
    }
}
