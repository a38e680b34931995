//! Auth Config

use clap::Args;

/// Session token lifetimes.
#[derive(Debug, Args)]
pub struct TokenConfig {
    /// Access token lifetime in seconds
    #[arg(long, env = "ACCESS_TOKEN_TTL_SECONDS", default_value_t = 900)]
    pub access_token_ttl_seconds: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, env = "REFRESH_TOKEN_TTL_SECONDS", default_value_t = 604_800)]
    pub refresh_token_ttl_seconds: u64,
}
