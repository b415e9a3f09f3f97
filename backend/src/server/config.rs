//! Server configuration read from the environment at bootstrap.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default access-token lifetime in seconds.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Resolved application configuration.
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Secret used to sign access tokens.
    pub token_secret: Vec<u8>,
    /// Access-token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// Whether to reset and seed storage at startup.
    pub seed_on_start: bool,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required. The token secret is read from the file
    /// named by `TOKEN_SECRET_FILE`; when that fails, an ephemeral secret is
    /// generated only in debug builds or when `TOKEN_ALLOW_EPHEMERAL=1`,
    /// since an ephemeral secret invalidates every token on restart.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

        let secret_path = env::var("TOKEN_SECRET_FILE")
            .unwrap_or_else(|_| "/var/run/secrets/token_secret".into());
        let token_secret = match std::fs::read(&secret_path) {
            Ok(bytes) => bytes,
            Err(err) => {
                let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %secret_path, error = %err, "using ephemeral token secret (dev only)");
                    uuid::Uuid::new_v4().as_bytes().to_vec()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read token secret at {secret_path}: {err}"
                    )));
                }
            }
        };

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let seed_on_start = env::var("SEED_ON_START").ok().as_deref() == Some("1");

        Ok(Self {
            bind_addr,
            database_url,
            token_secret,
            token_ttl_secs,
            seed_on_start,
        })
    }
}
