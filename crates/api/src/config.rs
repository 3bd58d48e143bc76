use crate::auth::jwt::JwtConfig;

/// Default lifetime of signed asset URLs in seconds.
const DEFAULT_ASSET_URL_TTL_SECS: u64 = 900;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. Payment processor and asset bucket settings are loaded by
/// their own clients in the gateway crate.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of signed asset download URLs (default: `900`).
    pub asset_url_ttl_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ASSET_URL_TTL_SECS`   | `900`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let asset_url_ttl_secs: u64 = std::env::var("ASSET_URL_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_ASSET_URL_TTL_SECS.to_string())
            .parse()
            .expect("ASSET_URL_TTL_SECS must be a valid u64");
        assert!(asset_url_ttl_secs > 0, "ASSET_URL_TTL_SECS must be positive");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            asset_url_ttl_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}
