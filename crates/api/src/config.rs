use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secrets has a default suitable for local
/// development.
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
    /// Period of the expired-session sweep in seconds (default: `3600`).
    pub session_sweep_interval_secs: u64,
    /// Token secrets and lifetimes.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `3600`                  |
    ///
    /// See [`JwtConfig::from_env`] for the token variables.
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

        let session_sweep_interval_secs = parse_sweep_interval(
            &std::env::var("SESSION_SWEEP_INTERVAL_SECS").unwrap_or_else(|_| "3600".into()),
        )
        .unwrap_or_else(|msg| panic!("{msg}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_sweep_interval_secs,
            jwt,
        }
    }
}

/// Parse `SESSION_SWEEP_INTERVAL_SECS`: a positive whole number of seconds.
pub fn parse_sweep_interval(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("SESSION_SWEEP_INTERVAL_SECS must be greater than zero".to_string()),
        Ok(secs) => Ok(secs),
        Err(_) => Err("SESSION_SWEEP_INTERVAL_SECS must be a valid u64".to_string()),
    }
}
