use contacto_core::validation::rules::FinalizeMode;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Maximum request body read by the validation step (default: 2 MiB).
    pub body_limit_bytes: usize,
    /// Finalize modes for the contact rule sets.
    pub contacto: ContactoValidationConfig,
}

/// How each contact route reacts to failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactoValidationConfig {
    /// Create-contact route (default: `collect`).
    pub create: FinalizeMode,
    /// Update-contact route (default: `respond`).
    pub update: FinalizeMode,
}

impl Default for ContactoValidationConfig {
    fn default() -> Self {
        Self {
            create: FinalizeMode::Collect,
            update: FinalizeMode::Respond,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `BODY_LIMIT_BYTES`         | `2097152`                  |
    /// | `CONTACTO_CREATE_FINALIZE` | `collect`                  |
    /// | `CONTACTO_UPDATE_FINALIZE` | `respond`                  |
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

        let body_limit_bytes: usize = std::env::var("BODY_LIMIT_BYTES")
            .unwrap_or_else(|_| "2097152".into())
            .parse()
            .expect("BODY_LIMIT_BYTES must be a valid usize");

        let defaults = ContactoValidationConfig::default();
        let contacto = ContactoValidationConfig {
            create: finalize_mode_from_env("CONTACTO_CREATE_FINALIZE", defaults.create),
            update: finalize_mode_from_env("CONTACTO_UPDATE_FINALIZE", defaults.update),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            contacto,
        }
    }
}

/// Read a finalize mode from `var`, falling back to `default` when unset.
///
/// Panics on an unrecognised value so misconfiguration fails at startup.
fn finalize_mode_from_env(var: &str, default: FinalizeMode) -> FinalizeMode {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{var} is invalid: {e}")),
        Err(_) => default,
    }
}
