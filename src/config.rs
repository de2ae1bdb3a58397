use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "leads.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Path of the SQLite file holding the `leads` table.
    pub db_path: String,
    pub db_max_connections: u32,
    pub db_busy_timeout_secs: u64,
    /// When false, a failed write is logged and the client still gets `200 Logged`.
    pub surface_write_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            db_busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            surface_write_errors: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            db_path: std::env::var("LEADS_DB_PATH").map_or_else(
                |_| Ok(DEFAULT_DB_PATH.to_string()),
                |path| {
                    if path.trim().is_empty() {
                        anyhow::bail!("LEADS_DB_PATH cannot be empty");
                    }
                    Ok(path)
                },
            )?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive number"))
                .and_then(|n| {
                    if n == 0 {
                        anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
                    }
                    Ok(n)
                })?,
            db_busy_timeout_secs: std::env::var("DB_BUSY_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_BUSY_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_BUSY_TIMEOUT_SECS must be a number of seconds"))?,
            surface_write_errors: match std::env::var("SURFACE_WRITE_ERRORS") {
                Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                    anyhow::anyhow!("SURFACE_WRITE_ERRORS must be true/false, 1/0 or yes/no")
                })?,
                Err(_) => false,
            },
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Leads DB path: {}", config.db_path);
        tracing::debug!("DB max connections: {}", config.db_max_connections);
        tracing::debug!("Server Port: {}", config.port);
        if config.surface_write_errors {
            tracing::info!("Write failures will be reported to clients as 500");
        }

        Ok(config)
    }
}

/// Parses a boolean-ish environment value.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_default_config_matches_legacy_port() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, "leads.db");
        assert!(!config.surface_write_errors);
    }
}
