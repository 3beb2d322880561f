//! Server configuration, read once at startup.

use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub read_only: bool,
    pub seed_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8082,
            db_path: PathBuf::from("users.db"),
            read_only: false,
            seed_count: 10_000,
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparseable.
    ///
    /// Variables: `BIND`, `PORT`, `DB_PATH`, `READ_ONLY` / `READ_ONLY_DB`,
    /// `SEED_USER_COUNT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = env::var("BIND").unwrap_or(defaults.bind);
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let db_path = env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let read_only = env::var("READ_ONLY_DB").is_ok_and(|v| is_truthy(&v))
            || env::var("READ_ONLY").is_ok_and(|v| is_truthy(&v));
        let seed_count = env::var("SEED_USER_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.seed_count);

        Self {
            bind,
            port,
            db_path,
            read_only,
            seed_count,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8082);
        assert_eq!(config.db_path, PathBuf::from("users.db"));
        assert!(!config.read_only);
        assert_eq!(config.seed_count, 10_000);
    }

    #[test]
    fn truthy_parsing_is_case_insensitive() {
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("True"));
        assert!(!is_truthy("1"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
