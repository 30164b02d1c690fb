use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Record store
    pub database_url: String,
    pub database_max_connections: u32,

    // Browser origins allowed by CORS; ["*"] allows any origin
    pub cors_allow_origin: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3233,
            database_url: "sqlite://clinic.db?mode=rwc".to_string(),
            database_max_connections: 10,
            cors_allow_origin: vec!["*".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database_url = database_url;
        }

        if let Ok(max) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = max
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", max))?;
        }

        if let Ok(origins) = env::var("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = parse_origins(&origins);
        }

        Ok(config)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origin.iter().any(|o| o == "*")
    }
}

/// Splits a comma-separated origin list, dropping blanks. An empty list
/// falls back to allowing any origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example/"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(parse_origins(" , "), vec!["*"]);
    }

    #[test]
    fn test_wildcard_origin() {
        let mut config = Config::default();
        assert!(config.allows_any_origin());

        config.cors_allow_origin = parse_origins("https://clinic.example");
        assert!(!config.allows_any_origin());
    }
}
