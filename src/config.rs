use std::fs;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub postgres: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Run pending migrations before serving.
    #[serde(default = "default_migrate")]
    pub migrate: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

fn default_migrate() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error opening configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_postgres_is_required() {
        let config = Config::from_json(r#"{"postgres": "postgres://fyyur@localhost/fyyur"}"#)
            .unwrap();
        assert_eq!(config.address(), "0.0.0.0:5000");
        assert_eq!(config.max_connections, 5);
        assert!(config.migrate);
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_json(
            r#"{"host": "127.0.0.1", "port": 8080, "postgres": "postgres://db/fyyur",
                "max_connections": 12, "migrate": false}"#,
        )
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.max_connections, 12);
        assert!(!config.migrate);
    }

    #[test]
    fn missing_postgres_is_malformed() {
        let err = Config::from_json(r#"{"port": 5000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load("/nonexistent/fyyur.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fyyur.json"));
    }
}
