use dotenv::dotenv;
use std::env;
use std::str::FromStr;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Read from the environment, after loading `.env` when one exists.
// Every setting has a default so the service starts with no variables set.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Scylla,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scylla" => Ok(Self::Scylla),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Unknown STORE_BACKEND {0:?} (expected \"scylla\" or \"memory\")")]
    UnknownBackend(String),

    #[error("Invalid SCYLLA_KEYSPACE {0:?}: use letters, digits and underscores")]
    InvalidKeyspace(String),

    #[error("SCYLLA_NODES must list at least one node")]
    NoNodes,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub json_limit: usize,

    // Storage
    pub store_backend: StoreBackend,
    pub scylla_nodes: Vec<String>,
    pub scylla_keyspace: String,

    // Observability
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let server_host = var("SERVER_HOST", "0.0.0.0");
        let server_port = parse_number("SERVER_PORT", var("SERVER_PORT", "3000"))?;
        let json_limit = parse_number("JSON_LIMIT", var("JSON_LIMIT", "32768"))?;

        let store_backend = var("STORE_BACKEND", "scylla").parse()?;

        let scylla_nodes: Vec<String> = var("SCYLLA_NODES", "127.0.0.1:9042")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if store_backend == StoreBackend::Scylla && scylla_nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }

        let scylla_keyspace = var("SCYLLA_KEYSPACE", "customers_ks");
        if !is_cql_identifier(&scylla_keyspace) {
            return Err(ConfigError::InvalidKeyspace(scylla_keyspace));
        }

        let metrics_port = parse_number("METRICS_PORT", var("METRICS_PORT", "9090"))?;

        Ok(Config {
            server_host,
            server_port,
            json_limit,
            store_backend,
            scylla_nodes,
            scylla_keyspace,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

// Unquoted CQL names: letter first, then letters, digits, underscores; max 48.
fn is_cql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 48 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.store_backend, StoreBackend::Scylla);
        assert_eq!(config.scylla_nodes, vec!["127.0.0.1:9042".to_string()]);
        assert_eq!(config.scylla_keyspace, "customers_ks");
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.json_limit, 32 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("STORE_BACKEND", "Memory"),
            ("SCYLLA_NODES", "10.0.0.1:9042, 10.0.0.2:9042"),
            ("SCYLLA_KEYSPACE", "crm"),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.scylla_nodes.len(), 2);
        assert_eq!(config.scylla_nodes[1], "10.0.0.2:9042");
        assert_eq!(config.scylla_keyspace, "crm");
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("SERVER_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "SERVER_PORT", .. }));
    }

    #[test]
    fn test_unknown_backend() {
        let err = config_from(&[("STORE_BACKEND", "mongo")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(_)));
    }

    #[test]
    fn test_keyspace_must_be_identifier() {
        assert!(config_from(&[("SCYLLA_KEYSPACE", "ks; DROP TABLE x")]).is_err());
        assert!(config_from(&[("SCYLLA_KEYSPACE", "1ks")]).is_err());
        assert!(config_from(&[("SCYLLA_KEYSPACE", "ks_2")]).is_ok());
    }

    #[test]
    fn test_empty_nodes_only_matter_for_scylla() {
        let err = config_from(&[("SCYLLA_NODES", " , ")]).unwrap_err();
        assert!(matches!(err, ConfigError::NoNodes));

        assert!(config_from(&[("SCYLLA_NODES", ""), ("STORE_BACKEND", "memory")]).is_ok());
    }
}
