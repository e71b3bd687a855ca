use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    /// File name prefix; each process logs to `{log_file}-{service}.log`
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// When false, per-call tail events (target `tail`) are filtered out
    pub enable_tracing: bool,
    pub product: ServiceConfig,
    pub order: ServiceConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub product_url: String,
    pub order_url: String,
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

fn default_upstream_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "minishop".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            enable_tracing: false,
            product: ServiceConfig {
                host: "0.0.0.0".to_string(),
                port: 8081,
            },
            order: ServiceConfig {
                host: "0.0.0.0".to_string(),
                port: 8082,
            },
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            product_url: "http://localhost:8081".to_string(),
            order_url: "http://localhost:8082".to_string(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`, then apply environment overrides.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// `PRODUCT_SERVICE_URL` / `ORDER_SERVICE_URL` win over the yaml
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PRODUCT_SERVICE_URL") {
            self.gateway.product_url = url;
        }
        if let Ok(url) = std::env::var("ORDER_SERVICE_URL") {
            self.gateway.order_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
log_level: debug
log_dir: /tmp/logs
log_file: shop
use_json: true
rotation: hourly
enable_tracing: true
product: { host: 127.0.0.1, port: 9001 }
order: { host: 127.0.0.1, port: 9002 }
gateway:
  host: 127.0.0.1
  port: 9000
  product_url: http://products:9001
  order_url: http://orders:9002
  upstream_timeout_ms: 2500
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.use_json);
        assert_eq!(config.product.port, 9001);
        assert_eq!(config.order.port, 9002);
        assert_eq!(config.gateway.product_url, "http://products:9001");
        assert_eq!(config.gateway.upstream_timeout_ms, 2500);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = AppConfig::from_yaml("log_level: warn\n").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.product.port, 8081);
        assert_eq!(config.order.port, 8082);
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.order_url, "http://localhost:8082");
    }

    #[test]
    fn test_timeout_defaults_when_omitted() {
        let yaml = r#"
gateway:
  host: 0.0.0.0
  port: 8080
  product_url: http://a
  order_url: http://b
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.gateway.upstream_timeout_ms, 10_000);
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = AppConfig::from_yaml("product: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::load("no-such-env").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
