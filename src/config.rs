// Server configuration options

use crate::seed::SeedConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid listen address {0:?}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),
}

// Where the inventory comes from at startup
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    // The built-in sample dataset
    Sample,
    // A JSON fixture file
    Fixture(PathBuf),
    // Randomly generated listings; the RNG seed makes runs reproducible
    Random { hotels: usize, apartments: usize, rng_seed: Option<u64> },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_source: DataSource,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            data_source: DataSource::Sample,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| ConfigError::InvalidAddress(raw.clone(), e))
    }

    pub fn seed_config(&self) -> Option<SeedConfig> {
        match self.data_source {
            DataSource::Random { hotels, apartments, .. } => Some(SeedConfig {
                hotels,
                apartments,
                ..SeedConfig::default()
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8000");
        assert_eq!(config.data_source, DataSource::Sample);
        assert!(config.seed_config().is_none());
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        let err = config.bind_addr().unwrap_err();
        assert!(err.to_string().contains("not a host:8000"));
    }

    #[test]
    fn test_random_source_yields_seed_config() {
        let config = ServerConfig {
            data_source: DataSource::Random {
                hotels: 5,
                apartments: 2,
                rng_seed: Some(3),
            },
            ..ServerConfig::default()
        };

        let seed = config.seed_config().unwrap();
        assert_eq!(seed.hotels, 5);
        assert_eq!(seed.apartments, 2);
        assert_eq!(seed.max_room_types_per_hotel, 3);
    }
}
