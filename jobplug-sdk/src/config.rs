//! Plugin configuration
//!
//! The host hands the plugin its TLS material through environment variables
//! before spawning it. Optional knobs follow the same convention.

use std::path::PathBuf;
use thiserror::Error;

pub const CERT_VAR: &str = "GAIA_PLUGIN_CERT";
pub const KEY_VAR: &str = "GAIA_PLUGIN_KEY";
pub const CA_CERT_VAR: &str = "GAIA_PLUGIN_CA_CERT";
pub const MAX_PARALLEL_JOBS_VAR: &str = "GAIA_PLUGIN_MAX_PARALLEL_JOBS";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Plugin configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server certificate (PEM)
    pub cert_path: PathBuf,

    /// Server private key (PEM)
    pub key_path: PathBuf,

    /// Root CA bundle used to verify client certificates (PEM)
    pub ca_cert_path: PathBuf,

    /// Upper bound on concurrently running handlers, unlimited when `None`
    pub max_parallel_jobs: Option<usize>,
}

impl Config {
    /// Creates a configuration with the given TLS paths and no execution limit
    pub fn new(
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
        ca_cert_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
            ca_cert_path: ca_cert_path.into(),
            max_parallel_jobs: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GAIA_PLUGIN_CERT (required)
    /// - GAIA_PLUGIN_KEY (required)
    /// - GAIA_PLUGIN_CA_CERT (required)
    /// - GAIA_PLUGIN_MAX_PARALLEL_JOBS (optional, positive integer, default: unlimited)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let mut config = Self::new(required(CERT_VAR)?, required(KEY_VAR)?, required(CA_CERT_VAR)?);

        if let Some(raw) = lookup(MAX_PARALLEL_JOBS_VAR) {
            let limit = raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{} must be a positive integer, got '{}'",
                    MAX_PARALLEL_JOBS_VAR, raw
                ))
            })?;
            config.max_parallel_jobs = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the execution limit
    pub fn with_max_parallel_jobs(mut self, limit: usize) -> Self {
        self.max_parallel_jobs = Some(limit);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cert_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("cert_path cannot be empty".into()));
        }

        if self.key_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("key_path cannot be empty".into()));
        }

        if self.ca_cert_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("ca_cert_path cannot be empty".into()));
        }

        if self.max_parallel_jobs == Some(0) {
            return Err(ConfigError::Invalid(
                "max_parallel_jobs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_from_lookup() {
        let env = vars(&[
            (CERT_VAR, "/certs/server.pem"),
            (KEY_VAR, "/certs/server.key"),
            (CA_CERT_VAR, "/certs/ca.pem"),
        ]);

        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.cert_path, PathBuf::from("/certs/server.pem"));
        assert_eq!(config.key_path, PathBuf::from("/certs/server.key"));
        assert_eq!(config.ca_cert_path, PathBuf::from("/certs/ca.pem"));
        assert_eq!(config.max_parallel_jobs, None);
    }

    #[test]
    fn test_variable_names_match_host() {
        assert_eq!(CERT_VAR, "GAIA_PLUGIN_CERT");
        assert_eq!(KEY_VAR, "GAIA_PLUGIN_KEY");
        assert_eq!(CA_CERT_VAR, "GAIA_PLUGIN_CA_CERT");

        let env = vars(&[
            ("GAIA_PLUGIN_CERT", "server.pem"),
            ("GAIA_PLUGIN_KEY", "server.key"),
            ("GAIA_PLUGIN_CA_CERT", "ca.pem"),
        ]);
        assert!(Config::from_lookup(|name| env.get(name).cloned()).is_ok());

        let legacy = vars(&[
            ("PLUGIN_CERT", "server.pem"),
            ("PLUGIN_KEY", "server.key"),
            ("PLUGIN_CA_CERT", "ca.pem"),
        ]);
        assert_eq!(
            Config::from_lookup(|name| legacy.get(name).cloned()).unwrap_err(),
            ConfigError::MissingVar("GAIA_PLUGIN_CERT")
        );
    }

    #[test]
    fn test_missing_variable() {
        let env = vars(&[(CERT_VAR, "/certs/server.pem"), (KEY_VAR, "/certs/server.key")]);

        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(CA_CERT_VAR));
    }

    #[test]
    fn test_max_parallel_jobs() {
        let mut env = vars(&[
            (CERT_VAR, "a"),
            (KEY_VAR, "b"),
            (CA_CERT_VAR, "c"),
            (MAX_PARALLEL_JOBS_VAR, "4"),
        ]);

        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.max_parallel_jobs, Some(4));

        env.insert(MAX_PARALLEL_JOBS_VAR.to_string(), "0".to_string());
        assert!(Config::from_lookup(|name| env.get(name).cloned()).is_err());

        env.insert(MAX_PARALLEL_JOBS_VAR.to_string(), "many".to_string());
        assert!(matches!(
            Config::from_lookup(|name| env.get(name).cloned()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("cert.pem", "key.pem", "ca.pem");
        assert!(config.validate().is_ok());

        config.key_path = PathBuf::new();
        assert!(config.validate().is_err());

        config.key_path = PathBuf::from("key.pem");
        config = config.with_max_parallel_jobs(0);
        assert!(config.validate().is_err());
    }
}
