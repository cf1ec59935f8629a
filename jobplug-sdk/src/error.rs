//! Error types for the plugin runtime

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use jobplug_core::RegistryError;

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, ServeError>;

/// Errors that abort plugin startup
///
/// None of these leave a partially started server behind.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid job list: {0}")]
    Registry(#[from] RegistryError),

    /// TLS material could not be read
    #[error("cannot read {what} at {}: {source}", .path.display())]
    TlsMaterial {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("failed to write handshake: {0}")]
    Handshake(#[source] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Per-call errors raised by the dispatcher
///
/// These fail a single RPC and never affect the server or the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("job not found in plugin: {0}")]
    JobNotFound(u32),
}

impl From<DispatchError> for tonic::Status {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::JobNotFound(_) => tonic::Status::not_found(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_not_found_maps_to_not_found_status() {
        let status: tonic::Status = DispatchError::JobNotFound(42).into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert!(status.message().contains("42"));
    }

    #[test]
    fn test_registry_error_conversion() {
        let err: ServeError = RegistryError::DuplicateJob {
            title: "Lint".to_string(),
        }
        .into();
        assert!(matches!(err, ServeError::Registry(_)));
        assert!(err.to_string().contains("Lint"));
    }
}
