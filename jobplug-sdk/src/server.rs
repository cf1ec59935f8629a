//! Secure gRPC server
//!
//! Loads the mutual-TLS material, binds an ephemeral loopback port and wires
//! the health service and the job dispatcher into one router. Clients must
//! present a certificate signed by the configured root CA.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::{Certificate, Identity, Server, ServerTlsConfig};
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::{debug, info};

use crate::config::Config;
use crate::dispatcher::JobDispatcher;
use crate::error::{Result, ServeError};
use crate::proto::plugin_server::PluginServer;

/// Reads the certificate, key and root CA and builds the server TLS config
///
/// # Errors
/// Returns [`ServeError::TlsMaterial`] naming the first file that cannot be read.
pub fn load_tls(config: &Config) -> Result<ServerTlsConfig> {
    let cert = read_material("certificate", &config.cert_path)?;
    let key = read_material("key", &config.key_path)?;
    let ca_cert = read_material("root CA certificate", &config.ca_cert_path)?;

    debug!("Loaded TLS material from {}", config.cert_path.display());

    Ok(ServerTlsConfig::new()
        .identity(Identity::from_pem(cert, key))
        .client_ca_root(Certificate::from_pem(ca_cert)))
}

fn read_material(what: &'static str, path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ServeError::TlsMaterial {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Binds a listener on 127.0.0.1 with an OS-assigned port
pub async fn bind_loopback() -> Result<TcpListener> {
    TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .map_err(ServeError::Bind)
}

/// Bound, fully registered server that has not started accepting yet
pub struct SecureServer {
    router: Router,
    listener: TcpListener,
    local_addr: SocketAddr,
    health: HealthReporter,
}

impl SecureServer {
    /// Prepares the server
    ///
    /// TLS material is read before any socket is opened. Once bound, the
    /// health service reports SERVING and the dispatcher is registered.
    pub async fn bind(config: &Config, dispatcher: JobDispatcher) -> Result<Self> {
        let tls = load_tls(config)?;

        let listener = bind_loopback().await?;
        let local_addr = listener.local_addr().map_err(ServeError::Bind)?;
        info!("Listening on {}", local_addr);

        let (mut health, health_service) = tonic_health::server::health_reporter();
        health
            .set_service_status("", ServingStatus::Serving)
            .await;
        health.set_serving::<PluginServer<JobDispatcher>>().await;

        let router = Server::builder()
            .tls_config(tls)?
            .add_service(health_service)
            .add_service(PluginServer::new(dispatcher));

        Ok(Self {
            router,
            listener,
            local_addr,
            health,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until `signal` resolves
    ///
    /// Health flips to NOT_SERVING as soon as the signal fires so the host
    /// stops routing work while in-flight calls drain.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let mut health = self.health;
        let shutdown = async move {
            signal.await;
            info!("Shutdown requested");
            health
                .set_service_status("", ServingStatus::NotServing)
                .await;
            health
                .set_not_serving::<PluginServer<JobDispatcher>>()
                .await;
        };

        self.router
            .serve_with_incoming_shutdown(TcpListenerStream::new(self.listener), shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobplug_core::JobRegistry;
    use std::sync::Arc;

    #[test]
    fn test_missing_certificate() {
        let config = Config::new(
            "/nonexistent/server.pem",
            "/nonexistent/server.key",
            "/nonexistent/ca.pem",
        );

        match load_tls(&config) {
            Err(ServeError::TlsMaterial { what, path, .. }) => {
                assert_eq!(what, "certificate");
                assert_eq!(path, Path::new("/nonexistent/server.pem"));
            }
            other => panic!("expected TLS material error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_key_is_reported_after_certificate() {
        let cert = std::env::current_exe().unwrap();
        let config = Config::new(&cert, "/nonexistent/server.key", "/nonexistent/ca.pem");

        match load_tls(&config) {
            Err(ServeError::TlsMaterial { what, .. }) => assert_eq!(what, "key"),
            other => panic!("expected TLS material error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_bind_loopback_assigns_port() {
        let listener = bind_loopback().await.unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_fails_without_tls_material() {
        let registry = JobRegistry::build(Vec::new()).unwrap();
        let dispatcher = JobDispatcher::new(Arc::new(registry));
        let config = Config::new("/nonexistent/a", "/nonexistent/b", "/nonexistent/c");

        let result = SecureServer::bind(&config, dispatcher).await;
        assert!(matches!(result, Err(ServeError::TlsMaterial { .. })));
    }
}
