// Handshake probe - Observe the certificate a live server presents

use crate::certificates::inspector::subject_common_name;
use crate::error::AuditError;
use crate::protocols::inspect_only::inspect_only_connector;
use crate::utils::network::Target;
use rustls_pki_types::ServerName;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Subject reported when no certificate could be read from the server
pub const UNOBTAINED_SUBJECT: &str = "could not obtain certificate";

/// Default bound on DNS + connect + handshake
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of the single connection attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeProbeResult {
    pub hostname: String,
    pub port: u16,
    /// TCP connect and TLS handshake both completed
    pub connected: bool,
    /// Subject common name of the leaf certificate, or `UNOBTAINED_SUBJECT`
    pub peer_subject: String,
    pub error: Option<String>,
}

/// One-shot TLS probe against a target
///
/// Uses the inspect-only connector: the peer certificate is read, never
/// trusted. A failure or timeout is reported once and never retried.
pub struct HandshakeProbe {
    target: Target,
    probe_timeout: Duration,
}

impl HandshakeProbe {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub async fn probe(&self) -> HandshakeProbeResult {
        let outcome = match timeout(self.probe_timeout, self.fetch_leaf_certificate()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AuditError::ConnectionTimeout {
                target: self.target.to_string(),
                duration: self.probe_timeout,
            }),
        };

        let leaf = match outcome {
            Ok(leaf) => leaf,
            Err(err) => {
                warn!("Cannot connect to {}: {}", self.target, err);
                return self.result(false, UNOBTAINED_SUBJECT.to_string(), Some(err));
            }
        };

        let subject = leaf
            .ok_or_else(|| AuditError::InvalidHandshake {
                details: "server presented no certificate".to_string(),
            })
            .and_then(|der| subject_common_name(&der));

        match subject {
            Ok(subject) => {
                debug!("{} presented certificate for {:?}", self.target, subject);
                self.result(true, subject, None)
            }
            Err(err) => {
                warn!("Connected to {} but cannot read its certificate: {}", self.target, err);
                self.result(true, UNOBTAINED_SUBJECT.to_string(), Some(err))
            }
        }
    }

    /// Connect, handshake and return the DER of the first presented certificate
    async fn fetch_leaf_certificate(&self) -> Result<Option<Vec<u8>>, AuditError> {
        let addr = *self
            .target
            .socket_addrs()
            .await?
            .first()
            .ok_or_else(|| AuditError::DnsResolutionFailed {
                hostname: self.target.hostname.clone(),
                details: "no addresses returned".to_string(),
            })?;

        debug!("Connecting to {} ({})", self.target, addr);
        let stream = TcpStream::connect(addr).await?;

        let connector = inspect_only_connector()?;
        let server_name = ServerName::try_from(self.target.hostname.as_str())
            .map_err(|_| AuditError::InvalidHandshake {
                details: format!("invalid server name {}", self.target.hostname),
            })?
            .to_owned();

        let tls_stream = connector
            .connect(server_name, stream)
            .await
            .map_err(|e| AuditError::InvalidHandshake {
                details: e.to_string(),
            })?;

        let (_io, connection) = tls_stream.get_ref();
        Ok(connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .map(|cert| cert.to_vec()))
    }

    fn result(
        &self,
        connected: bool,
        peer_subject: String,
        error: Option<AuditError>,
    ) -> HandshakeProbeResult {
        HandshakeProbeResult {
            hostname: self.target.hostname.clone(),
            port: self.target.port,
            connected,
            peer_subject,
            error: error.map(|e| e.to_string()),
        }
    }
}
