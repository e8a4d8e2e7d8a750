// Scanner module - Audit pipeline orchestration
//
// Configuration discovery feeds certificate extraction; inspection and key
// matching run over the same pair list; the handshake probe only needs the
// target. Only an unreadable root configuration aborts the run.

pub mod config;

use crate::apache::{self, CertKeyPair};
use crate::certificates::{self, CertificateInspection, KeyMatch};
use crate::error::AuditError;
use crate::protocols::{HandshakeProbe, HandshakeProbeResult};
use crate::utils::network::Target;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub use config::AuditConfig;

/// Results of the configuration-driven checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationChecks {
    /// Every configuration file that was loaded
    pub config_files: Vec<PathBuf>,
    pub cert_key_pairs: Vec<CertKeyPair>,
    pub inspections: Vec<CertificateInspection>,
    pub key_matches: Vec<KeyMatch>,
}

/// Complete results of one audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResults {
    pub apache_root: PathBuf,
    pub apache_conf: PathBuf,
    pub hostname: String,
    pub port: u16,
    #[serde(flatten)]
    pub checks: ConfigurationChecks,
    pub handshake: HandshakeProbeResult,
}

/// Runs the audit pipeline for one configuration
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Load the configuration tree and check every declared certificate
    pub fn check_configuration(&self) -> Result<ConfigurationChecks, AuditError> {
        let config_set = apache::resolve(&self.config.apache_conf, &self.config.apache_root)?;
        info!(
            "Loaded {} configuration file(s) from {}",
            config_set.len(),
            self.config.apache_conf.display()
        );

        let cert_key_pairs = apache::extract(&config_set, &self.config.apache_root);
        info!("Found {} SSLCertificateFile declaration(s)", cert_key_pairs.len());

        let inspections = certificates::inspect_all(&cert_key_pairs);
        let key_matches = certificates::match_all(&cert_key_pairs);

        Ok(ConfigurationChecks {
            config_files: config_set.paths().map(PathBuf::from).collect(),
            cert_key_pairs,
            inspections,
            key_matches,
        })
    }

    /// Probe the live server with the inspect-only connector
    pub async fn probe_server(&self) -> HandshakeProbeResult {
        let target = Target::new(self.config.hostname.clone(), self.config.port);
        info!("Probing {}", target);

        HandshakeProbe::new(target)
            .with_timeout(self.config.probe_timeout())
            .probe()
            .await
    }

    /// Run every stage
    pub async fn run(&self) -> Result<AuditResults, AuditError> {
        let checks = self.check_configuration()?;
        let handshake = self.probe_server().await;

        Ok(AuditResults {
            apache_root: self.config.apache_root.clone(),
            apache_conf: self.config.apache_conf.clone(),
            hostname: self.config.hostname.clone(),
            port: self.config.port,
            checks,
            handshake,
        })
    }
}
