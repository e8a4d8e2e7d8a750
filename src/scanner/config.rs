//! Audit configuration: defaults, optional TOML file, CLI overrides.
//!
//! Precedence is CLI flag > TOML file > built-in default. The defaults match a
//! stock Bitnami Apache layout.

use crate::cli::Args;
use crate::error::AuditError;
use crate::protocols::handshake::DEFAULT_PROBE_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_APACHE_ROOT: &str = "/opt/bitnami/apache2/";
pub const DEFAULT_APACHE_CONF: &str = "/opt/bitnami/apache2/conf/httpd.conf";
pub const DEFAULT_PORT: u16 = 443;

/// Everything one audit run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Installation root used to resolve relative paths
    pub apache_root: PathBuf,
    /// Root configuration file
    pub apache_conf: PathBuf,
    pub hostname: String,
    pub port: u16,
    /// Bound on the handshake probe, in seconds
    pub timeout_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            apache_root: PathBuf::from(DEFAULT_APACHE_ROOT),
            apache_conf: PathBuf::from(DEFAULT_APACHE_CONF),
            hostname: String::new(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_PROBE_TIMEOUT.as_secs(),
        }
    }
}

impl AuditConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| {
            AuditError::FileSystemError {
                path: path.as_ref().to_path_buf(),
                source,
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AuditError> {
        let toml_str = toml::to_string_pretty(self).map_err(|e| AuditError::ConfigError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path.as_ref(), toml_str).map_err(|source| AuditError::FileSystemError {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Example file contents written by `--config-example`
    pub fn example() -> Self {
        Self {
            hostname: "www.example.com".to_string(),
            ..Self::default()
        }
    }

    /// Build the run configuration from CLI Args
    pub fn from_args(args: &Args) -> Result<Self, AuditError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(apache_root) = &args.apache_root {
            config.apache_root = apache_root.clone();
        }
        if let Some(apache_conf) = &args.apache_conf {
            config.apache_conf = apache_conf.clone();
        }
        if let Some(hostname) = &args.hostname {
            config.hostname = hostname.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(timeout) = args.connection.timeout {
            config.timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.hostname.trim().is_empty() {
            crate::audit_bail!("--hostname must be set (or `hostname` in the config file)");
        }
        if self.port == 0 {
            crate::audit_bail!("port must be between 1 and 65535");
        }
        if self.timeout_secs == 0 {
            crate::audit_bail!("timeout must be at least one second");
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
