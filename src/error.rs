// Error types for sslcheck
//
// Only the root configuration failure aborts an audit. Everything else is
// folded into per-item result records by the stage that hit it, so these
// variants mostly travel as the `error` text of those records.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// The root Apache configuration could not be read; no audit is possible
    #[error("Cannot read root configuration {path}: {source}")]
    RootConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File system errors on included files, certificates or keys
    #[error("File system error: {path}: {source}")]
    FileSystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// PEM armor present but not decodable
    #[error("PEM parsing error: {0}")]
    PemError(#[from] pem::PemError),

    /// DER payload is not an X.509 certificate
    #[error("Certificate parsing error: {details}")]
    CertificateParse { details: String },

    /// No key path was declared for the certificate
    #[error("No SSLCertificateKeyFile declared for {cert_path}")]
    MissingKeyPath { cert_path: PathBuf },

    /// Certificate public key does not correspond to the private key
    #[error("Certificate {cert_path} does not match key {key_path}")]
    KeyMismatch { cert_path: PathBuf, key_path: PathBuf },

    /// OpenSSL-specific errors
    #[error("OpenSSL error: {0}")]
    OpenSslError(#[from] openssl::error::ErrorStack),

    /// DNS resolution failed for the hostname
    #[error("DNS resolution failed for {hostname}: {details}")]
    DnsResolutionFailed { hostname: String, details: String },

    /// Connect plus handshake did not finish in time
    #[error("Connection to {target} timed out after {duration:?}")]
    ConnectionTimeout { target: String, duration: Duration },

    /// TLS handshake failed or is invalid
    #[error("Invalid TLS handshake: {details}")]
    InvalidHandshake { details: String },

    /// Invalid configuration file or parameters
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Generic I/O error
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl From<rustls::Error> for AuditError {
    fn from(err: rustls::Error) -> Self {
        AuditError::InvalidHandshake {
            details: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        AuditError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Helper macro for returning an `AuditError::Other`
#[macro_export]
macro_rules! audit_bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::AuditError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::AuditError::Other(format!($fmt, $($arg)*)))
    };
}
