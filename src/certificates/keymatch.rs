// Key matcher - Verify each certificate corresponds to its declared private key

use crate::apache::CertKeyPair;
use crate::error::AuditError;
use openssl::pkey::{PKey, Private};
use openssl::x509::X509;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Outcome of matching one certificate against its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatch {
    pub cert_path: PathBuf,
    pub key_path: Option<PathBuf>,
    pub matches: bool,
    pub error: Option<String>,
}

/// Check a single pair; every failure becomes `matches = false`
pub fn match_pair(pair: &CertKeyPair) -> KeyMatch {
    let outcome = match pair.key_path.as_deref() {
        Some(key_path) => verify_key_pair(&pair.cert_path, key_path),
        None => Err(AuditError::MissingKeyPath {
            cert_path: pair.cert_path.clone(),
        }),
    };

    let error = match outcome {
        Ok(()) => None,
        Err(err) => {
            warn!("Certificate and key check failed: {}", err);
            Some(err.to_string())
        }
    };

    KeyMatch {
        cert_path: pair.cert_path.clone(),
        key_path: pair.key_path.clone(),
        matches: error.is_none(),
        error,
    }
}

pub fn match_all(pairs: &[CertKeyPair]) -> Vec<KeyMatch> {
    pairs.iter().map(match_pair).collect()
}

/// Load both files and compare the certificate public key with the key's public half
pub fn verify_key_pair(cert_path: &Path, key_path: &Path) -> Result<(), AuditError> {
    let cert = load_certificate(cert_path)?;
    let key = load_private_key(key_path)?;

    let public_key = cert.public_key()?;
    if public_key.public_eq(&key) {
        Ok(())
    } else {
        Err(AuditError::KeyMismatch {
            cert_path: cert_path.to_path_buf(),
            key_path: key_path.to_path_buf(),
        })
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AuditError> {
    fs::read(path).map_err(|source| AuditError::FileSystemError {
        path: path.to_path_buf(),
        source,
    })
}

/// First `CERTIFICATE` block of a PEM file
fn load_certificate(path: &Path) -> Result<X509, AuditError> {
    let bytes = read_file(path)?;
    Ok(X509::from_pem(&bytes)?)
}

/// PKCS#1, PKCS#8 or SEC1 private key
///
/// Passphrase-protected keys are rejected instead of prompting on the terminal.
fn load_private_key(path: &Path) -> Result<PKey<Private>, AuditError> {
    let bytes = read_file(path)?;
    Ok(PKey::private_key_from_pem_callback(&bytes, |_passphrase| Ok(0))?)
}
