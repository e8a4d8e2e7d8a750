// Certificate reference extraction - SSLCertificateFile / SSLCertificateKeyFile pairs

use crate::apache::directives::{Directive, resolve_path};
use crate::apache::loader::ConfigSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A certificate declared in a configuration file and the key declared with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertKeyPair {
    /// Configuration file holding the declaration
    pub config_path: PathBuf,
    pub cert_path: PathBuf,
    /// `None` when the file declares fewer keys than certificates
    pub key_path: Option<PathBuf>,
}

/// Extract every certificate/key pair declared across `config_set`
///
/// Within one file the Nth `SSLCertificateFile` is paired with the Nth
/// `SSLCertificateKeyFile`, whatever their relative line order. Surplus
/// certificates get no key. Output follows `config_set` iteration order.
pub fn extract(config_set: &ConfigSet, install_root: &Path) -> Vec<CertKeyPair> {
    let mut pairs = Vec::new();

    for (config_path, content) in config_set.iter() {
        let certs = Directive::SslCertificateFile.find_all(content);
        let keys = Directive::SslCertificateKeyFile.find_all(content);

        if certs.len() != keys.len() && !certs.is_empty() {
            debug!(
                "{} declares {} {} and {} {}",
                config_path.display(),
                certs.len(),
                Directive::SslCertificateFile.keyword(),
                keys.len(),
                Directive::SslCertificateKeyFile.keyword()
            );
        }

        for (index, cert) in certs.iter().enumerate() {
            pairs.push(CertKeyPair {
                config_path: config_path.to_path_buf(),
                cert_path: resolve_path(cert, install_root),
                key_path: keys.get(index).map(|key| resolve_path(key, install_root)),
            });
        }
    }

    pairs
}
