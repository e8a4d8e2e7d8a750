// Shared fixtures: a Bitnami-style Apache tree with freshly minted certificates

#![allow(dead_code)]

use openssl::pkey::{PKey, Private};
use openssl::x509::X509;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[path = "../../src/certificates/testutil.rs"]
mod testutil;

pub use testutil::generate_certificate_with_subject;

/// Self-signed RSA certificate for `common_name`
pub fn generate_certificate(common_name: &str) -> (X509, PKey<Private>) {
    testutil::generate_certificate(Some(common_name))
}

/// Apache installation rooted in a temporary directory
pub struct ApacheTree {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl ApacheTree {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("apache2");
        fs::create_dir_all(&root).expect("create apache root");
        Self { _tmp: tmp, root }
    }

    /// Stock layout: httpd.conf includes conf/bitnami/bitnami.conf, which
    /// declares ssl/cert.pem and ssl/key.pem for www.example.com
    pub fn bitnami() -> Self {
        let tree = Self::new();
        tree.write(
            "conf/httpd.conf",
            "ServerRoot \"/opt/bitnami/apache2\"\n\
             Listen 80\n\
             #Include conf/extra/httpd-ssl.conf\n\
             Include \"conf/bitnami/bitnami.conf\"\n",
        );
        tree.write(
            "conf/bitnami/bitnami.conf",
            "<VirtualHost _default_:443>\n\
             \x20 SSLEngine on\n\
             \x20 SSLCertificateFile \"ssl/cert.pem\"\n\
             \x20 SSLCertificateKeyFile \"ssl/key.pem\"\n\
             </VirtualHost>\n",
        );
        let (cert, key) = generate_certificate("www.example.com");
        tree.write_bytes("ssl/cert.pem", &cert.to_pem().unwrap());
        tree.write_bytes("ssl/key.pem", &key.private_key_to_pem_pkcs8().unwrap());
        tree
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn httpd_conf(&self) -> PathBuf {
        self.path("conf/httpd.conf")
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        self.write_bytes(rel, content.as_bytes())
    }

    pub fn write_bytes(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }
}
