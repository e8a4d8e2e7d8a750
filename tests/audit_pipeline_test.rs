// End-to-end audit against a local TLS server

mod common;

use common::{ApacheTree, generate_certificate};
use rustls::ServerConfig;
use rustls_pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use sslcheck::output::{json, terminal};
use sslcheck::scanner::{AuditConfig, Auditor};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// Serve the certificate/key pair stored in the tree for one connection
async fn serve_tree_certificate(cert_pem: &Path, key_pem: &Path) -> u16 {
    let cert = openssl::x509::X509::from_pem(&std::fs::read(cert_pem).unwrap()).unwrap();
    let key = openssl::pkey::PKey::private_key_from_pem(&std::fs::read(key_pem).unwrap()).unwrap();

    let config =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(
                vec![CertificateDer::from(cert.to_der().unwrap())],
                PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.private_key_to_pkcs8().unwrap())),
            )
            .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            let _ = acceptor.accept(stream).await;
        }
    });

    port
}

#[tokio::test]
async fn test_audit_matches_served_certificate() {
    let tree = ApacheTree::bitnami();
    let port = serve_tree_certificate(&tree.path("ssl/cert.pem"), &tree.path("ssl/key.pem")).await;

    let auditor = Auditor::new(AuditConfig {
        apache_root: tree.root.clone(),
        apache_conf: tree.httpd_conf(),
        hostname: "127.0.0.1".to_string(),
        port,
        timeout_secs: 5,
    });

    let results = auditor.run().await.unwrap();

    assert_eq!(results.checks.config_files.len(), 2);
    assert_eq!(results.checks.inspections[0].subject, "www.example.com");
    assert!(results.checks.key_matches[0].matches);
    assert!(results.handshake.connected, "{:?}", results.handshake.error);
    assert_eq!(results.handshake.peer_subject, results.checks.inspections[0].subject);

    let report = terminal::render(&results);
    assert!(report.contains("www.example.com"));
    assert!(report.contains("HTTPS Connection with Server"));

    let document = json::generate_json(&results, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&document).unwrap();
    assert_eq!(value["handshake"]["connected"], true);
    assert_eq!(value["inspections"][0]["subject"], "www.example.com");
}

#[tokio::test]
async fn test_server_presents_different_certificate() {
    let tree = ApacheTree::bitnami();
    let (stale, stale_key) = generate_certificate("old.example.com");
    let stale_cert = tree.write_bytes("stale/cert.pem", &stale.to_pem().unwrap());
    let stale_key = tree.write_bytes("stale/key.pem", &stale_key.private_key_to_pem_pkcs8().unwrap());
    let port = serve_tree_certificate(&stale_cert, &stale_key).await;

    let auditor = Auditor::new(AuditConfig {
        apache_root: tree.root.clone(),
        apache_conf: tree.httpd_conf(),
        hostname: "127.0.0.1".to_string(),
        port,
        timeout_secs: 5,
    });

    let results = auditor.run().await.unwrap();
    assert!(results.handshake.connected);
    assert_eq!(results.handshake.peer_subject, "old.example.com");
    assert_ne!(results.handshake.peer_subject, results.checks.inspections[0].subject);
}

#[tokio::test]
async fn test_unreachable_server_still_reports_configuration() {
    let tree = ApacheTree::bitnami();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let auditor = Auditor::new(AuditConfig {
        apache_root: tree.root.clone(),
        apache_conf: tree.httpd_conf(),
        hostname: "127.0.0.1".to_string(),
        port,
        timeout_secs: 2,
    });

    let results = auditor.run().await.unwrap();
    assert!(!results.handshake.connected);
    assert!(results.checks.key_matches[0].matches);
}
