// sslcheck - Apache TLS deployment auditor
// Licensed under GPL-3.0

//! sslcheck audits the TLS setup of an Apache httpd deployment. It follows the
//! configuration's `Include` tree to find every `SSLCertificateFile` /
//! `SSLCertificateKeyFile` pair, checks each certificate decodes and matches
//! its key, and opens one inspect-only TLS connection to the live server to
//! report the certificate it presents.

pub mod apache;
pub mod certificates;
pub mod cli;
pub mod error;
pub mod output;
pub mod protocols;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::error::AuditError;
pub use crate::output::OutputFormat;
pub use crate::scanner::{AuditConfig, AuditResults, Auditor};

/// Result type for sslcheck operations
pub type Result<T> = anyhow::Result<T>;
