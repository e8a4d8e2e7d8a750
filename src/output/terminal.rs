// Terminal Output Module - Human-readable audit report
//
// Presentation only: every section walks its result list in order and prints
// what the pipeline recorded.

use crate::apache::CertKeyPair;
use crate::certificates::{CertificateInspection, KeyMatch};
use crate::protocols::HandshakeProbeResult;
use crate::scanner::AuditResults;
use colored::*;
use std::fmt::Write;
use std::path::Path;

/// Format a boolean value as a colored Y/X indicator with descriptive text
fn format_bool_indicator(value: bool, yes_text: &str, no_text: &str) -> ColoredString {
    if value {
        format!("Y {}", yes_text).green()
    } else {
        format!("X {}", no_text).red()
    }
}

fn section_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.cyan().bold());
    let _ = writeln!(out, "{}", "=".repeat(50));
}

fn display_key_path(key_path: Option<&Path>) -> String {
    key_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none declared)".to_string())
}

fn write_error(out: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(out, "  - Reason: {}", error.yellow());
    }
}

/// Render the full report
pub fn render(results: &AuditResults) -> String {
    let mut out = String::new();

    render_parameters(&mut out, results);
    render_cert_key_pairs(&mut out, &results.checks.cert_key_pairs);
    render_inspections(&mut out, &results.checks.inspections);
    render_key_matches(&mut out, &results.checks.key_matches);
    render_handshake(&mut out, &results.handshake);

    out
}

fn render_parameters(out: &mut String, results: &AuditResults) {
    section_header(out, "SSL CHECKS");
    let _ = writeln!(out, "  - Apache root: {}", results.apache_root.display());
    let _ = writeln!(out, "  - Apache configuration: {}", results.apache_conf.display());
    let _ = writeln!(out, "  - Hostname: {}", results.hostname);
    let _ = writeln!(out, "  - Port: {}", results.port);
    let _ = writeln!(
        out,
        "  - Configuration files loaded: {}",
        results.checks.config_files.len()
    );
    for path in &results.checks.config_files {
        let _ = writeln!(out, "      {}", path.display().to_string().dimmed());
    }
}

fn render_cert_key_pairs(out: &mut String, pairs: &[CertKeyPair]) {
    section_header(out, "Included SSL Certificates in Apache");
    if pairs.is_empty() {
        let _ = writeln!(out, "  {}", "No SSLCertificateFile directives found".yellow());
        return;
    }

    for (index, pair) in pairs.iter().enumerate() {
        let _ = writeln!(out, "  Occurrence #{}", index + 1);
        let _ = writeln!(out, "  - Apache file: {}", pair.config_path.display());
        let _ = writeln!(out, "  - Certificate file: {}", pair.cert_path.display());
        let _ = writeln!(out, "  - Key file: {}", display_key_path(pair.key_path.as_deref()));
    }
}

fn render_inspections(out: &mut String, inspections: &[CertificateInspection]) {
    section_header(out, "Decode SSL Certificate");
    for (index, inspection) in inspections.iter().enumerate() {
        let _ = writeln!(out, "  Occurrence #{}", index + 1);
        let _ = writeln!(out, "  - Certificate file: {}", inspection.cert_path.display());
        let _ = writeln!(
            out,
            "  - Certificate can be opened: {}",
            format_bool_indicator(inspection.readable, "yes", "no")
        );
        let _ = writeln!(
            out,
            "  - Certificate can be decoded: {}",
            format_bool_indicator(inspection.decodable, "yes", "no")
        );
        let _ = writeln!(out, "  - Certificate domain: {}", inspection.subject);
        write_error(out, inspection.error.as_deref());
    }
}

fn render_key_matches(out: &mut String, matches: &[KeyMatch]) {
    section_header(out, "Certificate and Key Match");
    for (index, key_match) in matches.iter().enumerate() {
        let _ = writeln!(out, "  Occurrence #{}", index + 1);
        let _ = writeln!(out, "  - Certificate file: {}", key_match.cert_path.display());
        let _ = writeln!(
            out,
            "  - Key file: {}",
            display_key_path(key_match.key_path.as_deref())
        );
        let _ = writeln!(
            out,
            "  - Certificate and key match: {}",
            format_bool_indicator(key_match.matches, "match", "mismatch")
        );
        write_error(out, key_match.error.as_deref());
    }
}

fn render_handshake(out: &mut String, handshake: &HandshakeProbeResult) {
    section_header(out, "HTTPS Connection with Server");
    let _ = writeln!(out, "  - Hostname: {}", handshake.hostname);
    let _ = writeln!(out, "  - Port: {}", handshake.port);
    let _ = writeln!(
        out,
        "  - Can connect: {}",
        format_bool_indicator(handshake.connected, "yes", "no")
    );
    let _ = writeln!(out, "  - Server certificate domain: {}", handshake.peer_subject);
    write_error(out, handshake.error.as_deref());
}
