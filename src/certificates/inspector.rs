// Certificate inspector - Read and decode certificates referenced by the configuration

use crate::apache::CertKeyPair;
use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use x509_parser::der_parser::asn1_rs::Tag;
use x509_parser::prelude::{AttributeTypeAndValue, FromDer, X509Certificate};

/// Subject reported when a certificate cannot be read or decoded
pub const UNDECODED_SUBJECT: &str = "could not decode certificate";

/// Outcome of inspecting one certificate file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInspection {
    pub cert_path: PathBuf,
    /// File could be opened and read
    pub readable: bool,
    /// First PEM block holds a parseable X.509 certificate
    pub decodable: bool,
    /// Subject common name, or `UNDECODED_SUBJECT`
    pub subject: String,
    pub error: Option<String>,
}

/// Inspect the certificate of a single pair
pub fn inspect(pair: &CertKeyPair) -> CertificateInspection {
    inspect_file(&pair.cert_path)
}

/// Inspect every pair independently; a bad certificate never stops the batch
pub fn inspect_all(pairs: &[CertKeyPair]) -> Vec<CertificateInspection> {
    pairs.iter().map(inspect).collect()
}

/// Read `path` and decode its first PEM block as a certificate
pub fn inspect_file(path: &Path) -> CertificateInspection {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let err = AuditError::FileSystemError {
                path: path.to_path_buf(),
                source,
            };
            warn!("{}", err);
            return CertificateInspection {
                cert_path: path.to_path_buf(),
                readable: false,
                decodable: false,
                subject: UNDECODED_SUBJECT.to_string(),
                error: Some(err.to_string()),
            };
        }
    };

    match decode_first_pem_block(&bytes).and_then(|der| subject_common_name(&der)) {
        Ok(subject) => CertificateInspection {
            cert_path: path.to_path_buf(),
            readable: true,
            decodable: true,
            subject,
            error: None,
        },
        Err(err) => {
            warn!("Cannot decode certificate {}: {}", path.display(), err);
            CertificateInspection {
                cert_path: path.to_path_buf(),
                readable: true,
                decodable: false,
                subject: UNDECODED_SUBJECT.to_string(),
                error: Some(err.to_string()),
            }
        }
    }
}

/// DER contents of the first PEM block in `bytes`, whatever its label
fn decode_first_pem_block(bytes: &[u8]) -> Result<Vec<u8>, AuditError> {
    let block = ::pem::parse(bytes)?;
    Ok(block.contents().to_vec())
}

/// Subject common name of a DER-encoded certificate
///
/// A certificate without a CN yields an empty string, which is a valid subject.
pub fn subject_common_name(der: &[u8]) -> Result<String, AuditError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| AuditError::CertificateParse {
        details: e.to_string(),
    })?;

    match cert.subject().iter_common_name().next() {
        Some(cn) => Ok(decode_attribute(cn)),
        None => Ok(String::new()),
    }
}

/// Text of a name attribute, including the wide string types `as_str` refuses
///
/// Anything else is decoded lossily and logged, so it never reads as a missing CN.
fn decode_attribute(attr: &AttributeTypeAndValue<'_>) -> String {
    if let Ok(text) = attr.as_str() {
        return text.to_string();
    }

    let value = attr.attr_value();
    let data = value.data;
    let decoded = match value.tag() {
        Tag::VisibleString => std::str::from_utf8(data).ok().map(str::to_string),
        // Latin-1 in practice
        Tag::T61String => Some(data.iter().map(|&b| char::from(b)).collect()),
        Tag::BmpString if data.len() % 2 == 0 => char::decode_utf16(
            data.chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
        )
        .collect::<Result<String, _>>()
        .ok(),
        Tag::UniversalString if data.len() % 4 == 0 => data
            .chunks_exact(4)
            .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
            .collect::<Option<String>>(),
        _ => None,
    };

    decoded.unwrap_or_else(|| {
        warn!("Subject common name has undecodable {:?} value", value.tag());
        String::from_utf8_lossy(data).into_owned()
    })
}
