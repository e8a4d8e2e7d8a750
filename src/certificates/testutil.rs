// Test fixtures - self-signed certificates minted with OpenSSL
//
// Also compiled into the integration tests through `tests/common`.

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509, X509Builder, X509NameBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Self-signed RSA certificate, with `CN=common_name` when given
pub fn generate_certificate(common_name: Option<&str>) -> (X509, PKey<Private>) {
    generate_certificate_with_subject(|name| match common_name {
        Some(cn) => name.append_entry_by_text("CN", cn),
        None => Ok(()),
    })
}

/// Self-signed RSA certificate; `subject` adds entries after `C` and `O`
pub fn generate_certificate_with_subject<F>(subject: F) -> (X509, PKey<Private>)
where
    F: FnOnce(&mut X509NameBuilder) -> Result<(), ErrorStack>,
{
    let rsa = Rsa::generate(2048).unwrap();
    let pkey = PKey::from_rsa(rsa).unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();

    let mut serial = BigNum::new().unwrap();
    serial.rand(128, MsbOption::MAYBE_ZERO, false).unwrap();
    let serial = serial.to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();

    let mut name_builder = X509NameBuilder::new().unwrap();
    name_builder.append_entry_by_text("C", "US").unwrap();
    name_builder.append_entry_by_text("O", "Test").unwrap();
    subject(&mut name_builder).unwrap();
    let name = name_builder.build();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();

    let not_before = Asn1Time::days_from_now(0).unwrap();
    let not_after = Asn1Time::days_from_now(365).unwrap();
    builder.set_not_before(&not_before).unwrap();
    builder.set_not_after(&not_after).unwrap();

    builder.set_pubkey(&pkey).unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();

    (builder.build(), pkey)
}

pub fn write_pem(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
