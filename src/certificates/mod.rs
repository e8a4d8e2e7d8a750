// Certificates module - Certificate decoding and key correspondence checks

pub mod inspector;
pub mod keymatch;

#[cfg(test)]
pub(crate) mod testutil;

pub use inspector::{CertificateInspection, UNDECODED_SUBJECT, inspect, inspect_all};
pub use keymatch::{KeyMatch, match_all, match_pair};
