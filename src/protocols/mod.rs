// Protocols module - Live TLS handshake probing

pub mod handshake;
pub mod inspect_only;

pub use handshake::{HandshakeProbe, HandshakeProbeResult, UNOBTAINED_SUBJECT};
