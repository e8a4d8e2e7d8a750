// Apache module - Configuration discovery and certificate reference extraction

pub mod directives;
pub mod extractor;
pub mod loader;

pub use extractor::{CertKeyPair, extract};
pub use loader::{ConfigSet, resolve};
