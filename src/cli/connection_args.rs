// Connection and timeout configuration arguments

use clap::Args;

/// Connection options for the live handshake probe
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Bound on DNS lookup, TCP connect and TLS handshake, in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}
