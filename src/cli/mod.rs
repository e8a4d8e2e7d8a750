// CLI module - Command line interface and argument parsing

use clap::Parser;
use std::path::PathBuf;

mod connection_args;
mod output_args;

pub use connection_args::ConnectionArgs;
pub use output_args::OutputArgs;

/// sslcheck - Audit the TLS setup of an Apache deployment
///
/// Finds the certificate/key pairs referenced by the Apache configuration
/// (following `Include` directives), checks each certificate decodes and
/// matches its key, then connects to the live server to see which
/// certificate it presents.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sslcheck", version)]
#[command(about = "Apache TLS deployment auditor", long_about = None)]
pub struct Args {
    // ============ Apache Installation ============
    /// Root of the Apache installation, used to resolve relative paths
    #[arg(long = "apache-root", value_name = "DIR")]
    pub apache_root: Option<PathBuf>,

    /// Root Apache configuration file
    #[arg(long = "apache-conf", value_name = "FILE")]
    pub apache_conf: Option<PathBuf>,

    // ============ Target ============
    /// Web application hostname to probe
    #[arg(long = "hostname", value_name = "HOST")]
    pub hostname: Option<String>,

    /// Web application port
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    // ============ Configuration File ============
    /// Load settings from a TOML audit file (flags take precedence)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write an example TOML audit file and exit
    #[arg(long = "config-example", value_name = "FILE")]
    pub config_example: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}
