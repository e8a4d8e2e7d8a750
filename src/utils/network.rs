// Network utilities - Probe targets and DNS resolution

use crate::error::AuditError;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::*;
use hickory_resolver::system_conf::read_system_conf;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use tracing::warn;

/// Host and port of the deployment being probed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub hostname: String,
    pub port: u16,
}

impl Target {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    /// Resolve to socket addresses, IPv4 first
    pub async fn socket_addrs(&self) -> Result<Vec<SocketAddr>, AuditError> {
        let ips = resolve_hostname(&self.hostname).await?;
        Ok(ips
            .into_iter()
            .map(|ip| SocketAddr::new(ip, self.port))
            .collect())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hostname.contains(':') {
            write!(f, "[{}]:{}", self.hostname, self.port)
        } else {
            write!(f, "{}:{}", self.hostname, self.port)
        }
    }
}

/// Resolve hostname to IP addresses
pub async fn resolve_hostname(hostname: &str) -> Result<Vec<IpAddr>, AuditError> {
    // Check if it's already an IP address
    if let Ok(ip) = hostname.parse::<IpAddr>() {
        return Ok(vec![ip]);
    }

    let (config, options) = resolver_config();
    let resolver = TokioAsyncResolver::tokio(config, options);

    let response = resolver
        .lookup_ip(hostname)
        .await
        .map_err(|e| AuditError::DnsResolutionFailed {
            hostname: hostname.to_string(),
            details: e.to_string(),
        })?;

    let ips: Vec<IpAddr> = response.iter().collect();

    if ips.is_empty() {
        return Err(AuditError::DnsResolutionFailed {
            hostname: hostname.to_string(),
            details: "no addresses returned".to_string(),
        });
    }

    Ok(ips)
}

/// Host DNS configuration (resolv.conf nameservers and search domains)
///
/// Falls back to hickory's default upstream servers when the system
/// configuration cannot be read.
fn resolver_config() -> (ResolverConfig, ResolverOpts) {
    read_system_conf().unwrap_or_else(|e| {
        warn!("Cannot read system DNS configuration, using defaults: {}", e);
        (ResolverConfig::default(), ResolverOpts::default())
    })
}
