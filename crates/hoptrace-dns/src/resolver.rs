use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use thiserror::Error;

/// A DNS resolver.
pub trait Resolver {
    /// Perform a blocking DNS hostname lookup and return the resolved IPv4 or IPv6 addresses.
    fn lookup(&self, hostname: impl AsRef<str>) -> Result<ResolvedIpAddrs>;

    /// Perform a blocking reverse DNS lookup of `IpAddr` and return a `DnsEntry`.
    #[must_use]
    fn reverse_lookup(&self, addr: impl Into<IpAddr>) -> DnsEntry;
}

impl<T: Resolver> Resolver for &T {
    fn lookup(&self, hostname: impl AsRef<str>) -> Result<ResolvedIpAddrs> {
        (**self).lookup(hostname)
    }

    fn reverse_lookup(&self, addr: impl Into<IpAddr>) -> DnsEntry {
        (**self).reverse_lookup(addr)
    }
}

/// A DNS resolver error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A DNS resolver error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("DNS lookup failed: {0}")]
    LookupFailed(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("no addresses found for {0}")]
    NoAddresses(String),
    #[error("failed to start resolver: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// The output of a successful DNS lookup.
///
/// Never empty.
#[derive(Debug, Clone)]
pub struct ResolvedIpAddrs(pub(super) Vec<IpAddr>);

impl ResolvedIpAddrs {
    pub fn iter(&self) -> impl Iterator<Item = &'_ IpAddr> {
        self.0.iter()
    }

    /// The first IPv4 address, or the first address of any family if there is none.
    #[must_use]
    pub fn preferred_ipv4(&self) -> Option<IpAddr> {
        self.0
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| self.0.first())
            .copied()
    }
}

impl From<Vec<IpAddr>> for ResolvedIpAddrs {
    fn from(addrs: Vec<IpAddr>) -> Self {
        Self(addrs)
    }
}

impl IntoIterator for ResolvedIpAddrs {
    type Item = IpAddr;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The outcome of a reverse DNS lookup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DnsEntry {
    /// The `IpAddr` resolved to one or more hostnames.
    Resolved(IpAddr, Vec<String>),
    /// The `IpAddr` has no PTR record.
    NotFound(IpAddr),
    /// The lookup of `IpAddr` failed.
    Failed(IpAddr),
    /// The lookup of `IpAddr` timed out.
    Timeout(IpAddr),
}

impl DnsEntry {
    /// The address this entry is for.
    #[must_use]
    pub const fn addr(&self) -> IpAddr {
        match self {
            Self::Resolved(addr, _)
            | Self::NotFound(addr)
            | Self::Failed(addr)
            | Self::Timeout(addr) => *addr,
        }
    }
}

impl Display for DnsEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(_, hosts) => write!(f, "{}", hosts.join(" ")),
            Self::NotFound(ip) => write!(f, "{ip}"),
            Self::Failed(ip) => write!(f, "Failed: {ip}"),
            Self::Timeout(ip) => write!(f, "Timeout: {ip}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::str::FromStr;

    #[test]
    fn test_display_joins_hostnames() -> anyhow::Result<()> {
        let entry = DnsEntry::Resolved(
            IpAddr::from_str("1.1.1.1")?,
            vec!["one.one.one.one".to_string(), "cloudflare".to_string()],
        );
        assert_eq!("one.one.one.one cloudflare", entry.to_string());
        Ok(())
    }

    #[test]
    fn test_unresolved_displays_addr() {
        let entry = DnsEntry::NotFound(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(IpAddr::V4(Ipv4Addr::LOCALHOST), entry.addr());
        assert_eq!("127.0.0.1", entry.to_string());
    }

    #[test]
    fn test_preferred_ipv4_picks_first_ipv4() {
        let addrs = ResolvedIpAddrs::from(vec![
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
        ]);
        assert_eq!(
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))),
            addrs.preferred_ipv4()
        );
    }

    #[test]
    fn test_preferred_ipv4_falls_back_to_first() {
        let addrs = ResolvedIpAddrs::from(vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]);
        assert_eq!(Some(IpAddr::V6(Ipv6Addr::LOCALHOST)), addrs.preferred_ipv4());
    }
}
