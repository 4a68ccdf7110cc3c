use crate::error::{Error, Result};
use hoptrace_dns::Resolver;
use std::net::IpAddr;
use tracing::instrument;

/// Resolve `host` to the address to trace.
///
/// The first IPv4 address is preferred, falling back to the first address
/// of any family.
#[instrument(skip(resolver), level = "debug")]
pub fn resolve_target<R: Resolver>(resolver: &R, host: &str) -> Result<IpAddr> {
    let addrs = resolver
        .lookup(host)
        .map_err(|err| Error::ResolutionFailure(host.to_string(), err.to_string()))?;
    addrs
        .preferred_ipv4()
        .ok_or_else(|| Error::ResolutionFailure(host.to_string(), "no addresses".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoptrace_dns::{DnsEntry, ResolvedIpAddrs};
    use std::net::{Ipv4Addr, Ipv6Addr};

    struct FakeDns(Vec<IpAddr>);

    impl Resolver for FakeDns {
        fn lookup(&self, hostname: impl AsRef<str>) -> hoptrace_dns::Result<ResolvedIpAddrs> {
            if self.0.is_empty() {
                Err(hoptrace_dns::Error::NoAddresses(hostname.as_ref().to_string()))
            } else {
                Ok(ResolvedIpAddrs::from(self.0.clone()))
            }
        }

        fn reverse_lookup(&self, addr: impl Into<IpAddr>) -> DnsEntry {
            DnsEntry::NotFound(addr.into())
        }
    }

    #[test]
    fn test_prefers_ipv4() -> anyhow::Result<()> {
        let dns = FakeDns(vec![
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
        ]);
        assert_eq!(
            IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            resolve_target(&dns, "example.com")?
        );
        Ok(())
    }

    #[test]
    fn test_falls_back_to_first() -> anyhow::Result<()> {
        let dns = FakeDns(vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]);
        assert_eq!(
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            resolve_target(&dns, "v6only.example")?
        );
        Ok(())
    }

    #[test]
    fn test_lookup_failure() {
        let dns = FakeDns(vec![]);
        let err = resolve_target(&dns, "nowhere.invalid").unwrap_err();
        assert!(matches!(err, Error::ResolutionFailure(host, _) if host == "nowhere.invalid"));
    }
}
