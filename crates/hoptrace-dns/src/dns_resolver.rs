use crate::config::{Config, ResolveMethod};
use crate::resolver::{DnsEntry, Error, ResolvedIpAddrs, Resolver, Result};
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::system_conf::read_system_conf;
use std::fmt::{Debug, Formatter};
use std::io;
use std::net::IpAddr;
use tracing::instrument;

/// A blocking DNS resolver.
///
/// Every lookup goes to the configured provider; results are not cached.
pub struct DnsResolver {
    config: Config,
    provider: DnsProvider,
}

enum DnsProvider {
    Hickory(Box<hickory_resolver::Resolver>),
    DnsLookup,
}

impl DnsResolver {
    /// Create and start a new `DnsResolver`.
    ///
    /// For the `hickory` based methods this builds the resolver (and its
    /// runtime) up front.
    pub fn start(config: Config) -> Result<Self> {
        let provider = if matches!(config.resolve_method, ResolveMethod::System) {
            DnsProvider::DnsLookup
        } else {
            let (resolver_cfg, mut options) = match config.resolve_method {
                ResolveMethod::Resolv => read_system_conf().map_err(io::Error::from)?,
                ResolveMethod::Google => (ResolverConfig::google(), ResolverOpts::default()),
                ResolveMethod::Cloudflare | ResolveMethod::System => {
                    (ResolverConfig::cloudflare(), ResolverOpts::default())
                }
            };
            options.timeout = config.timeout;
            options.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;
            let resolver = hickory_resolver::Resolver::new(resolver_cfg, options)?;
            DnsProvider::Hickory(Box::new(resolver))
        };
        Ok(Self { config, provider })
    }

    fn lookup_all(&self, hostname: &str) -> Result<Vec<IpAddr>> {
        match &self.provider {
            DnsProvider::Hickory(resolver) => Ok(resolver
                .lookup_ip(hostname)
                .map_err(|err| Error::LookupFailed(Box::new(err)))?
                .iter()
                .collect()),
            DnsProvider::DnsLookup => dns_lookup::lookup_host(hostname)
                .map_err(|err| Error::LookupFailed(Box::new(err))),
        }
    }
}

impl Resolver for DnsResolver {
    #[instrument(skip(self, hostname), fields(hostname = hostname.as_ref()), level = "debug")]
    fn lookup(&self, hostname: impl AsRef<str>) -> Result<ResolvedIpAddrs> {
        let hostname = hostname.as_ref();
        let addrs = self.lookup_all(hostname)?;
        if addrs.is_empty() {
            Err(Error::NoAddresses(hostname.to_string()))
        } else {
            tracing::debug!(?addrs, "resolved");
            Ok(ResolvedIpAddrs(addrs))
        }
    }

    #[instrument(skip_all, level = "debug")]
    fn reverse_lookup(&self, addr: impl Into<IpAddr>) -> DnsEntry {
        let addr = addr.into();
        let entry = match &self.provider {
            // the system resolver does not distinguish a missing record from
            // a failure, so every error is `NotFound`
            DnsProvider::DnsLookup => match dns_lookup::lookup_addr(&addr) {
                Ok(host) => DnsEntry::Resolved(addr, vec![host]),
                Err(_) => DnsEntry::NotFound(addr),
            },
            DnsProvider::Hickory(resolver) => match resolver.reverse_lookup(addr) {
                Ok(names) => {
                    let hostnames = names
                        .into_iter()
                        .map(|mut ptr| {
                            ptr.0.set_fqdn(false);
                            ptr.to_string()
                        })
                        .collect::<Vec<_>>();
                    if hostnames.is_empty() {
                        DnsEntry::NotFound(addr)
                    } else {
                        DnsEntry::Resolved(addr, hostnames)
                    }
                }
                Err(err) => match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => DnsEntry::NotFound(addr),
                    ResolveErrorKind::Timeout => DnsEntry::Timeout(addr),
                    _ => DnsEntry::Failed(addr),
                },
            },
        };
        tracing::debug!(%entry, %addr, "reverse lookup");
        entry
    }
}

impl Debug for DnsResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let provider = match self.provider {
            DnsProvider::Hickory(_) => "hickory",
            DnsProvider::DnsLookup => "dns-lookup",
        };
        f.debug_struct("DnsResolver")
            .field("config", &self.config)
            .field("provider", &provider)
            .finish()
    }
}
