use crate::probe::ProbeSample;
use crate::types::TimeToLive;
use hoptrace_dns::{DnsEntry, Resolver};
use std::net::IpAddr;

/// Resolve a responding address to a display name.
///
/// Implementations never fail: when no name is known the textual form of
/// the address is returned.
pub trait HopResolver {
    fn resolve(&self, addr: IpAddr) -> String;
}

impl<T: HopResolver + ?Sized> HopResolver for &T {
    fn resolve(&self, addr: IpAddr) -> String {
        (**self).resolve(addr)
    }
}

/// A `HopResolver` backed by reverse DNS.
///
/// Every call performs a fresh lookup.
#[derive(Debug)]
pub struct ReverseDns<R> {
    resolver: R,
}

impl<R: Resolver> ReverseDns<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: Resolver> HopResolver for ReverseDns<R> {
    fn resolve(&self, addr: IpAddr) -> String {
        match self.resolver.reverse_lookup(addr) {
            DnsEntry::Resolved(_, hosts) => hosts
                .into_iter()
                .next()
                .unwrap_or_else(|| addr.to_string()),
            entry => {
                tracing::debug!(%entry, "reverse lookup unresolved");
                addr.to_string()
            }
        }
    }
}

/// A `HopResolver` that never performs a lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressOnly;

impl HopResolver for AddressOnly {
    fn resolve(&self, addr: IpAddr) -> String {
        addr.to_string()
    }
}

/// The measurements for one TTL.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HopRecord {
    pub ttl: TimeToLive,
    /// One sample per attempt, in attempt order.
    pub samples: Vec<ProbeSample>,
    /// The address of the last attempt that received a reply.
    pub addr: Option<IpAddr>,
    /// The display name of `addr`.
    pub hostname: Option<String>,
}

impl HopRecord {
    /// Assemble a hop, resolving the chosen responder once.
    pub fn new<R: HopResolver + ?Sized>(
        ttl: TimeToLive,
        samples: Vec<ProbeSample>,
        resolver: &R,
    ) -> Self {
        let addr = responder(&samples);
        let hostname = addr.map(|addr| resolver.resolve(addr));
        Self {
            ttl,
            samples,
            addr,
            hostname,
        }
    }
}

/// The responder of a hop: the address of the last attempt that replied.
#[must_use]
pub fn responder(samples: &[ProbeSample]) -> Option<IpAddr> {
    samples.iter().rev().find_map(|sample| sample.addr)
}
