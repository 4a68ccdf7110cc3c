//! Blocking forward and reverse DNS resolution for hoptrace.
//!
//! Lookups are performed either with the system resolver (`getaddrinfo` and
//! `getnameinfo`) or with an embedded `hickory` resolver configured from
//! `/etc/resolv.conf` or a well known public DNS service.
//!
//! Nothing is cached: each call performs a fresh lookup.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! # use std::net::IpAddr;
//! # use std::str::FromStr;
//! use hoptrace_dns::{Builder, DnsResolver, ResolveMethod, Resolver};
//!
//! let config = Builder::new()
//!     .resolve_method(ResolveMethod::Cloudflare)
//!     .build();
//! let resolver = DnsResolver::start(config)?;
//! let entry = resolver.reverse_lookup(IpAddr::from_str("1.1.1.1")?);
//! println!("{entry}");
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod config;
mod dns_resolver;
mod resolver;

pub use config::{Builder, Config, ResolveMethod};
pub use dns_resolver::DnsResolver;
pub use resolver::{DnsEntry, Error, ResolvedIpAddrs, Resolver, Result};
