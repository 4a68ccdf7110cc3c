//! hoptrace - an ICMP hop-by-hop path tracing library.
//!
//! A trace sends `ICMP` echo requests with an increasing time-to-live,
//! several per TTL, and records which router answered each one and how
//! long the answer took. The trace ends at the first hop answered by the
//! target, or after `max_hops`.
//!
//! # Example
//!
//! Trace to a literal address, printing each hop as it completes:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! # use std::net::IpAddr;
//! # use std::str::FromStr;
//! use hoptrace_core::{AddressOnly, Builder};
//!
//! let addr = IpAddr::from_str("1.1.1.1")?;
//! let summary = Builder::new(addr)
//!     .build()?
//!     .run_with(&AddressOnly, |hop| println!("{hop:?}"))?;
//! println!("{}", summary.reason);
//! # Ok(())
//! # }
//! ```
//!
//! Reverse DNS can be plugged in for hop names with [`ReverseDns`]:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use hoptrace_core::{resolve_target, Builder, ReverseDns};
//! use hoptrace_dns::{Config, DnsResolver};
//!
//! let dns = DnsResolver::start(Config::default())?;
//! let addr = resolve_target(&dns, "example.com")?;
//! let (_, hops) = Builder::new(addr).build()?.run(&ReverseDns::new(&dns))?;
//! for hop in hops {
//!     println!("{} {:?}", hop.ttl, hop.hostname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Builder`] - Build a [`Tracer`].
//! - [`Tracer::run`] - Run the tracer and collect every hop.
//! - [`Tracer::run_with`] - Run the tracer with a custom hop handler.

mod builder;
mod config;
mod constants;
mod error;
mod hop;
mod net;
mod packet;
mod probe;
mod target;
mod tracer;
mod types;

pub use builder::Builder;
pub use config::{defaults, TraceConfig};
pub use constants::{MAX_PAYLOAD_SIZE, MAX_TTL, MIN_PROBE_TIMEOUT};
pub use error::{Error, IoError, IoOperation, Result};
pub use hop::{responder, AddressOnly, HopRecord, HopResolver, ReverseDns};
pub use net::{Socket, SocketImpl};
pub use packet::PacketBuilder;
pub use probe::{ProbeOutcome, ProbeSample, ProbeSender};
pub use target::resolve_target;
pub use tracer::{CompletionReason, TraceSummary, Tracer};
pub use types::{PayloadSize, Sequence, TimeToLive, TraceId};
