use crate::config::TraceConfig;
use crate::constants::{MAX_PAYLOAD_SIZE, MAX_TTL, MIN_PROBE_TIMEOUT};
use crate::error::{Error, Result};
use crate::types::{PayloadSize, Sequence, TimeToLive, TraceId};
use crate::Tracer;
use std::net::IpAddr;
use std::time::Duration;

/// Build a tracer.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use hoptrace_core::{AddressOnly, Builder};
/// use std::time::Duration;
///
/// let addr = std::net::IpAddr::from([1, 2, 3, 4]);
/// let tracer = Builder::new(addr)
///     .max_hops(16)
///     .per_probe_timeout(Duration::from_secs(1))
///     .build()?;
/// let (summary, hops) = tracer.run(&AddressOnly)?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Tracer`] - A traceroute implementation.
#[derive(Debug)]
pub struct Builder {
    target_addr: IpAddr,
    config: TraceConfig,
}

impl Builder {
    /// Build a tracer builder for a given target.
    #[must_use]
    pub fn new(target_addr: IpAddr) -> Self {
        Self {
            target_addr,
            config: TraceConfig::default(),
        }
    }

    /// Set the highest TTL probed.
    #[must_use]
    pub fn max_hops(mut self, max_hops: u8) -> Self {
        self.config.max_hops = TimeToLive(max_hops);
        self
    }

    /// Set the number of probes sent per TTL.
    #[must_use]
    pub fn attempts_per_hop(mut self, attempts_per_hop: u8) -> Self {
        self.config.attempts_per_hop = attempts_per_hop;
        self
    }

    /// Set how long to wait for each reply.
    #[must_use]
    pub fn per_probe_timeout(mut self, per_probe_timeout: Duration) -> Self {
        self.config.per_probe_timeout = per_probe_timeout;
        self
    }

    /// Set the pause after every attempt.
    #[must_use]
    pub fn inter_attempt_delay(mut self, inter_attempt_delay: Duration) -> Self {
        self.config.inter_attempt_delay = inter_attempt_delay;
        self
    }

    /// Set the echo payload size in bytes.
    #[must_use]
    pub fn payload_size(mut self, payload_size: u16) -> Self {
        self.config.payload_size = PayloadSize(payload_size);
        self
    }

    /// Set the `ICMP` identifier.
    #[must_use]
    pub fn trace_identifier(mut self, trace_id: u16) -> Self {
        self.config.trace_identifier = TraceId(trace_id);
        self
    }

    /// Set the sequence number of the first probe.
    #[must_use]
    pub fn initial_sequence(mut self, initial_sequence: u16) -> Self {
        self.config.initial_sequence = Sequence(initial_sequence);
        self
    }

    /// Build the `Tracer`.
    pub fn build(self) -> Result<Tracer> {
        let IpAddr::V4(target_addr) = self.target_addr else {
            return Err(Error::BadConfig(format!(
                "target {} is not an IPv4 address",
                self.target_addr
            )));
        };
        let max_hops = self.config.max_hops.0;
        if max_hops == 0 || max_hops > MAX_TTL {
            return Err(Error::BadConfig(format!(
                "max_hops {max_hops} not in 1..={MAX_TTL}"
            )));
        }
        if self.config.attempts_per_hop == 0 {
            return Err(Error::BadConfig(
                "attempts_per_hop must be at least 1".to_string(),
            ));
        }
        if self.config.payload_size.0 > MAX_PAYLOAD_SIZE {
            return Err(Error::BadConfig(format!(
                "payload_size {} > {MAX_PAYLOAD_SIZE}",
                self.config.payload_size.0
            )));
        }
        if self.config.per_probe_timeout < MIN_PROBE_TIMEOUT {
            return Err(Error::BadConfig(format!(
                "per_probe_timeout {:?} < {MIN_PROBE_TIMEOUT:?}",
                self.config.per_probe_timeout
            )));
        }
        Ok(Tracer::new(self.config, target_addr))
    }
}
