use crate::config::TraceConfig;
use crate::error::{Error, Result};
use crate::hop::{HopRecord, HopResolver};
use crate::net::{Socket, SocketImpl};
use crate::packet::PacketBuilder;
use crate::probe::{ProbeSample, ProbeSender};
use crate::types::TimeToLive;
use hoptrace_privilege::Privilege;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};
use std::thread;
use tracing::instrument;

/// Why a trace stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CompletionReason {
    /// A hop was answered by the target.
    TargetFound,
    /// Every TTL up to `max_hops` was probed without reaching the target.
    MaxHopsExceeded,
}

impl Display for CompletionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetFound => write!(f, "target found"),
            Self::MaxHopsExceeded => write!(f, "max hops exceeded"),
        }
    }
}

/// The result of a completed trace.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TraceSummary {
    pub reason: CompletionReason,
    /// The number of hops reported.
    pub hops: u8,
    pub probes_sent: usize,
}

/// A traceroute implementation.
///
/// Build with [`crate::Builder`].
#[derive(Debug, Clone)]
pub struct Tracer {
    config: TraceConfig,
    target_addr: Ipv4Addr,
}

impl Tracer {
    pub(crate) const fn new(config: TraceConfig, target_addr: Ipv4Addr) -> Self {
        Self {
            config,
            target_addr,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }

    #[must_use]
    pub const fn target_addr(&self) -> Ipv4Addr {
        self.target_addr
    }

    /// Open the raw `ICMP` socket a trace runs over.
    ///
    /// Fails with [`Error::SocketUnavailable`] if the process lacks raw socket
    /// privileges or the socket cannot be created.
    pub fn open_socket() -> Result<SocketImpl> {
        let privilege = Privilege::acquire_privileges()?;
        if !privilege.has_privileges() {
            return Err(Error::SocketUnavailable(
                "raw sockets require elevated privileges (root or CAP_NET_RAW)".to_string(),
            ));
        }
        SocketImpl::new_icmp_socket_ipv4().map_err(|err| Error::SocketUnavailable(err.to_string()))
    }

    /// Run the trace on the current thread, calling `func` as each hop completes.
    ///
    /// A raw socket is opened for the duration of the trace and closed when
    /// this returns, whatever the outcome.
    pub fn run_with<R: HopResolver + ?Sized, F: FnMut(&HopRecord)>(
        &self,
        resolver: &R,
        func: F,
    ) -> Result<TraceSummary> {
        self.trace(Self::open_socket()?, resolver, func)
    }

    /// Run the trace on the current thread and collect every hop.
    pub fn run<R: HopResolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<(TraceSummary, Vec<HopRecord>)> {
        let mut hops = Vec::new();
        let summary = self.run_with(resolver, |hop| hops.push(hop.clone()))?;
        Ok((summary, hops))
    }

    /// Probe TTL `1..=max_hops` over `socket`, which is dropped on return.
    ///
    /// See [`Tracer::open_socket`].
    #[instrument(skip_all, fields(addr = %self.target_addr), level = "trace")]
    pub fn trace<S: Socket, R: HopResolver + ?Sized, F: FnMut(&HopRecord)>(
        &self,
        mut socket: S,
        resolver: &R,
        mut func: F,
    ) -> Result<TraceSummary> {
        let packets = PacketBuilder::new(self.config.trace_identifier, self.config.payload_size);
        let mut sender = ProbeSender::new(&mut socket);
        let target = IpAddr::V4(self.target_addr);
        let mut sequence = self.config.initial_sequence;
        let mut probes_sent = 0;
        tracing::info!(
            addr = %self.target_addr,
            max_hops = %self.config.max_hops,
            "trace started"
        );
        for ttl in 1..=self.config.max_hops.0 {
            let ttl = TimeToLive(ttl);
            let mut samples = Vec::with_capacity(usize::from(self.config.attempts_per_hop));
            for attempt in 0..self.config.attempts_per_hop {
                let packet = packets.build(sequence)?;
                let outcome = sender.send(
                    &packet,
                    self.target_addr,
                    ttl,
                    self.config.per_probe_timeout,
                )?;
                tracing::debug!(%ttl, attempt, %sequence, ?outcome, "probe complete");
                sequence = sequence.next();
                probes_sent += 1;
                samples.push(ProbeSample::new(attempt, outcome));
                thread::sleep(self.config.inter_attempt_delay);
            }
            let hop = HopRecord::new(ttl, samples, resolver);
            tracing::debug!(%ttl, addr = ?hop.addr, "hop complete");
            func(&hop);
            if hop.addr == Some(target) {
                return Ok(self.finish(CompletionReason::TargetFound, ttl.0, probes_sent));
            }
        }
        Ok(self.finish(
            CompletionReason::MaxHopsExceeded,
            self.config.max_hops.0,
            probes_sent,
        ))
    }

    fn finish(&self, reason: CompletionReason, hops: u8, probes_sent: usize) -> TraceSummary {
        tracing::info!(
            addr = %self.target_addr,
            %reason,
            hops,
            probes_sent,
            "trace finished"
        );
        TraceSummary {
            reason,
            hops,
            probes_sent,
        }
    }
}
