use crate::types::{PayloadSize, Sequence, TimeToLive, TraceId};
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use std::time::Duration;

    /// The default value for `max-hops`.
    pub const DEFAULT_MAX_HOPS: u8 = 30;

    /// The default value for `attempts-per-hop`.
    pub const DEFAULT_ATTEMPTS_PER_HOP: u8 = 3;

    /// The default value for `per-probe-timeout`.
    pub const DEFAULT_PER_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);

    /// The default value for `inter-attempt-delay`.
    pub const DEFAULT_INTER_ATTEMPT_DELAY: Duration = Duration::from_millis(100);

    /// The default value for `payload-size`.
    pub const DEFAULT_PAYLOAD_SIZE: u16 = 64;

    /// The default value for `trace-identifier`.
    pub const DEFAULT_TRACE_IDENTIFIER: u16 = 1;

    /// The default value for `initial-sequence`.
    pub const DEFAULT_INITIAL_SEQUENCE: u16 = 1;
}

/// Trace configuration.
///
/// Immutable for the lifetime of a trace.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TraceConfig {
    /// The highest TTL probed.
    pub max_hops: TimeToLive,
    /// The number of probes sent for each TTL.
    pub attempts_per_hop: u8,
    /// How long to wait for a reply to a single probe.
    pub per_probe_timeout: Duration,
    /// How long to pause after every attempt, replied or not.
    pub inter_attempt_delay: Duration,
    /// The size of the zero-filled echo payload.
    pub payload_size: PayloadSize,
    /// The `ICMP` identifier used for every probe of the trace.
    pub trace_identifier: TraceId,
    /// The sequence number of the first probe.
    pub initial_sequence: Sequence,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_hops: TimeToLive(defaults::DEFAULT_MAX_HOPS),
            attempts_per_hop: defaults::DEFAULT_ATTEMPTS_PER_HOP,
            per_probe_timeout: defaults::DEFAULT_PER_PROBE_TIMEOUT,
            inter_attempt_delay: defaults::DEFAULT_INTER_ATTEMPT_DELAY,
            payload_size: PayloadSize(defaults::DEFAULT_PAYLOAD_SIZE),
            trace_identifier: TraceId(defaults::DEFAULT_TRACE_IDENTIFIER),
            initial_sequence: Sequence(defaults::DEFAULT_INITIAL_SEQUENCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TraceConfig::default();
        assert_eq!(TimeToLive(30), config.max_hops);
        assert_eq!(3, config.attempts_per_hop);
        assert_eq!(Duration::from_secs(3), config.per_probe_timeout);
        assert_eq!(Duration::from_millis(100), config.inter_attempt_delay);
        assert_eq!(PayloadSize(64), config.payload_size);
        assert_eq!(TraceId(1), config.trace_identifier);
        assert_eq!(Sequence(1), config.initial_sequence);
    }
}
