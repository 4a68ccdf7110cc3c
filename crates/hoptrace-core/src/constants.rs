use std::time::Duration;

/// The maximum time-to-live value allowed.
///
/// The IP `ttl` is an u8 (0..255) but since a `ttl` of zero isn't useful we only allow 254 distinct
/// hops (1..255).
pub const MAX_TTL: u8 = 254;

/// The shortest per-probe timeout allowed.
///
/// Socket read timeouts are set in whole microseconds, and a timeout that
/// rounds down to zero blocks forever.
pub const MIN_PROBE_TIMEOUT: Duration = Duration::from_millis(1);

/// The size of the `ICMP` echo request header.
pub const ICMP_HEADER_SIZE: usize = 8;

/// The maximum `ICMP` echo payload that fits a 1500 byte Ethernet MTU.
///
/// 1500 less 20 bytes of IPv4 header and 8 bytes of `ICMP` header.
pub const MAX_PAYLOAD_SIZE: u16 = 1472;

/// The size of the buffer used to receive replies.
pub const MAX_PACKET_SIZE: usize = 1500;
