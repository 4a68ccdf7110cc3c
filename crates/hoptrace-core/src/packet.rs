use crate::constants::ICMP_HEADER_SIZE;
use crate::error::Result;
use crate::types::{PayloadSize, Sequence, TraceId};
use hoptrace_packet::checksum::internet_checksum;
use hoptrace_packet::icmpv4::echo_request::EchoRequestPacket;
use hoptrace_packet::icmpv4::{IcmpCode, IcmpType};

/// Builds `ICMP` echo request probes for a single trace.
///
/// The identifier and payload size are fixed when the builder is created;
/// only the sequence number varies between probes.
#[derive(Debug, Clone, Copy)]
pub struct PacketBuilder {
    identifier: TraceId,
    payload_size: PayloadSize,
}

impl PacketBuilder {
    #[must_use]
    pub const fn new(identifier: TraceId, payload_size: PayloadSize) -> Self {
        Self {
            identifier,
            payload_size,
        }
    }

    /// The size in bytes of every packet this builder produces.
    #[must_use]
    pub const fn packet_size(&self) -> usize {
        ICMP_HEADER_SIZE + self.payload_size.0 as usize
    }

    /// Build an echo request with a zero-filled payload for `sequence`.
    ///
    /// The checksum is computed over the whole packet with the checksum
    /// field zeroed and then written into that field.
    pub fn build(&self, sequence: Sequence) -> Result<Vec<u8>> {
        let mut buf = vec![0_u8; self.packet_size()];
        let mut echo = EchoRequestPacket::new(&mut buf)?;
        echo.set_icmp_type(IcmpType::EchoRequest);
        echo.set_icmp_code(IcmpCode(0));
        echo.set_identifier(self.identifier.0);
        echo.set_sequence(sequence.0);
        echo.set_checksum(0);
        echo.set_checksum(internet_checksum(echo.packet()));
        Ok(buf)
    }
}
