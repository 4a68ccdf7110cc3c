use crate::constants::MAX_PACKET_SIZE;
use crate::error::Result;
use crate::net::Socket;
use crate::types::TimeToLive;
use hoptrace_packet::icmpv4::IcmpPacket;
use hoptrace_packet::ipv4::Ipv4Packet;
use hoptrace_packet::IpProtocol;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::instrument;

/// The outcome of a single probe.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProbeOutcome {
    /// Something replied from `addr` after `elapsed`.
    Reply { elapsed: Duration, addr: IpAddr },
    /// Nothing arrived before the timeout.
    TimedOut,
}

/// One measured attempt within a hop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ProbeSample {
    /// The attempt index within the hop, starting from zero.
    pub attempt: u8,
    /// The round trip time, if a reply arrived.
    pub elapsed: Option<Duration>,
    /// The address that replied, if any.
    pub addr: Option<IpAddr>,
}

impl ProbeSample {
    #[must_use]
    pub const fn new(attempt: u8, outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Reply { elapsed, addr } => Self {
                attempt,
                elapsed: Some(elapsed),
                addr: Some(addr),
            },
            ProbeOutcome::TimedOut => Self {
                attempt,
                elapsed: None,
                addr: None,
            },
        }
    }

    #[must_use]
    pub const fn is_timed_out(&self) -> bool {
        self.elapsed.is_none()
    }
}

/// Sends a probe and waits for the first reply.
///
/// The socket is borrowed, not owned.
#[derive(Debug)]
pub struct ProbeSender<'a, S> {
    socket: &'a mut S,
}

impl<'a, S: Socket> ProbeSender<'a, S> {
    pub fn new(socket: &'a mut S) -> Self {
        Self { socket }
    }

    /// Send `packet` to `target_addr` with the given `ttl` and wait up to
    /// `timeout` for any `ICMP` message to arrive.
    ///
    /// Send and receive failures are reported as [`ProbeOutcome::TimedOut`].
    /// Failing to configure the socket is an error.
    #[instrument(skip(self, packet), level = "trace")]
    pub fn send(
        &mut self,
        packet: &[u8],
        target_addr: Ipv4Addr,
        ttl: TimeToLive,
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        self.socket.set_ttl(u32::from(ttl.0))?;
        self.socket.set_read_timeout(timeout)?;
        let start = Instant::now();
        if let Err(err) = self
            .socket
            .send_to(packet, SocketAddr::new(IpAddr::V4(target_addr), 0))
        {
            tracing::debug!(%err, %ttl, "probe send failed");
            return Ok(ProbeOutcome::TimedOut);
        }
        let mut buf = [0_u8; MAX_PACKET_SIZE];
        match self.socket.recv_from(&mut buf) {
            Ok((bytes_read, addr)) => {
                let elapsed = start.elapsed();
                let reply = &buf[..bytes_read.min(buf.len())];
                let source = reply_source(reply);
                match addr.map(|addr| addr.ip()).or(source) {
                    Some(addr) => {
                        tracing::debug!(%ttl, %addr, ?elapsed, "probe reply");
                        Ok(ProbeOutcome::Reply { elapsed, addr })
                    }
                    None => {
                        tracing::debug!(%ttl, "reply without a source address");
                        Ok(ProbeOutcome::TimedOut)
                    }
                }
            }
            Err(err) if err.is_timeout() => {
                tracing::debug!(%ttl, "probe timed out");
                Ok(ProbeOutcome::TimedOut)
            }
            Err(err) => {
                tracing::debug!(%err, %ttl, "probe receive failed");
                Ok(ProbeOutcome::TimedOut)
            }
        }
    }
}

/// Decode a raw IPv4 reply and log its `ICMP` type, returning its source.
///
/// The type is informational only.
fn reply_source(buf: &[u8]) -> Option<IpAddr> {
    let ipv4 = match Ipv4Packet::new_view(buf) {
        Ok(ipv4) => ipv4,
        Err(err) => {
            tracing::debug!(%err, "undecodable reply");
            return None;
        }
    };
    let source = IpAddr::V4(ipv4.get_source());
    if ipv4.get_protocol() == IpProtocol::Icmp {
        match IcmpPacket::new_view(ipv4.payload()) {
            Ok(icmp) => {
                tracing::debug!(icmp_type = ?icmp.get_icmp_type(), %source, "reply decoded");
            }
            Err(err) => tracing::debug!(%err, %source, "undecodable icmp reply"),
        }
    }
    Some(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IoError, IoOperation, IoResult};
    use crate::net::MockSocket;
    use hex_literal::hex;
    use mockall::predicate;
    use std::io;
    use std::str::FromStr;

    // IPv4 header from 10.0.0.5 carrying an ICMP time exceeded
    const TIME_EXCEEDED: [u8; 28] = hex!(
        "
        45 00 00 1c 00 00 00 00 40 01 00 00 0a 00 00 05
        c0 a8 01 02 0b 00 f4 ff 00 00 00 00
        "
    );

    fn expect_configure(mocket: &mut MockSocket, ttl: u32) {
        mocket
            .expect_set_ttl()
            .with(predicate::eq(ttl))
            .times(1)
            .returning(|_| Ok(()));
        mocket
            .expect_set_read_timeout()
            .with(predicate::eq(Duration::from_millis(3000)))
            .times(1)
            .returning(|_| Ok(()));
    }

    #[test]
    fn test_reply() -> anyhow::Result<()> {
        let target = Ipv4Addr::from_str("192.168.1.2")?;
        let router = SocketAddr::from_str("10.0.0.5:0")?;
        let mut mocket = MockSocket::new();
        expect_configure(&mut mocket, 5);
        mocket
            .expect_send_to()
            .withf(move |buf, addr| {
                buf[..] == [8, 0, 0, 0] && *addr == SocketAddr::new(IpAddr::V4(target), 0)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        mocket.expect_recv_from().times(1).returning(
            move |buf: &mut [u8]| -> IoResult<(usize, Option<SocketAddr>)> {
                buf[..TIME_EXCEEDED.len()].copy_from_slice(&TIME_EXCEEDED);
                Ok((TIME_EXCEEDED.len(), Some(router)))
            },
        );
        let mut sender = ProbeSender::new(&mut mocket);
        let outcome = sender.send(
            &[8, 0, 0, 0],
            target,
            TimeToLive(5),
            Duration::from_millis(3000),
        )?;
        match outcome {
            ProbeOutcome::Reply { addr, .. } => assert_eq!(router.ip(), addr),
            ProbeOutcome::TimedOut => panic!("expected a reply"),
        }
        Ok(())
    }

    #[test]
    fn test_reply_without_addr_uses_ipv4_source() -> anyhow::Result<()> {
        let mut mocket = MockSocket::new();
        expect_configure(&mut mocket, 1);
        mocket.expect_send_to().times(1).returning(|_, _| Ok(()));
        mocket.expect_recv_from().times(1).returning(
            |buf: &mut [u8]| -> IoResult<(usize, Option<SocketAddr>)> {
                buf[..TIME_EXCEEDED.len()].copy_from_slice(&TIME_EXCEEDED);
                Ok((TIME_EXCEEDED.len(), None))
            },
        );
        let mut sender = ProbeSender::new(&mut mocket);
        let outcome = sender.send(
            &[0; 8],
            Ipv4Addr::LOCALHOST,
            TimeToLive(1),
            Duration::from_millis(3000),
        )?;
        assert!(matches!(
            outcome,
            ProbeOutcome::Reply { addr, .. } if addr == IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))
        ));
        Ok(())
    }

    #[test]
    fn test_receive_timeout() -> anyhow::Result<()> {
        let mut mocket = MockSocket::new();
        expect_configure(&mut mocket, 3);
        mocket.expect_send_to().times(1).returning(|_, _| Ok(()));
        mocket.expect_recv_from().times(1).returning(|_| {
            Err(IoError::Other(
                io::Error::from(io::ErrorKind::WouldBlock),
                IoOperation::RecvFrom,
            ))
        });
        let mut sender = ProbeSender::new(&mut mocket);
        let outcome = sender.send(
            &[0; 8],
            Ipv4Addr::LOCALHOST,
            TimeToLive(3),
            Duration::from_millis(3000),
        )?;
        assert_eq!(ProbeOutcome::TimedOut, outcome);
        Ok(())
    }

    #[test]
    fn test_send_failure_is_timeout() -> anyhow::Result<()> {
        let mut mocket = MockSocket::new();
        expect_configure(&mut mocket, 2);
        mocket.expect_send_to().times(1).returning(|_, addr| {
            Err(IoError::SendTo(
                io::Error::from(io::ErrorKind::PermissionDenied),
                addr,
            ))
        });
        mocket.expect_recv_from().never();
        let mut sender = ProbeSender::new(&mut mocket);
        let outcome = sender.send(
            &[0; 8],
            Ipv4Addr::LOCALHOST,
            TimeToLive(2),
            Duration::from_millis(3000),
        )?;
        assert_eq!(ProbeOutcome::TimedOut, outcome);
        Ok(())
    }

    #[test]
    fn test_set_ttl_failure_is_error() {
        let mut mocket = MockSocket::new();
        mocket.expect_set_ttl().times(1).returning(|_| {
            Err(IoError::Other(
                io::Error::from(io::ErrorKind::InvalidInput),
                IoOperation::SetTtl,
            ))
        });
        mocket.expect_send_to().never();
        let mut sender = ProbeSender::new(&mut mocket);
        let result = sender.send(
            &[0; 8],
            Ipv4Addr::LOCALHOST,
            TimeToLive(1),
            Duration::from_millis(3000),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_from_outcome() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let reply = ProbeSample::new(
            0,
            ProbeOutcome::Reply {
                elapsed: Duration::from_millis(12),
                addr,
            },
        );
        assert_eq!(Some(Duration::from_millis(12)), reply.elapsed);
        assert_eq!(Some(addr), reply.addr);
        let timed_out = ProbeSample::new(1, ProbeOutcome::TimedOut);
        assert!(timed_out.is_timed_out());
        assert_eq!(None, timed_out.addr);
        assert_eq!(1, timed_out.attempt);
    }
}
