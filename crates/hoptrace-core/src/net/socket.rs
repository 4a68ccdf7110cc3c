use crate::error::IoResult as Result;
use std::net::SocketAddr;
use std::time::Duration;

/// A blocking raw `ICMP` socket.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create a raw IPv4 socket for sending and receiving `ICMP`.
    fn new_icmp_socket_ipv4() -> Result<Self>;
    fn set_ttl(&mut self, ttl: u32) -> Result<()>;
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()>;
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> Result<()>;
    /// Block until a datagram arrives or the read timeout expires.
    fn recv_from(&mut self, buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>)>;
}
