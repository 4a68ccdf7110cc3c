use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// A tracer error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A tracer error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    BadConfig(String),
    #[error("invalid packet: {0}")]
    PacketError(#[from] hoptrace_packet::error::Error),
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("raw socket unavailable: {0}")]
    SocketUnavailable(String),
    #[error("privilege error: {0}")]
    PrivilegeError(#[from] hoptrace_privilege::Error),
    #[error("unable to resolve {0}: {1}")]
    ResolutionFailure(String, String),
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

impl IoError {
    /// The underlying [`io::ErrorKind`].
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::SendTo(e, _) | Self::Other(e, _) => e.kind(),
        }
    }

    /// Did the operation give up waiting rather than fail?
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
        )
    }
}

/// Io operation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IoOperation {
    NewSocket,
    SetTtl,
    SetReadTimeout,
    SendTo,
    RecvFrom,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::SetTtl => write!(f, "set TTL"),
            Self::SetReadTimeout => write!(f, "set read timeout"),
            Self::SendTo => write!(f, "send to"),
            Self::RecvFrom => write!(f, "recv from"),
        }
    }
}
