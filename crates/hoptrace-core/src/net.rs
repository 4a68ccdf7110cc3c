/// The platform socket implementation.
mod platform;

/// A socket abstraction.
mod socket;

pub use platform::SocketImpl;
pub use socket::Socket;

#[cfg(test)]
pub use socket::MockSocket;
