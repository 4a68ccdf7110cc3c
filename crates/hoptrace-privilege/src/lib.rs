//! Discover the privileges needed to open raw `ICMP` sockets.
//!
//! Tracing sends `ICMP` echo requests over a raw socket, which every
//! supported platform restricts:
//!
//! - On Linux the `CAP_NET_RAW` capability must be in the effective set.
//!   [`Privilege::acquire_privileges`] raises it from the permitted set when
//!   it is available there (i.e. when the binary has been granted it with
//!   `setcap`).
//! - On other Unix platforms the effective user must be root.
//! - On other platforms the privilege cannot be checked ahead of time and
//!   is assumed; a refusal surfaces when the socket is opened.
//!
//! # Example
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! # use hoptrace_privilege::Privilege;
//! let privilege = Privilege::acquire_privileges()?;
//! if privilege.has_privileges() {
//!     println!("raw sockets are available");
//! } else {
//!     println!("raw sockets require elevated privileges");
//! }
//! # Ok(())
//! # }
//! ```

use tracing::instrument;

/// A privilege error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A privilege error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(target_os = "linux")]
    #[error("caps error: {0}")]
    CapsError(#[from] caps::errors::CapsError),
}

/// Run-time platform privilege information.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Privilege {
    has_privileges: bool,
}

impl Privilege {
    /// Discover the current privileges without changing them.
    #[instrument(ret, level = "debug")]
    pub fn discover() -> Result<Self> {
        Ok(Self {
            has_privileges: Self::check_has_privileges()?,
        })
    }

    /// Are we running with the privileges required for raw sockets?
    #[must_use]
    pub const fn has_privileges(&self) -> bool {
        self.has_privileges
    }

    #[cfg(target_os = "linux")]
    /// Acquire privileges, if possible.
    ///
    /// Raise `CAP_NET_RAW` to the effective set if it is in the permitted set.
    #[instrument(ret, level = "debug")]
    pub fn acquire_privileges() -> Result<Self> {
        if caps::has_cap(None, caps::CapSet::Permitted, caps::Capability::CAP_NET_RAW)? {
            caps::raise(None, caps::CapSet::Effective, caps::Capability::CAP_NET_RAW)?;
        }
        Self::discover()
    }

    #[cfg(target_os = "linux")]
    fn check_has_privileges() -> Result<bool> {
        Ok(caps::has_cap(
            None,
            caps::CapSet::Effective,
            caps::Capability::CAP_NET_RAW,
        )?)
    }

    #[cfg(not(target_os = "linux"))]
    /// Acquire privileges, if possible.
    ///
    /// There is nothing to raise on this platform so this only discovers.
    pub fn acquire_privileges() -> Result<Self> {
        Self::discover()
    }

    #[cfg(all(unix, not(target_os = "linux")))]
    #[expect(clippy::unnecessary_wraps)]
    fn check_has_privileges() -> Result<bool> {
        Ok(nix::unistd::Uid::effective().is_root())
    }

    #[cfg(not(unix))]
    #[expect(clippy::unnecessary_wraps)]
    fn check_has_privileges() -> Result<bool> {
        Ok(true)
    }
}
