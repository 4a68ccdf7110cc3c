use derive_more::{Add, AddAssign, Display, From};

/// `TimeToLive` (ttl) newtype.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Add, AddAssign, Display, From,
)]
pub struct TimeToLive(pub u8);

/// `Sequence` number newtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Display, From)]
pub struct Sequence(pub u16);

impl Sequence {
    /// The sequence number after this one, wrapping from 65535 to 0.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// `TraceId` newtype.
///
/// Carried in the `ICMP` identifier field of every probe of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Display, From)]
pub struct TraceId(pub u16);

/// `PayloadSize` newtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Display, From)]
pub struct PayloadSize(pub u16);
