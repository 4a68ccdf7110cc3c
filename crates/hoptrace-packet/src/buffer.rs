/// Backing storage for a packet view, either borrowed read-only or read-write.
#[derive(Debug)]
pub enum Buffer<'a> {
    Immutable(&'a [u8]),
    Mutable(&'a mut [u8]),
}

impl Buffer<'_> {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Immutable(packet) => packet,
            Buffer::Mutable(packet) => packet,
        }
    }

    /// Read `N` consecutive bytes starting at `offset`.
    pub fn get_bytes<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut bytes = [0_u8; N];
        bytes.copy_from_slice(&self.as_slice()[offset..offset + N]);
        bytes
    }

    /// Write `N` consecutive bytes starting at `offset`.
    pub fn set_bytes<const N: usize>(&mut self, offset: usize, bytes: [u8; N]) {
        self.as_slice_mut()[offset..offset + N].copy_from_slice(&bytes);
    }

    pub fn read(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    pub fn write(&mut self, offset: usize) -> &mut u8 {
        &mut self.as_slice_mut()[offset]
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        match self {
            Buffer::Immutable(_) => panic!("write operation called on readonly buffer"),
            Buffer::Mutable(packet) => packet,
        }
    }
}
