//! The Internet checksum (RFC 1071) as used by ICMPv4 and the IPv4 header.

/// Calculate the Internet checksum of `data`.
///
/// Every 16-bit big-endian word is summed, an odd trailing byte is padded
/// with a zero byte, carries are folded back into the low 16 bits and the
/// one's complement of the result is returned.
///
/// Any checksum field inside `data` is included as-is, so callers building
/// a packet must zero that field first.
#[must_use]
pub fn internet_checksum(data: &[u8]) -> u16 {
    finalize_checksum(sum_be_words(data))
}

/// Is the Internet checksum embedded in `data` valid?
///
/// A correctly checksummed packet sums, including its checksum field, to
/// `0xffff` and therefore checksums to zero.
#[must_use]
pub fn is_valid(data: &[u8]) -> bool {
    internet_checksum(data) == 0
}

fn sum_be_words(data: &[u8]) -> u32 {
    data.chunks(2).map(word).sum()
}

fn word(chunk: &[u8]) -> u32 {
    match *chunk {
        [hi, lo] => u32::from(u16::from_be_bytes([hi, lo])),
        [hi] => u32::from(hi) << 8,
        _ => 0,
    }
}

const fn finalize_checksum(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    !sum as u16
}
