//! Register value encoding and decoding
//!
//! The register field is 32 bits wide on the wire, but positions and limits
//! are exchanged as the low 16 bits only (bytes 2 and 3). Bytes 4 and 5 are
//! never populated for writes and never consulted by the position decoders.
//! [`decode_register`] exposes the full field for callers that need it.

use crate::frame::Frame;

/// Largest position that fits in the transmitted bytes
pub const MAX_POSITION: i32 = u16::MAX as i32;

/// Position outside `0..=65535`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionOutOfRange(pub i32);

impl core::fmt::Display for PositionOutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "position {} outside 0..={}", self.0, MAX_POSITION)
    }
}

impl core::error::Error for PositionOutOfRange {}

/// Convert a requested position into the 16-bit value sent on the wire
pub fn encode_position(position: i32) -> Result<u16, PositionOutOfRange> {
    u16::try_from(position).map_err(|_| PositionOutOfRange(position))
}

/// Position carried in a reply: `byte[2] | byte[3] << 8`
pub fn decode_position(reply: &Frame) -> u16 {
    let bytes = reply.as_bytes();
    bytes[2] as u16 | ((bytes[3] as u16) << 8)
}

/// Travel limit carried in a reply
///
/// Same bytes and result as [`decode_position`], assembled high byte first.
pub fn decode_max_position(reply: &Frame) -> u16 {
    let bytes = reply.as_bytes();
    let mut value = bytes[3] as u16;
    value = (value << 8) | bytes[2] as u16;
    value
}

/// Full 32-bit little-endian register value of a reply
pub fn decode_register(reply: &Frame) -> u32 {
    reply.payload()
}
