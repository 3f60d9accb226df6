//! Frame encoding and validation.
//!
//! Frame format (both directions):
//! - START (1 byte): 0xFF
//! - REGISTER (1 byte): register id, bit 7 set for a write
//! - VALUE (4 bytes): register value, low byte first; zero for reads
//! - CHECKSUM (1 byte): two's complement of the sum of the first six bytes

/// Frame start marker
pub const FRAME_START: u8 = 0xFF;

/// Size of every frame, request or reply
pub const FRAME_LEN: usize = 7;

/// Register id bit marking a write request
pub const WRITE_BIT: u8 = 0x80;

/// Index of the checksum byte
const CHECKSUM_INDEX: usize = FRAME_LEN - 1;

/// Errors found when validating a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First byte is not the start marker
    InvalidStart,
    /// Bytes do not sum to zero modulo 256
    InvalidChecksum,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::InvalidStart => write!(f, "frame does not begin with 0xFF"),
            FrameError::InvalidChecksum => write!(f, "frame checksum mismatch"),
        }
    }
}

impl core::error::Error for FrameError {}

/// Checksum byte for the given frame prefix
///
/// Returns the two's complement of the wrapping sum of `bytes`, so that
/// appending it makes the whole sequence sum to zero modulo 256. Only the
/// first six bytes of a frame are ever passed in.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |sum, &b| sum.wrapping_add(b))
        .wrapping_neg()
}

/// A single 7-byte protocol frame
///
/// Frames are plain values. Builders always return a new sealed frame;
/// nothing edits a frame in place after it has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Build a read request for `register`
    ///
    /// The write bit is cleared and the value bytes are zero.
    pub fn read(register: u8) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FRAME_START;
        bytes[1] = register & !WRITE_BIT;
        Self(bytes).sealed()
    }

    /// Build a write request storing `value` into `register`
    pub fn write(register: u8, value: u32) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FRAME_START;
        bytes[1] = register | WRITE_BIT;
        bytes[2..6].copy_from_slice(&value.to_le_bytes());
        Self(bytes).sealed()
    }

    /// Wrap raw bytes, typically a reply read off the wire
    ///
    /// The checksum byte is kept as received. Use [`Frame::is_valid`] or
    /// [`Frame::validate`] to check it.
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Recompute the checksum byte over bytes 0..6
    fn sealed(mut self) -> Self {
        self.0[CHECKSUM_INDEX] = checksum(&self.0[..CHECKSUM_INDEX]);
        self
    }

    /// Copy of this frame with the low 16 bits of the value replaced
    ///
    /// Bytes 4 and 5 are left as they are and the checksum is recomputed.
    pub fn with_payload_u16(self, value: u16) -> Self {
        let mut bytes = self.0;
        bytes[2..4].copy_from_slice(&value.to_le_bytes());
        Self(bytes).sealed()
    }

    /// Raw frame bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Consume the frame, returning its bytes
    pub fn into_bytes(self) -> [u8; FRAME_LEN] {
        self.0
    }

    /// Register id with the write bit stripped
    pub fn register(&self) -> u8 {
        self.0[1] & !WRITE_BIT
    }

    /// Whether this frame is a write request
    pub fn is_write(&self) -> bool {
        self.0[1] & WRITE_BIT != 0
    }

    /// The 32-bit register value carried in bytes 2..6
    pub fn payload(&self) -> u32 {
        u32::from_le_bytes([self.0[2], self.0[3], self.0[4], self.0[5]])
    }

    /// Stored checksum byte
    pub fn checksum_byte(&self) -> u8 {
        self.0[CHECKSUM_INDEX]
    }

    /// Advisory check that all seven bytes sum to zero modulo 256
    pub fn is_valid(&self) -> bool {
        self.0.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) == 0
    }

    /// Strict validation of a received frame
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.0[0] != FRAME_START {
            return Err(FrameError::InvalidStart);
        }
        if !self.is_valid() {
            return Err(FrameError::InvalidChecksum);
        }
        Ok(())
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_of_read_frame() {
        // 0xFF + 0x12 = 0x111 -> 0x11, negated = 0xEF
        let frame = Frame::read(0x12);
        assert_eq!(
            frame.as_bytes(),
            &[0xFF, 0x12, 0x00, 0x00, 0x00, 0x00, 0xEF]
        );
        assert!(frame.is_valid());
    }

    #[test]
    fn test_read_clears_write_bit() {
        let frame = Frame::read(0x90);
        assert_eq!(frame.as_bytes()[1], 0x10);
        assert!(!frame.is_write());
    }

    #[test]
    fn test_write_frame_layout() {
        let frame = Frame::write(0x10, 0x1234_5678);

        assert_eq!(frame.as_bytes()[0], FRAME_START);
        assert_eq!(frame.as_bytes()[1], 0x90);
        // Value bytes are little-endian
        assert_eq!(&frame.as_bytes()[2..6], &[0x78, 0x56, 0x34, 0x12]);
        assert!(frame.is_write());
        assert_eq!(frame.register(), 0x10);
        assert_eq!(frame.payload(), 0x1234_5678);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_with_payload_u16_leaves_original() {
        let template = Frame::write(0x20, 0);
        let patched = template.with_payload_u16(300);

        assert_eq!(template.payload(), 0);
        assert_eq!(patched.as_bytes()[2], 0x2C);
        assert_eq!(patched.as_bytes()[3], 0x01);
        assert!(patched.is_valid());
        assert_ne!(patched.checksum_byte(), template.checksum_byte());
    }

    #[test]
    fn test_with_payload_u16_keeps_upper_bytes() {
        let frame = Frame::write(0x10, 0xAABB_0000).with_payload_u16(0x0102);
        assert_eq!(frame.payload(), 0xAABB_0102);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_validate() {
        let good = Frame::from_bytes([0xFF, 0x10, 0x34, 0x12, 0x00, 0x00, 0xAB]);
        assert_eq!(good.validate(), Ok(()));

        let bad_sum = Frame::from_bytes([0xFF, 0x10, 0x34, 0x12, 0x00, 0x00, 0x00]);
        assert!(!bad_sum.is_valid());
        assert_eq!(bad_sum.validate(), Err(FrameError::InvalidChecksum));

        let bad_start = Frame::from_bytes([0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0xF0]);
        assert!(bad_start.is_valid());
        assert_eq!(bad_start.validate(), Err(FrameError::InvalidStart));
    }

    #[test]
    fn test_checksum_wraps() {
        let bytes = [0xFF; 6];
        // 6 * 0xFF = 0x5FA -> 0xFA, negated = 0x06
        assert_eq!(checksum(&bytes), 0x06);
    }
}
