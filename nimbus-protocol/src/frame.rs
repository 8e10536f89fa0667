//! Frame encoding and decoding for the serial data link.
//!
//! Frame format:
//! - SYNC (1 byte): 0x5A synchronization byte
//! - KIND (1 byte): message kind identifier
//! - LENGTH (1 byte): body length (0-240)
//! - BODY (0-240 bytes): kind-specific data
//! - CRC (1 byte): CRC-8 (poly 0x07, init 0x00) over KIND, LENGTH and BODY

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_SYNC: u8 = 0x5A;

/// Maximum body size in bytes
pub const MAX_BODY_SIZE: usize = 240;

/// Maximum complete frame size (SYNC + KIND + LENGTH + MAX_BODY + CRC)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_BODY_SIZE + 1;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Body exceeds [`MAX_BODY_SIZE`]
    BodyTooLarge,
    /// CRC mismatch
    BadCrc,
    /// LENGTH byte larger than [`MAX_BODY_SIZE`]
    LengthOutOfRange,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::BodyTooLarge => f.write_str("frame body too large"),
            FrameError::BadCrc => f.write_str("frame CRC mismatch"),
            FrameError::LengthOutOfRange => f.write_str("frame length out of range"),
            FrameError::BufferTooSmall => f.write_str("output buffer too small"),
        }
    }
}

/// CRC-8 with polynomial 0x07 and zero initial value
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |crc, &byte| crc8_step(crc, byte))
}

fn crc8_step(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind identifier
    pub kind: u8,
    /// Body bytes
    pub body: Vec<u8, MAX_BODY_SIZE>,
}

impl Frame {
    /// Create a frame with the given kind and body
    pub fn new(kind: u8, body: &[u8]) -> Result<Self, FrameError> {
        let body = Vec::from_slice(body).map_err(|_| FrameError::BodyTooLarge)?;
        Ok(Self { kind, body })
    }

    /// Create a frame with no body
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            body: Vec::new(),
        }
    }

    /// Encoded size of this frame in bytes
    pub fn encoded_len(&self) -> usize {
        4 + self.body.len()
    }

    fn crc(&self) -> u8 {
        let header = crc8_step(crc8_step(0, self.kind), self.body.len() as u8);
        self.body
            .iter()
            .fold(header, |crc, &byte| crc8_step(crc, byte))
    }

    /// Encode this frame into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer
            .get_mut(..len)
            .ok_or(FrameError::BufferTooSmall)?;

        let body_end = 3 + self.body.len();
        out[0] = FRAME_SYNC;
        out[1] = self.kind;
        out[2] = self.body.len() as u8;
        out[3..body_end].copy_from_slice(&self.body);
        out[body_end] = self.crc();

        Ok(len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize(self.encoded_len(), 0)
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

/// Byte-at-a-time frame parser
///
/// Bytes before a SYNC byte are skipped, so the parser recovers from line
/// noise or a partially received frame on its own.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    kind: u8,
    expected_len: usize,
    body: Vec<u8, MAX_BODY_SIZE>,
    crc: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    AwaitSync,
    AwaitKind,
    AwaitLength,
    Body,
    AwaitCrc,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::AwaitSync,
            kind: 0,
            expected_len: 0,
            body: Vec::new(),
            crc: 0,
        }
    }

    /// Drop any partially parsed frame
    pub fn reset(&mut self) {
        self.state = ParseState::AwaitSync;
        self.kind = 0;
        self.expected_len = 0;
        self.body.clear();
        self.crc = 0;
    }

    /// True while the parser sits between frames
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::AwaitSync
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` once a complete valid frame has been read,
    /// `Ok(None)` while more bytes are needed. Errors reset the parser.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::AwaitSync => {
                if byte == FRAME_SYNC {
                    self.state = ParseState::AwaitKind;
                }
                Ok(None)
            }
            ParseState::AwaitKind => {
                self.kind = byte;
                self.crc = crc8_step(0, byte);
                self.state = ParseState::AwaitLength;
                Ok(None)
            }
            ParseState::AwaitLength => {
                if byte as usize > MAX_BODY_SIZE {
                    self.reset();
                    return Err(FrameError::LengthOutOfRange);
                }
                self.expected_len = byte as usize;
                self.crc = crc8_step(self.crc, byte);
                self.body.clear();
                self.state = if self.expected_len == 0 {
                    ParseState::AwaitCrc
                } else {
                    ParseState::Body
                };
                Ok(None)
            }
            ParseState::Body => {
                // Capacity is guaranteed by the LENGTH check above
                let _ = self.body.push(byte);
                self.crc = crc8_step(self.crc, byte);
                if self.body.len() == self.expected_len {
                    self.state = ParseState::AwaitCrc;
                }
                Ok(None)
            }
            ParseState::AwaitCrc => {
                let valid = byte == self.crc;
                let frame = Frame {
                    kind: self.kind,
                    body: core::mem::take(&mut self.body),
                };
                self.reset();
                if valid {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::BadCrc)
                }
            }
        }
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after that frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc8_check_value() {
        // Standard CRC-8/SMBUS check value
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_encode_empty_body() {
        let frame = Frame::empty(0x11);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buffer[0], FRAME_SYNC);
        assert_eq!(buffer[1], 0x11);
        assert_eq!(buffer[2], 0);
        assert_eq!(buffer[3], crc8(&[0x11, 0]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x10, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_body_too_large() {
        let body = [0u8; MAX_BODY_SIZE + 1];
        assert_eq!(Frame::new(0x10, &body), Err(FrameError::BodyTooLarge));
    }

    #[test]
    fn test_parser_rejects_bad_crc() {
        let mut encoded = Frame::new(0x10, &[9, 8, 7]).unwrap().encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x01;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::BadCrc));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&[FRAME_SYNC, 0x10]), Ok(None));
        assert_eq!(parser.feed(0xFF), Err(FrameError::LengthOutOfRange));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_waits_for_partial_frame() {
        let encoded = Frame::new(0x10, &[1, 2, 3, 4]).unwrap().encode_to_vec().unwrap();
        let (head, tail) = encoded.split_at(5);

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(head), Ok(None));
        let frame = parser.feed_bytes(tail).unwrap().unwrap();
        assert_eq!(frame.body.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_two_frames_back_to_back() {
        let first = Frame::new(0x10, &[1]).unwrap().encode_to_vec().unwrap();
        let second = Frame::empty(0x11).encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let mut frames = heapless::Vec::<Frame, 4>::new();
        for &byte in first.iter().chain(second.iter()) {
            if let Some(frame) = parser.feed(byte).unwrap() {
                frames.push(frame).unwrap();
            }
        }

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].kind, 0x10);
        assert_eq!(frames[1].kind, 0x11);
    }

    proptest! {
        #[test]
        fn prop_parser_recovers_after_noise(
            noise in proptest::collection::vec(any::<u8>().prop_filter("not sync", |b| *b != FRAME_SYNC), 0..32),
            kind in any::<u8>(),
            body in proptest::collection::vec(any::<u8>(), 0..=MAX_BODY_SIZE),
        ) {
            let frame = Frame::new(kind, &body).unwrap();
            let encoded = frame.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&noise), Ok(None));
            prop_assert_eq!(parser.feed_bytes(&encoded), Ok(Some(frame)));
        }

        #[test]
        fn prop_single_bit_flip_is_caught(
            kind in any::<u8>(),
            body in proptest::collection::vec(any::<u8>(), 1..64),
            pick in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut encoded = Frame::new(kind, &body).unwrap().encode_to_vec().unwrap();
            // Flip anywhere except SYNC and LENGTH, which change framing itself
            let candidates: heapless::Vec<usize, MAX_FRAME_SIZE> =
                (0..encoded.len()).filter(|&i| i != 0 && i != 2).collect();
            let at = candidates[pick.index(candidates.len())];
            encoded[at] ^= 1 << bit;

            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::BadCrc));
        }
    }
}
