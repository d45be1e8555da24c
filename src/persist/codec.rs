//! Fixed-layout little-endian codec for review-state and day-counter files.
//!
//! Review-state layout:
//!
//! ```text
//! [u8 version][u32 count][count x (f32 ease, u16 interval, u16 repetitions, u32 due_day)]
//! ```

use thiserror::Error;

use crate::{card::CardState, types::DayNumber};

/// Current review-state format version.
pub const SAVE_FORMAT_VERSION: u8 = 1;
/// Bytes in the version + count header.
pub const HEADER_LEN: usize = 1 + 4;
/// Bytes per encoded [`CardState`].
pub const RECORD_LEN: usize = 4 + 2 + 2 + 4;

/// Decode failures. Both are treated as "no saved state" by callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Version byte does not match [`SAVE_FORMAT_VERSION`].
    #[error("unknown save format version {0}")]
    UnknownVersion(u8),
    /// Payload ended before the declared content.
    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

/// Result of decoding a review-state blob.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStates {
    /// Record count stored in the file.
    pub saved_count: usize,
    /// Leading records kept, at most the caller's limit.
    pub states: Vec<CardState>,
}

/// Encodes every record with the current version header.
pub fn encode_states(states: &[CardState]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + states.len() * RECORD_LEN);
    out.push(SAVE_FORMAT_VERSION);
    out.extend_from_slice(&(states.len() as u32).to_le_bytes());
    for st in states {
        out.extend_from_slice(&st.ease_factor.to_le_bytes());
        out.extend_from_slice(&st.interval.to_le_bytes());
        out.extend_from_slice(&st.repetitions.to_le_bytes());
        out.extend_from_slice(&st.due_day.to_le_bytes());
    }
    out
}

/// Decodes a review-state blob, keeping at most `limit` records.
///
/// Records past `limit` are still walked so a truncated tail is reported,
/// but they are not returned.
pub fn decode_states(bytes: &[u8], limit: usize) -> Result<DecodedStates, CodecError> {
    let mut reader = Reader::new(bytes);
    let version = reader.u8()?;
    if version != SAVE_FORMAT_VERSION {
        return Err(CodecError::UnknownVersion(version));
    }
    let saved_count = reader.u32()? as usize;

    let expected = saved_count.saturating_mul(RECORD_LEN).saturating_add(HEADER_LEN);
    if bytes.len() < expected {
        return Err(CodecError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let keep = saved_count.min(limit);
    let mut states = Vec::with_capacity(keep);
    for i in 0..saved_count {
        let st = CardState {
            ease_factor: reader.f32()?,
            interval: reader.u16()?,
            repetitions: reader.u16()?,
            due_day: reader.u32()?,
        };
        if i < keep {
            states.push(st);
        }
    }

    Ok(DecodedStates { saved_count, states })
}

/// Day counter as four little-endian bytes.
pub fn encode_day(day: DayNumber) -> [u8; 4] {
    day.to_le_bytes()
}

/// Reads the counter from the first four bytes.
pub fn decode_day(bytes: &[u8]) -> Result<DayNumber, CodecError> {
    Reader::new(bytes).u32()
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let end = self.pos + N;
        let slice = self.bytes.get(self.pos..end).ok_or(CodecError::Truncated {
            expected: end,
            actual: self.bytes.len(),
        })?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        self.pos = end;
        Ok(buf)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn f32(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_le_bytes(self.take()?))
    }
}
