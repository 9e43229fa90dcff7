use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{EncapError, Result};
use crate::header::{EncapHeader, HEADER_SIZE};

/// Largest payload the 16-bit `length` field can announce.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// An encapsulation message: header plus the payload it announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncapPacket {
    /// The encapsulation header. `length` matches `payload.len()` after decode.
    pub header: EncapHeader,
    /// Command-specific data following the header.
    pub payload: Bytes,
}

impl EncapPacket {
    /// Create a new packet.
    pub fn new(header: EncapHeader, payload: impl Into<Bytes>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    /// The total wire size of this packet (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a header and its payload into the wire format.
///
/// The header's `length` field is replaced by `payload.len()`; every other
/// field is written as given.
pub fn encode_packet(header: &EncapHeader, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let length = u16::try_from(payload.len()).map_err(|_| EncapError::PayloadTooLarge {
        size: payload.len(),
        max: MAX_PAYLOAD,
    })?;

    dst.reserve(HEADER_SIZE + payload.len());
    EncapHeader { length, ..*header }.encode(dst);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a packet from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete packet yet.
/// On success, consumes exactly one packet from the buffer.
pub fn decode_packet(src: &mut BytesMut, max_payload: usize) -> Result<Option<EncapPacket>> {
    let header = match EncapHeader::from_bytes(&src[..]) {
        Ok(header) => header,
        Err(EncapError::InsufficientData { .. }) => return Ok(None), // Need more data
        Err(err) => return Err(err),
    };

    let payload_len = header.payload_len();
    if payload_len > max_payload {
        return Err(EncapError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    if src.len() < header.wire_size() {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(EncapPacket { header, payload }))
}

/// Configuration for packet I/O.
#[derive(Debug, Clone)]
pub struct EncapConfig {
    /// Maximum payload size in bytes. Default: [`MAX_PAYLOAD`].
    pub max_payload_size: usize,
}

impl Default for EncapConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}
