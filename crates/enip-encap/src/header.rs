use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut};

use crate::error::{EncapError, Result};

/// Encapsulation header size on the wire.
pub const HEADER_SIZE: usize = 24;

/// The fixed prefix of every EtherNet/IP encapsulation message.
///
/// Wire format (all fields little-endian):
/// ```text
/// ┌─────────┬────────┬──────────┬────────┬────────────┬────────────┬─────────┐
/// │ Command │ Length │ Session  │ Status │ Context[0] │ Context[1] │ Options │
/// │ (2B)    │ (2B)   │ (4B)     │ (4B)   │ (4B)       │ (4B)       │ (4B)    │
/// └─────────┴────────┴──────────┴────────┴────────────┴────────────┴─────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EncapHeader {
    /// Encapsulation command code.
    pub command: u16,
    /// Number of payload bytes following the header.
    pub length: u16,
    /// Session identifier assigned by the target.
    pub session_handle: u32,
    /// Zero on success, an error code otherwise.
    pub status: u32,
    /// Sender context, echoed back unmodified by the target.
    pub context: [u32; 2],
    /// Option flags.
    pub options: u32,
}

impl EncapHeader {
    /// Create a header for `command` on `session_handle`; every other field is zero.
    pub fn new(command: u16, session_handle: u32) -> Self {
        Self {
            command,
            session_handle,
            ..Self::default()
        }
    }

    /// Payload length announced by this header.
    pub fn payload_len(&self) -> usize {
        usize::from(self.length)
    }

    /// Total wire size of the message this header introduces (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload_len()
    }

    /// Returns true if the status field reports success.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Append the 24-byte wire representation to `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` cannot grow and has fewer than [`HEADER_SIZE`] bytes
    /// of room left (e.g. a short `&mut [u8]`). Use [`EncapHeader::to_bytes`]
    /// or a `BytesMut` when the destination size is not known.
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_u16_le(self.command);
        dst.put_u16_le(self.length);
        dst.put_u32_le(self.session_handle);
        dst.put_u32_le(self.status);
        dst.put_u32_le(self.context[0]);
        dst.put_u32_le(self.context[1]);
        dst.put_u32_le(self.options);
    }

    /// The 24-byte wire representation.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        self.encode(&mut &mut out[..]);
        out
    }

    /// Decode a header from the front of `src`, advancing it by exactly
    /// [`HEADER_SIZE`] bytes.
    ///
    /// Anything after the header is left in `src` for the payload layer.
    /// Returns [`EncapError::InsufficientData`] without consuming anything if
    /// fewer than 24 bytes remain.
    pub fn decode<B: Buf>(src: &mut B) -> Result<Self> {
        if src.remaining() < HEADER_SIZE {
            return Err(EncapError::InsufficientData {
                needed: HEADER_SIZE,
                available: src.remaining(),
            });
        }

        Ok(Self {
            command: src.get_u16_le(),
            length: src.get_u16_le(),
            session_handle: src.get_u32_le(),
            status: src.get_u32_le(),
            context: [src.get_u32_le(), src.get_u32_le()],
            options: src.get_u32_le(),
        })
    }

    /// Decode a header from the start of a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        Self::decode(&mut cursor)
    }

    /// Write the header to a blocking sink.
    pub fn write_to<W: Write>(&self, dst: &mut W) -> std::io::Result<()> {
        dst.write_all(&self.to_bytes())
    }

    /// Read exactly one header from a blocking source.
    ///
    /// Nothing beyond the 24 header bytes is read. EOF before the header is
    /// complete is reported as [`EncapError::InsufficientData`].
    pub fn read_from<R: Read>(src: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut filled = 0usize;
        while filled < HEADER_SIZE {
            match src.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(EncapError::InsufficientData {
                        needed: HEADER_SIZE,
                        available: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EncapError::Io(err)),
            }
        }
        Self::from_bytes(&buf)
    }
}
