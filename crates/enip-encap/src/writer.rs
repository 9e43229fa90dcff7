use std::io::{ErrorKind, Write};

use tracing::trace;

use crate::error::{EncapError, Result};
use crate::header::EncapHeader;
use crate::packet::{EncapConfig, EncapPacket, MAX_PAYLOAD};

/// Writes complete encapsulation packets to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    config: EncapConfig,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, EncapConfig::default())
    }

    /// Create a new packet writer with explicit configuration.
    pub fn with_config(inner: T, config: EncapConfig) -> Self {
        Self { inner, config }
    }

    /// Write a complete packet (blocking).
    pub fn write_packet(&mut self, packet: &EncapPacket) -> Result<()> {
        self.send(&packet.header, packet.payload.as_ref())
    }

    /// Encode and send a payload under `header`.
    ///
    /// The header's `length` is set from the payload. The limit is the
    /// configured maximum, capped at what the 16-bit `length` field holds.
    pub fn send(&mut self, header: &EncapHeader, payload: &[u8]) -> Result<()> {
        let max = self.config.max_payload_size.min(MAX_PAYLOAD);
        if payload.len() > max {
            return Err(EncapError::PayloadTooLarge {
                size: payload.len(),
                max,
            });
        }

        let header = EncapHeader {
            length: payload.len() as u16,
            ..*header
        };
        self.write_all(&header.to_bytes())?;
        self.write_all(payload)?;

        trace!(
            command = header.command,
            session = header.session_handle,
            length = header.length,
            "wrote encapsulation packet"
        );

        self.flush()
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<()> {
        while !bytes.is_empty() {
            match self.inner.write(bytes) {
                Ok(0) => return Err(EncapError::ConnectionClosed),
                Ok(n) => bytes = &bytes[n..],
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(EncapError::Io(err)),
            }
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(EncapError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent packet encoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current packet writer configuration.
    pub fn config(&self) -> &EncapConfig {
        &self.config
    }
}
