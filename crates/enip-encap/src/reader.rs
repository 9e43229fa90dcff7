use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::trace;

use crate::error::{EncapError, Result};
use crate::packet::{decode_packet, EncapConfig, EncapPacket};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete encapsulation packets from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete packets.
pub struct PacketReader<T> {
    inner: T,
    buf: BytesMut,
    config: EncapConfig,
}

impl<T: Read> PacketReader<T> {
    /// Create a new packet reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, EncapConfig::default())
    }

    /// Create a new packet reader with explicit configuration.
    pub fn with_config(inner: T, config: EncapConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete packet (blocking).
    ///
    /// Returns `Err(EncapError::ConnectionClosed)` when EOF is reached.
    pub fn read_packet(&mut self) -> Result<EncapPacket> {
        loop {
            if let Some(packet) = decode_packet(&mut self.buf, self.config.max_payload_size)? {
                trace!(
                    command = packet.header.command,
                    session = packet.header.session_handle,
                    length = packet.payload.len(),
                    "read encapsulation packet"
                );
                return Ok(packet);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EncapError::Io(err)),
            };

            if read == 0 {
                if !self.buf.is_empty() {
                    trace!(buffered = self.buf.len(), "stream closed mid-packet");
                }
                return Err(EncapError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Bytes received but not yet returned as part of a packet.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent packet decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current packet reader configuration.
    pub fn config(&self) -> &EncapConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::command::{LIST_IDENTITY, REGISTER_SESSION, SEND_RR_DATA, SEND_UNIT_DATA};
    use crate::header::EncapHeader;
    use crate::packet::encode_packet;

    fn wire_of(header: EncapHeader, payload: &[u8]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        encode_packet(&header, payload, &mut wire).unwrap();
        wire.to_vec()
    }

    #[test]
    fn read_single_packet() {
        let wire = wire_of(EncapHeader::new(REGISTER_SESSION, 0), b"\x01\x00\x00\x00");

        let mut reader = PacketReader::new(Cursor::new(wire));
        let packet = reader.read_packet().unwrap();

        assert_eq!(packet.header.command, REGISTER_SESSION);
        assert_eq!(packet.payload.as_ref(), b"\x01\x00\x00\x00");
    }

    #[test]
    fn read_multiple_packets() {
        let mut wire = BytesMut::new();
        encode_packet(&EncapHeader::new(SEND_RR_DATA, 7), b"one", &mut wire).unwrap();
        encode_packet(&EncapHeader::new(SEND_UNIT_DATA, 7), b"two", &mut wire).unwrap();
        encode_packet(&EncapHeader::new(LIST_IDENTITY, 0), b"", &mut wire).unwrap();

        let mut reader = PacketReader::new(Cursor::new(wire.to_vec()));

        let p1 = reader.read_packet().unwrap();
        let p2 = reader.read_packet().unwrap();
        let p3 = reader.read_packet().unwrap();

        assert_eq!((p1.header.command, p1.payload.as_ref()), (SEND_RR_DATA, b"one".as_ref()));
        assert_eq!((p2.header.command, p2.payload.as_ref()), (SEND_UNIT_DATA, b"two".as_ref()));
        assert_eq!((p3.header.command, p3.payload.len()), (LIST_IDENTITY, 0));
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn read_packet_with_max_payload() {
        let payload = vec![0xAB; u16::MAX as usize];
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 9), &payload);

        let mut reader = PacketReader::new(Cursor::new(wire));
        let packet = reader.read_packet().unwrap();

        assert_eq!(packet.header.length, u16::MAX);
        assert_eq!(packet.payload.as_ref(), payload.as_slice());
    }

    #[test]
    fn partial_read_handling() {
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 4), b"slow");

        let byte_reader = ByteByByteReader {
            bytes: wire,
            pos: 0,
        };
        let mut reader = PacketReader::new(byte_reader);

        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.header.session_handle, 4);
        assert_eq!(packet.payload.as_ref(), b"slow");
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = PacketReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, EncapError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_header() {
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 2), b"");

        let mut reader = PacketReader::new(Cursor::new(wire[..10].to_vec()));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, EncapError::ConnectionClosed));
        assert_eq!(reader.buffered(), 10);
    }

    #[test]
    fn connection_closed_mid_payload() {
        let mut partial = BytesMut::new();
        EncapHeader {
            length: 16,
            ..EncapHeader::new(SEND_RR_DATA, 2)
        }
        .encode(&mut partial);
        partial.extend_from_slice(b"only-part");

        let mut reader = PacketReader::new(Cursor::new(partial.to_vec()));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, EncapError::ConnectionClosed));
    }

    #[test]
    fn oversized_packet_in_stream() {
        let mut wire = BytesMut::new();
        EncapHeader {
            length: 1024,
            ..EncapHeader::new(SEND_RR_DATA, 1)
        }
        .encode(&mut wire);

        let cfg = EncapConfig {
            max_payload_size: 16,
        };
        let mut reader = PacketReader::with_config(Cursor::new(wire.to_vec()), cfg);
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, EncapError::PayloadTooLarge { .. }));
    }

    #[test]
    fn set_max_payload_size_applies_to_next_read() {
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 1), b"0123456789");

        let mut reader = PacketReader::new(Cursor::new(wire));
        reader.set_max_payload_size(4);
        assert_eq!(reader.config().max_payload_size, 4);

        let err = reader.read_packet().unwrap_err();
        assert!(matches!(
            err,
            EncapError::PayloadTooLarge { size: 10, max: 4 }
        ));
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            if buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn roundtrip_over_socket_pair() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::PacketWriter::new(left);
        let mut reader = PacketReader::new(right);

        writer
            .send(&EncapHeader::new(LIST_IDENTITY, 0), b"")
            .unwrap();
        let packet = reader.read_packet().unwrap();

        assert_eq!(packet.header.command, LIST_IDENTITY);
        assert!(packet.payload.is_empty());
    }

    #[test]
    fn concurrent_reader_writer_threads() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::PacketWriter::new(left);
        let mut reader = PacketReader::new(right);

        let reader_thread = std::thread::spawn(move || {
            for expected in 0..64u32 {
                let packet = reader.read_packet().unwrap();
                assert_eq!(packet.header.context, [expected, !expected]);
                assert_eq!(
                    packet.payload.as_ref(),
                    format!("msg-{expected}").as_bytes()
                );
            }
        });

        for i in 0..64u32 {
            let header = EncapHeader {
                context: [i, !i],
                ..EncapHeader::new(SEND_RR_DATA, 0x1234)
            };
            writer.send(&header, format!("msg-{i}").as_bytes()).unwrap();
        }

        reader_thread.join().unwrap();
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = PacketReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[test]
    fn read_would_block_propagates_io_error() {
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 7), b"ok");

        let reader = ErrorThenData {
            first: Some(ErrorKind::WouldBlock),
            bytes: wire,
            pos: 0,
        };
        let mut framed = PacketReader::new(reader);
        let err = framed.read_packet().unwrap_err();
        assert!(matches!(err, EncapError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn interrupted_read_retries() {
        let wire = wire_of(EncapHeader::new(SEND_RR_DATA, 8), b"ok");

        let reader = ErrorThenData {
            first: Some(ErrorKind::Interrupted),
            bytes: wire,
            pos: 0,
        };
        let mut framed = PacketReader::new(reader);
        let packet = framed.read_packet().unwrap();

        assert_eq!(packet.header.session_handle, 8);
        assert_eq!(packet.payload.as_ref(), b"ok");
    }

    struct ErrorThenData {
        first: Option<ErrorKind>,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ErrorThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if let Some(kind) = self.first.take() {
                return Err(std::io::Error::from(kind));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
