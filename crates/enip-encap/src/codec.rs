//! `tokio_util::codec` adapter for encapsulation packets.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{EncapError, Result};
use crate::packet::{decode_packet, encode_packet, EncapConfig, EncapPacket};

/// Packet codec for `Framed` streams.
#[derive(Debug, Clone, Default)]
pub struct EncapCodec {
    config: EncapConfig,
}

impl EncapCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncapConfig {
        &self.config
    }
}

impl Decoder for EncapCodec {
    type Item = EncapPacket;
    type Error = EncapError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        decode_packet(src, self.config.max_payload_size)
    }
}

impl Encoder<EncapPacket> for EncapCodec {
    type Error = EncapError;

    fn encode(&mut self, item: EncapPacket, dst: &mut BytesMut) -> Result<()> {
        if item.payload.len() > self.config.max_payload_size {
            return Err(EncapError::PayloadTooLarge {
                size: item.payload.len(),
                max: self.config.max_payload_size,
            });
        }
        encode_packet(&item.header, &item.payload, dst)
    }
}
