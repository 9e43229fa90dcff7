//! EtherNet/IP encapsulation header and packet codec.
//!
//! Every EtherNet/IP message starts with a fixed 24-byte encapsulation
//! header, all fields little-endian:
//! - command (2), length (2), session handle (4), status (4)
//! - sender context (2 x 4), options (4)
//!
//! The header layer is semantics-agnostic: any bit pattern decodes, and the
//! only failure is running out of bytes. Packet framing, blocking
//! reader/writer and the optional `tokio_util` codec build on top of it.

#[cfg(feature = "async")]
pub mod codec;
pub mod command;
pub mod error;
pub mod header;
pub mod packet;
pub mod reader;
pub mod status;
pub mod writer;

#[cfg(feature = "async")]
pub use codec::EncapCodec;
pub use command::{
    command_name, LIST_IDENTITY, LIST_INTERFACES, LIST_SERVICES, NOP, REGISTER_SESSION,
    SEND_RR_DATA, SEND_UNIT_DATA, UNREGISTER_SESSION,
};
pub use error::{EncapError, Result};
pub use header::{EncapHeader, HEADER_SIZE};
pub use packet::{decode_packet, encode_packet, EncapConfig, EncapPacket, MAX_PAYLOAD};
pub use reader::PacketReader;
pub use status::{
    status_name, INCORRECT_DATA, INSUFFICIENT_MEMORY, INVALID_COMMAND, INVALID_LENGTH,
    INVALID_SESSION, SUCCESS, UNSUPPORTED_PROTOCOL,
};
pub use writer::PacketWriter;
