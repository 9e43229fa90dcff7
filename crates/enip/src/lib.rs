//! EtherNet/IP encapsulation codec.
//!
//! # Crate Structure
//!
//! - [`encap`]: the 24-byte encapsulation header, packet framing, blocking
//!   reader/writer and (behind the `async` feature) a `tokio_util` codec
//!
//! The `enip` binary (behind the `cli` feature) encodes and decodes headers
//! from the command line.

/// Re-export encapsulation types.
pub mod encap {
    pub use enip_encap::*;
}
