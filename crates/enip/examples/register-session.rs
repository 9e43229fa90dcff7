//! Register-session exchange over an in-process socket pair.
//!
//! Run with:
//!   cargo run --example register-session
//!
//! The "target" thread answers a REGISTER_SESSION request with a session
//! handle and echoes the sender context, the way a real adapter would.

use std::os::unix::net::UnixStream;
use std::thread;

use enip::encap::{EncapHeader, PacketReader, PacketWriter, REGISTER_SESSION, SEND_RR_DATA};

const SESSION_HANDLE: u32 = 0x0001_0203;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (originator, target) = UnixStream::pair()?;

    let target_thread = thread::spawn(move || -> enip::encap::Result<()> {
        let mut reader = PacketReader::new(target.try_clone()?);
        let mut writer = PacketWriter::new(target);

        let request = reader.read_packet()?;
        let reply = EncapHeader {
            session_handle: SESSION_HANDLE,
            context: request.header.context,
            ..request.header
        };
        writer.send(&reply, &request.payload)?;
        Ok(())
    });

    let mut reader = PacketReader::new(originator.try_clone()?);
    let mut writer = PacketWriter::new(originator);

    // Protocol version 1, no option flags.
    let request = EncapHeader {
        context: [0xC0FF_EE00, 0x0000_0001],
        ..EncapHeader::new(REGISTER_SESSION, 0)
    };
    writer.send(&request, &[0x01, 0x00, 0x00, 0x00])?;

    let reply = reader.read_packet()?;
    eprintln!(
        "session 0x{:08X} registered (status {}, context echoed: {})",
        reply.header.session_handle,
        reply.header.status,
        reply.header.context == request.context
    );

    let followup = EncapHeader::new(SEND_RR_DATA, reply.header.session_handle);
    eprintln!("next request header: {:02X?}", followup.to_bytes());

    target_thread
        .join()
        .map_err(|_| "target thread panicked")??;
    Ok(())
}
