use bytes::BytesMut;
use enip_encap::{encode_packet, EncapHeader, HEADER_SIZE};

use crate::cmd::EncodeArgs;
use crate::exit::{encap_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_header, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let header = build_header(&args)?;
    let payload = resolve_payload(&args)?;

    let mut wire = BytesMut::new();
    encode_packet(&header, &payload, &mut wire).map_err(|err| encap_error("encode failed", err))?;

    // Report what actually went on the wire, including the derived length.
    let encoded = EncapHeader::from_bytes(&wire).map_err(|err| encap_error("encode failed", err))?;
    tracing::debug!(
        command = encoded.command,
        length = encoded.length,
        "encoded encapsulation packet"
    );

    print_header(&encoded, &wire[HEADER_SIZE..], format);
    Ok(SUCCESS)
}

fn build_header(args: &EncodeArgs) -> CliResult<EncapHeader> {
    let context = match args.context.as_deref() {
        None => [0, 0],
        Some([first, second]) => [*first, *second],
        Some(other) => {
            return Err(CliError::new(
                USAGE,
                format!("--context takes exactly two values, got {}", other.len()),
            ))
        }
    };

    Ok(EncapHeader {
        status: args.status,
        context,
        options: args.options,
        ..EncapHeader::new(args.command, args.session)
    })
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(encoded) = &args.hex_payload {
        return crate::cmd::decode::parse_hex(encoded);
    }
    Ok(Vec::new())
}
