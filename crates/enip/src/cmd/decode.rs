use std::fs;

use enip_encap::{EncapHeader, HEADER_SIZE};

use crate::cmd::DecodeArgs;
use crate::exit::{encap_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_header, print_raw, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = resolve_input(&args)?;
    tracing::debug!(bytes = bytes.len(), "decoding encapsulation header");

    let header = EncapHeader::from_bytes(&bytes).map_err(|err| encap_error("decode failed", err))?;
    let trailing = &bytes[HEADER_SIZE..];

    if trailing.len() != header.payload_len() {
        tracing::warn!(
            announced = header.length,
            available = trailing.len(),
            "payload size differs from header length"
        );
    }

    match format {
        // Raw strips the header and emits only what followed it.
        OutputFormat::Raw => print_raw(trailing),
        _ => print_header(&header, trailing, format),
    }
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(encoded) = &args.hex {
        return parse_hex(encoded);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "provide hex bytes or --file"))
}

/// Parse hex text, ignoring whitespace, `:` separators and a leading `0x`.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    hex::decode(&digits)
        .map_err(|err| CliError::new(DATA_INVALID, format!("invalid hex input: {err}")))
}
