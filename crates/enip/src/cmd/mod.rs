use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an encapsulation packet and print its wire bytes.
    Encode(EncodeArgs),
    /// Decode an encapsulation header from wire bytes.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command code (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_u16)]
    pub command: u16,
    /// Session handle.
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    pub session: u32,
    /// Status code.
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    pub status: u32,
    /// Sender context as two 32-bit words (e.g. 0x1,0x2).
    #[arg(long, value_delimiter = ',', value_parser = parse_u32)]
    pub context: Option<Vec<u32>>,
    /// Options field.
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    pub options: u32,
    /// Raw string payload.
    #[arg(long, conflicts_with = "hex_payload")]
    pub data: Option<String>,
    /// Hex-encoded payload.
    #[arg(long, conflicts_with = "data")]
    pub hex_payload: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded wire bytes (whitespace and a leading 0x are ignored).
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw wire bytes from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_number(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(&digits.replace('_', ""), 16),
        None => input.replace('_', "").parse(),
    };
    parsed.map_err(|err| format!("invalid number {input:?}: {err}"))
}

pub fn parse_u16(input: &str) -> Result<u16, String> {
    let value = parse_number(input)?;
    u16::try_from(value).map_err(|_| format!("{input} does not fit in 16 bits"))
}

pub fn parse_u32(input: &str) -> Result<u32, String> {
    let value = parse_number(input)?;
    u32::try_from(value).map_err(|_| format!("{input} does not fit in 32 bits"))
}
