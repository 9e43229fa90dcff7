use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use enip_encap::{command_name, status_name, EncapHeader};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct HeaderOutput<'a> {
    schema_id: &'a str,
    command: u16,
    command_name: &'a str,
    length: u16,
    session_handle: u32,
    status: u32,
    status_name: &'a str,
    context: [u32; 2],
    options: u32,
    payload_size: usize,
    wire: String,
}

/// Print a header together with the payload bytes that followed it.
///
/// `Raw` writes the wire bytes (header + payload) unmodified.
pub fn print_header(header: &EncapHeader, payload: &[u8], format: OutputFormat) {
    let mut wire = header.to_bytes().to_vec();
    wire.extend_from_slice(payload);

    match format {
        OutputFormat::Json => {
            let out = HeaderOutput {
                schema_id: "https://schemas.3leaps.dev/enip/cli/v1/encap-header.schema.json",
                command: header.command,
                command_name: command_name(header.command),
                length: header.length,
                session_handle: header.session_handle,
                status: header.status,
                status_name: status_name(header.status),
                context: header.context,
                options: header.options,
                payload_size: payload.len(),
                wire: hex::encode(&wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec![
                    "command".to_string(),
                    format!("0x{:04X} ({})", header.command, command_name(header.command)),
                ])
                .add_row(vec!["length".to_string(), header.length.to_string()])
                .add_row(vec![
                    "session_handle".to_string(),
                    format!("0x{:08X}", header.session_handle),
                ])
                .add_row(vec![
                    "status".to_string(),
                    format!("0x{:08X} ({})", header.status, status_name(header.status)),
                ])
                .add_row(vec![
                    "context".to_string(),
                    format!("0x{:08X} 0x{:08X}", header.context[0], header.context[1]),
                ])
                .add_row(vec![
                    "options".to_string(),
                    format!("0x{:08X}", header.options),
                ])
                .add_row(vec!["payload".to_string(), payload_preview(payload)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "command=0x{:04X} ({}) length={} session=0x{:08X} status=0x{:08X} ({}) context=[0x{:08X}, 0x{:08X}] options=0x{:08X}",
                header.command,
                command_name(header.command),
                header.length,
                header.session_handle,
                header.status,
                status_name(header.status),
                header.context[0],
                header.context[1],
                header.options,
            );
            println!("{}", spaced_hex(&wire));
        }
        OutputFormat::Raw => {
            print_raw(&wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Uppercase hex bytes separated by single spaces, e.g. `AA 55 08 00`.
pub fn spaced_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn payload_preview(payload: &[u8]) -> String {
    if payload.is_empty() {
        return "<empty>".to_string();
    }
    match std::str::from_utf8(payload) {
        Ok(text) if !text.contains('\0') => text.to_string(),
        _ => format!("<binary {} bytes> {}", payload.len(), spaced_hex(payload)),
    }
}
