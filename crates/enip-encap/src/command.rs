//! Well-known encapsulation command codes.
//!
//! The codec never rejects a command that is missing from this list;
//! these are provided for logging and display only.

/// No operation; may be sent by either end, no reply.
pub const NOP: u16 = 0x0000;

/// Ask a target which encapsulation services it supports.
pub const LIST_SERVICES: u16 = 0x0004;

/// Identity discovery (usually broadcast over UDP).
pub const LIST_IDENTITY: u16 = 0x0063;

/// Enumerate non-CIP communication interfaces.
pub const LIST_INTERFACES: u16 = 0x0064;

/// Open a session; the target assigns the session handle in its reply.
pub const REGISTER_SESSION: u16 = 0x0065;

/// Close a session.
pub const UNREGISTER_SESSION: u16 = 0x0066;

/// Request/reply (unconnected) CIP data.
pub const SEND_RR_DATA: u16 = 0x006F;

/// Connected CIP data.
pub const SEND_UNIT_DATA: u16 = 0x0070;

/// Returns a human-readable name for a command code.
pub fn command_name(command: u16) -> &'static str {
    match command {
        NOP => "NOP",
        LIST_SERVICES => "LIST_SERVICES",
        LIST_IDENTITY => "LIST_IDENTITY",
        LIST_INTERFACES => "LIST_INTERFACES",
        REGISTER_SESSION => "REGISTER_SESSION",
        UNREGISTER_SESSION => "UNREGISTER_SESSION",
        SEND_RR_DATA => "SEND_RR_DATA",
        SEND_UNIT_DATA => "SEND_UNIT_DATA",
        _ => "UNKNOWN",
    }
}

/// Returns true if the command is one of the codes listed above.
pub fn is_known(command: u16) -> bool {
    command_name(command) != "UNKNOWN"
}
