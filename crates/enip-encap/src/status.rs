//! Encapsulation status codes carried in the header `status` field.
//!
//! Like the command list, these are for display; a header with any status
//! value decodes.

/// The request was carried out.
pub const SUCCESS: u32 = 0x0000;

/// The sender issued an unsupported or invalid encapsulation command.
pub const INVALID_COMMAND: u32 = 0x0001;

/// The receiver lacks memory to handle the command.
pub const INSUFFICIENT_MEMORY: u32 = 0x0002;

/// The data portion of the message was malformed.
pub const INCORRECT_DATA: u32 = 0x0003;

/// The session handle is unknown to the target.
pub const INVALID_SESSION: u32 = 0x0064;

/// The message length field does not match the data received.
pub const INVALID_LENGTH: u32 = 0x0065;

/// The requested encapsulation protocol revision is not supported.
pub const UNSUPPORTED_PROTOCOL: u32 = 0x0069;

/// Returns a human-readable name for a status code.
pub fn status_name(status: u32) -> &'static str {
    match status {
        SUCCESS => "SUCCESS",
        INVALID_COMMAND => "INVALID_COMMAND",
        INSUFFICIENT_MEMORY => "INSUFFICIENT_MEMORY",
        INCORRECT_DATA => "INCORRECT_DATA",
        INVALID_SESSION => "INVALID_SESSION",
        INVALID_LENGTH => "INVALID_LENGTH",
        UNSUPPORTED_PROTOCOL => "UNSUPPORTED_PROTOCOL",
        _ => "UNKNOWN",
    }
}

/// Returns true if the status is one of the codes listed above.
pub fn is_known(status: u32) -> bool {
    status_name(status) != "UNKNOWN"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_status_codes() {
        assert_eq!(status_name(0), "SUCCESS");
        assert_eq!(status_name(INVALID_SESSION), "INVALID_SESSION");
        assert_eq!(status_name(0xFEDC_BA98), "UNKNOWN");
    }

    #[test]
    fn known_set() {
        assert!(is_known(SUCCESS));
        assert!(is_known(UNSUPPORTED_PROTOCOL));
        assert!(!is_known(0x0004));
    }

    #[test]
    fn catalog_reexported_at_crate_root() {
        assert_eq!(crate::INVALID_LENGTH, INVALID_LENGTH);
        assert_eq!(crate::status_name(crate::INCORRECT_DATA), "INCORRECT_DATA");
        assert_eq!(crate::command_name(crate::SEND_UNIT_DATA), "SEND_UNIT_DATA");
    }
}
