/// Errors that can occur while encoding or decoding encapsulation data.
#[derive(Debug, thiserror::Error)]
pub enum EncapError {
    /// Fewer bytes are available than the header requires.
    ///
    /// Stream consumers should treat this as "frame not fully arrived yet"
    /// rather than as a protocol violation.
    #[error("insufficient data ({available} bytes available, {needed} needed)")]
    InsufficientData { needed: usize, available: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing packets.
    #[error("encapsulation I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete packet was transferred.
    #[error("connection closed (incomplete packet)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, EncapError>;
