#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive] // new errors may be added later
pub enum Error {
    /// Caller input violates a documented precondition (oversize length,
    /// undersized output slice, telemetry counts out of range).
    InvalidArgument,
    /// The output slice cannot hold the stuffed frame.
    BufferOverflow,
    /// A received `LEN` field exceeds the payload bound.
    InvalidLength,
    /// CRC-16 mismatch at end of frame.
    InvalidCrc { received: u16, computed: u16 },
    /// Malformed frame or body structure: missing END delimiter, bad body
    /// header, truncated or non-canonical encoding.
    FramingError,
    /// A well-formed body carried a message type outside the catalog.
    InvalidMessage(u8),
}

// std::error::Error trait obviously isn't available in no_std
