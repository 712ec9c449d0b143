use thiserror::Error;

/// Errors that can occur while encoding or decoding blob properties.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The version tag is outside the range this codec understands.
    #[error("unsupported blob properties version: {version}")]
    UnsupportedVersion {
        /// The tag found on the wire.
        version: i16,
    },

    /// The input ended before a field was complete.
    #[error("truncated input reading {field}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Field being read.
        field: &'static str,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// The destination buffer cannot hold the encoded record.
    #[error("insufficient buffer space: needed {needed} bytes, {remaining} remaining")]
    InsufficientBufferSpace {
        /// Bytes the encoding requires.
        needed: usize,
        /// Bytes left in the destination.
        remaining: usize,
    },

    /// A text length prefix is negative.
    #[error("negative length {length} for {field}")]
    NegativeLength {
        /// Field being read.
        field: &'static str,
        /// The length found on the wire.
        length: i32,
    },

    /// Text bytes are not valid UTF-8.
    #[error("{field} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Field being read.
        field: &'static str,
        /// Underlying conversion error.
        source: std::string::FromUtf8Error,
    },

    /// A text value does not fit in a 32-bit length prefix.
    #[error("{field} is {length} bytes, too long for a length prefix")]
    TextTooLong {
        /// Field being written.
        field: &'static str,
        /// Byte length of the text.
        length: usize,
    },
}

impl CodecError {
    /// Returns `true` if the error means the stored bytes are unreadable.
    ///
    /// Storage readers quarantine records that fail this way. The remaining
    /// errors are sizing mistakes on the write path.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion { .. }
                | Self::TruncatedInput { .. }
                | Self::NegativeLength { .. }
                | Self::InvalidUtf8 { .. }
        )
    }
}
