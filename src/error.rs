use alloc::string::String;
use enough::StopReason;

/// Errors from PNM header parsing and pixel decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("no decoder registered for extension {0:?}")]
    UnknownExtension(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`PnmError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not a recognizable PNM stream or its header is malformed.
    /// Raised before any pixel data is read.
    Format,
    /// The header was valid but the binary pixel data is truncated.
    Decode,
    /// A dimension or allocation exceeded [`crate::Limits`] or the address space.
    Limit,
    /// The caller passed an unusable buffer, layout or extension.
    Usage,
    /// A [`crate::Stop`] token requested cancellation.
    Cancelled,
}

impl PnmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PnmError::UnrecognizedFormat
            | PnmError::InvalidHeader(_)
            | PnmError::UnsupportedVariant(_) => ErrorKind::Format,
            PnmError::UnexpectedEof => ErrorKind::Decode,
            PnmError::DimensionsTooLarge { .. } | PnmError::LimitExceeded(_) => ErrorKind::Limit,
            PnmError::LayoutMismatch { .. }
            | PnmError::BufferTooSmall { .. }
            | PnmError::UnknownExtension(_) => ErrorKind::Usage,
            PnmError::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    /// Whether this error was raised while parsing the header.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Whether this error was raised while reading pixel samples.
    pub fn is_decode_error(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
