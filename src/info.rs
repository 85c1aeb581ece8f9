use crate::error::PnmError;
use crate::pixel::PixelLayout;
use crate::pnm::PnmFormat;

/// Image properties read from the header alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    /// Layout that decoding produces without conversion.
    pub native_layout: PixelLayout,
    /// Declared maximum sample value.
    pub maxval: u32,
}

impl ImageInfo {
    /// Probe a PNM header without decoding pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        crate::pnm::probe_header(data)
    }
}
