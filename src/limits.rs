use crate::PnmError;

/// Resource limits for decode operations.
///
/// Dimension limits are checked against the parsed header before any pixel
/// work. The memory limit covers every buffer a decode allocates: the owned
/// output of [`DecodeRequest::decode`](crate::DecodeRequest::decode) and the
/// temporary bitmap that [`DecodeRequest::decode_into`](crate::DecodeRequest::decode_into)
/// decodes into before blitting to a surface whose layout or size differs
/// from the image. Zero-copy output and direct decodes allocate nothing.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for an owned output or temporary decode buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PnmError> {
        if let Some(max_w) = self.max_width
            && u64::from(width) > max_w
        {
            return Err(PnmError::LimitExceeded(alloc::format!(
                "width {width} exceeds limit {max_w}"
            )));
        }
        if let Some(max_h) = self.max_height
            && u64::from(height) > max_h
        {
            return Err(PnmError::LimitExceeded(alloc::format!(
                "height {height} exceeds limit {max_h}"
            )));
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(PnmError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check an owned output or temporary blit bitmap of `bytes` bytes
    /// against `max_memory_bytes`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), PnmError> {
        if let Some(max_mem) = self.max_memory_bytes
            && bytes as u64 > max_mem
        {
            return Err(PnmError::LimitExceeded(alloc::format!(
                "decode buffer of {bytes} bytes exceeds memory limit {max_mem}"
            )));
        }
        Ok(())
    }
}
