use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;
#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::config::DecodeConfig;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::pnm::{self, PnmFormat};
use crate::surface::Surface;

/// Builder for a single decode.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    config: DecodeConfig,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            config: DecodeConfig::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode to a packed buffer in the image's native layout.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, PnmError> {
        pnm::decode(self.data, self.config, self.limits, &stop)
    }

    /// Decode into a caller-provided surface, converting layout if needed.
    pub fn decode_into(
        self,
        dest: &mut Surface<'_>,
        stop: impl Stop,
    ) -> Result<ImageInfo, PnmError> {
        pnm::decode_into(self.data, dest, self.config, self.limits, &stop)
    }
}

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub format: PnmFormat,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            format: self.format,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub(crate) fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        format: PnmFormat,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
            format,
        }
    }

    pub(crate) fn owned(
        data: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        format: PnmFormat,
    ) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
            format,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`PnmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], PnmError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(PnmError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`PnmError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, PnmError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
