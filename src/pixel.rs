/// Pixel memory layout. Every layout stores 8 bits per channel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel grayscale.
    Gray8,
    /// Grayscale followed by alpha.
    GrayAlpha8,
    /// 3 channels, RGB.
    Rgb8,
    /// 4 channels, RGBA.
    Rgba8,
    /// 3 channels, BGR.
    Bgr8,
    /// 4 channels, BGRA.
    Bgra8,
}

impl PixelLayout {
    /// Native layout for a PNM sample count per pixel.
    ///
    /// Only the four layouts a PNM stream can carry are returned.
    pub fn from_channels(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(Self::Gray8),
            2 => Some(Self::GrayAlpha8),
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha8 | Self::Rgba8 | Self::Bgra8)
    }

    /// Expand one pixel to RGBA. `px` must hold `bytes_per_pixel()` bytes.
    pub(crate) fn read_rgba(&self, px: &[u8]) -> [u8; 4] {
        match self {
            Self::Gray8 => [px[0], px[0], px[0], 255],
            Self::GrayAlpha8 => [px[0], px[0], px[0], px[1]],
            Self::Rgb8 => [px[0], px[1], px[2], 255],
            Self::Rgba8 => [px[0], px[1], px[2], px[3]],
            Self::Bgr8 => [px[2], px[1], px[0], 255],
            Self::Bgra8 => [px[2], px[1], px[0], px[3]],
        }
    }

    /// Store an RGBA pixel in this layout. `px` must hold `bytes_per_pixel()` bytes.
    pub(crate) fn write_rgba(&self, px: &mut [u8], [r, g, b, a]: [u8; 4]) {
        match self {
            Self::Gray8 => px[0] = luma(r, g, b),
            Self::GrayAlpha8 => {
                px[0] = luma(r, g, b);
                px[1] = a;
            }
            Self::Rgb8 => px[..3].copy_from_slice(&[r, g, b]),
            Self::Rgba8 => px[..4].copy_from_slice(&[r, g, b, a]),
            Self::Bgr8 => px[..3].copy_from_slice(&[b, g, r]),
            Self::Bgra8 => px[..4].copy_from_slice(&[b, g, r, a]),
        }
    }
}

/// Rec.601 luma, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    ((r * 299 + g * 587 + b * 114 + 500) / 1000) as u8
}

/// Typed pixels that can view decoded bytes directly.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGRA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_widens_and_rgb_narrows() {
        let mut rgb = [0u8; 3];
        PixelLayout::Rgb8.write_rgba(&mut rgb, PixelLayout::Gray8.read_rgba(&[77]));
        assert_eq!(rgb, [77, 77, 77]);

        let mut gray = [0u8; 1];
        PixelLayout::Gray8.write_rgba(&mut gray, PixelLayout::Rgb8.read_rgba(&[255, 0, 0]));
        assert_eq!(gray, [76]);
    }

    #[test]
    fn bgra_swizzles() {
        let rgba = PixelLayout::Bgra8.read_rgba(&[1, 2, 3, 4]);
        assert_eq!(rgba, [3, 2, 1, 4]);
        let mut out = [0u8; 3];
        PixelLayout::Bgr8.write_rgba(&mut out, rgba);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn missing_alpha_is_opaque() {
        assert_eq!(PixelLayout::Rgb8.read_rgba(&[9, 8, 7])[3], 255);
        assert_eq!(PixelLayout::Gray8.read_rgba(&[9])[3], 255);
    }
}
