//! PNM family: P1-P6 (PBM, PGM, PPM in ASCII and binary form) and P7 (PAM).
//!
//! Samples are always delivered as 8 bits per channel. 16-bit sources are
//! rescaled with `sample * 255 / maxval`.

mod decode;
mod header;

pub use decode::PnmDecoder;
pub use header::parse_header;

use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::surface::Surface;
use crate::DecodeConfig;
use enough::Stop;

/// PNM sub-format, one per magic number.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1: ASCII bitmap.
    PbmAscii,
    /// P2: ASCII grayscale.
    PgmAscii,
    /// P3: ASCII RGB.
    PpmAscii,
    /// P4: binary bitmap.
    Pbm,
    /// P5: binary grayscale.
    Pgm,
    /// P6: binary RGB.
    Ppm,
    /// P7: PAM, channel count from the DEPTH field.
    Pam,
}

impl PnmFormat {
    /// Look up the digit following `P` in the magic.
    pub fn from_magic_digit(digit: u8) -> Option<Self> {
        Some(match digit {
            b'1' => Self::PbmAscii,
            b'2' => Self::PgmAscii,
            b'3' => Self::PpmAscii,
            b'4' => Self::Pbm,
            b'5' => Self::Pgm,
            b'6' => Self::Ppm,
            b'7' => Self::Pam,
            _ => return None,
        })
    }

    /// The two magic bytes.
    pub fn magic(self) -> [u8; 2] {
        let digit = match self {
            Self::PbmAscii => b'1',
            Self::PgmAscii => b'2',
            Self::PpmAscii => b'3',
            Self::Pbm => b'4',
            Self::Pgm => b'5',
            Self::Ppm => b'6',
            Self::Pam => b'7',
        };
        [b'P', digit]
    }

    pub fn is_ascii(self) -> bool {
        matches!(self, Self::PbmAscii | Self::PgmAscii | Self::PpmAscii)
    }

    /// Whether samples are bits with an implied `maxval` of 1.
    pub fn is_bitmap(self) -> bool {
        matches!(self, Self::PbmAscii | Self::Pbm)
    }

    /// Channel count implied by the magic. `None` for PAM.
    pub(crate) fn implied_channels(self) -> Option<u32> {
        match self {
            Self::PbmAscii | Self::PgmAscii | Self::Pbm | Self::Pgm => Some(1),
            Self::PpmAscii | Self::Ppm => Some(3),
            Self::Pam => None,
        }
    }
}

/// PAM `TUPLTYPE` tag. Informational; the channel count always comes from DEPTH.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TupleType {
    BlackAndWhite,
    BlackAndWhiteAlpha,
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    RgbAlpha,
    /// Any other tag.
    Custom,
}

impl TupleType {
    pub(crate) fn from_tag(tag: &[u8]) -> Self {
        match tag {
            b"BLACKANDWHITE" => Self::BlackAndWhite,
            b"BLACKANDWHITE_ALPHA" => Self::BlackAndWhiteAlpha,
            b"GRAYSCALE" => Self::Grayscale,
            b"GRAYSCALE_ALPHA" => Self::GrayscaleAlpha,
            b"RGB" => Self::Rgb,
            b"RGB_ALPHA" => Self::RgbAlpha,
            _ => Self::Custom,
        }
    }
}

/// Parsed PNM header.
///
/// Borrows the buffer it was parsed from; [`PnmHeader::pixel_data`] points
/// into that buffer right after the last header line.
#[derive(Clone, Copy, Debug)]
pub struct PnmHeader<'a> {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub maxval: u32,
    pub ascii: bool,
    pub layout: PixelLayout,
    pub tuple_type: Option<TupleType>,
    /// Offset of the first pixel byte in the source buffer.
    pub data_offset: usize,
    source: &'a [u8],
}

impl<'a> PnmHeader<'a> {
    /// Everything after the header.
    pub fn pixel_data(&self) -> &'a [u8] {
        self.source.get(self.data_offset..).unwrap_or_default()
    }

    /// Samples per row.
    pub fn row_samples(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            format: self.format,
            native_layout: self.layout,
            maxval: self.maxval,
        }
    }
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, PnmError> {
    Ok(parse_header(data)?.info())
}

/// Decode PNM data (called from DecodeRequest).
pub(crate) fn decode<'a>(
    data: &'a [u8],
    config: DecodeConfig,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, PnmError> {
    PnmDecoder::new(data)?
        .with_config(config)
        .with_limits(limits.cloned())
        .decode(stop)
}

/// Decode PNM data into a caller surface (called from DecodeRequest).
pub(crate) fn decode_into(
    data: &[u8],
    dest: &mut Surface<'_>,
    config: DecodeConfig,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<ImageInfo, PnmError> {
    let decoder = PnmDecoder::new(data)?
        .with_config(config)
        .with_limits(limits.cloned());
    decoder.decode_into(dest, stop)?;
    Ok(decoder.info())
}
