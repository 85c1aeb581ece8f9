//! PNM pixel decoder: ASCII, binary 8-bit and binary 16-bit samples.

use enough::Stop;

use super::{PnmFormat, PnmHeader};
use crate::config::{BinaryScaling, DecodeConfig, PbmPacking};
use crate::decode::DecodeOutput;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::surface::{Bitmap, Surface};

/// A decode session over one PNM buffer.
///
/// The header is parsed once in [`PnmDecoder::new`]; decoding can then run
/// any number of times into different destinations.
#[derive(Clone, Debug)]
pub struct PnmDecoder<'a> {
    header: PnmHeader<'a>,
    config: DecodeConfig,
    limits: Option<Limits>,
}

impl<'a> PnmDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, PnmError> {
        Ok(Self {
            header: super::parse_header(data)?,
            config: DecodeConfig::default(),
            limits: None,
        })
    }

    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_limits(mut self, limits: Option<Limits>) -> Self {
        self.limits = limits;
        self
    }

    pub fn header(&self) -> &PnmHeader<'a> {
        &self.header
    }

    pub fn info(&self) -> ImageInfo {
        self.header.info()
    }

    fn check_limits(&self) -> Result<(), PnmError> {
        if let Some(limits) = &self.limits {
            limits.check(self.header.width, self.header.height)?;
        }
        Ok(())
    }

    /// Allocate a `width x rows` bitmap in the image layout.
    ///
    /// Binary pixel data is bounds-checked first, so a header declaring more
    /// samples than the buffer holds fails with `UnexpectedEof` instead of
    /// allocating for it.
    fn allocate(&self, rows: u32) -> Result<Bitmap, PnmError> {
        let h = &self.header;
        if !h.ascii {
            binary_source(h, self.config)?;
        }
        let bytes = Bitmap::byte_len(h.width, rows, h.layout)?;
        if let Some(limits) = &self.limits {
            limits.check_memory(bytes)?;
        }
        Bitmap::new(h.width, rows, h.layout)
    }

    /// Decode into `dest` at its top-left corner.
    ///
    /// When `dest` has the image's layout and is at least as large, samples
    /// are written straight into it. Otherwise the image is decoded into a
    /// temporary bitmap and blitted, converting the layout and clipping to
    /// `dest`.
    ///
    /// ASCII data that ends early is not an error: decoding stops and the
    /// remaining pixels keep their previous contents (direct path), or are
    /// zero within the rows the data reaches (temporary path).
    pub fn decode_into(&self, dest: &mut Surface<'_>, stop: &dyn Stop) -> Result<(), PnmError> {
        self.check_limits()?;
        stop.check()?;

        let h = &self.header;
        if dest.layout() == h.layout && dest.width() >= h.width && dest.height() >= h.height {
            log::debug!("PNM decode: direct into {}x{} surface", dest.width(), dest.height());
            decode_samples(h, self.config, dest, stop)
        } else {
            log::debug!(
                "PNM decode: {:?} {}x{} via temporary bitmap into {:?} {}x{} surface",
                h.layout,
                h.width,
                h.height,
                dest.layout(),
                dest.width(),
                dest.height()
            );
            // ASCII samples take at least one byte each, so rows past
            // `ascii_rows_available` can never be reached.
            let rows = if h.ascii {
                ascii_rows_available(h)
            } else {
                h.height
            };
            let mut temp = self.allocate(rows)?;
            decode_samples(h, self.config, &mut temp.as_surface(), stop)?;
            dest.blit(0, 0, &temp.view());
            Ok(())
        }
    }

    /// Decode to a tightly packed buffer in the image's native layout.
    ///
    /// Binary 8-bit data that needs no transformation is returned as a
    /// borrowed slice of the input.
    pub fn decode(&self, stop: &dyn Stop) -> Result<DecodeOutput<'a>, PnmError> {
        self.check_limits()?;
        stop.check()?;

        let h = &self.header;
        if is_verbatim(h, self.config) {
            let len = Bitmap::byte_len(h.width, h.height, h.layout)?;
            let pixels = h
                .pixel_data()
                .get(..len)
                .ok_or(PnmError::UnexpectedEof)?;
            log::debug!("PNM decode: zero-copy {} bytes", len);
            return Ok(DecodeOutput::borrowed(
                pixels, h.width, h.height, h.layout, h.format,
            ));
        }

        let mut bitmap = self.allocate(h.height)?;
        decode_samples(h, self.config, &mut bitmap.as_surface(), stop)?;
        Ok(DecodeOutput::owned(
            bitmap.into_pixels(),
            h.width,
            h.height,
            h.layout,
            h.format,
        ))
    }
}

/// Whether the binary pixel data is already the decoded output.
fn is_verbatim(h: &PnmHeader<'_>, config: DecodeConfig) -> bool {
    !h.ascii
        && h.maxval <= 255
        && (h.maxval == 255 || config.binary_scaling == BinaryScaling::Passthrough)
        && !(h.format == PnmFormat::Pbm && config.pbm_packing == PbmPacking::PackedBits)
}

/// Rows that hold at least one ASCII sample if every sample is one byte.
fn ascii_rows_available(h: &PnmHeader<'_>) -> u32 {
    let rows = h.pixel_data().len().div_ceil(h.row_samples());
    u32::try_from(rows).map_or(h.height, |rows| rows.min(h.height))
}

/// The bytes of binary pixel data and the size of one source row.
///
/// Fails with `UnexpectedEof` when the buffer is shorter than the header
/// declares.
fn binary_source<'a>(
    header: &PnmHeader<'a>,
    config: DecodeConfig,
) -> Result<(&'a [u8], usize), PnmError> {
    let (width, height) = (header.width, header.height);
    let row_samples = header.row_samples();
    let src_row_bytes = if is_packed(header, config) {
        (width as usize).div_ceil(8)
    } else if header.maxval > 255 {
        row_samples
            .checked_mul(2)
            .ok_or(PnmError::DimensionsTooLarge { width, height })?
    } else {
        row_samples
    };
    let expected = src_row_bytes
        .checked_mul(height as usize)
        .ok_or(PnmError::DimensionsTooLarge { width, height })?;
    let src = header
        .pixel_data()
        .get(..expected)
        .ok_or(PnmError::UnexpectedEof)?;
    Ok((src, src_row_bytes))
}

fn is_packed(header: &PnmHeader<'_>, config: DecodeConfig) -> bool {
    header.format == PnmFormat::Pbm && config.pbm_packing == PbmPacking::PackedBits
}

#[inline]
fn scale(value: u32, maxval: u32) -> u8 {
    (value.min(maxval) * 255 / maxval) as u8
}

/// Write `header.width x header.height` pixels to the top-left of `dest`.
/// `dest` must be at least that large and share the header's layout.
fn decode_samples(
    header: &PnmHeader<'_>,
    config: DecodeConfig,
    dest: &mut Surface<'_>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    if header.ascii {
        decode_ascii(header, dest, stop)
    } else {
        decode_binary(header, config, dest, stop)
    }
}

fn decode_binary(
    header: &PnmHeader<'_>,
    config: DecodeConfig,
    dest: &mut Surface<'_>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let (height, maxval) = (header.height, header.maxval);
    let row_samples = header.row_samples();
    let packed = is_packed(header, config);
    let wide = maxval > 255;
    let (src, src_row_bytes) = binary_source(header, config)?;

    let rescale = maxval < 255 && config.binary_scaling == BinaryScaling::Rescale;

    for (y, src_row) in (0..height).zip(src.chunks_exact(src_row_bytes)) {
        if y % 16 == 0 {
            stop.check()?;
        }
        let out = &mut dest.row_mut(y)[..row_samples];
        if packed {
            for (x, o) in out.iter_mut().enumerate() {
                let bit = u32::from((src_row[x / 8] >> (7 - x % 8)) & 1);
                *o = if rescale { scale(bit, 1) } else { bit as u8 };
            }
        } else if wide {
            for (o, pair) in out.iter_mut().zip(src_row.chunks_exact(2)) {
                let value = u32::from(u16::from_be_bytes([pair[0], pair[1]]));
                *o = scale(value, maxval);
            }
        } else if rescale {
            for (o, &value) in out.iter_mut().zip(src_row) {
                *o = scale(u32::from(value), maxval);
            }
        } else {
            out.copy_from_slice(src_row);
        }
    }
    Ok(())
}

fn decode_ascii(
    header: &PnmHeader<'_>,
    dest: &mut Surface<'_>,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let maxval = header.maxval;
    let row_samples = header.row_samples();
    let bits = header.format == PnmFormat::PbmAscii;
    let mut scanner = AsciiScanner::new(header.pixel_data());

    for y in 0..header.height.min(dest.height()) {
        if y % 16 == 0 {
            stop.check()?;
        }
        let out = &mut dest.row_mut(y)[..row_samples];
        for (x, o) in out.iter_mut().enumerate() {
            let sample = if bits {
                scanner.next_bit()
            } else {
                scanner.next_sample()
            };
            let Some(value) = sample else {
                log::trace!("PNM decode: ASCII data ends at row {y}, sample {x}");
                return Ok(());
            };
            *o = scale(value, maxval);
        }
    }
    Ok(())
}

/// Tokenizer for plain (ASCII) PNM pixel data.
///
/// Malformed tokens never fail: they read as their leading digits, or 0.
struct AsciiScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AsciiScanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments. Returns false at end of input.
    fn skip_separators(&mut self) -> bool {
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                let rest = &self.data[self.pos..];
                self.pos += rest
                    .iter()
                    .position(|&c| c == b'\n')
                    .unwrap_or(rest.len());
            } else {
                return true;
            }
        }
        false
    }

    /// Move past the rest of the current token.
    fn skip_token(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    /// Next sample, read like `atoi`: the token's leading decimal digits,
    /// or 0 if it has none. Anything after the digits up to the next
    /// whitespace is skipped.
    fn next_sample(&mut self) -> Option<u32> {
        if !self.skip_separators() {
            return None;
        }
        let mut value: u32 = 0;
        while let Some(&b) = self.data.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            self.pos += 1;
        }
        self.skip_token();
        Some(value)
    }

    /// Next plain-PBM sample: a single `0` or `1`, separators optional.
    /// Any other token reads as 0.
    fn next_bit(&mut self) -> Option<u32> {
        if !self.skip_separators() {
            return None;
        }
        match self.data[self.pos] {
            b @ (b'0' | b'1') => {
                self.pos += 1;
                Some(u32::from(b - b'0'))
            }
            _ => {
                self.skip_token();
                Some(0)
            }
        }
    }
}
