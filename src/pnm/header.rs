//! PNM/PAM header parser.
//!
//! Parsing is line oriented. After each header line, every following line
//! that starts with `#` is skipped. A `#` anywhere else is ordinary text.

use alloc::format;

use super::{PnmFormat, PnmHeader, TupleType};
use crate::error::PnmError;
use crate::pixel::PixelLayout;

/// Bounds-checked position in the header text.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Index just past the `\n` ending the current line.
    fn end_of_line(&self) -> Result<usize, PnmError> {
        let rest = self.data.get(self.pos..).unwrap_or_default();
        rest.iter()
            .position(|&b| b == b'\n')
            .map(|i| self.pos + i + 1)
            .ok_or_else(|| PnmError::InvalidHeader("unterminated header line".into()))
    }

    /// Move to the start of the next line, then past any comment lines.
    fn next_line(&mut self) -> Result<(), PnmError> {
        self.pos = self.end_of_line()?;
        while self.data.get(self.pos) == Some(&b'#') {
            self.pos = self.end_of_line()?;
        }
        Ok(())
    }

    /// Current line without its terminator (`\n` or `\r\n`).
    fn line(&self) -> &'a [u8] {
        let rest = self.data.get(self.pos..).unwrap_or_default();
        let line = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => &rest[..i],
            None => rest,
        };
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

fn skip_blanks(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|&&b| b == b' ' || b == b'\t').count();
    &s[n..]
}

/// Parse an unsigned decimal at the start of `s` (after blanks).
/// Returns the value and the remaining text.
fn parse_u32<'s>(s: &'s [u8], what: &str) -> Result<(u32, &'s [u8]), PnmError> {
    let s = skip_blanks(s);
    let digits = s.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return Err(PnmError::InvalidHeader(format!("missing {what}")));
    }
    let mut value: u32 = 0;
    for &d in &s[..digits] {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(d - b'0')))
            .ok_or_else(|| PnmError::InvalidHeader(format!("{what} out of range")))?;
    }
    Ok((value, &s[digits..]))
}

/// Value of a `KEY value` PAM line.
fn keyed<'s>(line: &'s [u8], key: &str) -> Option<&'s [u8]> {
    let rest = line.strip_prefix(key.as_bytes())?;
    match rest.first() {
        Some(b' ' | b'\t') => Some(rest),
        _ => None,
    }
}

fn keyed_u32(line: &[u8], key: &str) -> Result<u32, PnmError> {
    let value = keyed(line, key)
        .ok_or_else(|| PnmError::InvalidHeader(format!("expected {key} line")))?;
    Ok(parse_u32(value, key)?.0)
}

/// Parse a PNM header from the start of `data`.
///
/// Fails before looking at any pixel data if the magic is unknown or a
/// header field is missing or out of range.
pub fn parse_header(data: &[u8]) -> Result<PnmHeader<'_>, PnmError> {
    let format = match data {
        [b'P', digit, b'\n', ..] | [b'P', digit, b'\r', b'\n', ..] => {
            PnmFormat::from_magic_digit(*digit).ok_or(PnmError::UnrecognizedFormat)?
        }
        _ => return Err(PnmError::UnrecognizedFormat),
    };

    let mut cursor = Cursor::new(data);
    cursor.next_line()?;

    let mut tuple_type = None;
    let (width, height, channels, maxval) = match format.implied_channels() {
        None => {
            let width = keyed_u32(cursor.line(), "WIDTH")?;
            cursor.next_line()?;
            let height = keyed_u32(cursor.line(), "HEIGHT")?;
            cursor.next_line()?;
            let depth = keyed_u32(cursor.line(), "DEPTH")?;
            cursor.next_line()?;
            let maxval = keyed_u32(cursor.line(), "MAXVAL")?;
            cursor.next_line()?;
            if let Some(tag) = keyed(cursor.line(), "TUPLTYPE") {
                tuple_type = Some(TupleType::from_tag(skip_blanks(tag).trim_ascii_end()));
                cursor.next_line()?;
            }
            if cursor.line() != b"ENDHDR" {
                return Err(PnmError::InvalidHeader("expected ENDHDR line".into()));
            }
            (width, height, depth, maxval)
        }
        Some(channels) => {
            let (width, rest) = parse_u32(cursor.line(), "width")?;
            let (height, _) = parse_u32(rest, "height")?;
            let maxval = if format.is_bitmap() {
                1
            } else {
                cursor.next_line()?;
                parse_u32(cursor.line(), "maxval")?.0
            };
            (width, height, channels, maxval)
        }
    };

    if width == 0 || height == 0 {
        return Err(PnmError::InvalidHeader(format!(
            "zero dimension: {width}x{height}"
        )));
    }
    if !(1..=65535).contains(&maxval) {
        return Err(PnmError::InvalidHeader(format!(
            "maxval {maxval} outside 1..=65535"
        )));
    }
    let layout = PixelLayout::from_channels(channels).ok_or_else(|| {
        PnmError::UnsupportedVariant(format!("{channels} channels per pixel"))
    })?;

    let data_offset = cursor.end_of_line()?;

    log::debug!(
        "PNM header: {format:?} {width}x{height}, {channels} channel(s), maxval {maxval}, pixel data at {data_offset}"
    );

    Ok(PnmHeader {
        format,
        width,
        height,
        channels,
        maxval,
        ascii: format.is_ascii(),
        layout,
        tuple_type,
        data_offset,
        source: data,
    })
}
