//! Pixel surfaces: the decode targets.
//!
//! A [`Surface`] borrows caller memory with an arbitrary row stride. A
//! [`Bitmap`] owns tightly packed memory and is used for temporary decode
//! buffers when the caller's surface doesn't match the source image.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::PnmError;
use crate::pixel::PixelLayout;

fn required_len(
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
) -> Result<usize, PnmError> {
    let row_bytes = (width as usize)
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(PnmError::DimensionsTooLarge { width, height })?;
    if height == 0 {
        return Ok(0);
    }
    if stride < row_bytes {
        return Err(PnmError::BufferTooSmall {
            needed: row_bytes,
            actual: stride,
        });
    }
    stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(PnmError::DimensionsTooLarge { width, height })
}

/// Mutable pixel surface over caller-owned memory.
#[derive(Debug)]
pub struct Surface<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> Surface<'a> {
    /// Tightly packed surface (`stride = width * bytes_per_pixel`).
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        let stride = (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(PnmError::DimensionsTooLarge { width, height })?;
        Self::with_stride(data, width, height, stride, layout)
    }

    /// Surface with an explicit row stride in bytes.
    pub fn with_stride(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        let needed = required_len(width, height, stride, layout)?;
        if data.len() < needed {
            return Err(PnmError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// The `width * bytes_per_pixel` bytes of row `y`. Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of bounds");
        let start = y as usize * self.stride;
        let len = self.width as usize * self.layout.bytes_per_pixel();
        &mut self.data[start..start + len]
    }

    /// Read-only view of this surface.
    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            layout: self.layout,
        }
    }

    /// Copy `src` into this surface with its top-left corner at `(x, y)`,
    /// converting the pixel layout as needed.
    ///
    /// The copied region is clipped to this surface; nothing outside
    /// `width x height` is written.
    pub fn blit(&mut self, x: u32, y: u32, src: &SurfaceView<'_>) {
        let cols = src.width.min(self.width.saturating_sub(x)) as usize;
        let rows = src.height.min(self.height.saturating_sub(y));
        if cols == 0 || rows == 0 {
            return;
        }

        let src_bpp = src.layout.bytes_per_pixel();
        let dst_bpp = self.layout.bytes_per_pixel();
        let dst_layout = self.layout;
        let x_off = x as usize * dst_bpp;

        for row in 0..rows {
            let src_row = &src.row(row)[..cols * src_bpp];
            let dst_row = &mut self.row_mut(y + row)[x_off..x_off + cols * dst_bpp];
            if src.layout == dst_layout {
                dst_row.copy_from_slice(src_row);
                continue;
            }
            for (s, d) in src_row
                .chunks_exact(src_bpp)
                .zip(dst_row.chunks_exact_mut(dst_bpp))
            {
                dst_layout.write_rgba(d, src.layout.read_rgba(s));
            }
        }
    }
}

/// Read-only pixel surface.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> SurfaceView<'a> {
    /// Tightly packed view.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        let stride = (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(PnmError::DimensionsTooLarge { width, height })?;
        let needed = required_len(width, height, stride, layout)?;
        if data.len() < needed {
            return Err(PnmError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// The `width * bytes_per_pixel` bytes of row `y`. Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(y < self.height, "row {y} out of bounds");
        let start = y as usize * self.stride;
        let len = self.width as usize * self.layout.bytes_per_pixel();
        &self.data[start..start + len]
    }
}

/// Owned, tightly packed pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl Bitmap {
    /// Zero-filled bitmap.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self, PnmError> {
        let len = Self::byte_len(width, height, layout)?;
        Ok(Self {
            pixels: vec![0u8; len],
            width,
            height,
            layout,
        })
    }

    /// Bytes needed for a tightly packed `width x height` buffer.
    pub fn byte_len(width: u32, height: u32, layout: PixelLayout) -> Result<usize, PnmError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
            .ok_or(PnmError::DimensionsTooLarge { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn as_surface(&mut self) -> Surface<'_> {
        Surface {
            stride: self.width as usize * self.layout.bytes_per_pixel(),
            data: &mut self.pixels,
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            data: &self.pixels,
            width: self.width,
            height: self.height,
            stride: self.width as usize * self.layout.bytes_per_pixel(),
            layout: self.layout,
        }
    }
}
