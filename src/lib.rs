//! # zenpnm
//!
//! PNM family image decoder: PBM, PGM and PPM in ASCII (P1-P3) and binary
//! (P4-P6) form, plus PAM (P7).
//!
//! Every sample is delivered as 8 bits per channel. ASCII and 16-bit samples
//! are rescaled with `sample * 255 / maxval`. Binary 8-bit samples are
//! copied verbatim by default (see [`BinaryScaling`]).
//!
//! ## Decoding into your own surface
//!
//! [`DecodeRequest::decode_into`] writes into a caller [`Surface`] of any
//! [`PixelLayout`], size and stride. If the surface matches the image layout
//! and is large enough, samples go straight in. Otherwise the image is
//! decoded into a temporary [`Bitmap`] and blitted, with conversion and
//! clipping.
//!
//! ## Zero-Copy Decoding
//!
//! For binary files with 8-bit samples that need no transformation,
//! [`DecodeRequest::decode`] returns a borrowed slice into the input buffer.
//!
//! ## Non-Goals
//!
//! - PFM (floating point)
//! - Encoding
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use zenpnm::{DecodeRequest, ImageInfo, PixelLayout, Surface, Unstoppable};
//!
//! let data = b"P3\n2 1\n15\n15 0 0  0 0 15\n";
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! assert_eq!((info.width, info.height), (2, 1));
//!
//! // Decode into a BGRA surface
//! let mut buf = [0u8; 2 * 4];
//! let mut surface = Surface::new(&mut buf, 2, 1, PixelLayout::Bgra8)?;
//! DecodeRequest::new(data).decode_into(&mut surface, Unstoppable)?;
//! assert_eq!(buf, [0, 0, 255, 255, 255, 0, 0, 255]);
//! # Ok::<(), zenpnm::PnmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod config;
mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod surface;

pub mod pnm;
pub mod registry;

// Re-exports
pub use config::{BinaryScaling, DecodeConfig, PbmPacking};
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, PnmError};
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use surface::{Bitmap, Surface, SurfaceView};

/// Decode PNM data to a packed buffer with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, PnmError> {
    DecodeRequest::new(data).decode(stop)
}
