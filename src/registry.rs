//! Decoder lookup by file extension.
//!
//! Nothing is registered implicitly: the application builds a
//! [`DecoderRegistry`], calls [`register_pnm`] (or registers its own
//! factories), and shares the registry by reference.
//!
//! ```
//! use zenpnm::registry::{DecoderRegistry, register_pnm};
//! use zenpnm::{Bitmap, DecodeConfig, PixelLayout, Unstoppable};
//!
//! let mut registry = DecoderRegistry::new();
//! register_pnm(&mut registry);
//!
//! let data = b"P2\n2 1\n255\n0 255\n";
//! let decoder = registry.create("gradient.pgm", data, &DecodeConfig::default(), None)?;
//! let info = decoder.info();
//! let mut bitmap = Bitmap::new(info.width, info.height, PixelLayout::Gray8)?;
//! decoder.decode_into(&mut bitmap.as_surface(), &Unstoppable)?;
//! assert_eq!(bitmap.pixels(), &[0, 255]);
//! # Ok::<(), zenpnm::PnmError>(())
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use enough::Stop;

use crate::config::DecodeConfig;
use crate::error::PnmError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pnm::PnmDecoder;
use crate::surface::Surface;

/// A parsed image ready to decode into a surface.
pub trait ImageDecoder {
    /// Dimensions and native layout of the image.
    fn info(&self) -> ImageInfo;

    /// Decode into `dest` at its top-left corner.
    fn decode_into(&self, dest: &mut Surface<'_>, stop: &dyn Stop) -> Result<(), PnmError>;
}

impl ImageDecoder for PnmDecoder<'_> {
    fn info(&self) -> ImageInfo {
        PnmDecoder::info(self)
    }

    fn decode_into(&self, dest: &mut Surface<'_>, stop: &dyn Stop) -> Result<(), PnmError> {
        PnmDecoder::decode_into(self, dest, stop)
    }
}

/// Builds a decoder over a borrowed buffer. Header errors surface here.
pub type DecoderFactory = for<'a> fn(
    &'a [u8],
    &DecodeConfig,
    Option<&Limits>,
) -> Result<Box<dyn ImageDecoder + 'a>, PnmError>;

/// File extension to decoder factory table.
#[derive(Clone, Debug, Default)]
pub struct DecoderRegistry {
    factories: BTreeMap<String, DecoderFactory>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `extension` (case-insensitive, leading dot
    /// optional). Replaces an earlier registration for the same extension.
    pub fn register(&mut self, extension: &str, factory: DecoderFactory) {
        let key = normalize(extension);
        log::debug!("registering image decoder for .{key}");
        self.factories.insert(key, factory);
    }

    /// Factory for a file name, path or bare extension.
    pub fn lookup(&self, name: &str) -> Option<DecoderFactory> {
        self.factories.get(&normalize(extension_of(name))).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Resolve `name` to a factory and build a decoder over `data`.
    pub fn create<'a>(
        &self,
        name: &str,
        data: &'a [u8],
        config: &DecodeConfig,
        limits: Option<&Limits>,
    ) -> Result<Box<dyn ImageDecoder + 'a>, PnmError> {
        let factory = self
            .lookup(name)
            .ok_or_else(|| PnmError::UnknownExtension(extension_of(name).to_string()))?;
        factory(data, config, limits)
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Text after the last `.` of the final path component, or all of it.
fn extension_of(name: &str) -> &str {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file.rfind('.') {
        Some(i) => &file[i + 1..],
        None => file,
    }
}

fn create_pnm<'a>(
    data: &'a [u8],
    config: &DecodeConfig,
    limits: Option<&Limits>,
) -> Result<Box<dyn ImageDecoder + 'a>, PnmError> {
    let decoder = PnmDecoder::new(data)?
        .with_config(*config)
        .with_limits(limits.cloned());
    Ok(Box::new(decoder))
}

/// Extensions claimed by the PNM decoder.
pub const PNM_EXTENSIONS: &[&str] = &["pbm", "pgm", "ppm", "pam", "pnm"];

/// Register the PNM decoder for every extension in [`PNM_EXTENSIONS`].
pub fn register_pnm(registry: &mut DecoderRegistry) {
    for ext in PNM_EXTENSIONS {
        registry.register(ext, create_pnm);
    }
}
