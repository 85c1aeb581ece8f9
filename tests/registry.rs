use enough::Unstoppable;
use zenpnm::registry::{DecoderRegistry, ImageDecoder, PNM_EXTENSIONS, register_pnm};
use zenpnm::*;

fn pnm_registry() -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    register_pnm(&mut registry);
    registry
}

#[test]
fn empty_until_registered() {
    let registry = DecoderRegistry::new();
    assert!(registry.extensions().is_empty());
    let err = registry
        .create("image.ppm", b"P6\n1 1\n255\n\0\0\0", &DecodeConfig::default(), None)
        .err()
        .unwrap();
    assert!(matches!(err, PnmError::UnknownExtension(ref e) if e == "ppm"));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn pnm_claims_its_extensions() {
    let registry = pnm_registry();
    assert_eq!(registry.extensions(), ["pam", "pbm", "pgm", "pnm", "ppm"]);
    for ext in PNM_EXTENSIONS {
        assert!(registry.contains(ext));
    }
    assert!(registry.contains("photo.PPM"));
    assert!(registry.contains(".pgm"));
    assert!(registry.contains("dir.v2/scan.pbm"));
    assert!(!registry.contains("photo.png"));
}

#[test]
fn every_extension_shares_the_same_decoder() {
    let registry = pnm_registry();
    let data = b"P5\n2 1\n255\n\x0a\x0b";
    for ext in PNM_EXTENSIONS {
        let decoder = registry
            .create(ext, data, &DecodeConfig::default(), None)
            .unwrap();
        let mut bitmap = Bitmap::new(2, 1, PixelLayout::Gray8).unwrap();
        decoder
            .decode_into(&mut bitmap.as_surface(), &Unstoppable)
            .unwrap();
        assert_eq!(bitmap.pixels(), &[0x0a, 0x0b], "{ext}");
    }
}

#[test]
fn header_errors_surface_at_creation() {
    let registry = pnm_registry();
    let err = registry
        .create("bad.pgm", b"P9\n", &DecodeConfig::default(), None)
        .err()
        .unwrap();
    assert!(err.is_format_error());
}

#[test]
fn config_and_limits_reach_the_decoder() {
    let registry = pnm_registry();
    let data = b"P5\n2 1\n15\n\x0f\x00";
    let config = DecodeConfig::new().with_binary_scaling(BinaryScaling::Rescale);
    let decoder = registry.create("a.pgm", data, &config, None).unwrap();
    let mut bitmap = Bitmap::new(2, 1, PixelLayout::Gray8).unwrap();
    decoder
        .decode_into(&mut bitmap.as_surface(), &Unstoppable)
        .unwrap();
    assert_eq!(bitmap.pixels(), &[255, 0]);

    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    let decoder = registry
        .create("a.pgm", data, &config, Some(&limits))
        .unwrap();
    let err = decoder
        .decode_into(&mut bitmap.as_surface(), &Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Limit);
}

struct Fixed;

impl ImageDecoder for Fixed {
    fn info(&self) -> ImageInfo {
        ImageInfo {
            width: 1,
            height: 1,
            format: pnm::PnmFormat::Pgm,
            native_layout: PixelLayout::Gray8,
            maxval: 255,
        }
    }

    fn decode_into(&self, dest: &mut Surface<'_>, _stop: &dyn Stop) -> Result<(), PnmError> {
        dest.row_mut(0)[0] = 99;
        Ok(())
    }
}

fn create_fixed<'a>(
    _data: &'a [u8],
    _config: &DecodeConfig,
    _limits: Option<&Limits>,
) -> Result<Box<dyn ImageDecoder + 'a>, PnmError> {
    Ok(Box::new(Fixed))
}

#[test]
fn custom_factory_overrides_registration() {
    let mut registry = pnm_registry();
    registry.register("PGM", create_fixed);
    let decoder = registry
        .create("x.pgm", b"", &DecodeConfig::default(), None)
        .unwrap();
    assert_eq!(decoder.info().maxval, 255);
    let mut bitmap = Bitmap::new(1, 1, PixelLayout::Gray8).unwrap();
    decoder
        .decode_into(&mut bitmap.as_surface(), &Unstoppable)
        .unwrap();
    assert_eq!(bitmap.pixels(), &[99]);
}
