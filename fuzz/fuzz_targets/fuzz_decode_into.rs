#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm::{DecodeRequest, PixelLayout, Surface};

const LAYOUTS: [PixelLayout; 6] = [
    PixelLayout::Gray8,
    PixelLayout::GrayAlpha8,
    PixelLayout::Rgb8,
    PixelLayout::Rgba8,
    PixelLayout::Bgr8,
    PixelLayout::Bgra8,
];

fuzz_target!(|input: &[u8]| {
    // First two bytes pick the destination; the rest is the image
    let [sel, dim, data @ ..] = input else {
        return;
    };
    let layout = LAYOUTS[*sel as usize % LAYOUTS.len()];
    let w = u32::from(dim & 0x0f) + 1;
    let h = u32::from(dim >> 4) + 1;
    let len = w as usize * h as usize * layout.bytes_per_pixel();

    let mut buf = vec![0x5Au8; len + 64];
    let mut surface = Surface::new(&mut buf[..len], w, h, layout).unwrap();
    let _ = DecodeRequest::new(data).decode_into(&mut surface, enough::Unstoppable);

    assert!(buf[len..].iter().all(|&b| b == 0x5A), "write past destination");
});
