//! Shared image fixtures for gate and compression tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub(crate) fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Solid color with a high-entropy alpha channel: large as PNG, tiny as
/// JPEG once alpha is flattened away.
pub(crate) fn noisy_alpha_image(width: u32, height: u32) -> RgbaImage {
    let mut state: u32 = 0x2545_f491;
    RgbaImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Rgba([40, 90, 160, (state & 0xff) as u8])
    })
}

/// Small flat-color PNG that sits comfortably under every byte budget.
pub(crate) fn tiny_png() -> Vec<u8> {
    png_bytes(&RgbaImage::from_pixel(16, 16, Rgba([200, 30, 30, 255])))
}
