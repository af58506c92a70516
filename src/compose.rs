use image::{imageops, DynamicImage, Rgba, RgbaImage};

/// Fully transparent canvas of the given size
pub fn blank_overlay(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]))
}

/// Grayscale version of `image`, widened again to carry an alpha channel
pub fn grayscale_base(image: &DynamicImage) -> RgbaImage {
    DynamicImage::ImageLuma8(image.to_luma8()).to_rgba8()
}

/// Alpha-composites `overlay` onto `base`. Both have to be the same size.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    imageops::overlay(&mut out, overlay, 0, 0);
    out
}
