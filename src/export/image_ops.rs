use image::imageops::FilterType;
use image::{Rgb, RgbImage, RgbaImage};

use crate::export::ExportError;

/// Cut the chart rectangle (in points) out of a full-window screenshot (in pixels).
pub fn crop_rgba(
    capture: &egui::ColorImage,
    rect: egui::Rect,
    pixels_per_point: f32,
) -> Result<RgbaImage, ExportError> {
    let full_w = capture.width();
    let full_h = capture.height();

    let x0 = ((rect.left() * pixels_per_point).max(0.0) as usize).min(full_w);
    let y0 = ((rect.top() * pixels_per_point).max(0.0) as usize).min(full_h);
    let x1 = ((rect.right() * pixels_per_point).ceil().max(0.0) as usize).min(full_w);
    let y1 = ((rect.bottom() * pixels_per_point).ceil().max(0.0) as usize).min(full_h);
    let cw = x1.saturating_sub(x0);
    let ch = y1.saturating_sub(y0);
    if cw == 0 || ch == 0 {
        return Err(ExportError::EmptyCapture);
    }

    let mut cropped = Vec::with_capacity(cw * ch * 4);
    for row in y0..y1 {
        for col in x0..x1 {
            let c = capture.pixels[row * full_w + col];
            cropped.extend_from_slice(&c.to_srgba_unmultiplied());
        }
    }

    RgbaImage::from_raw(cw as u32, ch as u32, cropped).ok_or(ExportError::EmptyCapture)
}

/// Resample so the image has `ratio` pixels per logical point.
pub fn scale_to_pixel_ratio(image: RgbaImage, pixels_per_point: f32, ratio: f32) -> RgbaImage {
    if pixels_per_point <= 0.0 || ratio <= 0.0 || (ratio - pixels_per_point).abs() < 1e-3 {
        return image;
    }
    let factor = ratio / pixels_per_point;
    let width = ((image.width() as f32 * factor).round() as u32).max(1);
    let height = ((image.height() as f32 * factor).round() as u32).max(1);
    image::imageops::resize(&image, width, height, FilterType::Lanczos3)
}

/// Composite onto an opaque background colour, dropping alpha.
pub fn flatten_onto(image: &RgbaImage, background: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8, bg: u8| (c as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(image)?;
    Ok(bytes)
}
