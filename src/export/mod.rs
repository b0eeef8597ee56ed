//! Turning a window screenshot into a chart image on the clipboard or on disk.
//!
//! The app requests a viewport screenshot, and when it arrives the chart's
//! screen rectangle is cut out, resampled to the export pixel ratio and handed
//! to one of the sinks below. Failures never touch the loaded data; they only
//! produce an error notification.

pub mod image_ops;

use std::path::Path;

use thiserror::Error;

pub use image_ops::{crop_rgba, encode_jpeg, flatten_onto, scale_to_pixel_ratio};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("screenshot did not contain the chart")]
    EmptyCapture,

    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("cannot write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a captured chart goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Clipboard,
    Jpeg,
}

impl ExportKind {
    pub fn success_message(&self) -> &'static str {
        match self {
            ExportKind::Clipboard => "Chart copied to clipboard",
            ExportKind::Jpeg => "Chart exported as JPG",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            ExportKind::Clipboard => "Failed to copy chart",
            ExportKind::Jpeg => "Failed to export chart",
        }
    }
}

/// JPEG backgrounds are white; transparent pixels are composited onto it.
pub const EXPORT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Place an RGBA image on the system clipboard.
pub fn copy_to_clipboard(image: &image::RgbaImage) -> Result<(), ExportError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_image(arboard::ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: std::borrow::Cow::Borrowed(image.as_raw().as_slice()),
    })?;
    Ok(())
}

/// Flatten onto white, encode as JPEG and write to `path`.
pub fn save_jpeg(image: &image::RgbaImage, quality: u8, path: &Path) -> Result<(), ExportError> {
    let flat = flatten_onto(image, EXPORT_BACKGROUND);
    let bytes = encode_jpeg(&flat, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
