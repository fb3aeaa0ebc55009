//! Decoding dropped or opened image files into egui textures.

use std::path::Path;

use egui::ColorImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decodes an image file into egui's CPU-side image format.
pub fn load_image_from_path(path: &Path) -> Result<ColorImage, ImageError> {
    let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_image_from_bytes(&bytes)
}

/// Decodes in-memory image bytes (e.g. from a drag-and-drop payload).
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<ColorImage, ImageError> {
    let image = image::load_from_memory(bytes)?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_png() {
        // A 2x1 red/blue PNG, generated once with the image crate.
        let mut png = Vec::new();
        let img = image::RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = load_image_from_bytes(&png).unwrap();
        assert_eq!(decoded.size, [2, 1]);
        assert_eq!(decoded.pixels[0], egui::Color32::RED);
        assert_eq!(decoded.pixels[1], egui::Color32::BLUE);
    }

    #[test]
    fn garbage_bytes_error_out() {
        assert!(load_image_from_bytes(b"not an image").is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_image_from_path(Path::new("/no/such/file.png")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.png"));
    }
}
