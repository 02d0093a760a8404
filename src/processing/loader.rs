use image::{DynamicImage, ImageReader};
use std::path::Path;

use crate::error::LoadError;

/// Read and decode the image at `path`.
///
/// The format is guessed from the file contents, not the extension.
/// Failures surface immediately; there is no retry.
pub fn load_image(path: &Path) -> Result<DynamicImage, LoadError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let img = reader.decode().map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded source image"
    );

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.to_rgb8().get_pixel(2, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_load_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])).save(&png_path).unwrap();
        let jpg_path = dir.path().join("actually_png.jpg");
        std::fs::rename(&png_path, &jpg_path).unwrap();

        assert!(load_image(&jpg_path).is_ok());
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = load_image(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
