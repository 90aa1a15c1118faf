use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use crate::{
    error::{CropError, Error, Result},
    selection::Rectangle,
};

pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Crops `img` to the pixels in `[left, right) x [top, bottom)`.
///
/// The rectangle is normalized and clamped to the image first; a region
/// left with no area is an error.
pub fn crop_image(img: &DynamicImage, rect: Rectangle) -> Result<DynamicImage, CropError> {
    let (width, height) = img.dimensions();
    let region = rect.clamped(width, height);
    if region.is_empty() {
        return Err(CropError::Empty {
            rect,
            width,
            height,
        });
    }
    if region != rect.normalized() {
        log::warn!("rectangle {rect} clamped to {region} for a {width}x{height} image");
    }
    Ok(img.crop_imm(
        region.left(),
        region.top(),
        region.width(),
        region.height(),
    ))
}

/// `<dir>/<stem>_cropped.<ext>` for a source image.
pub fn cropped_path(dir: impl AsRef<Path>, source: impl AsRef<Path>) -> PathBuf {
    let source = source.as_ref();
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let filename = match source.extension() {
        Some(ext) => format!("{stem}_cropped.{}", ext.to_string_lossy()),
        None => format!("{stem}_cropped"),
    };
    dir.as_ref().join(filename)
}

/// Writes `img` to `path`, replacing whatever was there.
pub fn save_image(img: &DynamicImage, path: impl AsRef<Path>) -> Result<(), CropError> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(img.save(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Point;
    use image::RgbaImage;

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    #[test]
    fn crop_size_matches_the_rectangle() {
        let img = blank(100, 60);
        for (l, t, r, b) in [(0, 0, 100, 60), (10, 10, 90, 50), (99, 59, 100, 60), (0, 5, 1, 6)] {
            let rect = Rectangle::new(Point::new(l, t), Point::new(r, b));
            let cropped = crop_image(&img, rect).unwrap();
            assert_eq!(cropped.dimensions(), (r - l, b - t));
        }
    }

    #[test]
    fn crop_keeps_the_selected_pixels() {
        let mut src = RgbaImage::new(4, 4);
        src.put_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(src);

        let rect = Rectangle::new(Point::new(2, 1), Point::new(4, 3));
        let cropped = crop_image(&img, rect).unwrap().to_rgba8();
        assert_eq!(cropped.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn inverted_and_oversized_rectangles_are_fixed_up() {
        let img = blank(50, 50);
        let rect = Rectangle::new(Point::new(80, 40), Point::new(10, 0));
        assert_eq!(crop_image(&img, rect).unwrap().dimensions(), (40, 40));
    }

    #[test]
    fn empty_region_is_rejected() {
        let img = blank(50, 50);
        let rect = Rectangle::new(Point::new(10, 10), Point::new(10, 40));
        assert!(matches!(
            crop_image(&img, rect),
            Err(CropError::Empty { width: 50, height: 50, .. })
        ));

        let outside = Rectangle::new(Point::new(60, 60), Point::new(70, 70));
        assert!(crop_image(&img, outside).is_err());
    }

    #[test]
    fn cropped_names_keep_the_extension() {
        assert_eq!(
            cropped_path("out", "in/shot 1.PNG"),
            Path::new("out").join("shot 1_cropped.PNG")
        );
        assert_eq!(cropped_path("out", "in/a.png"), Path::new("out/a_cropped.png"));
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();

        match load_image(&empty) {
            Err(Error::ImageLoad { path, .. }) => assert_eq!(path, empty),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            load_image(dir.path().join("missing.png")),
            Err(Error::ImageLoad { .. })
        ));
    }
}
