use std::{
    fs::File,
    io::Write,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::error::DeckError;

mod parts;

pub const EMU_PER_INCH: f64 = 914_400.0;

/// Side lengths PowerPoint accepts for `p:sldSz`, in inches (914400..=51206400 EMU).
pub const SLIDE_SIDE_RANGE: RangeInclusive<f64> = 1.0..=56.0;

/// Slide dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
        }
    }
}

impl SlideSize {
    pub fn is_valid(&self) -> bool {
        SLIDE_SIDE_RANGE.contains(&self.width) && SLIDE_SIDE_RANGE.contains(&self.height)
    }

    /// Width and height in English Metric Units.
    pub fn emu(&self) -> (u64, u64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let to_emu = |inches: f64| (inches * EMU_PER_INCH).round() as u64;
        (to_emu(self.width), to_emu(self.height))
    }
}

/// An ordered list of pictures, one full-bleed slide each.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    size: SlideSize,
    pictures: Vec<PathBuf>,
}

impl SlideDeck {
    pub fn new(size: SlideSize, pictures: Vec<PathBuf>) -> Self {
        Self { size, pictures }
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    /// Writes the deck as a `.pptx` package, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DeckError> {
        let file = File::create(path.as_ref())?;
        let mut zip = ZipWriter::new(file);
        let xml = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        // Pictures are already compressed.
        let media = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let count = self.len();
        let emu = self.size.emu();
        let fixed = [
            ("[Content_Types].xml", parts::content_types(count)),
            ("_rels/.rels", parts::root_rels()),
            ("docProps/app.xml", parts::app_props(count)),
            ("docProps/core.xml", parts::core_props()),
            ("ppt/presentation.xml", parts::presentation(count, emu)),
            ("ppt/_rels/presentation.xml.rels", parts::presentation_rels(count)),
            ("ppt/presProps.xml", parts::pres_props()),
            ("ppt/viewProps.xml", parts::view_props()),
            ("ppt/tableStyles.xml", parts::table_styles()),
            ("ppt/slideMasters/slideMaster1.xml", parts::slide_master()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                parts::slide_master_rels(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml", parts::blank_layout()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                parts::blank_layout_rels(),
            ),
            ("ppt/theme/theme1.xml", parts::theme()),
        ];
        for (name, contents) in fixed {
            zip.start_file(name, xml)?;
            zip.write_all(contents.as_bytes())?;
        }

        for (i, picture) in self.pictures.iter().enumerate() {
            let n = i + 1;
            let media_name = format!("image{n}.{}", media_extension(picture));
            let description = picture
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();

            zip.start_file(format!("ppt/slides/slide{n}.xml"), xml)?;
            zip.write_all(parts::picture_slide(&description, emu).as_bytes())?;
            zip.start_file(format!("ppt/slides/_rels/slide{n}.xml.rels"), xml)?;
            zip.write_all(parts::picture_slide_rels(&media_name).as_bytes())?;

            let bytes = std::fs::read(picture)?;
            zip.start_file(format!("ppt/media/{media_name}"), media)?;
            zip.write_all(&bytes)?;
            log::debug!("slide {n}: {}", picture.display());
        }

        zip.finish()?;
        Ok(())
    }
}

fn media_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "jpeg",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn default_size_is_sixteen_by_nine_inches() {
        assert_eq!(SlideSize::default().emu(), (14_630_400, 8_229_600));
        assert!(!SlideSize { width: 0.0, height: 9.0 }.is_valid());
        assert!(!SlideSize { width: 16.0, height: f64::NAN }.is_valid());
    }

    #[test]
    fn slide_sides_stay_within_what_powerpoint_opens() {
        assert!(!SlideSize { width: 0.5, height: 9.0 }.is_valid());
        assert!(!SlideSize { width: 16.0, height: 60.0 }.is_valid());
        assert!(SlideSize { width: 1.0, height: 56.0 }.is_valid());

        let (min, max) = SlideSize { width: 1.0, height: 56.0 }.emu();
        assert_eq!((min, max), (914_400, 51_206_400));
    }

    #[test]
    fn saved_deck_contains_one_slide_per_picture() {
        let dir = tempfile::tempdir().unwrap();
        let mut pictures = Vec::new();
        for name in ["one.png", "two.png"] {
            let path = dir.path().join(name);
            image::RgbaImage::new(8, 4).save(&path).unwrap();
            pictures.push(path);
        }
        let deck_path = dir.path().join("deck.pptx");
        let deck = SlideDeck::new(SlideSize::default(), pictures);
        deck.save(&deck_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&deck_path).unwrap()).unwrap();
        let slides = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide"))
            .count();
        assert_eq!(slides, 2);
        assert!(archive.by_name("ppt/media/image2.png").is_ok());

        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide1.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains("../media/image1.png"));
    }

    #[test]
    fn missing_picture_fails_the_save() {
        let dir = tempfile::tempdir().unwrap();
        let deck = SlideDeck::new(
            SlideSize::default(),
            vec![dir.path().join("gone.png")],
        );
        assert!(matches!(
            deck.save(dir.path().join("deck.pptx")),
            Err(DeckError::Io(_))
        ));
    }
}
