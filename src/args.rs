use std::path::PathBuf;

use crate::{
    deck::SlideSize,
    error::ConfigError,
    pipeline::{PipelineConfig, DEFAULT_DECK_NAME},
    selection::{Point, Rectangle},
};

fn parse_region(s: &str) -> Result<Rectangle, String> {
    s.parse().map_err(|e: ConfigError| e.to_string())
}

/// Cropdeck - crop a folder of screenshots to one region and lay them out as slides
#[derive(clap::Parser, Debug)]
#[command(
    name = "cropdeck",
    author,
    version,
    about,
    long_about = "Pick a crop rectangle on a sample image, crop every PNG in a folder with it and assemble the results into a 16:9 slide deck"
)]
pub struct Args {
    /// Folder holding the source images
    ///
    /// The finished deck is written here as well
    #[arg(long, short = 'i', env = "INPUT_FOLDER")]
    pub input_dir: Option<PathBuf>,
    /// Folder receiving the cropped images, created if missing
    #[arg(long, short = 'o', env = "OUTPUT_FOLDER")]
    pub output_dir: Option<PathBuf>,
    /// Fixed region in the format: x1,y1,x2,y2
    ///
    /// If provided, the selector is skipped. Takes priority over the corner
    /// values, including ones coming from the environment
    #[arg(long, short = 'r', value_parser = parse_region)]
    pub region: Option<Rectangle>,
    /// Left edge of a fixed region
    #[arg(long, env = "TOP_LEFT_X")]
    pub top_left_x: Option<u32>,
    /// Top edge of a fixed region
    #[arg(long, env = "TOP_LEFT_Y")]
    pub top_left_y: Option<u32>,
    /// Right edge of a fixed region
    #[arg(long, env = "BOTTOM_RIGHT_X")]
    pub bottom_right_x: Option<u32>,
    /// Bottom edge of a fixed region
    #[arg(long, env = "BOTTOM_RIGHT_Y")]
    pub bottom_right_y: Option<u32>,
    /// Image shown in the selector
    ///
    /// If not provided, the oldest PNG or JPEG in the input folder is used
    #[arg(long, short = 's')]
    pub sample: Option<PathBuf>,
    /// Only pick a rectangle and print it, without cropping anything
    #[arg(long, short = 'p')]
    pub preview: bool,
    /// File name of the generated deck
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    pub deck_name: String,
    /// Slide width in inches, 1 to 56
    #[arg(long, default_value = "16")]
    pub slide_width: f64,
    /// Slide height in inches, 1 to 56
    #[arg(long, default_value = "9")]
    pub slide_height: f64,
}

/// Arguments after validation.
#[derive(Debug, Clone)]
pub struct Verified {
    pub pipeline: PipelineConfig,
    /// Fixed rectangle; `None` means the selector decides.
    pub region: Option<Rectangle>,
    pub sample: Option<PathBuf>,
    pub preview: bool,
}

impl Args {
    pub fn verify(self) -> Result<Verified, ConfigError> {
        let input_dir = self.input_dir.ok_or(ConfigError::Missing("INPUT_FOLDER"))?;
        if !input_dir.is_dir() {
            return Err(ConfigError::NotADirectory(input_dir));
        }
        // Preview never writes anything, so the output folder is optional there.
        let output_dir = match self.output_dir {
            Some(dir) => dir,
            None if self.preview => input_dir.clone(),
            None => return Err(ConfigError::Missing("OUTPUT_FOLDER")),
        };

        let corners = (
            self.top_left_x,
            self.top_left_y,
            self.bottom_right_x,
            self.bottom_right_y,
        );
        let region = match (self.region, corners) {
            (Some(region), _) => Some(region),
            (None, (Some(x1), Some(y1), Some(x2), Some(y2))) => {
                Some(Rectangle::new(Point::new(x1, y1), Point::new(x2, y2)))
            }
            (None, (None, None, None, None)) => None,
            (None, _) => return Err(ConfigError::IncompleteRegion),
        };

        let slide_size = SlideSize {
            width: self.slide_width,
            height: self.slide_height,
        };
        if !slide_size.is_valid() {
            return Err(ConfigError::InvalidSlideSize);
        }

        Ok(Verified {
            pipeline: PipelineConfig {
                input_dir,
                output_dir,
                deck_name: self.deck_name,
                slide_size,
            },
            region,
            sample: self.sample,
            preview: self.preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(dir: &std::path::Path, extra: &[&str]) -> Args {
        let dir = dir.to_string_lossy().into_owned();
        let mut argv = vec!["cropdeck", "--input-dir", dir.as_str()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn fixed_region_from_corner_flags() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(
            dir.path(),
            &[
                "-o",
                "out",
                "--top-left-x",
                "10",
                "--top-left-y",
                "20",
                "--bottom-right-x",
                "90",
                "--bottom-right-y",
                "80",
            ],
        );
        let verified = args.verify().unwrap();
        assert_eq!(
            verified.region,
            Some(Rectangle::new(Point::new(10, 20), Point::new(90, 80)))
        );
        assert_eq!(verified.pipeline.deck_path(), dir.path().join(DEFAULT_DECK_NAME));
        assert_eq!(verified.pipeline.slide_size, SlideSize::default());
    }

    #[test]
    fn region_overrides_corner_values() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(
            dir.path(),
            &[
                "-o",
                "out",
                "--region",
                "1,2,3,4",
                "--top-left-x",
                "10",
                "--top-left-y",
                "20",
                "--bottom-right-x",
                "90",
                "--bottom-right-y",
                "80",
            ],
        );
        assert_eq!(
            args.verify().unwrap().region,
            Some(Rectangle::new(Point::new(1, 2), Point::new(3, 4)))
        );
    }

    #[test]
    fn partial_region_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(dir.path(), &["-o", "out", "--top-left-x", "10"]);
        assert_eq!(args.verify().unwrap_err(), ConfigError::IncompleteRegion);
    }

    #[test]
    fn region_shorthand_parses() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(dir.path(), &["-o", "out", "-r", "1,2,3,4"]);
        assert_eq!(
            args.verify().unwrap().region,
            Some(Rectangle::new(Point::new(1, 2), Point::new(3, 4)))
        );
        assert!(Args::try_parse_from(["cropdeck", "-r", "1,2"]).is_err());
    }

    #[test]
    fn output_dir_is_only_optional_for_preview() {
        let dir = tempfile::tempdir().unwrap();
        if std::env::var_os("OUTPUT_FOLDER").is_none() {
            assert_eq!(
                parse(dir.path(), &[]).verify().unwrap_err(),
                ConfigError::Missing("OUTPUT_FOLDER")
            );
        }
        assert!(parse(dir.path(), &["--preview"]).verify().unwrap().preview);
    }

    #[test]
    fn input_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let args = parse(&missing, &["-o", "out"]);
        assert_eq!(args.verify().unwrap_err(), ConfigError::NotADirectory(missing));
    }

    #[test]
    fn slide_size_must_be_positive() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(dir.path(), &["-o", "out", "--slide-width", "0"]);
        assert_eq!(args.verify().unwrap_err(), ConfigError::InvalidSlideSize);
    }

    #[test]
    fn slide_size_must_fit_the_pptx_range() {
        let dir = tempfile::tempdir().unwrap();
        for (flag, value) in [("--slide-width", "0.5"), ("--slide-height", "60")] {
            let args = parse(dir.path(), &["-o", "out", flag, value]);
            assert_eq!(args.verify().unwrap_err(), ConfigError::InvalidSlideSize);
        }
        let args = parse(dir.path(), &["-o", "out", "--slide-width", "56", "--slide-height", "1"]);
        assert!(args.verify().is_ok());
    }
}
