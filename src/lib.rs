use std::path::PathBuf;

pub mod app;
pub mod args;
pub mod deck;
pub mod error;
pub mod pipeline;
pub mod selection;
pub mod util;

pub use error::{Error, Result};

use args::Verified;
use pipeline::{Accept, Pipeline};
use selection::Rectangle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Preview only: the rectangle picked in the selector.
    Selected(Rectangle),
    /// Path of the written deck.
    Deck(PathBuf),
}

/// Picks the rectangle, from the arguments or interactively, then crops and
/// assembles. Preview runs stop after the selector.
pub fn run(args: Verified) -> Result<Outcome> {
    let mut pipeline = Pipeline::new(args.pipeline);

    let rect = match args.region {
        Some(rect) if !args.preview => {
            log::info!("using fixed region {rect}");
            rect
        }
        _ => {
            let sample = args.sample;
            let input_dir = pipeline.config().input_dir.clone();
            let rect = pipeline.select(move || {
                let sample = match sample {
                    Some(sample) => sample,
                    None => oldest_image(&input_dir)?,
                };
                app::select(sample)
            })?;
            if args.preview {
                return Ok(Outcome::Selected(rect));
            }
            rect
        }
    };

    pipeline.run(rect).map(Outcome::Deck)
}

fn oldest_image(dir: &std::path::Path) -> Result<PathBuf> {
    let entries = pipeline::enumerate(dir, Accept::Preview)?;
    entries
        .into_iter()
        .next()
        .map(|e| e.path)
        .ok_or_else(|| Error::EmptyFolder(dir.to_path_buf()))
}
