use std::{io, path::PathBuf};

use crate::selection::Rectangle;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("No matching images found in {}", .0.display())]
    EmptyFolder(PathBuf),
    #[error("Could not crop {}: {source}", path.display())]
    Crop {
        path: PathBuf,
        #[source]
        source: CropError,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not write deck {}: {source}", path.display())]
    Deck {
        path: PathBuf,
        #[source]
        source: DeckError,
    },
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CropError {
    #[error("rectangle {rect} has no area inside the {width}x{height} image")]
    Empty {
        rect: Rectangle,
        width: u32,
        height: u32,
    },
    #[error("could not write the cropped image: {0}")]
    Write(#[from] image::ImageError),
    #[error("could not replace the existing output: {0}")]
    Io(#[from] io::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required but was not set")]
    Missing(&'static str),
    #[error("a fixed region needs all of TOP_LEFT_X, TOP_LEFT_Y, BOTTOM_RIGHT_X and BOTTOM_RIGHT_Y")]
    IncompleteRegion,
    #[error("invalid region \"{0}\", expected x1,y1,x2,y2")]
    InvalidRegion(String),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("slide width and height must be between 1 and 56 inches")]
    InvalidSlideSize,
}

#[derive(thiserror::Error, Debug)]
pub enum DeckError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Graphics(#[from] cropdeck_graphics::prelude::GraphicsError),
}
