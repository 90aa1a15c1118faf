use std::{
    fmt,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::{
    deck::{SlideDeck, SlideSize},
    error::{Error, Result},
    selection::Rectangle,
    util,
};

pub const DEFAULT_DECK_NAME: &str = "output_presentation.pptx";

/// Which file extensions a listing accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// `.png` only, used for cropping and slide assembly.
    Png,
    /// `.png`, `.jpg` and `.jpeg`, used to pick the sample image.
    Preview,
}

impl Accept {
    pub fn matches(self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        match self {
            Accept::Png => ext == "png",
            Accept::Preview => matches!(ext.as_str(), "png" | "jpg" | "jpeg"),
        }
    }
}

/// A listed image and the timestamp it sorts by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Lists the images in `folder` accepted by `accept`, oldest first.
///
/// The sort is stable on the modification time alone, so ties keep the
/// order the directory was read in.
pub fn enumerate(folder: impl AsRef<Path>, accept: Accept) -> Result<Vec<ImageEntry>> {
    let folder = folder.as_ref();
    let read_dir = std::fs::read_dir(folder).map_err(|e| Error::io(folder, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(folder, e))?;
        let path = entry.path();
        if !accept.matches(&path) {
            continue;
        }
        // Follows symlinks, so a linked image sorts by its target's mtime.
        let metadata = std::fs::metadata(&path).map_err(|e| Error::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(|e| Error::io(&path, e))?;
        entries.push(ImageEntry { path, modified });
    }

    if entries.is_empty() {
        return Err(Error::EmptyFolder(folder.to_path_buf()));
    }

    log::info!("found {} image(s) in {}", entries.len(), folder.display());
    log::debug!("before sorting: {:?}", file_names(&entries));
    entries.sort_by_key(|e| e.modified);
    log::debug!("after sorting: {:?}", file_names(&entries));

    Ok(entries)
}

fn file_names(entries: &[ImageEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            e.path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Everything the batch run needs, validated up front.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub deck_name: String,
    pub slide_size: SlideSize,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            deck_name: DEFAULT_DECK_NAME.to_string(),
            slide_size: SlideSize::default(),
        }
    }

    pub fn deck_path(&self) -> PathBuf {
        self.input_dir.join(&self.deck_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Selecting,
    Enumerating,
    Cropping,
    Assembling,
    Done,
    Failed(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => f.write_str("idle"),
            Stage::Selecting => f.write_str("selecting"),
            Stage::Enumerating => f.write_str("enumerating"),
            Stage::Cropping => f.write_str("cropping"),
            Stage::Assembling => f.write_str("assembling"),
            Stage::Done => f.write_str("done"),
            Stage::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Drives one run: select, enumerate, crop, assemble. The first error
/// moves the run to [`Stage::Failed`] and nothing after it executes.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    fn enter(&mut self, stage: Stage) {
        log::info!("{} -> {}", self.stage, stage);
        self.stage = stage;
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        log::error!("{err}");
        self.enter(Stage::Failed(err.to_string()));
        Err(err)
    }

    /// Runs `select` as the selection step, recording failures like any other stage.
    pub fn select<F>(&mut self, select: F) -> Result<Rectangle>
    where
        F: FnOnce() -> Result<Rectangle>,
    {
        self.enter(Stage::Selecting);
        match select() {
            Ok(rect) => Ok(rect),
            Err(err) => self.fail(err),
        }
    }

    /// Crops every PNG in the input folder with `rect` and assembles the
    /// results into a deck. Returns the path of the written deck.
    pub fn run(&mut self, rect: Rectangle) -> Result<PathBuf> {
        match self.try_run(rect) {
            Ok(path) => {
                self.enter(Stage::Done);
                Ok(path)
            }
            Err(err) => self.fail(err),
        }
    }

    fn try_run(&mut self, rect: Rectangle) -> Result<PathBuf> {
        self.enter(Stage::Enumerating);
        let entries = enumerate(&self.config.input_dir, Accept::Png)?;

        self.enter(Stage::Cropping);
        let output_dir = self.config.output_dir.clone();
        std::fs::create_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;
        for entry in &entries {
            crop_one(&entry.path, &output_dir, rect)?;
        }

        self.enter(Stage::Assembling);
        let cropped = enumerate(&output_dir, Accept::Png)?
            .into_iter()
            .map(|e| e.path)
            .collect();
        let deck = SlideDeck::new(self.config.slide_size, cropped);
        let deck_path = self.config.deck_path();
        deck.save(&deck_path).map_err(|source| Error::Deck {
            path: deck_path.clone(),
            source,
        })?;
        log::info!("wrote {} slide(s) to {}", deck.len(), deck_path.display());

        Ok(deck_path)
    }
}

fn crop_one(source: &Path, output_dir: &Path, rect: Rectangle) -> Result<PathBuf> {
    let target = util::cropped_path(output_dir, source);
    log::info!("cropping {} -> {}", source.display(), target.display());

    let img = util::load_image(source)?;
    let crop_err = |source| Error::Crop {
        path: target.clone(),
        source,
    };
    let cropped = util::crop_image(&img, rect).map_err(crop_err)?;
    util::save_image(&cropped, &target).map_err(crop_err)?;
    Ok(target)
}

/// Runs the batch steps with default stage bookkeeping.
pub fn run(config: PipelineConfig, rect: Rectangle) -> Result<PathBuf> {
    Pipeline::new(config).run(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs::File,
        time::{Duration, UNIX_EPOCH},
    };

    fn touch(path: &Path, secs: u64) {
        File::create(path).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn names(entries: &[ImageEntry]) -> Vec<String> {
        file_names(entries)
    }

    #[test]
    fn sorts_by_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"), 2_000);
        touch(&dir.path().join("a.png"), 1_000);
        touch(&dir.path().join("c.PNG"), 3_000);

        let entries = enumerate(dir.path(), Accept::Png).unwrap();
        assert_eq!(names(&entries), ["a.png", "b.png", "c.PNG"]);
    }

    #[test]
    fn filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("shot.png"), 10);
        touch(&dir.path().join("photo.JPG"), 20);
        touch(&dir.path().join("notes.txt"), 30);
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let png = enumerate(dir.path(), Accept::Png).unwrap();
        assert_eq!(names(&png), ["shot.png"]);

        let preview = enumerate(dir.path(), Accept::Preview).unwrap();
        assert_eq!(names(&preview), ["shot.png", "photo.JPG"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_images_are_listed_by_target_time() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");
        let listed = dir.path().join("listed");
        std::fs::create_dir(&shots).unwrap();
        std::fs::create_dir(&listed).unwrap();
        touch(&shots.join("a.png"), 5_000);
        touch(&listed.join("b.png"), 1_000);
        std::os::unix::fs::symlink(shots.join("a.png"), listed.join("a.png")).unwrap();

        let entries = enumerate(&listed, Accept::Png).unwrap();
        assert_eq!(names(&entries), ["b.png", "a.png"]);
        assert_eq!(entries[1].modified, UNIX_EPOCH + Duration::from_secs(5_000));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("a.png")).unwrap();
        assert!(matches!(
            enumerate(dir.path(), Accept::Png),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn equal_times_keep_directory_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["x.png", "y.png", "z.png"] {
            touch(&dir.path().join(name), 1_000);
        }
        touch(&dir.path().join("early.png"), 10);

        let listed: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n != "early.png")
            .collect();

        let entries = enumerate(dir.path(), Accept::Png).unwrap();
        let names = names(&entries);
        assert_eq!(names[0], "early.png");
        assert_eq!(names[1..], listed[..]);
    }

    #[test]
    fn empty_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("readme.md"), 1);
        assert!(matches!(
            enumerate(dir.path(), Accept::Png),
            Err(Error::EmptyFolder(p)) if p == dir.path()
        ));
    }

    #[test]
    fn failed_run_records_the_stage() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut pipeline = Pipeline::new(PipelineConfig::new(dir.path(), &out));

        assert!(pipeline.run(Rectangle::full(10, 10)).is_err());
        assert!(matches!(pipeline.stage(), Stage::Failed(_)));
        assert!(!out.exists());
    }

    #[test]
    fn selection_failure_stops_before_enumerating() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = Pipeline::new(PipelineConfig::new(dir.path(), dir.path()));
        let result = pipeline.select(|| Err(Error::EmptyFolder(PathBuf::from("nowhere"))));
        assert!(result.is_err());
        assert!(matches!(pipeline.stage(), Stage::Failed(reason) if reason.contains("nowhere")));
    }
}
