use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
};

use crate::{
    error::{DisplayError, Result},
    selection::{Corner, Rectangle, SelectionState},
    util,
};

mod context;
mod current_image;
mod viewport;

use context::ViewerContext;
use current_image::CurrentImage;
pub use viewport::{window_size, Viewport};

/// Shows the image at `path` and lets the user move the two corners with
/// right clicks. Blocks until the window is closed, then returns the corners.
pub fn select(path: impl AsRef<Path>) -> Result<Rectangle> {
    let path = path.as_ref();
    let image = util::load_image(path)?;
    log::info!("selecting on {}", path.display());

    let mut app = App::new(path.to_path_buf(), image);
    let event_loop = EventLoop::new().map_err(DisplayError::from)?;
    event_loop.run_app(&mut app).map_err(DisplayError::from)?;
    app.finish()
}

struct App {
    path: PathBuf,
    image: DynamicImage,
    selection: SelectionState,
    context: Option<ViewerContext>,
    current_image: Option<CurrentImage>,
    cursor: Option<(f64, f64)>,
    error: Option<DisplayError>,
}

impl App {
    fn new(path: PathBuf, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            path,
            image,
            selection: SelectionState::new(width, height),
            context: None,
            current_image: None,
            cursor: None,
            error: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DisplayError> {
        let title = window_title(&self.path, &self.selection);
        let context = ViewerContext::new(event_loop, &title, self.selection.image_size())?;
        let current_image = CurrentImage::upload(&self.image, &context.graphics);
        context.request_redraw();
        self.current_image = Some(current_image);
        self.context = Some(context);
        Ok(())
    }

    fn finish(self) -> Result<Rectangle> {
        if let Some(err) = self.error {
            return Err(err.into());
        }
        Ok(self.selection.on_close())
    }
}

fn window_title(path: &Path, selection: &SelectionState) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{name} | {} | {} | right-click to move the nearer corner",
        selection.label(Corner::TopLeft),
        selection.label(Corner::BottomRight)
    )
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            log::error!("Could not open the viewer: {err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(context), Some(current_image)) = (&mut self.context, &mut self.current_image)
        else {
            return;
        };
        if id != context.window_id() {
            return;
        }

        match event {
            WindowEvent::RedrawRequested => {
                current_image.update_uniforms(context.size(), &self.selection);
                context.draw(current_image);
            }
            WindowEvent::Resized(size) => {
                context.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => {
                let Some((x, y)) = self.cursor else {
                    return;
                };
                let viewport = Viewport::fit(context.size(), current_image.size);
                if !viewport.contains(x, y) {
                    return;
                }
                let (x, y) = viewport.to_image(x, y);
                self.selection.on_secondary_click(x, y);
                context.set_title(&window_title(&self.path, &self.selection));
                context.request_redraw();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_shows_both_corners() {
        let mut selection = SelectionState::new(300, 200);
        selection.on_secondary_click(10.0, 12.0);
        let title = window_title(Path::new("shots/first.png"), &selection);
        assert_eq!(
            title,
            "first.png | top-left: (10, 12) | bottom-right: (300, 200) | right-click to move the nearer corner"
        );
    }

    #[test]
    fn select_fails_on_unreadable_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(
            select(&path),
            Err(crate::error::Error::ImageLoad { .. })
        ));
    }
}
