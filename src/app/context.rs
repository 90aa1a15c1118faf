use std::sync::Arc;

use glam::Vec2;
use winit::{dpi::PhysicalSize, event_loop::ActiveEventLoop, window::WindowAttributes};

use cropdeck_graphics::prelude::*;

use super::{current_image::CurrentImage, viewport::window_size};
use crate::error::DisplayError;

/// Screen size assumed when the platform reports no monitor.
const FALLBACK_SCREEN: (u32, u32) = (1280, 800);

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Copy, Clone, Default, Debug)]
pub struct ViewerUniforms {
    pub surface_size: Vec2,
    pub image_origin: Vec2,
    pub image_extent: Vec2,
    pub image_size: Vec2,
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl std::fmt::Display for ViewerUniforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface: {:?}, origin: {:?}, extent: {:?}, image: {:?}, top_left: {:?}, bottom_right: {:?}",
          self.surface_size, self.image_origin, self.image_extent, self.image_size, self.top_left, self.bottom_right)
    }
}

pub struct ViewerContext {
    pub graphics: Graphics,
}

impl ViewerContext {
    pub fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        image_size: (u32, u32),
    ) -> Result<Self, DisplayError> {
        let screen = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|m| {
                let size = m.size();
                (size.width, size.height)
            })
            .unwrap_or(FALLBACK_SCREEN);
        let ((width, height), scale) = window_size(screen, image_size);
        log::info!(
            "screen {}x{}, image {}x{}, scale {scale:.2}, window {width}x{height}",
            screen.0,
            screen.1,
            image_size.0,
            image_size.1
        );

        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_inner_size(PhysicalSize::new(width, height))
                .with_title(title)
                .with_visible(false),
        )?;

        let graphics = pollster::block_on(Graphics::new(Arc::new(window)))?;
        graphics.set_visible(true);

        Ok(Self { graphics })
    }

    pub fn draw(&mut self, image: &CurrentImage) {
        let mut frame = match self.graphics.render() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("Error rendering frame: {err}");
                self.graphics.request_redraw();
                return;
            }
        };
        frame.draw(&image.bundle);
        frame.finish();
    }

    pub fn window_id(&self) -> winit::window::WindowId {
        self.graphics.id()
    }

    pub fn set_title(&self, title: &str) {
        self.graphics.window.set_title(title);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.graphics.resize(width, height);
        self.graphics.request_redraw();
    }

    pub fn request_redraw(&self) {
        self.graphics.request_redraw();
    }

    pub fn size(&self) -> (u32, u32) {
        self.graphics.size()
    }
}
