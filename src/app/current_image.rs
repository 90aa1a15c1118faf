use cropdeck_graphics::prelude::{Graphics, GraphicsBundle};
use glam::Vec2;
use image::{DynamicImage, GenericImageView};

use super::{context::ViewerUniforms, viewport::Viewport};
use crate::selection::{Point, SelectionState};

const SHADER: &str = include_str!("viewer.wgsl");

/// The sample image as uploaded to the GPU.
pub struct CurrentImage {
    pub size: (u32, u32),
    pub bundle: GraphicsBundle<ViewerUniforms>,
}

impl CurrentImage {
    pub fn upload(image: &DynamicImage, graphics: &Graphics) -> Self {
        let size = image.dimensions();
        let max = graphics.max_texture_size();
        // Only the texture shrinks; coordinates stay in source pixels.
        let rgba = if size.0 > max || size.1 > max {
            log::debug!("downscaling {}x{} preview to fit {max}", size.0, size.1);
            image.thumbnail(max, max).to_rgba8()
        } else {
            image.to_rgba8()
        };
        let bundle = GraphicsBundle::new(
            &rgba,
            ViewerUniforms::default(),
            SHADER,
            &graphics.device,
            &graphics.queue,
            wgpu::PrimitiveTopology::TriangleStrip,
            graphics.format(),
        );
        Self { size, bundle }
    }

    pub fn update_uniforms(&mut self, surface: (u32, u32), selection: &SelectionState) {
        let viewport = Viewport::fit(surface, self.size);
        let rect = selection.current();
        let point = |p: Point| Vec2::new(p.x as f32, p.y as f32);
        let pair = |(x, y): (f64, f64)| Vec2::new(x as f32, y as f32);

        let uniforms = &mut self.bundle.uniforms;
        uniforms.surface_size = Vec2::new(surface.0 as f32, surface.1 as f32);
        uniforms.image_origin = pair(viewport.origin);
        uniforms.image_extent = pair(viewport.extent());
        uniforms.image_size = Vec2::new(self.size.0 as f32, self.size.1 as f32);
        uniforms.top_left = point(rect.top_left);
        uniforms.bottom_right = point(rect.bottom_right);
        log::trace!("{uniforms}");
    }
}
