use std::sync::Arc;

use bytemuck::Pod;
use winit::window::{Window, WindowId};

use crate::bundle::GraphicsBundle;

#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
    #[error("Could not create a surface for the window: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No graphics adapter is compatible with the window surface")]
    NoAdapter,
    #[error("Could not open the graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("The window surface is not supported by the selected adapter")]
    UnsupportedSurface,
    #[error("Could not acquire the next frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Window, surface and device, everything needed to put pixels on screen.
pub struct Graphics {
    pub window: Arc<Window>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl Graphics {
    pub async fn new(window: Arc<Window>) -> Result<Self, GraphicsError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GraphicsError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("cropdeck device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let mut config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(GraphicsError::UnsupportedSurface)?;
        // The image texture is sRGB, so prefer a surface that converts back on write.
        if let Some(format) = surface
            .get_capabilities(&adapter)
            .formats
            .into_iter()
            .find(|f| f.is_srgb())
        {
            config.format = format;
        }
        surface.configure(&device, &config);

        Ok(Self {
            window,
            device,
            queue,
            surface,
            config,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Largest texture edge the device accepts.
    pub fn max_texture_size(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Acquires the next surface texture. A lost or outdated surface is
    /// reconfigured before the error is returned, so the next call can succeed.
    pub fn render(&self) -> Result<Frame<'_>, GraphicsError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.config);
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cropdeck frame"),
            });
        Ok(Frame {
            queue: &self.queue,
            encoder,
            output,
            view,
        })
    }
}

/// A frame in flight. Draw bundles into it, then `finish` to present.
pub struct Frame<'a> {
    queue: &'a wgpu::Queue,
    encoder: wgpu::CommandEncoder,
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl Frame<'_> {
    pub fn draw<U: Pod>(&mut self, bundle: &GraphicsBundle<U>) {
        bundle.upload(self.queue);
        let mut pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cropdeck pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.08,
                        g: 0.08,
                        b: 0.08,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        bundle.draw(&mut pass);
    }

    pub fn finish(self) {
        self.queue.submit(std::iter::once(self.encoder.finish()));
        self.output.present();
    }
}
