use crate::adapters::pixel_format::{fill_rgba, write_rgba};
use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::events::load::LoadState;
use crate::controllers::interactive::ports::view_presenter::ViewPresenterPort;
use crate::input::gui::events::GuiEvent;
use crate::presenters::canvas::painter::{BACKGROUND, paint_view};
use crate::presenters::pixels::adapter::PixelsAdapter;
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

/// Draws painted view frames into the window's framebuffer, with the egui
/// panel on top.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    has_frame: bool,
    last_paint_duration: Option<Duration>,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        Ok(Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            has_frame: false,
            last_paint_duration: None,
        })
    }

    pub fn share_adapter(&self) -> Arc<dyn ViewPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn ViewPresenterPort>
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.adapter.load_state()
    }

    /// Whether the explorer sent anything worth a redraw since last asked.
    pub fn take_news(&self) -> bool {
        self.adapter.take_news()
    }

    #[must_use]
    pub fn last_paint_duration(&self) -> Option<Duration> {
        self.last_paint_duration
    }

    pub fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        if let Some(frame) = self.adapter.take_frame() {
            self.draw_frame(&frame);
        }

        if !self.has_frame {
            self.draw_background();
        }

        let clipped_primitives =
            egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.width, self.height],
            pixels_per_point: egui_ctx.pixels_per_point(),
        };

        let textures_delta = egui_output.textures_delta;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            for (id, delta) in &textures_delta.set {
                self.egui_renderer
                    .update_texture(&context.device, &context.queue, *id, delta);
            }

            self.egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load, // keep the painted view
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                self.egui_renderer.render(
                    &mut render_pass,
                    &clipped_primitives,
                    &screen_descriptor,
                );
            }

            for id in &textures_delta.free {
                self.egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;
        self.has_frame = false;

        Ok(())
    }

    fn draw_frame(&mut self, frame: &ViewFrame) {
        if (frame.canvas_size.width(), frame.canvas_size.height()) != (self.width, self.height) {
            log::debug!(
                "dropping {}x{} frame for {}x{} surface",
                frame.canvas_size.width(),
                frame.canvas_size.height(),
                self.width,
                self.height
            );
            return;
        }

        let start = Instant::now();
        let canvas = match paint_view(frame) {
            Ok(canvas) => canvas,
            Err(e) => {
                log::warn!("could not paint view: {e}");
                return;
            }
        };

        match write_rgba(&canvas, self.pixels.frame_mut()) {
            Ok(()) => {
                self.has_frame = true;
                self.last_paint_duration = Some(start.elapsed());
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    fn draw_background(&mut self) {
        fill_rgba(self.pixels.frame_mut(), BACKGROUND);
    }
}
