//! Main GUI application loop.

use crate::adapters::http_loader::HttpImageLoader;
use crate::controllers::cli::args::GeneratorArgs;
use crate::controllers::interactive::events::load::LoadState;
use crate::controllers::interactive::explorer::Explorer;
use crate::controllers::interactive::gesture::GestureEvent;
use crate::core::data::fractal_kind::FractalKind;
use crate::core::data::point::Point;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::pointer::PointerTracker;
use crate::params::{FractalParams, ParamError, ParameterStore};
use crate::presenters::pixels::presenter::PixelsPresenter;
use anyhow::Context as _;
use egui::Context;
use egui_winit::State as EguiWinitState;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

/// Physical pixels per wheel line for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

struct App {
    presenter: PixelsPresenter,
    explorer: Explorer,
    pointer: PointerTracker,
    extra_text: String,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl App {
    fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: PixelsPresenter,
        explorer: Explorer,
    ) -> Self {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None, // max_texture_side, use default
        );
        let extra_text = explorer.params().extra.get();

        Self {
            presenter,
            explorer,
            pointer: PointerTracker::default(),
            extra_text,
            egui_ctx,
            egui_state,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Err(e) = self.presenter.resize(width, height) {
            log::error!("could not resize surface to {width}x{height}: {e}");
        }
        if let Err(e) = self.explorer.resize(Instant::now(), width, height) {
            log::warn!("resize to {width}x{height} rejected: {e}");
        }
    }

    fn gesture(&mut self, event: Option<GestureEvent>) {
        let Some(event) = event else {
            return;
        };

        if let Err(e) = self.explorer.handle_gesture(Instant::now(), event) {
            log::debug!("gesture {event:?} ignored: {e}");
        }
    }

    fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let ctx = self.egui_ctx.clone();

        ctx.run(raw_input, |ctx| {
            egui::Window::new("View")
                .default_pos([10.0, 10.0])
                .default_size([280.0, 240.0])
                .show(ctx, |ui| self.draw_panel(ui));
        })
    }

    fn draw_panel(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        let params = self.explorer.snapshot();

        let mut max_iterations = params.max_iterations.get();
        ui.horizontal(|ui| {
            ui.label("Max iterations:");
            ui.add(egui::DragValue::new(&mut max_iterations).clamp_range(1..=100_000));
        });
        if max_iterations != params.max_iterations.get() {
            self.edit(now, |p| p.max_iterations.set(max_iterations));
        }

        let mut kind = params.fractal_kind.get();
        ui.horizontal(|ui| {
            ui.label("Type:");
            egui::ComboBox::from_id_source("fractal_kind")
                .selected_text(kind.display_name())
                .show_ui(ui, |ui| {
                    for &option in FractalKind::ALL {
                        ui.selectable_value(&mut kind, option, option.display_name());
                    }
                });
        });
        if kind != params.fractal_kind.get() {
            self.edit(now, |p| p.fractal_kind.set(kind));
        }

        ui.horizontal(|ui| {
            ui.label("Extra:");
            let response = ui.text_edit_singleline(&mut self.extra_text);
            if response.lost_focus() && self.extra_text != params.extra.get() {
                let extra = self.extra_text.clone();
                self.edit(now, |p| p.extra.set(extra));
            }
        });

        ui.separator();
        ui.label(format!(
            "Center: ({:.10}, {:.10})",
            params.center_x.get(),
            params.center_y.get()
        ));
        ui.label(format!("Size: {:.3e}", params.size.get()));

        if ui.button("Reset view").clicked() {
            self.explorer.reset_view(now);
        }

        ui.separator();
        match self.presenter.load_state() {
            LoadState::Loading => {
                ui.label("Loading...");
            }
            LoadState::Idle => {
                ui.label("Ready");
            }
            LoadState::Error(message) => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
        }
        if let Some(duration) = self.presenter.last_paint_duration() {
            ui.label(format!("Last paint: {} ms", duration.as_millis()));
        }

        let query = self.explorer.query();
        if !query.is_empty() {
            ui.label(format!("?{query}"));
        }
    }

    fn edit<F>(&mut self, now: Instant, apply: F)
    where
        F: FnOnce(&mut FractalParams) -> Result<bool, ParamError>,
    {
        if let Err(e) = self.explorer.edit(now, apply) {
            log::warn!("edit rejected: {e}");
        }
    }

    fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> (bool, bool) {
        let response = self.egui_state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }
}

/// Runs the windowed explorer until the window is closed.
pub fn run_gui(args: &GeneratorArgs) -> anyhow::Result<()> {
    let store = ParameterStore::from_query(&args.query)
        .with_context(|| format!("invalid --query {:?}", args.query))?;

    let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event()
        .build()
        .context("could not create event loop")?;

    // pixels needs a 'static window
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title("Fractal Viewport")
            .with_inner_size(LogicalSize::new(900.0, 600.0))
            .with_min_inner_size(LogicalSize::new(200.0, 200.0))
            .build(&event_loop)
            .context("could not create window")?,
    ));

    let presenter = PixelsPresenter::new(window, event_loop.create_proxy())
        .context("could not create pixels surface")?;

    let proxy = Mutex::new(event_loop.create_proxy());
    let loader = HttpImageLoader::new(args.request_timeout())
        .context("could not build HTTP client")?
        .with_waker(Arc::new(move || {
            if let Ok(proxy) = proxy.lock() {
                let _ = proxy.send_event(GuiEvent::Wake);
            }
        }));

    let now = Instant::now();
    let mut explorer = Explorer::new(
        args.explorer_config(),
        store,
        Arc::new(loader),
        presenter.share_adapter(),
        now,
    );
    let size = window.inner_size();
    if let Err(e) = explorer.resize(now, size.width, size.height) {
        log::warn!("initial size {}x{} rejected: {e}", size.width, size.height);
    }

    let mut app = App::new(window, &event_loop, presenter, explorer);
    let mut redraw_pending = true;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let (egui_consumed, egui_repaint) = app.handle_window_event(window, event);
                if egui_repaint {
                    redraw_pending = true;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::RedrawRequested => {
                        redraw_pending = false;

                        let egui_output = app.update_ui(window);
                        app.egui_state
                            .handle_platform_output(window, egui_output.platform_output.clone());

                        if egui_output
                            .viewport_output
                            .values()
                            .any(|v| v.repaint_delay.is_zero())
                        {
                            redraw_pending = true;
                        }

                        if let Err(e) = app.presenter.render(egui_output, &app.egui_ctx) {
                            log::error!("render failed: {e}");
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(size) => {
                        app.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                        let size = window.inner_size();
                        app.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let event = app.pointer.moved(Point::new(position.x, position.y));
                        app.gesture(event);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        let event = app.pointer.left();
                        app.gesture(event);
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        let event = match state {
                            ElementState::Pressed if !egui_consumed => {
                                app.pointer.pressed(Instant::now())
                            }
                            ElementState::Pressed => None,
                            ElementState::Released => app.pointer.released(),
                        };
                        app.gesture(event);
                    }
                    WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                        let lines = match delta {
                            MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
                        };
                        let event = app.pointer.wheel(lines);
                        app.gesture(event);
                    }
                    _ => {}
                }
            }
            Event::UserEvent(GuiEvent::Wake) => {}
            Event::AboutToWait => {
                app.explorer.pump(Instant::now());

                if redraw_pending || app.presenter.take_news() {
                    window.request_redraw();
                }

                match app.explorer.next_wakeup() {
                    Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => elwt.set_control_flow(ControlFlow::Wait),
                }
            }
            _ => {}
        })
        .context("event loop error")?;

    Ok(())
}
