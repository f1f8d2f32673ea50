//! Windowed renderer for the prism background and the logo marquee.
//!
//! The crate wires the pure animation state from `motion` into a winit event
//! loop and a wgpu surface:
//!
//! ```text
//!   scenecfg::SceneConfig
//!        │
//!   ViewerConfig ─▶ Viewer::run
//!        │              │ winit events
//!        │              ▼
//!        │        ViewerState ── PrismAnimator / Marquee / LoopDriver
//!        │              │ FrameInputs
//!        │              ▼
//!        └────────▶ GpuState ── prism pass + strip pass ─▶ present
//! ```
//!
//! Frame scheduling is demand driven: redraws are requested only while the
//! `LoopDriver` says the animation still has something to show, so a settled
//! hover prism or an occluded window costs no GPU time.

mod gpu;
mod shaders;
mod strip;
mod uniforms;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use motion::{
    effective_dpr, Environment, LoopAction, LoopDriver, LoopEvent, Marquee, PrismAnimator,
    PrismParams, SequenceLayout,
};
use scenecfg::SceneConfig;

use gpu::{FrameInputs, GpuState, StripFrame};
use strip::StripGeometry;

/// Immutable configuration passed to the viewer at start-up.
#[derive(Clone)]
pub struct ViewerConfig {
    pub scene: SceneConfig,
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Seed for the per-instance spin rates and phases.
    pub seed: u64,
    /// Ambient presentation context (reduced motion, mobile, dark).
    pub environment: Environment,
}

/// High-level entry point that owns the chosen configuration.
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the winit event loop until close.
    pub fn run(&self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to initialize event loop")?;
        let window_size = PhysicalSize::new(
            self.config.surface_size.0.max(1),
            self.config.surface_size.1.max(1),
        );
        let window = WindowBuilder::new()
            .with_title("prismloop")
            .with_inner_size(window_size)
            .build(&event_loop)
            .context("failed to create window")?;
        let window = Arc::new(window);

        let mut state = ViewerState::new(window.clone(), &self.config)?;
        state.start();

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                        match event {
                            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                                elwt.exit();
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                state.pointer_moved((position.x as f32, position.y as f32));
                            }
                            WindowEvent::CursorLeft { .. } => {
                                state.pointer_left();
                            }
                            WindowEvent::Focused(false) => {
                                // Losing focus behaves like the pointer leaving.
                                state.pointer_left();
                            }
                            WindowEvent::Occluded(occluded) => {
                                state.visibility_changed(!occluded);
                            }
                            WindowEvent::Resized(new_size) => {
                                state.resize(new_size);
                            }
                            WindowEvent::ScaleFactorChanged {
                                scale_factor,
                                mut inner_size_writer,
                            } => {
                                // Keep the current logical size when the scale factor changes.
                                let _ = inner_size_writer.request_inner_size(state.size());
                                state.scale_factor_changed(scale_factor as f32);
                            }
                            WindowEvent::RedrawRequested => match state.render_frame() {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    let size = state.size();
                                    state.resize(size);
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    tracing::error!("surface out of memory; exiting");
                                    elwt.exit();
                                }
                                Err(other) => {
                                    tracing::warn!("surface error: {other:?}; retrying next frame");
                                }
                            },
                            _ => {}
                        }
                    }
                    Event::AboutToWait => {
                        // Only schedule the next frame while the animation is live.
                        if state.driver.is_running() {
                            state.window.request_redraw();
                        }
                    }
                    _ => {}
                }
            })
            .map_err(|err| anyhow!("event loop error: {err}"))
    }
}

/// Strip-side state that only exists when the scene declares a marquee.
struct StripRuntime {
    marquee: Marquee,
    layout: SequenceLayout,
    geometry: StripGeometry,
    /// Top edge of the strip in device pixels; the strip hugs the bottom.
    strip_top: f32,
    hovered_quad: Option<usize>,
    last_cursor: Option<(f32, f32)>,
}

impl StripRuntime {
    fn frame(&self, dpr: f32) -> StripFrame {
        StripFrame {
            translation_px: self.marquee.translation() * dpr,
            hovered_quad: self.hovered_quad,
        }
    }
}

/// Everything behind the event loop: GPU resources plus animation state.
struct ViewerState {
    window: Arc<Window>,
    gpu: GpuState,
    animator: PrismAnimator,
    driver: LoopDriver,
    strip: Option<StripRuntime>,
    dpr: f32,
    /// Loop epoch; shader time is seconds since this instant.
    epoch: Instant,
    last_frame: Instant,
}

impl ViewerState {
    fn new(window: Arc<Window>, config: &ViewerConfig) -> Result<Self> {
        let params = PrismParams::resolve(&config.scene.prism, &config.environment);
        let dpr = effective_dpr(params.dpr_cap, window.scale_factor() as f32);
        let size = window.inner_size();

        let gpu = GpuState::new(window.as_ref(), size, &params, config.scene.marquee.as_ref())?;
        let animator = PrismAnimator::new(&params, config.seed);
        let driver = LoopDriver::new(params.suspend_when_offscreen);

        tracing::info!(
            mode = %params.mode,
            width = size.width,
            height = size.height,
            dpr,
            "prism scene ready"
        );

        let strip = config.scene.marquee.as_ref().map(|settings| {
            let marquee = Marquee::new(settings);
            tracing::info!(
                label = %marquee.label(),
                items = settings.items.len(),
                "marquee strip ready"
            );
            for (index, item) in settings.items.iter().enumerate() {
                tracing::debug!(
                    item = index,
                    name = %item.accessible_name(),
                    link = item.link().unwrap_or("-"),
                    "strip item"
                );
            }
            let empty = SequenceLayout {
                positions: Vec::new(),
                widths: Vec::new(),
                width: 0.0,
            };
            StripRuntime {
                geometry: StripGeometry::build(&empty, settings.item_height, dpr),
                marquee,
                layout: empty,
                strip_top: size.height as f32,
                hovered_quad: None,
                last_cursor: None,
            }
        });

        let now = Instant::now();
        let mut state = Self {
            window,
            gpu,
            animator,
            driver,
            strip,
            dpr,
            epoch: now,
            last_frame: now,
        };
        state.measure_strip(config);
        Ok(state)
    }

    /// Measures the strip with the loaded texture aspects and uploads its
    /// geometry. Re-run on resize and scale changes.
    fn measure_strip(&mut self, config: &ViewerConfig) {
        let (Some(strip), Some(settings)) = (self.strip.as_mut(), config.scene.marquee.as_ref())
        else {
            return;
        };
        let aspects = self.gpu.strip_aspects().unwrap_or_default();
        let widths: Vec<f32> = settings
            .items
            .iter()
            .zip(aspects.iter().copied().chain(std::iter::repeat(None)))
            .map(|(item, aspect)| strip.marquee.natural_width(item, aspect))
            .collect();
        strip.layout = strip.marquee.measure(&widths);
        self.rebuild_strip_geometry();
    }

    fn rebuild_strip_geometry(&mut self) {
        let Some(strip) = self.strip.as_mut() else {
            return;
        };
        strip.geometry =
            StripGeometry::build(&strip.layout, strip.marquee.item_height(), self.dpr);
        strip.strip_top = (self.gpu.size().height as f32 - strip.geometry.height).max(0.0);
        self.gpu
            .set_strip_geometry(&strip.geometry, strip.strip_top);
        tracing::debug!(
            width = strip.marquee.sequence_width(),
            strip_top = strip.strip_top,
            "strip geometry rebuilt"
        );
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn start(&mut self) {
        if self.driver.start() == LoopAction::StartLoop {
            self.wake();
        }
    }

    /// Restarts frame timing so a resumed loop never sees the stopped
    /// interval as one giant delta.
    fn wake(&mut self) {
        self.last_frame = Instant::now();
        self.window.request_redraw();
    }

    fn apply(&mut self, action: Option<LoopAction>) {
        match action {
            Some(LoopAction::StartLoop) => self.wake(),
            Some(LoopAction::StopLoop) => {
                tracing::debug!(state = ?self.driver.state(), "render loop stopped");
            }
            None => {}
        }
    }

    fn pointer_moved(&mut self, position: (f32, f32)) {
        let size = self.size();
        let dpr = self.dpr;
        let mut wake = self
            .animator
            .pointer_moved((size.width as f32, size.height as f32), position);

        if let Some(strip) = self.strip.as_mut() {
            strip.last_cursor = Some(position);
            let was_paused = strip.marquee.is_paused();
            let inside = strip.geometry.contains_y(position.1, strip.strip_top);
            strip.marquee.set_hovered(inside);
            let hovered = if inside {
                strip.geometry.hit_test(
                    position,
                    strip.marquee.translation() * dpr,
                    strip.strip_top,
                )
            } else {
                None
            };
            if hovered != strip.hovered_quad || was_paused != strip.marquee.is_paused() {
                if let Some(index) = hovered {
                    let quad = &strip.geometry.quads[index];
                    tracing::trace!(item = quad.item, copy = quad.copy, "strip quad hovered");
                }
                strip.hovered_quad = hovered;
                wake = true;
            }
        }

        if wake {
            let action = self.driver.handle(LoopEvent::PointerWake);
            self.apply(action);
        }
    }

    fn pointer_left(&mut self) {
        self.animator.pointer_left();
        let mut wake = self.animator.reacts_to_pointer();
        if let Some(strip) = self.strip.as_mut() {
            strip.last_cursor = None;
            wake |= strip.marquee.is_paused() || strip.hovered_quad.is_some();
            strip.marquee.set_hovered(false);
            strip.hovered_quad = None;
        }
        if wake {
            let action = self.driver.handle(LoopEvent::PointerWake);
            self.apply(action);
        }
    }

    fn visibility_changed(&mut self, visible: bool) {
        let event = if visible {
            LoopEvent::EnteredView
        } else {
            LoopEvent::LeftView
        };
        let action = self.driver.handle(event);
        tracing::debug!(visible, state = ?self.driver.state(), "visibility changed");
        self.apply(action);
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size, self.dpr);
        self.rebuild_strip_geometry();
    }

    fn scale_factor_changed(&mut self, scale_factor: f32) {
        self.dpr = effective_dpr(self.gpu.dpr_cap(), scale_factor);
        let size = self.size();
        self.gpu.resize(size, self.dpr);
        self.rebuild_strip_geometry();
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let time = now.duration_since(self.epoch).as_secs_f32();

        let update = self.animator.advance(time);
        let dpr = self.dpr;
        let strip_frame = self.strip.as_mut().map(|strip| {
            strip.marquee.advance(dt);
            // Scrolling under a stationary cursor changes which quad is hit.
            if let (Some(cursor), true) = (strip.last_cursor, strip.marquee.is_moving()) {
                strip.hovered_quad = strip.geometry.hit_test(
                    cursor,
                    strip.marquee.translation() * dpr,
                    strip.strip_top,
                );
            }
            strip.frame(dpr)
        });

        self.gpu.render_frame(&FrameInputs {
            time,
            rotation: update.rotation,
            use_base_wobble: update.use_base_wobble,
            strip: strip_frame,
        })?;

        let keep_running = update.keep_running
            || self
                .strip
                .as_ref()
                .map(|strip| strip.marquee.is_moving())
                .unwrap_or(false);
        let action = self.driver.handle(LoopEvent::FrameProduced { keep_running });
        self.apply(action);
        Ok(())
    }
}
