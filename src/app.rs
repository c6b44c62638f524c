use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{INITIAL_HEIGHT, INITIAL_WIDTH, TARGET_FPS, WINDOW_TITLE};
use crate::error::GpuError;
use crate::gpu::{Canvas, CanvasPipeline, GpuContext, PresentPipeline, SketchBuffers};
use crate::sketch::{GpuSquare, Sketch};

/// Window and every GPU resource the sketch draws with
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    canvas: Canvas,
    buffers: SketchBuffers,
    canvas_pipeline: CanvasPipeline,
    present_pipeline: PresentPipeline,
    present_bind_group: wgpu::BindGroup,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, GpuError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let canvas = Canvas::new(&gpu.device, &gpu.queue, gpu.config.width, gpu.config.height);
        let buffers = SketchBuffers::new(&gpu.device);
        let canvas_pipeline = CanvasPipeline::new(&gpu.device);
        let present_pipeline = PresentPipeline::new(&gpu.device, gpu.format());
        let present_bind_group =
            present_pipeline.create_bind_group(&gpu.device, &canvas, &buffers.params_buffer);

        Ok(Self {
            window,
            gpu,
            canvas,
            buffers,
            canvas_pipeline,
            present_pipeline,
            present_bind_group,
        })
    }

    /// Canvas extent in logical pixels, the space the grid is laid out in
    fn logical_size(&self) -> (f64, f64) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        (size.width, size.height)
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if !self.gpu.resize(new_size) {
            return;
        }
        // Trails do not survive a resize; the new canvas starts black
        self.canvas = Canvas::new(&self.gpu.device, &self.gpu.queue, new_size.width, new_size.height);
        self.present_bind_group = self.present_pipeline.create_bind_group(
            &self.gpu.device,
            &self.canvas,
            &self.buffers.params_buffer,
        );
        log::debug!("Canvas recreated at {}x{}", self.canvas.width, self.canvas.height);
    }

    /// Paint `squares` onto the canvas (when given) and present the canvas
    fn render(&mut self, squares: Option<&[GpuSquare]>) -> Result<(), wgpu::SurfaceError> {
        let decode_srgb = self.gpu.format().is_srgb();
        self.buffers.update_params(&self.gpu.queue, self.logical_size(), decode_srgb);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        if let Some(squares) = squares {
            self.buffers
                .upload_squares(&self.gpu.device, &self.gpu.queue, squares);
            let bind_group = self.canvas_pipeline.create_bind_group(
                &self.gpu.device,
                &self.buffers.squares_buffer,
                &self.buffers.params_buffer,
            );
            self.canvas_pipeline.draw(
                &mut encoder,
                &self.canvas.view,
                &bind_group,
                self.buffers.count(),
            );
        }

        // The canvas pass is submitted even when the swapchain is unavailable
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                self.gpu.queue.submit(std::iter::once(encoder.finish()));
                return Err(e);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.present_pipeline
            .draw(&mut encoder, &view, &self.present_bind_group);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }
}

/// Application state
pub struct App {
    graphics: Option<Graphics>,
    sketch: Sketch,
    squares: Vec<GpuSquare>,
    pacer: FramePacer,
    fps_counter: FpsCounter,
    surface_lost: SurfaceLoss,
    was_saturated: bool,
}

impl App {
    pub fn new(seed: u32) -> Self {
        Self {
            graphics: None,
            sketch: Sketch::new(seed),
            squares: Vec::new(),
            pacer: FramePacer::new(TARGET_FPS, Instant::now()),
            fps_counter: FpsCounter::new(),
            surface_lost: SurfaceLoss::default(),
            was_saturated: false,
        }
    }

    fn press(&mut self) {
        self.sketch.press();
        self.was_saturated = self.sketch.is_saturated();
        log::debug!("Press: entropy {:.2}", self.sketch.entropy());
    }

    /// Draw a frame. With `advance` the sketch ticks once; otherwise the
    /// canvas is re-presented unchanged (e.g. an expose event).
    fn redraw(&mut self, advance: bool, event_loop: &ActiveEventLoop) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let squares = if advance {
            let (width, height) = graphics.logical_size();
            self.sketch.frame(width, height, &mut self.squares);
            Some(self.squares.as_slice())
        } else {
            None
        };

        match graphics.render(squares) {
            Ok(()) => self.surface_lost.recovered(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if self.surface_lost.first_failure() {
                    log::warn!("Surface lost or outdated, reconfiguring");
                } else {
                    log::debug!("Surface still unavailable, reconfiguring");
                }
                graphics.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping present");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting...");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
            }
        }

        if !advance {
            return;
        }

        if self.sketch.is_saturated() && !self.was_saturated {
            log::info!(
                "Entropy reached its ceiling at frame {}",
                self.sketch.frame_count()
            );
        }
        self.was_saturated = self.sketch.is_saturated();

        if let Some(fps) = self.fps_counter.tick() {
            graphics.window.set_title(&format!(
                "{} - entropy {:.2} - {:.0} FPS",
                WINDOW_TITLE,
                self.sketch.entropy(),
                fps
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        log::info!("Initializing Entropy Clock...");
        log::info!("Noise seed: {}", self.sketch.seed());

        let graphics = match Graphics::new(event_loop) {
            Ok(graphics) => graphics,
            Err(e) => {
                log::error!("Initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = graphics.logical_size();
        log::info!("Canvas size: {:.0}x{:.0}", width, height);
        log::info!("Initialization complete!");
        log::info!("Watch the grid destabilize as entropy rises.");
        log::info!("Controls:");
        log::info!("  Click/Touch: Reduce entropy");
        log::info!("  Escape: Quit");

        self.pacer = FramePacer::new(TARGET_FPS, Instant::now());
        self.graphics = Some(graphics);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("Escape pressed, exiting...");
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => self.press(),
            WindowEvent::Touch(Touch {
                phase: TouchPhase::Started,
                ..
            }) => self.press(),
            WindowEvent::Resized(new_size) => {
                if let Some(graphics) = &mut self.graphics {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    graphics.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                let advance = self.pacer.take_due();
                self.redraw(advance, event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = &self.graphics else {
            return;
        };

        if self.pacer.poll(Instant::now()) {
            graphics.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame()));
    }
}

/// Fixed-rate animation clock: marks one frame due per interval
struct FramePacer {
    interval: Duration,
    next_frame: Instant,
    due: bool,
}

impl FramePacer {
    fn new(fps: f64, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps),
            next_frame: now,
            due: false,
        }
    }

    /// Returns true when a new frame became due at `now`.
    /// Missed intervals are dropped rather than replayed.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        self.due = true;
        true
    }

    /// Consume the pending frame, if any
    fn take_due(&mut self) -> bool {
        std::mem::take(&mut self.due)
    }

    fn next_frame(&self) -> Instant {
        self.next_frame
    }
}

/// Tracks a run of lost/outdated surface frames so only the first one warns
#[derive(Default)]
struct SurfaceLoss {
    active: bool,
}

impl SurfaceLoss {
    /// Returns true for the first failure since the last successful present
    fn first_failure(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    fn recovered(&mut self) {
        self.active = false;
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
