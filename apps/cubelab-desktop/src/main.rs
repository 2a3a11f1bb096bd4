mod ui;

use anyhow::{Context as _, Result};
use clap::Parser;
use cubelab_kernel::MonotonicTime;
use cubelab_render_wgpu::{WgpuFrame, WgpuRenderer, request_device, surface_config};
use cubelab_runtime::{Demo, DemoConfig, FrameStatus};
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "cubelab-desktop", about = "Interactive box demo with a parameter panel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long)]
    width: Option<f32>,

    /// Window height in logical pixels
    #[arg(long)]
    height: Option<f32>,
}

/// Everything that only exists once the window and device are up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        egui_ctx: &EguiContext,
        demo: &mut Demo,
        config: &DemoConfig,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let (adapter, device, queue) = request_device(&instance, &surface)?;

        let surface_size = resize_demo(demo, &window);
        let config = surface_config(&surface, &adapter, surface_size.width, surface_size.height)?;
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, config.format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1, false);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    /// Match the surface to the demo viewport after a resize.
    fn reconfigure(&mut self, demo: &mut Demo) {
        let size = resize_demo(demo, &self.window);
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, size.width, size.height);
    }
}

/// Push the window's logical size and scale factor into the demo viewport.
fn resize_demo(demo: &mut Demo, window: &Window) -> cubelab_render::SurfaceSize {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f32>(scale);
    demo.resize(logical.width, logical.height, scale as f32)
}

/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Scroll input in wheel lines; pixel deltas are scaled down to lines.
fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
    }
}

/// Pointer state for the orbit controls.
#[derive(Default)]
struct Pointer {
    position: Option<PhysicalPosition<f64>>,
    rotating: bool,
    panning: bool,
}

struct GpuApp {
    demo: Demo,
    config: DemoConfig,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    pointer: Pointer,
}

impl GpuApp {
    fn new(config: DemoConfig) -> Self {
        let demo = Demo::new(&config, Rc::new(MonotonicTime::new()), 1.0);
        Self {
            demo,
            config,
            gpu: None,
            egui_ctx: EguiContext::default(),
            pointer: Pointer::default(),
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>, viewport_height: f32) {
        let Some(last) = self.pointer.position.replace(position) else {
            return;
        };
        let dx = (position.x - last.x) as f32;
        let dy = (position.y - last.y) as f32;
        let ctx = self.demo.context_mut();
        if self.pointer.rotating {
            ctx.controls.rotate(dx, dy, viewport_height);
        } else if self.pointer.panning {
            ctx.controls.pan(dx, dy, viewport_height, &ctx.camera);
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut frame = WgpuFrame {
            renderer: &mut gpu.renderer,
            device: &gpu.device,
            queue: &gpu.queue,
            view: &view,
        };
        if let FrameStatus::Stopped = self.demo.tick(&mut frame) {
            return;
        }

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui::draw_panel(ctx, &mut self.demo);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        // The surface follows the clamped pixel ratio, not the raw scale factor.
        let pixels_per_point = self.demo.context().viewport.pixel_ratio();
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, &mut self.demo, &self.config) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialise graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }
        let viewport_height = gpu.config.height as f32;

        match event {
            WindowEvent::CloseRequested => {
                self.demo.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    gpu.reconfigure(&mut self.demo);
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                gpu.reconfigure(&mut self.demo);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.demo.handle_key(key.as_str());
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                let over_panel = pressed && self.egui_ctx.is_pointer_over_area();
                match button {
                    MouseButton::Left => self.pointer.rotating = pressed && !over_panel,
                    MouseButton::Right => self.pointer.panning = pressed && !over_panel,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position, viewport_height);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.demo.context_mut().controls.dolly(scroll_lines(delta));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubelab-desktop starting");

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
