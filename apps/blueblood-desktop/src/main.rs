use anyhow::{Context as _, Result};
use blueblood_common::{AnimationStrategy, SceneConfig};
use blueblood_kernel::Scene;
use blueblood_render::SceneStyle;
use blueblood_render_wgpu::{OrbitCamera, WgpuRenderer};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "blueblood-desktop", about = "BlueBlood 3D glyph formation scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation strategy: lerp or spring
    #[arg(long)]
    strategy: Option<AnimationStrategy>,

    /// Seed for the pyramid sampler
    #[arg(long)]
    seed: Option<u64>,

    /// Glyph font: a .typeface.json face or a .ttf/.otf file
    #[arg(long)]
    font: Option<PathBuf>,
}

impl Cli {
    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SceneConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    fn scene_style(&self) -> SceneStyle {
        let mut style = SceneStyle::default();
        style.glyph.font = self.font.clone();
        style
    }
}

/// Application state outside the GPU.
struct AppState {
    scene: Scene,
    camera: OrbitCamera,
    show_inspector: bool,
    // Input state
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
    last_frame: Instant,
    fps: f32,
}

impl AppState {
    fn new(config: &SceneConfig) -> Result<Self> {
        Ok(Self {
            scene: Scene::new(config)?,
            camera: OrbitCamera::default(),
            show_inspector: false,
            dragging: false,
            last_cursor: None,
            last_frame: Instant::now(),
            fps: 0.0,
        })
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        let secs = dt.as_secs_f32();
        if secs > 0.0 {
            self.fps = self.fps * 0.9 + (1.0 / secs) * 0.1;
        }

        let fired = self.scene.advance_clock(dt);
        if fired > 0 {
            tracing::info!(
                shape = %self.scene.active_shape(),
                index = self.scene.active_index(),
                "formation changed"
            );
        }
        self.scene.step_frame(secs);
        self.camera.update();
    }

    /// Start measuring frame time from now, so setup time never reaches the scene clock.
    fn restart_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// A release always ends a drag; a press over the UI never starts one.
    fn handle_left_button(&mut self, pressed: bool, over_ui: bool) {
        if !pressed {
            self.dragging = false;
        } else if !over_ui {
            self.dragging = true;
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        if key == KeyCode::F1 {
            self.show_inspector = !self.show_inspector;
        }
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        if self.dragging {
            if let Some(last) = self.last_cursor {
                self.camera
                    .rotate((position.x - last.x) as f32, (position.y - last.y) as f32);
            }
        }
        self.last_cursor = Some(position);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        egui::Area::new(egui::Id::new("title"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("  BlueBlood 3D  ")
                        .size(36.0)
                        .strong()
                        .color(egui::Color32::WHITE)
                        .background_color(egui::Color32::from_black_alpha(128)),
                );
            });

        if !self.show_inspector {
            return;
        }

        let summary = self.scene.summary();
        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Scene");
                ui.separator();
                ui.label(format!("Shape: {} [{}]", summary.shape, summary.index));
                ui.label(format!(
                    "Next in: {:.1}s",
                    summary.until_next.as_secs_f32()
                ));
                ui.label(format!("Rotations: {}", summary.firings));
                ui.label(format!("Strategy: {}", summary.strategy));
                ui.label(format!("Targets: {}", summary.filled_slots));
                ui.label(format!("Max distance: {:.3}", summary.max_distance));
                ui.separator();
                ui.label(format!("Frame: {}  FPS: {:.0}", summary.frame, self.fps));
                let eye = self.camera.position();
                ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z));
                ui.separator();
                ui.small("F1: Toggle Inspector | LMB: Orbit | Wheel: Zoom");
            });
    }
}

/// Everything that exists once a window is up.
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
        style: SceneStyle,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("BlueBlood 3D")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("blueblood_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            style,
        )?;

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

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

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn draw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
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

        self.renderer
            .render(&self.device, &self.queue, &view, &state.camera, &state.scene);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    style: SceneStyle,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &SceneConfig, style: SceneStyle) -> Result<Self> {
        Ok(Self {
            state: AppState::new(config)?,
            style,
            gpu: None,
            egui_ctx: EguiContext::default(),
        })
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, self.style.clone()) {
            Ok(gpu) => {
                self.state.camera.aspect = gpu.aspect();
                self.gpu = Some(gpu);
                self.state.restart_clock();
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
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
        if let WindowEvent::MouseInput {
            button: MouseButton::Left,
            state: btn_state,
            ..
        } = event
        {
            self.state
                .handle_left_button(btn_state == ElementState::Pressed, response.consumed);
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.state.scene.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.camera.aspect = gpu.aspect();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.handle_cursor(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.state.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                self.state.update();
                gpu.draw(&mut self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.state.scene.teardown();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("blueblood-desktop starting");

    let config = cli.scene_config()?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&config, cli.scene_style())?;
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(&SceneConfig {
            seed: Some(3),
            ..SceneConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn setup_time_is_not_scene_time() {
        let mut s = state();
        s.last_frame = Instant::now() - Duration::from_secs(4);
        s.restart_clock();
        s.update();
        assert_eq!(s.scene.active_index(), 0);
        assert!(s.scene.summary().until_next > Duration::from_millis(2900));
    }

    #[test]
    fn release_over_ui_ends_drag() {
        let mut s = state();
        s.handle_left_button(true, false);
        assert!(s.dragging);
        s.handle_left_button(false, true);
        assert!(!s.dragging);
    }

    #[test]
    fn press_over_ui_does_not_orbit() {
        let mut s = state();
        s.handle_left_button(true, true);
        assert!(!s.dragging);
    }
}
