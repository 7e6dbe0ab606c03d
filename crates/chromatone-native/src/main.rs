mod app;
mod constants;

use std::time::Instant;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use app::App;
use chromatone_core::dataset;
use chromatone_core::render::SceneRenderer;
use chromatone_core::{panels, EmotionScene, SceneParams, EMOTIONS};
use constants::*;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    app: App,
    last_frame: Instant,
    title: String,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, scene: EmotionScene) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(&device, format, scene.layout().background);
        log::info!("[render] surface {}x{} {:?}", config.width, config.height, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            app: App::new(scene, size.width, size.height),
            last_frame: Instant::now(),
            title: String::new(),
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.app.resize(new_size.width, new_size.height);
    }

    fn sync_title(&mut self) {
        let title = self.app.title();
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_frame = now;

        self.app.scene.tick(dt);
        self.sync_title();

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let composed = self.app.scene.compose();
        let camera = self.app.scene.camera(self.app.aspect());
        self.renderer
            .prepare(&self.device, &self.queue, &self.app.scene, &composed, &camera);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.renderer.draw(&mut encoder, &view);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => self
                .app
                .pointer_moved(glam::Vec2::new(position.x as f32, position.y as f32)),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.app.pointer_pressed(),
                ElementState::Released => self.app.pointer_released(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y,
                    MouseScrollDelta::PixelDelta(p) => {
                        -(p.y as f32) / chromatone_core::input::WHEEL_PIXELS_PER_LINE
                    }
                };
                self.app.wheel(lines);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match &event.logical_key {
                    Key::Character(c) => self.app.key(c.as_str()),
                    Key::Named(NamedKey::Escape) => self.app.key("Escape"),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn run() -> anyhow::Result<()> {
    dataset::validate(&EMOTIONS)?;
    let scene = EmotionScene::new(&EMOTIONS, SceneParams::default());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(panels::APP_TITLE)
        .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, scene))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            state.app.scene.unmount();
            elwt.exit();
        }
        Event::WindowEvent { event, .. } => state.window_event(&event),
        Event::AboutToWait => match state.render() {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("[render] surface error: {e:?}"),
        },
        _ => {}
    })?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
