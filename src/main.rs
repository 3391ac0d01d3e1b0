use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use liberty_lens::chat::{ChatSession, GeminiAssistant};
use liberty_lens::cli::Cli;
use liberty_lens::composer::SceneComposer;
use liberty_lens::config::AssistantConfig;
use liberty_lens::core::{Action, FpsCounter, WinitController};
use liberty_lens::frame::FrameIterator;
use liberty_lens::renderer::Renderer;
use liberty_lens::settings::SceneSettings;
use liberty_lens::ui::{ControlResponse, Hud, Interface};

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 800;
const FPS_UPDATES_PER_SECOND: f32 = 2.0;

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    composer: SceneComposer,
    settings: SceneSettings,
    session: ChatSession,
    /// None with `--no-ui`
    interface: Option<Interface>,
    controller: WinitController,
    frames: FrameIterator,
    fps: FpsCounter,
}

impl App {
    fn new(cli: &Cli) -> Self {
        let mut config = AssistantConfig::from_env();
        if let Some(model) = &cli.model {
            config = config.with_model(model.clone());
        }
        if !config.has_credentials() {
            log::warn!("No API_KEY set; the chat will ask for configuration");
        }

        Self {
            window: None,
            renderer: None,
            composer: SceneComposer::new(cli.seed, cli.tourists),
            settings: cli.settings(),
            session: ChatSession::new(Box::new(GeminiAssistant::new(config))),
            interface: (!cli.no_ui).then(Interface::new),
            controller: WinitController::new(),
            frames: FrameIterator::new(),
            fps: FpsCounter::new(FPS_UPDATES_PER_SECOND),
        }
    }

    /// Mouse drags and scroll move the camera unless a panel has the pointer
    fn apply_pointer(&mut self) {
        let ui_has_pointer = self
            .renderer
            .as_ref()
            .is_some_and(|renderer| renderer.ui_wants_pointer());
        if ui_has_pointer {
            return;
        }

        let camera = self.composer.camera_mut();
        match self.controller.drag() {
            Some((Action::OrbitDrag, (dx, dy))) => camera.orbit(dx, dy),
            Some((Action::PanDrag, (dx, dy))) => camera.pan(dx, dy),
            _ => {}
        }

        let scroll = self.controller.scroll_lines();
        if scroll != 0.0 {
            camera.zoom(scroll);
        }
    }

    fn reset(&mut self) {
        self.settings = self.composer.reset();
        log::info!("View reset");
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            return;
        };
        if self.fps.tick(frame.delta) {
            let triangles = self.renderer.as_ref().map_or(0, Renderer::triangle_count);
            log::debug!("{:.1} fps, {} triangles", self.fps.fps(), triangles);
        }

        self.session.poll();

        self.apply_pointer();
        let keyboard_free = self
            .renderer
            .as_ref()
            .is_some_and(|renderer| !renderer.ui_wants_keyboard());
        if keyboard_free {
            self.composer.camera_mut().update(&self.controller);
        }
        self.controller.reset_deltas();

        let description = self.composer.render(&self.settings, frame.time);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let camera = self.composer.camera();
        let fps = self.fps.fps();
        let hud = Hud {
            fps: (fps > 0.0).then_some(fps),
            inscription: &description.inscription,
            view_proj: camera.view_proj(renderer.dimensions().aspect()),
            eye: camera.position(),
        };

        let mut response = ControlResponse::default();
        let interface = &mut self.interface;
        let settings = &mut self.settings;
        let session = &mut self.session;

        let result = renderer.render(window, &description, camera, |ctx| {
            if let Some(interface) = interface.as_mut() {
                response = interface.show(ctx, settings, session, &hud);
            }
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
        }

        if response.changed {
            log::debug!("Settings changed: {:?}", self.settings);
        }
        if response.reset_requested {
            self.reset();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Liberty Lens")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(Renderer::new(window.clone())) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Releases must reach the controller even over a panel
        self.controller.process_event(&event);

        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        repeat: false,
                        ..
                    },
                ..
            } => self.reset(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.into());
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Compose one frame headlessly and print it as JSON
fn dump_frame(cli: &Cli, time: f32) -> Result<()> {
    let mut composer = SceneComposer::new(cli.seed, cli.tourists);
    let frame = composer.render(&cli.settings(), time);
    log::info!(
        "Composed frame at t={}s: {} nodes, {} sparkles",
        time,
        frame.nodes.len(),
        frame.sparkles.len()
    );
    let json = serde_json::to_string_pretty(&frame).context("Failed to serialize frame")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(time) = cli.dump_frame {
        return dump_frame(&cli, time);
    }

    let settings = cli.settings();
    log::info!(
        "Liberty Lens: sun {}°/{}°, wind {:.2}, {} tourists{}, ui {}",
        settings.sun_azimuth,
        settings.sun_elevation,
        settings.wind_intensity,
        cli.tourists,
        if settings.show_tourists { "" } else { " (hidden)" },
        if cli.no_ui { "off" } else { "on" }
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli);

    println!("Liberty Lens - Controls: drag to orbit, right-drag to pan, scroll to zoom, Q/E W/S keys, R to reset, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
