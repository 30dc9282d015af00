use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use motion_viewer::cli::Cli;
use motion_viewer::config::WindowConfig;
use motion_viewer::core::{input, Button, FixedHz, FrameIterator, InputEvent, SteppedFrames, SurfaceRenderer};
use motion_viewer::{create_demo, Viewer, ViewerConfig};

const FPS_UPDATE_HZ: f32 = 1.0;
const HEADLESS_HZ: f32 = 60.0;
const HEADLESS_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    viewer: Viewer,
    window_config: WindowConfig,
    show_fps: bool,
    frames: FrameIterator,
    fps_timer: FixedHz,
    frame_count: u32,
    fps_elapsed: f32,
}

impl App {
    fn new(viewer: Viewer, window_config: WindowConfig, show_fps: bool) -> Self {
        Self {
            window: None,
            renderer: None,
            viewer,
            window_config,
            show_fps,
            frames: FrameIterator::new(),
            fps_timer: FixedHz::new(FPS_UPDATE_HZ),
            frame_count: 0,
            fps_elapsed: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_elapsed += delta;

        if self.fps_timer.tick(delta) {
            let fps = self.frame_count as f32 / self.fps_elapsed.max(f32::EPSILON);
            log::info!("FPS: {:.1} | {}", fps, self.viewer.status());
            if let (true, Some(window)) = (self.show_fps, &self.window) {
                window.set_title(&format!("{} - {:.0} FPS", self.window_config.title, fps));
            }
            self.frame_count = 0;
            self.fps_elapsed = 0.0;
        }
    }

    fn redraw(&mut self) {
        let Some(frame) = self.frames.next() else {
            return;
        };

        self.viewer.frame(&frame);
        self.update_fps(frame.delta);

        if let Some(renderer) = &self.renderer {
            let (width, height) = renderer.dimensions();
            let canvas = self.viewer.render(width, height);
            if let Err(e) = renderer.present(&canvas) {
                log::error!("Render error: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.window_config.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.window_config.width,
                    self.window_config.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        self.viewer.resize(width, height);
        self.viewer.start();

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.viewer.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => match input::translate(&other) {
                Some(InputEvent::Pressed(Button::Escape)) => event_loop.exit(),
                Some(input) => self.viewer.input(input),
                None => {}
            },
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Step the demo without a window and print where the animation ended up
fn run_headless(mut viewer: Viewer, frames: u64) -> Result<()> {
    viewer.start();
    viewer.finish_loading(HEADLESS_LOAD_TIMEOUT);

    for frame in SteppedFrames::new(HEADLESS_HZ).take(frames as usize) {
        viewer.frame(&frame);
        if frame.number % HEADLESS_HZ as u64 == 0 {
            log::debug!("frame {}: {}", frame.number, viewer.status());
        }
    }

    println!("{}", viewer.status());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = ViewerConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    let demo = create_demo(cli.demo, &config)?;
    let viewer = Viewer::new(demo, &config)?;

    if let Some(frames) = cli.frames {
        return run_headless(viewer, frames);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(viewer, config.window.clone(), !cli.no_ui);

    println!("Motion Viewer - mouse buttons and arrow keys interact, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
