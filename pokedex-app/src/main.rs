// Disable console on Windows in release builds
#![cfg_attr(
  all(
    target_os = "windows",
    not(debug_assertions),
  ),
  windows_subsystem = "windows"
)]

mod config;
mod debounce;
mod fetch;
mod gui;
mod images;
mod route;

use gui::State;
use std::fs;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext},
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

const TITLE: &str = "Pokédex";

fn get_config() -> config::Config {
    let path = config::config_dir().join("config.json");
    if let Ok(file) = fs::File::open(path) {
        if let Ok(config) = serde_json::from_reader(&file) {
            return config;
        }
    }
    let config = config::Config::default();
    if let Err(err) = config.save() {
        eprintln!("Failed to write default config: {err}");
    }
    config
}

fn set_vsync(surface: &Surface<WindowSurface>, context: &PossiblyCurrentContext, vsync: bool) {
    if vsync {
        if let Err(res) = surface.set_swap_interval(context, SwapInterval::Wait(NonZeroU32::new(1).unwrap())) {
            eprintln!("Error enabling vsync: {res:?}");
        }
    } else {
        if let Err(res) = surface.set_swap_interval(context, SwapInterval::DontWait) {
            eprintln!("Error disabling vsync: {res:?}");
        }
    }
}

struct AppWindow {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: egui_glow::EguiGlow,
}

fn create_window(event_loop: &ActiveEventLoop) -> AppWindow {
    let attributes = Window::default_attributes()
        .with_title(TITLE)
        .with_inner_size(LogicalSize::new(1024.0, 768.0))
        .with_visible(false);
    let (window, cfg) = glutin_winit::DisplayBuilder::new()
        .with_window_attributes(Some(attributes))
        .build(event_loop, ConfigTemplateBuilder::new().with_multisampling(4), |mut configs| {
            configs.next().unwrap()
        })
        .expect("Failed to create OpenGL window");

    let window = window.unwrap();
    let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());

    let context_attribs = ContextAttributesBuilder::new().build(raw_window_handle);
    let context = unsafe {
        cfg.display()
            .create_context(&cfg, &context_attribs)
            .expect("Failed to create OpenGL context")
    };

    let size = window.inner_size();
    let surface_attribs = SurfaceAttributesBuilder::<WindowSurface>::new()
        .with_srgb(Some(true))
        .build(
            raw_window_handle.expect("Window has no native handle"),
            NonZeroU32::new(size.width.max(1)).unwrap(),
            NonZeroU32::new(size.height.max(1)).unwrap(),
        );
    let surface = unsafe {
        cfg.display()
            .create_window_surface(&cfg, &surface_attribs)
            .expect("Failed to create OpenGL surface")
    };
    let context = context
        .make_current(&surface)
        .expect("Failed to make OpenGL context current");

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function_cstr(|s| cfg.display().get_proc_address(s).cast())
    });
    let egui_glow = egui_glow::EguiGlow::new(event_loop, gl.clone(), None, None, true);

    AppWindow {
        window,
        surface,
        context,
        gl,
        egui_glow,
    }
}

fn main() {
    let mut state = match State::new(get_config()) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Failed to initialize: {err}");
            return;
        }
    };
    let vsync = state.config.vsync;

    // optional deep link, e.g. `pokedex-app /pokemon/25`
    if let Some(path) = std::env::args().nth(1) {
        match route::Route::parse(&path) {
            Some(route) => state.navigate(route),
            None => eprintln!("Unrecognized path: {path}"),
        }
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app: Option<AppWindow> = None;

    #[allow(deprecated)]
    let _ = event_loop.run(move |event, window_target| {
        match event {
            Event::Resumed => {
                if app.is_none() {
                    let created = create_window(window_target);
                    set_vsync(&created.surface, &created.context, vsync);
                    created.window.set_visible(true);
                    created.window.request_redraw();
                    app = Some(created);
                }
            }
            Event::AboutToWait => {
                if let Some(app) = &app {
                    app.window.request_redraw();
                }
            }
            Event::WindowEvent { event, .. } => {
                let Some(app) = app.as_mut() else { return };
                match &event {
                    WindowEvent::CloseRequested => {
                        app.egui_glow.destroy();
                        window_target.exit();
                        return;
                    }
                    WindowEvent::Resized(size) => {
                        if size.width > 0 && size.height > 0 {
                            app.surface.resize(
                                &app.context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        state.poll(Instant::now());
                        app.egui_glow.run(&app.window, |ctx| gui::draw(ctx, &mut state));

                        unsafe {
                            use glow::HasContext;
                            app.gl.clear_color(0.05, 0.05, 0.08, 1.0);
                            app.gl.clear(glow::COLOR_BUFFER_BIT);
                        }
                        app.egui_glow.paint(&app.window);

                        if !vsync {
                            let overhead = state.last_instant.elapsed().as_micros() as u64;
                            let budget = 1_000_000 / state.config.framerate.max(1);
                            if overhead < budget {
                                std::thread::sleep(Duration::from_micros(budget - overhead));
                            }
                        }
                        if let Err(err) = app.surface.swap_buffers(&app.context) {
                            eprintln!("Failed to swap buffers: {err}");
                        }
                        state.last_instant = Instant::now();
                        return;
                    }
                    _ => {}
                }
                let response = app.egui_glow.on_window_event(&app.window, &event);
                if response.repaint {
                    app.window.request_redraw();
                }
            }
            _ => {}
        }
    });
}
