//! Windowed application runner
//!
//! Opens the window described by an [`AppConfig`], creates the GPU renderer
//! once the window exists, and then drives the scene: input events go to the
//! [`EventHandlers`], every frame runs the frame handlers and draws.
//!
//! # Example
//!
//! ```ignore
//! use roundel_app::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut scene = Scene::new();
//!     scene.quads_mut().insert(
//!         Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_pixels(100.0, 60.0))
//!             .with_border_radius(BorderRadius::circular_pixels(20.0)),
//!     );
//!     WindowedApp::run(AppConfig::default(), scene, EventHandlers::new())
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use roundel_gpu::GpuRenderer;
use roundel_platform::{
    ControlFlow, Event, EventLoop, InputEvent, Key, LifecycleEvent, Platform, Window, WindowEvent,
};
use roundel_platform_desktop::{DesktopPlatform, DesktopWindow};

use crate::config::AppConfig;
use crate::context::RenderContext;
use crate::error::{AppError, Result};
use crate::handlers::{EventHandlers, FrameClock};
use crate::scene::Scene;

/// Windowed application runner
pub struct WindowedApp;

struct SurfaceState {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl WindowedApp {
    /// Run until the window closes
    ///
    /// Startup failures (window, GPU device, shaders) are logged and
    /// returned. Failures to acquire a single frame are logged and the frame
    /// is skipped.
    pub fn run(config: AppConfig, scene: Scene, mut handlers: EventHandlers) -> Result<()> {
        let paths = config.resource_paths();
        let renderer_config = config.renderer_config(paths.shader_sources()?);
        let exit_on_escape = config.window.exit_on_escape;

        let platform = DesktopPlatform::new()?;
        let event_loop = platform.create_event_loop_with_config(config.window_config())?;

        let failure: Rc<RefCell<Option<AppError>>> = Rc::new(RefCell::new(None));
        let loop_failure = Rc::clone(&failure);

        let mut pending_scene = Some(scene);
        let mut ctx: Option<RenderContext> = None;
        let mut surface: Option<SurfaceState> = None;
        let mut clock = FrameClock::new();

        event_loop.run(move |event, window| {
            match &event {
                Event::Lifecycle(LifecycleEvent::Resumed) => {
                    if ctx.is_some() {
                        return ControlFlow::Continue;
                    }
                    let Some(scene) = pending_scene.take() else {
                        return ControlFlow::Continue;
                    };
                    match Self::create_context(window, scene, renderer_config.clone()) {
                        Ok((render_ctx, state)) => {
                            ctx = Some(render_ctx);
                            surface = Some(state);
                            tracing::info!("Roundel windowed app initialized");
                        }
                        Err(e) => {
                            tracing::error!("Failed to initialize Roundel: {}", e);
                            *loop_failure.borrow_mut() = Some(e);
                            return ControlFlow::Exit;
                        }
                    }
                }

                Event::Window(WindowEvent::CloseRequested) => {
                    if let Some(ref mut render_ctx) = ctx {
                        render_ctx.shutdown();
                    }
                    return ControlFlow::Exit;
                }

                Event::Window(WindowEvent::Resized { width, height }) => {
                    if let (Some(render_ctx), Some(state)) = (&mut ctx, &mut surface) {
                        if *width > 0 && *height > 0 {
                            state.config.width = *width;
                            state.config.height = *height;
                            state.surface.configure(render_ctx.device(), &state.config);
                            render_ctx.resize(*width, *height);
                        }
                        handlers.dispatch(render_ctx.scene_mut(), window, &event);
                    }
                }

                Event::Input(input) => {
                    if exit_on_escape {
                        if let InputEvent::Keyboard(key) = input {
                            if key.key == Key::Escape && key.is_press() {
                                tracing::debug!("Escape pressed, closing window");
                                if let Some(ref mut render_ctx) = ctx {
                                    render_ctx.shutdown();
                                }
                                return ControlFlow::Exit;
                            }
                        }
                    }
                    if let Some(ref mut render_ctx) = ctx {
                        handlers.dispatch(render_ctx.scene_mut(), window, &event);
                    }
                }

                Event::Frame => {
                    if let (Some(render_ctx), Some(state)) = (&mut ctx, &surface) {
                        let time = clock.tick(window.elapsed());
                        handlers.frame(render_ctx.scene_mut(), window, &time);

                        let frame = match state.surface.get_current_texture() {
                            Ok(frame) => frame,
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                tracing::warn!("Surface lost or outdated, reconfiguring");
                                state.surface.configure(render_ctx.device(), &state.config);
                                return Self::flow(render_ctx);
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                tracing::error!("Out of GPU memory");
                                *loop_failure.borrow_mut() =
                                    Some(AppError::Surface("out of GPU memory".to_string()));
                                return ControlFlow::Exit;
                            }
                            Err(e) => {
                                tracing::warn!("Surface error: {:?}", e);
                                return Self::flow(render_ctx);
                            }
                        };

                        let view = frame
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());
                        render_ctx.render(&view);
                        frame.present();

                        return Self::flow(render_ctx);
                    }
                }

                _ => {}
            }

            match ctx {
                Some(ref mut render_ctx) => Self::flow(render_ctx),
                None => ControlFlow::Continue,
            }
        })?;

        let result = failure.borrow_mut().take();
        match result {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Continue unless a handler asked to exit
    fn flow(render_ctx: &mut RenderContext) -> ControlFlow {
        if render_ctx.scene().exit_requested() {
            render_ctx.shutdown();
            ControlFlow::Exit
        } else {
            ControlFlow::Continue
        }
    }

    fn create_context(
        window: &DesktopWindow,
        scene: Scene,
        renderer_config: roundel_gpu::RendererConfig,
    ) -> Result<(RenderContext, SurfaceState)> {
        let (width, height) = window.size();
        let (renderer, surface) = pollster::block_on(GpuRenderer::with_surface(
            window.winit_window_arc(),
            (width, height),
            renderer_config,
        ))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: renderer.texture_format(),
            width: width.max(1),
            height: height.max(1),
            present_mode: renderer.present_mode(),
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(renderer.device(), &config);

        Ok((
            RenderContext::new(scene, renderer),
            SurfaceState { surface, config },
        ))
    }
}
