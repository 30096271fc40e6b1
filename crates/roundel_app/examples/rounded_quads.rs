//! Rounded Quads Demo
//!
//! A red card spins in the middle of the window. A green child sits in its
//! top-left corner; move the cursor to reshape it: the cursor position sets
//! both the child's size and the elliptical radius of each of its corners.
//! Below, a justified paragraph rewraps when the window is resized.
//!
//! Text needs a font: set `[text] default_font` in `roundel.toml` to a file
//! under `resources/fonts/`. Without one the demo draws quads only.
//!
//! Run with: cargo run -p roundel_app --example rounded_quads

use std::path::Path;

use roundel_app::prelude::*;
use tracing_subscriber::EnvFilter;

const PARAGRAPH: &str = "Every corner of the green quad is an ellipse whose radii follow the \
cursor. Radii that would overlap are scaled down edge by edge, so the shape stays a \
valid rounded rectangle however far the cursor travels. This paragraph is justified: \
the slack of each line is shared between its word gaps, and the last line is left alone.";

const MARGIN: f32 = 20.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::load_or_default(Path::new("roundel.toml"))?;
    if config.window.title.is_empty() {
        config.window.title = "Rounded Quads".to_string();
    }
    let paths = config.resource_paths();

    let mut scene = Scene::new();

    let card = scene.quads_mut().insert(
        Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_scale(0.25, 0.25))
            .with_color(Color::RED)
            .with_border_radius(BorderRadius::circular_pixels(75.0)),
    );

    // Child positions are relative to the parent center, in parent extents
    let corner = Dim2::from_scale(-0.5 + 0.0165, -0.5 + 0.0165);
    let child = scene
        .quads_mut()
        .insert_child(
            card,
            Quad::new(corner, Dim2::from_scale(0.25, 0.25))
                .with_color(Color::GREEN)
                .with_anchor(Vec2::ZERO)
                .with_border_radius(BorderRadius::circular_pixels(15.0)),
        )
        .ok_or_else(|| anyhow::anyhow!("card quad vanished"))?;

    let paragraph = match &config.text.default_font {
        Some(name) => {
            let font = scene.load_font(&paths, name, config.text.quality)?;
            Some(
                scene.add_text(
                    Text::new(PARAGRAPH, font)
                        .with_font_size(20.0)
                        .with_line_height(1.2)
                        .with_top_left(Vec2::new(MARGIN, MARGIN))
                        .with_render_width(config.window.width as f32 - 2.0 * MARGIN)
                        .with_alignment(TextAlignment::Justified),
                ),
            )
        }
        None => {
            tracing::warn!("No [text] default_font configured, skipping the paragraph");
            None
        }
    };

    let handlers = EventHandlers::new()
        .on_cursor(move |scene, window, x, y| {
            let (width, height) = window.size();
            let mx = (x / width.max(1) as f32).clamp(0.0, 1.0);
            let my = (y / height.max(1) as f32).clamp(0.0, 1.0);

            if let Some(quad) = scene.quads_mut().get_mut(child) {
                quad.set_size(Dim2::from_scale(mx * 0.5, my * 0.5));
                quad.set_border_radius(BorderRadius::new(
                    Radius::elliptical_scale(mx, my),
                    Radius::elliptical_scale(1.0 - mx, my),
                    Radius::elliptical_scale(mx, 1.0 - my),
                    Radius::elliptical_scale(1.0 - mx, 1.0 - my),
                ));
            }
        })
        .on_resize(move |scene, _window, width, _height| {
            if let Some(text) = paragraph.and_then(|id| scene.text_mut(id)) {
                text.set_render_width((width as f32 - 2.0 * MARGIN).max(0.0));
            }
        })
        .on_key(|scene, _window, event| {
            if event.is_press() && event.key == Key::Char('q') {
                scene.request_exit();
            }
        })
        .on_frame(move |scene, window, time| {
            if let Some(quad) = scene.quads_mut().get_mut(card) {
                quad.set_rotation(time.elapsed as f32);
            }
            window.set_title(&format!("Rounded Quads | {} fps", time.fps()));
        });

    if let Err(e) = WindowedApp::run(config, scene, handlers) {
        tracing::error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
