//! Cross-crate behavior tests for roundel_app
//!
//! Everything here runs on the CPU: scenes are built with synthetic fonts
//! and turned into frame batches without a GPU device.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use roundel_core::{BorderRadius, Color, Dim2, Quad, Radius, Vec2};
use roundel_gpu::FrameBatch;
use roundel_platform::{
    Event, InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseEvent, Window, WindowEvent,
};
use roundel_text::metrics::printable_chars;
use roundel_text::{AtlasRegion, Character, FontId, GlyphAtlas, LoadedFont, Text, TextAlignment};
use slotmap::KeyData;

use crate::handlers::{EventHandlers, FrameClock};
use crate::scene::Scene;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Monospace font: every glyph advances 10px at a loaded height of 10px
fn mono_font() -> LoadedFont {
    let characters = printable_chars()
        .map(|c| Character {
            region: if c == ' ' {
                AtlasRegion::default()
            } else {
                AtlasRegion {
                    x: 8,
                    y: 0,
                    width: 8,
                    height: 10,
                }
            },
            size: Vec2::new(8.0, 10.0),
            bearing: Vec2::new(0.0, 10.0),
            advance: 10.0,
        })
        .collect();
    LoadedFont::from_characters("mono", 10.0, characters, GlyphAtlas::new(64, 32))
}

struct FakeWindow {
    size: (u32, u32),
    title: RefCell<String>,
    cursor: (f32, f32),
}

impl FakeWindow {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            title: RefCell::new(String::new()),
            cursor: (0.0, 0.0),
        }
    }
}

impl Window for FakeWindow {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&self, _width: u32, _height: u32) {}

    fn scale_factor(&self) -> f64 {
        1.0
    }

    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn cursor_position(&self) -> (f32, f32) {
        self.cursor
    }

    fn elapsed(&self) -> f64 {
        0.0
    }

    fn request_redraw(&self) {}

    fn is_focused(&self) -> bool {
        true
    }
}

fn key_press(key: Key) -> Event {
    Event::Input(InputEvent::Keyboard(KeyboardEvent {
        key,
        scancode: None,
        state: KeyState::Pressed,
        modifiers: Modifiers::default(),
    }))
}

// ============================================================================
// Scene -> frame batch
// ============================================================================

#[test]
fn test_batch_contains_quads_then_wrapped_text() {
    let mut scene = Scene::new();
    let font = scene.fonts_mut().insert(mono_font()).unwrap();

    let parent = scene.quads_mut().insert(
        Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_scale(0.25, 0.25)).with_color(Color::RED),
    );
    scene
        .quads_mut()
        .insert_child(parent, Quad::new(Dim2::ZERO, Dim2::from_pixels(10.0, 10.0)))
        .unwrap();

    // Exactly the width of "Hello"
    scene.add_text(
        Text::new("Hello world", font)
            .with_font_size(10.0)
            .with_render_width(50.0)
            .with_top_left(Vec2::new(20.0, 30.0))
            .with_color(Color::GREEN),
    );

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(800.0, 600.0), &mut batch);

    assert_eq!(batch.quads.len(), 2);
    assert_eq!(batch.quads[0].color, Color::RED.to_array());

    // Ten letters, the space has no bitmap
    assert_eq!(batch.glyphs.len(), 10);
    assert_eq!(batch.runs.len(), 1);
    assert_eq!(batch.runs[0].font, font);
    assert_eq!(batch.runs[0].instances, 0..10);

    // "world" starts the second line at the left edge
    let w = batch.glyphs[5];
    assert_eq!(w.bounds, [20.0, 40.0, 8.0, 10.0]);
    assert_eq!(w.color, Color::GREEN.to_array());
    assert_eq!(w.uv_bounds, [0.125, 0.0, 0.25, 10.0 / 32.0]);
}

#[test]
fn test_batch_is_rebuilt_from_scratch() {
    let mut scene = Scene::new();
    scene
        .quads_mut()
        .insert(Quad::new(Dim2::ZERO, Dim2::from_pixels(5.0, 5.0)));

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(100.0, 100.0), &mut batch);
    scene.build_batch(Vec2::new(100.0, 100.0), &mut batch);
    assert_eq!(batch.quads.len(), 1);
}

#[test]
fn test_text_with_unknown_font_is_skipped() {
    let mut scene = Scene::new();
    let stale = FontId::from(KeyData::from_ffi(7));
    scene.add_text(Text::new("ghost", stale));

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(100.0, 100.0), &mut batch);
    assert!(batch.is_empty());
}

#[test]
fn test_layout_is_reused_between_frames() {
    let mut scene = Scene::new();
    let font = scene.fonts_mut().insert(mono_font()).unwrap();
    let id = scene.add_text(Text::new("aa bb cc", font).with_font_size(10.0));

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(100.0, 100.0), &mut batch);
    assert!(!scene.text(id).unwrap().is_dirty());

    scene.text_mut(id).unwrap().set_color(Color::BLUE);
    assert!(!scene.text(id).unwrap().is_dirty());

    scene.text_mut(id).unwrap().set_text("aa bb cc dd");
    assert!(scene.text(id).unwrap().is_dirty());
    scene.build_batch(Vec2::new(100.0, 100.0), &mut batch);
    assert_eq!(batch.glyphs.len(), 8);
}

#[test]
fn test_justified_gaps_reach_the_right_edge() {
    let mut scene = Scene::new();
    let font = scene.fonts_mut().insert(mono_font()).unwrap();
    // First line "ab cd ef " is 80px wide with 20px slack and three words
    scene.add_text(
        Text::new("ab cd ef gh", font)
            .with_font_size(10.0)
            .with_render_width(100.0)
            .with_alignment(TextAlignment::Justified),
    );

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(200.0, 200.0), &mut batch);

    let xs: Vec<f32> = batch.glyphs.iter().map(|g| g.bounds[0]).collect();
    // Each of the two gaps grows by 10px; the last line stays left-aligned
    assert_eq!(xs, vec![0.0, 10.0, 40.0, 50.0, 80.0, 90.0, 0.0, 10.0]);
}

#[test]
fn test_huge_radii_are_corrected_per_edge() {
    let mut scene = Scene::new();
    scene.quads_mut().insert(
        Quad::new(Dim2::from_pixels(100.0, 100.0), Dim2::from_pixels(50.0, 20.0))
            .with_border_radius(BorderRadius::circular_pixels(1000.0)),
    );

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(400.0, 400.0), &mut batch);
    let quad = batch.quads[0];
    let (top, bottom) = (quad.radii_top, quad.radii_bottom);

    assert!(top[0] + top[2] <= 1.0 + EPSILON);
    assert!(bottom[0] + bottom[2] <= 1.0 + EPSILON);
    assert!(top[1] + bottom[1] <= 1.0 + EPSILON);
    assert!(top[3] + bottom[3] <= 1.0 + EPSILON);
    assert_eq!(quad.active, [1, 1, 1, 1]);
    assert!(approx(top[1], 0.5));
}

// ============================================================================
// Event handlers
// ============================================================================

#[test]
fn test_dispatch_routes_events() {
    let mut scene = Scene::new();
    let window = FakeWindow::new(400, 300);

    let resized = Rc::new(Cell::new((0, 0)));
    let typed = Rc::new(RefCell::new(String::new()));
    let keys = Rc::new(Cell::new(0));

    let mut handlers = EventHandlers::new()
        .on_resize({
            let resized = Rc::clone(&resized);
            move |_, _, w, h| resized.set((w, h))
        })
        .on_char({
            let typed = Rc::clone(&typed);
            move |_, _, c| typed.borrow_mut().push(c)
        })
        .on_key({
            let keys = Rc::clone(&keys);
            move |_, _, _| keys.set(keys.get() + 1)
        });

    handlers.dispatch(
        &mut scene,
        &window,
        &Event::Window(WindowEvent::Resized {
            width: 640,
            height: 480,
        }),
    );
    handlers.dispatch(&mut scene, &window, &Event::Input(InputEvent::Char('h')));
    handlers.dispatch(&mut scene, &window, &Event::Input(InputEvent::Char('i')));
    handlers.dispatch(&mut scene, &window, &key_press(Key::Char('h')));
    // Frames are not routed through dispatch
    handlers.dispatch(&mut scene, &window, &Event::Frame);

    assert_eq!(resized.get(), (640, 480));
    assert_eq!(typed.borrow().as_str(), "hi");
    assert_eq!(keys.get(), 1);
}

#[test]
fn test_cursor_drives_corner_radii() {
    let mut scene = Scene::new();
    let window = FakeWindow::new(400, 200);
    let child = scene
        .quads_mut()
        .insert(Quad::new(Dim2::ZERO, Dim2::from_pixels(20.0, 20.0)));

    let mut handlers = EventHandlers::new().on_cursor(move |scene, window, x, y| {
        let (w, h) = window.size();
        let (mx, my) = (x / w as f32, y / h as f32);
        if let Some(quad) = scene.quads_mut().get_mut(child) {
            quad.set_border_radius(
                BorderRadius::zero()
                    .with_top_left(Radius::elliptical_scale(mx, my))
                    .with_bottom_right(Radius::elliptical_scale(1.0 - mx, 1.0 - my)),
            );
        }
    });

    handlers.dispatch(
        &mut scene,
        &window,
        &Event::Input(InputEvent::Mouse(MouseEvent::Moved { x: 100.0, y: 50.0 })),
    );

    let radius = scene.quads().get(child).unwrap().border_radius();
    let [top_left, _, _, bottom_right] = radius.corners();
    assert!(approx(top_left.x().scale, 0.25));
    assert!(approx(top_left.y().scale, 0.25));
    assert!(approx(bottom_right.x().scale, 0.75));
}

#[test]
fn test_cursor_at_window_edge_collapses_quad() {
    let mut scene = Scene::new();
    let window = FakeWindow::new(400, 200);
    let child = scene.quads_mut().insert(
        Quad::new(Dim2::ZERO, Dim2::from_scale(0.25, 0.25))
            .with_border_radius(BorderRadius::circular_pixels(15.0)),
    );

    let mut handlers = EventHandlers::new().on_cursor(move |scene, window, x, y| {
        let (w, h) = window.size();
        let (mx, my) = (x / w as f32, y / h as f32);
        if let Some(quad) = scene.quads_mut().get_mut(child) {
            quad.set_size(Dim2::from_scale(mx * 0.5, my * 0.5));
        }
    });

    handlers.dispatch(
        &mut scene,
        &window,
        &Event::Input(InputEvent::Mouse(MouseEvent::Moved { x: 0.0, y: 100.0 })),
    );

    let mut batch = FrameBatch::new();
    scene.build_batch(Vec2::new(400.0, 200.0), &mut batch);
    assert_eq!(batch.quads.len(), 1);
    let quad = &batch.quads[0];
    assert_eq!(quad.active, [0; 4]);
    assert!(quad.radii_top.iter().chain(&quad.radii_bottom).all(|r| r.is_finite()));
    assert!(quad.inv_top.iter().chain(&quad.inv_bottom).all(|r| r.is_finite()));
}

#[test]
fn test_frame_handlers_update_scene_and_title() {
    let mut scene = Scene::new();
    let window = FakeWindow::new(400, 300);
    let quad = scene
        .quads_mut()
        .insert(Quad::new(Dim2::ZERO, Dim2::from_pixels(10.0, 10.0)));

    let mut handlers = EventHandlers::new().on_frame(move |scene, window, time| {
        if let Some(q) = scene.quads_mut().get_mut(quad) {
            q.set_rotation(time.elapsed as f32);
        }
        window.set_title(&format!("Rounded Quads | {} fps", time.fps()));
        if time.elapsed > 2.0 {
            scene.request_exit();
        }
    });

    let mut clock = FrameClock::new();
    clock.tick(0.5);
    let time = clock.tick(1.0);
    handlers.frame(&mut scene, &window, &time);

    assert_eq!(scene.quads().get(quad).unwrap().rotation(), 1.0);
    assert_eq!(window.title(), "Rounded Quads | 2 fps");
    assert!(!scene.exit_requested());

    let time = clock.tick(2.5);
    handlers.frame(&mut scene, &window, &time);
    assert!(scene.exit_requested());
}

#[test]
fn test_clear_terminates_fonts() {
    let mut scene = Scene::new();
    let font = scene.fonts_mut().insert(mono_font()).unwrap();
    scene.add_text(Text::new("x", font));
    scene.clear();

    assert_eq!(scene.text_count(), 0);
    assert!(scene.fonts().get(font).is_none());
    assert!(!scene.fonts().is_initialized());
}
