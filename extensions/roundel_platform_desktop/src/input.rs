//! Desktop input conversion (winit -> roundel_platform)

use roundel_platform::{InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent};
use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey, PhysicalKey};

/// Convert winit mouse button to roundel MouseButton
pub fn convert_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Convert winit element state, folding in the repeat flag
pub fn convert_key_state(state: ElementState, repeat: bool) -> KeyState {
    match (state, repeat) {
        (ElementState::Pressed, false) => KeyState::Pressed,
        (ElementState::Pressed, true) => KeyState::Repeated,
        (ElementState::Released, _) => KeyState::Released,
    }
}

/// Convert winit modifiers to roundel Modifiers
pub fn convert_modifiers(modifiers: ModifiersState) -> Modifiers {
    Modifiers {
        shift: modifiers.shift_key(),
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(),
    }
}

/// Convert winit logical key to roundel Key
pub fn convert_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::Space => Key::Space,
            NamedKey::Enter => Key::Enter,
            NamedKey::Escape => Key::Escape,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Tab => Key::Tab,
            NamedKey::Delete => Key::Delete,
            NamedKey::Insert => Key::Insert,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            NamedKey::PageUp => Key::PageUp,
            NamedKey::PageDown => Key::PageDown,

            NamedKey::ArrowLeft => Key::Left,
            NamedKey::ArrowRight => Key::Right,
            NamedKey::ArrowUp => Key::Up,
            NamedKey::ArrowDown => Key::Down,

            NamedKey::Shift => Key::Shift,
            NamedKey::Control => Key::Ctrl,
            NamedKey::Alt => Key::Alt,
            NamedKey::Super | NamedKey::Meta => Key::Meta,

            other => function_key(*other).map_or(Key::Unknown, Key::F),
        },
        WinitKey::Character(s) => match s.chars().next() {
            Some(c) => Key::from_char(c),
            None => Key::Unknown,
        },
        _ => Key::Unknown,
    }
}

fn function_key(key: NamedKey) -> Option<u8> {
    const KEYS: [NamedKey; 24] = [
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
        NamedKey::F13,
        NamedKey::F14,
        NamedKey::F15,
        NamedKey::F16,
        NamedKey::F17,
        NamedKey::F18,
        NamedKey::F19,
        NamedKey::F20,
        NamedKey::F21,
        NamedKey::F22,
        NamedKey::F23,
        NamedKey::F24,
    ];
    KEYS.iter().position(|k| *k == key).map(|i| i as u8 + 1)
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
fn scancode(key: PhysicalKey) -> Option<u32> {
    use winit::platform::scancode::PhysicalKeyExtScancode;
    key.to_scancode()
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn scancode(_key: PhysicalKey) -> Option<u32> {
    None
}

/// Convert a winit key event into the keyboard event plus any typed characters
///
/// Characters are only reported for presses and repeats, and control
/// characters (Backspace, Escape, ...) are left to the keyboard event.
pub fn convert_key_event(event: &KeyEvent, modifiers: ModifiersState) -> Vec<InputEvent> {
    let mut events = vec![InputEvent::Keyboard(KeyboardEvent {
        key: convert_key(&event.logical_key),
        scancode: scancode(event.physical_key),
        state: convert_key_state(event.state, event.repeat),
        modifiers: convert_modifiers(modifiers),
    })];

    if event.state == ElementState::Pressed {
        if let Some(text) = &event.text {
            events.extend(
                text.chars()
                    .filter(|c| !c.is_control())
                    .map(InputEvent::Char),
            );
        }
    }

    events
}

/// Convert mouse move to roundel InputEvent
pub fn mouse_moved(x: f32, y: f32) -> InputEvent {
    InputEvent::Mouse(MouseEvent::Moved { x, y })
}

/// Convert mouse button press or release to roundel InputEvent
pub fn mouse_button(state: ElementState, button: WinitMouseButton, x: f32, y: f32) -> InputEvent {
    let button = convert_mouse_button(button);
    InputEvent::Mouse(match state {
        ElementState::Pressed => MouseEvent::ButtonPressed { button, x, y },
        ElementState::Released => MouseEvent::ButtonReleased { button, x, y },
    })
}
