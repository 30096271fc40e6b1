//! Input event types for keyboard, text and cursor

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key changed state
    Keyboard(KeyboardEvent),
    /// A character was typed (after layout and dead-key processing)
    Char(char),
    /// Cursor movement or button
    Mouse(MouseEvent),
}

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse events
#[derive(Clone, Debug, PartialEq)]
pub enum MouseEvent {
    /// Cursor moved, in physical pixels from the window's top-left corner
    Moved { x: f32, y: f32 },
    /// Button pressed at the current cursor position
    ButtonPressed { button: MouseButton, x: f32, y: f32 },
    /// Button released at the current cursor position
    ButtonReleased { button: MouseButton, x: f32, y: f32 },
    /// Cursor entered the window
    Entered,
    /// Cursor left the window
    Left,
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Any other button, by platform index
    Other(u16),
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// Logical key
    pub key: Key,
    /// Platform scancode, when the backend exposes one
    pub scancode: Option<u32>,
    /// Press, release or auto-repeat
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Whether this is a fresh press (not a release, not a repeat)
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Key state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
    /// Held down long enough for the OS to repeat it
    Repeated,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Option on macOS
    pub alt: bool,
    /// Command on macOS, Windows key on Windows
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// The platform's shortcut modifier (Command on macOS, Ctrl elsewhere)
    pub fn command(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.meta
        } else {
            self.ctrl
        }
    }
}

/// Logical keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a printable character, lowercased
    Char(char),

    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    Left,
    Right,
    Up,
    Down,

    Shift,
    Ctrl,
    Alt,
    Meta,

    /// Function key F1..=F24
    F(u8),

    /// Unknown key
    Unknown,
}

impl Key {
    /// Key for a typed character, case-folded so 'A' and 'a' are the same key
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\t' => Key::Tab,
            '\n' | '\r' => Key::Enter,
            c if c.is_control() => Key::Unknown,
            c => Key::Char(c.to_lowercase().next().unwrap_or(c)),
        }
    }

    /// Check if this is a modifier key
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Ctrl | Key::Alt | Key::Meta)
    }
}
