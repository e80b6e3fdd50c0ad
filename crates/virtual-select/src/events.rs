//! Input events routed into the widget by its host.
//!
//! The widget installs no listeners of its own. Hosts translate their native
//! keyboard and pointer events into these types and call the matching
//! [`VirtualSelect`](crate::VirtualSelect) method. Pointer positions for popup
//! events are in popup-surface coordinates.

use virtual_select_render::Point;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Whether a command-style modifier (Control or Meta) is held.
    ///
    /// Key presses with one of these held never count as typed text.
    pub fn has_command(&self) -> bool {
        self.control || self.meta
    }
}

/// Keys the widget distinguishes.
///
/// Everything printable arrives as [`Key::Character`] with its text in
/// [`KeyPressEvent::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Space,
    Tab,
    Escape,
    Backspace,
    Delete,
    /// A key that produces text.
    Character,
    /// Any other key (modifiers, function keys).
    Other,
}

/// Key press event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For printable keys, this contains the character that would be typed.
    /// For non-printable keys, this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(
        key: Key,
        modifiers: KeyboardModifiers,
        text: impl Into<String>,
        is_repeat: bool,
    ) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A non-repeating press of a key without text or modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE, "", false)
    }

    /// A non-repeating press of a printable character.
    pub fn character(ch: char) -> Self {
        Self::new(Key::Character, KeyboardModifiers::NONE, ch, false)
    }

    /// Mark this event as an auto-repeat.
    pub fn repeated(mut self) -> Self {
        self.is_repeat = true;
        self
    }

    /// The single typed character, if this press produced exactly one.
    pub fn typed_char(&self) -> Option<char> {
        if self.modifiers.has_command() {
            return None;
        }
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

/// How the widget handled a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyResponse {
    /// The widget did not use the key; the host should apply its default behavior.
    Ignored,
    /// The widget used the key; the host should suppress its default behavior.
    Consumed,
    /// The widget asks the host to move focus away from it.
    YieldFocus,
}

impl KeyResponse {
    /// Whether the host should suppress its own handling of the key.
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed | Self::YieldFocus)
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Pointer press, release or click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The button involved.
    pub button: MouseButton,
    /// Position in popup-surface coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            button,
            local_pos,
            modifiers,
        }
    }

    /// A primary-button event at `(x, y)` with no modifiers.
    pub fn left(x: f32, y: f32) -> Self {
        Self::new(MouseButton::Left, Point::new(x, y), KeyboardModifiers::NONE)
    }

    /// Whether this is a primary-button event.
    pub fn is_primary(&self) -> bool {
        self.button == MouseButton::Left
    }
}

/// Mouse wheel event over the popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Position in popup-surface coordinates.
    pub local_pos: Point,
    /// Vertical scroll delta in pixels (positive = content moves up, revealing later rows).
    pub delta_y: f32,
}

impl WheelEvent {
    /// Create a new wheel event.
    pub fn new(local_pos: Point, delta_y: f32) -> Self {
        Self { local_pos, delta_y }
    }
}
