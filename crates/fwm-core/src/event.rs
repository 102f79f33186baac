#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the input events the event loop forwards to the
//! action subsystem. All events derive `Clone`, `PartialEq`, and `Eq` for
//! use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are root-window coordinates and may be negative on
//!   multi-monitor layouts.
//! - `modifiers` on every event is the state *before* the event, the way the
//!   windowing protocol reports it. Use [`KeyEvent::modifiers_after`] to get
//!   the state once a modifier key press or release has taken effect.
//! - Keyboard codes are already translated; there is no separate input
//!   context to consult.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer button event.
    Button(ButtonEvent),

    /// Pointer motion.
    Motion(MotionEvent),

    /// Window-manager focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

impl Event {
    /// Modifier state attached to the event, if it carries one.
    #[must_use]
    pub const fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::Key(key) => Some(key.modifiers),
            Self::Button(button) => Some(button.modifiers),
            Self::Motion(motion) => Some(motion.modifiers),
            Self::Focus(_) => None,
        }
    }

    /// Pointer position attached to the event, if it carries one.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Button(button) => Some(Point::new(button.x, button.y)),
            Self::Motion(motion) => Some(Point::new(motion.x, motion.y)),
            Self::Key(_) | Self::Focus(_) => None,
        }
    }

    /// Check if this is a key release.
    #[must_use]
    pub const fn is_key_release(&self) -> bool {
        matches!(
            self,
            Self::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            })
        )
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed or released.
    pub code: KeyCode,

    /// Modifier state before the event.
    pub modifiers: Modifiers,

    /// Press or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Modifier state once this event has taken effect.
    ///
    /// Pressing a modifier key adds its bit, releasing one removes it; any
    /// other key leaves the state unchanged.
    #[must_use]
    pub fn modifiers_after(&self) -> Modifiers {
        match (self.code, self.kind) {
            (KeyCode::Modifier(bit), KeyEventKind::Press) => self.modifiers | bit,
            (KeyCode::Modifier(bit), KeyEventKind::Release) => self.modifiers - bit,
            _ => self.modifiers,
        }
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),

    /// A modifier key; carries the modifier bit it controls.
    Modifier(Modifiers),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed.
    #[default]
    Press,

    /// Key was released.
    Release,
}

bitflags! {
    /// Keyboard modifier and pointer button state mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u16 {
        /// No modifiers.
        const NONE    = 0;
        /// Shift key.
        const SHIFT   = 1 << 0;
        /// Caps lock.
        const LOCK    = 1 << 1;
        /// Control key.
        const CTRL    = 1 << 2;
        /// Alt/Meta (Mod1).
        const ALT     = 1 << 3;
        /// Num lock (Mod2).
        const NUMLOCK = 1 << 4;
        /// Mod3.
        const MOD3    = 1 << 5;
        /// Super/Windows (Mod4).
        const SUPER   = 1 << 6;
        /// Mod5 (often AltGr).
        const MOD5    = 1 << 7;
        /// Pointer button 1 held.
        const BUTTON1 = 1 << 8;
        /// Pointer button 2 held.
        const BUTTON2 = 1 << 9;
        /// Pointer button 3 held.
        const BUTTON3 = 1 << 10;
        /// Pointer button 4 held.
        const BUTTON4 = 1 << 11;
        /// Pointer button 5 held.
        const BUTTON5 = 1 << 12;

        /// Modifiers a binding can meaningfully hold down.
        ///
        /// Lock-style modifiers are excluded: their state says nothing about
        /// whether the user is still holding a chord.
        const KEYBOARD = Self::SHIFT.bits()
            | Self::CTRL.bits()
            | Self::ALT.bits()
            | Self::MOD3.bits()
            | Self::SUPER.bits()
            | Self::MOD5.bits();

        /// All pointer button bits.
        const BUTTONS = Self::BUTTON1.bits()
            | Self::BUTTON2.bits()
            | Self::BUTTON3.bits()
            | Self::BUTTON4.bits()
            | Self::BUTTON5.bits();
    }
}

impl Modifiers {
    /// Only the chord-relevant keyboard modifiers.
    #[must_use]
    pub const fn keyboard(self) -> Self {
        self.intersection(Self::KEYBOARD)
    }

    /// Only the pointer button bits.
    #[must_use]
    pub const fn buttons(self) -> Self {
        self.intersection(Self::BUTTONS)
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// Button 1.
    Left,
    /// Button 2.
    Middle,
    /// Button 3.
    Right,
    /// Button 4.
    ScrollUp,
    /// Button 5.
    ScrollDown,
    /// Any higher-numbered button.
    Other(u8),
}

impl MouseButton {
    /// Map a protocol button number (1-based) to a button.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Left,
            2 => Self::Middle,
            3 => Self::Right,
            4 => Self::ScrollUp,
            5 => Self::ScrollDown,
            n => Self::Other(n),
        }
    }

    /// Protocol button number (1-based).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::ScrollUp => 4,
            Self::ScrollDown => 5,
            Self::Other(n) => n,
        }
    }

    /// State-mask bit for this button, if it has one.
    #[must_use]
    pub const fn mask(self) -> Modifiers {
        match self {
            Self::Left => Modifiers::BUTTON1,
            Self::Middle => Modifiers::BUTTON2,
            Self::Right => Modifiers::BUTTON3,
            Self::ScrollUp => Modifiers::BUTTON4,
            Self::ScrollDown => Modifiers::BUTTON5,
            Self::Other(_) => Modifiers::NONE,
        }
    }
}

/// A pointer button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Press or release.
    pub kind: ButtonEventKind,

    /// The button involved.
    pub button: MouseButton,

    /// Root X coordinate.
    pub x: i32,

    /// Root Y coordinate.
    pub y: i32,

    /// Modifier state before the event.
    pub modifiers: Modifiers,
}

impl ButtonEvent {
    /// Create a button press at the given root position.
    #[must_use]
    pub const fn press(button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            kind: ButtonEventKind::Press,
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a button release at the given root position.
    #[must_use]
    pub const fn release(button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            kind: ButtonEventKind::Release,
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a button event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEventKind {
    /// Button pressed.
    Press,
    /// Button released.
    Release,
}

/// Pointer motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent {
    /// Root X coordinate.
    pub x: i32,

    /// Root Y coordinate.
    pub y: i32,

    /// Modifier and button state during the motion.
    pub modifiers: Modifiers,
}

impl MotionEvent {
    /// Create a motion event.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a motion event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
