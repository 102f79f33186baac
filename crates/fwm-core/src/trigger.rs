#![forbid(unsafe_code)]

//! Vocabulary describing what triggered an action list.

/// How the user caused an action list to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UserAction {
    /// Not caused by the user (programmatic invocation).
    #[default]
    None,
    /// Run once while the window manager starts up.
    Startup,
    /// A key binding fired.
    KeyboardKey,
    /// A mouse button went down.
    MousePress,
    /// A mouse button came up.
    MouseRelease,
    /// Press and release without motion.
    MouseClick,
    /// Two clicks within the double-click window.
    MouseDoubleClick,
    /// Pointer moved with a button held.
    MouseMotion,
    /// An entry in a window-manager menu was chosen.
    MenuSelection,
}

impl UserAction {
    /// Whether the trigger came directly from user input.
    #[must_use]
    pub const fn is_user_initiated(self) -> bool {
        !matches!(self, Self::None | Self::Startup)
    }
}

/// Region of a managed window (or the desktop) a gesture happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameContext {
    /// No particular region.
    #[default]
    None,
    /// The desktop background.
    Desktop,
    /// The root window.
    Root,
    /// The client's own content area.
    Client,
    /// Anywhere on the titlebar.
    Titlebar,
    /// Anywhere on the decoration frame.
    Frame,
    /// Top border.
    Top,
    /// Bottom border.
    Bottom,
    /// Left border.
    Left,
    /// Right border.
    Right,
    /// Top-left corner grip.
    TopLeftCorner,
    /// Top-right corner grip.
    TopRightCorner,
    /// Bottom-left corner grip.
    BottomLeftCorner,
    /// Bottom-right corner grip.
    BottomRightCorner,
    /// Window icon button.
    Icon,
    /// Iconify button.
    Iconify,
    /// Maximize button.
    Maximize,
    /// Shade button.
    Shade,
    /// Show-on-all-desktops button.
    AllDesktops,
    /// Close button.
    Close,
    /// A window being moved or resized.
    MoveResize,
    /// The dock.
    Dock,
}

/// Non-owning handle to a managed client window.
///
/// The window itself is owned by the window manager; the handle is only
/// meaningful while the host still manages a client with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientId(pub u64);
