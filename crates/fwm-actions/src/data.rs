//! Per-invocation trigger data.
//!
//! The dispatcher builds one [`ActionData`] from a [`Gesture`] for every
//! run of an action list and lends it to each action in turn. It is never
//! stored across calls.

use fwm_core::event::{Modifiers, MouseButton};
use fwm_core::geometry::Point;
use fwm_core::host::WindowManager;
use fwm_core::trigger::{ClientId, FrameContext, UserAction};

/// What the event loop knows about the input that fired a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gesture {
    pub uact: UserAction,
    pub state: Modifiers,
    /// Pointer position; `None` means "ask the host".
    pub pointer: Option<Point>,
    pub button: Option<MouseButton>,
    pub context: FrameContext,
    pub client: Option<ClientId>,
}

impl Gesture {
    /// A gesture of the given kind with no further detail.
    #[must_use]
    pub const fn new(uact: UserAction) -> Self {
        Self {
            uact,
            state: Modifiers::NONE,
            pointer: None,
            button: None,
            context: FrameContext::None,
            client: None,
        }
    }

    #[must_use]
    pub const fn with_state(mut self, state: Modifiers) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.pointer = Some(Point::new(x, y));
        self
    }

    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    #[must_use]
    pub const fn in_context(mut self, context: FrameContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub const fn on_client(mut self, client: ClientId) -> Self {
        self.client = Some(client);
        self
    }
}

/// The triggering context every action callback codes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionData {
    pub uact: UserAction,
    /// Modifier state at the time of the gesture.
    pub state: Modifiers,
    pub x: i32,
    pub y: i32,
    pub button: Option<MouseButton>,
    /// Target window, owned by the window manager.
    pub client: Option<ClientId>,
    pub context: FrameContext,
}

impl ActionData {
    /// Resolve a gesture into action data.
    ///
    /// Menu selections carry no modifier state, so an interactive action
    /// started from a menu never waits for a modifier release. A gesture
    /// without a position takes the host's current pointer position.
    pub fn from_gesture(gesture: &Gesture, wm: &dyn WindowManager) -> Self {
        let state = if gesture.uact == UserAction::MenuSelection {
            Modifiers::NONE
        } else {
            gesture.state
        };
        let pointer = gesture.pointer.unwrap_or_else(|| wm.pointer_position());
        Self {
            uact: gesture.uact,
            state,
            x: pointer.x,
            y: pointer.y,
            button: gesture.button,
            client: gesture.client,
            context: gesture.context,
        }
    }

    #[must_use]
    pub const fn pointer(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bracket a client move or resize.
    ///
    /// Call with `start = true` before moving the client and `start = false`
    /// once done. While moving, windows sliding under the pointer must not
    /// steal focus. When a mouse press moved a window out from under the
    /// pointer, the window now under it is focused explicitly because no
    /// enter event will arrive for it.
    pub fn client_move(&self, wm: &mut dyn WindowManager, start: bool) {
        if start {
            wm.ignore_enter_events(true);
            return;
        }
        wm.ignore_enter_events(false);
        if self.uact == UserAction::MousePress && self.context != FrameContext::Client {
            wm.focus_under_pointer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwm_core::host::testing::{HostCall, RecordingHost};

    #[test]
    fn explicit_pointer_wins() {
        let host = RecordingHost::at(500, 500);
        let gesture = Gesture::new(UserAction::MousePress)
            .at(10, 20)
            .with_button(MouseButton::Left)
            .in_context(FrameContext::Titlebar)
            .on_client(ClientId(7));
        let data = ActionData::from_gesture(&gesture, &host);
        assert_eq!(data.pointer(), Point::new(10, 20));
        assert_eq!(data.button, Some(MouseButton::Left));
        assert_eq!(data.client, Some(ClientId(7)));
        assert_eq!(data.context, FrameContext::Titlebar);
    }

    #[test]
    fn missing_pointer_falls_back_to_host() {
        let host = RecordingHost::at(33, 44);
        let data = ActionData::from_gesture(&Gesture::new(UserAction::KeyboardKey), &host);
        assert_eq!(data.pointer(), Point::new(33, 44));
    }

    #[test]
    fn menu_selection_clears_state() {
        let host = RecordingHost::default();
        let gesture = Gesture::new(UserAction::MenuSelection).with_state(Modifiers::ALT);
        assert_eq!(ActionData::from_gesture(&gesture, &host).state, Modifiers::NONE);

        let gesture = Gesture::new(UserAction::KeyboardKey).with_state(Modifiers::ALT);
        assert_eq!(ActionData::from_gesture(&gesture, &host).state, Modifiers::ALT);
    }

    #[test]
    fn client_move_brackets_enter_events() {
        let mut host = RecordingHost::default();
        let gesture = Gesture::new(UserAction::MousePress)
            .at(0, 0)
            .in_context(FrameContext::Frame);
        let data = ActionData::from_gesture(&gesture, &host);

        data.client_move(&mut host, true);
        data.client_move(&mut host, false);
        assert_eq!(
            host.calls,
            vec![
                HostCall::IgnoreEnterEvents(true),
                HostCall::IgnoreEnterEvents(false),
                HostCall::FocusUnderPointer,
            ]
        );
    }

    #[test]
    fn client_move_from_keyboard_does_not_refocus() {
        let mut host = RecordingHost::default();
        let data = ActionData::from_gesture(&Gesture::new(UserAction::KeyboardKey), &host);
        data.client_move(&mut host, true);
        data.client_move(&mut host, false);
        assert_eq!(host.count(HostCall::FocusUnderPointer), 0);
    }
}
