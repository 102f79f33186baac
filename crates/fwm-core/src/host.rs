#![forbid(unsafe_code)]

//! Host collaborator interface.
//!
//! Actions never reach into window-manager globals. Everything they need to
//! query or change goes through a [`WindowManager`] implementation supplied
//! by the event loop on every call.

use crate::geometry::Point;

/// The window-manager state actions operate on.
///
/// Only the pointer query is mandatory; the remaining hooks default to
/// no-ops so lightweight hosts (tests, replay tools) stay small.
pub trait WindowManager {
    /// Current pointer position in root coordinates.
    fn pointer_position(&self) -> Point;

    /// Record that the user interacted with the window manager just now.
    fn update_user_time(&mut self) {}

    /// Suppress (`true`) or restore (`false`) focus changes driven by the
    /// pointer entering windows.
    fn ignore_enter_events(&mut self, ignore: bool) {
        let _ = ignore;
    }

    /// Give focus to whatever client is under the pointer, if focus follows
    /// the mouse.
    fn focus_under_pointer(&mut self) {}
}

/// Recording host for tests.
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing {
    use super::WindowManager;
    use crate::geometry::Point;

    /// A single call observed by [`RecordingHost`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HostCall {
        /// `update_user_time` was called.
        UpdateUserTime,
        /// `ignore_enter_events` was called with the given flag.
        IgnoreEnterEvents(bool),
        /// `focus_under_pointer` was called.
        FocusUnderPointer,
    }

    /// Host that reports a fixed pointer position and records every hook.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        /// Position returned by `pointer_position`.
        pub pointer: Point,
        /// Calls in the order they happened.
        pub calls: Vec<HostCall>,
    }

    impl RecordingHost {
        /// Host with the pointer at the given position.
        #[must_use]
        pub fn at(x: i32, y: i32) -> Self {
            Self {
                pointer: Point::new(x, y),
                calls: Vec::new(),
            }
        }

        /// Number of times a call was recorded.
        #[must_use]
        pub fn count(&self, call: HostCall) -> usize {
            self.calls.iter().filter(|c| **c == call).count()
        }
    }

    impl WindowManager for RecordingHost {
        fn pointer_position(&self) -> Point {
            self.pointer
        }

        fn update_user_time(&mut self) {
            self.calls.push(HostCall::UpdateUserTime);
        }

        fn ignore_enter_events(&mut self, ignore: bool) {
            self.calls.push(HostCall::IgnoreEnterEvents(ignore));
        }

        fn focus_under_pointer(&mut self) {
            self.calls.push(HostCall::FocusUnderPointer);
        }
    }
}
