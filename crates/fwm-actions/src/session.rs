#![forbid(unsafe_code)]

//! Interactive session state machine.
//!
//! At most one interactive action runs system-wide. While it does, every
//! input event is offered to it before normal dispatch.
//!
//! # State Machine
//!
//! ```text
//!              pre() accepts
//! ┌──────┐ ───────────────────▶ ┌────────┐ ──┐
//! │ Idle │                      │ Active │   │ input() → Continue
//! └──────┘ ◀─────────────────── └────────┘ ◀─┘
//!     ▲      input() → Finish        │
//!     │      (post)                  │
//!     └──────────────────────────────┘
//!        cancel requested, modifiers
//!        released, or shutdown (cancel)
//! ```
//!
//! # Invariants
//!
//! 1. Exactly one of `post` or `cancel` runs for every session, exactly once.
//! 2. The slot is vacated before `post`/`cancel` runs; those callbacks see an
//!    Idle manager.
//! 3. An active session holds one handle to its instance; the handle is
//!    dropped on return to Idle.

use fwm_core::event::{ButtonEventKind, Event, Modifiers};
use fwm_core::host::WindowManager;

use crate::instance::ActionInstance;
use crate::kind::InputStep;

/// Why a session ended without completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// Requested by the event loop (focus loss, window destroyed, abort).
    Requested,
    /// The modifiers and buttons held when the session began were all
    /// released.
    ModifiersReleased,
    /// The action system is shutting down.
    Shutdown,
}

#[derive(Debug)]
struct ActiveSession {
    act: ActionInstance,
    initial_state: Modifiers,
}

/// The single interactive session slot.
#[derive(Debug, Default)]
pub struct InteractiveSession {
    active: Option<ActiveSession>,
}

impl InteractiveSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The instance driving the current session.
    #[must_use]
    pub fn current(&self) -> Option<&ActionInstance> {
        self.active.as_ref().map(|s| &s.act)
    }

    /// Modifier state captured when the current session began.
    #[must_use]
    pub fn initial_state(&self) -> Option<Modifiers> {
        self.active.as_ref().map(|s| s.initial_state)
    }

    /// Enter Active with `act`. Only called from Idle, after `pre` accepted.
    pub(crate) fn begin(&mut self, act: &ActionInstance, initial_state: Modifiers) {
        debug_assert!(self.active.is_none(), "interactive session already active");
        debug_assert!(act.is_interactive());
        tracing::debug!(
            target: "fwm.session",
            kind = %act.name(),
            initial_state = ?initial_state,
            "interactive session started"
        );
        self.active = Some(ActiveSession {
            act: act.clone(),
            initial_state,
        });
    }

    /// Offer an input event to the active session.
    ///
    /// Returns whether the session consumed the event. With no session the
    /// event is never consumed.
    pub fn input(&mut self, event: &Event, wm: &mut dyn WindowManager) -> bool {
        let Some(session) = self.active.as_ref() else {
            return false;
        };
        let act = session.act.clone();
        let initial_state = session.initial_state;
        let Some(hooks) = act.interactive() else {
            self.active = None;
            return false;
        };

        match hooks.input(initial_state, event, wm) {
            InputStep::Finish => {
                self.active = None;
                tracing::debug!(
                    target: "fwm.session",
                    kind = %act.name(),
                    "interactive session finished"
                );
                hooks.post(wm);
                true
            }
            InputStep::Continue { used } => {
                if released_initial_modifiers(initial_state, event) {
                    self.cancel_with(CancelReason::ModifiersReleased, wm);
                }
                used
            }
        }
    }

    /// Abort the active session, if any. Returns whether one was running.
    pub fn cancel(&mut self, wm: &mut dyn WindowManager) -> bool {
        self.cancel_with(CancelReason::Requested, wm)
    }

    pub(crate) fn cancel_with(&mut self, reason: CancelReason, wm: &mut dyn WindowManager) -> bool {
        let Some(session) = self.active.take() else {
            return false;
        };
        tracing::debug!(
            target: "fwm.session",
            kind = %session.act.name(),
            reason = ?reason,
            "interactive session cancelled"
        );
        if let Some(hooks) = session.act.interactive() {
            hooks.cancel(wm);
        }
        true
    }
}

/// Whether `event` releases the last of the keyboard modifiers and pointer
/// buttons the session started with.
fn released_initial_modifiers(initial_state: Modifiers, event: &Event) -> bool {
    let held = initial_state.keyboard() | initial_state.buttons();
    if held.is_empty() {
        return false;
    }
    let after = match event {
        Event::Key(key) if event.is_key_release() => key.modifiers_after(),
        Event::Button(button) if button.kind == ButtonEventKind::Release => {
            button.modifiers - button.button.mask()
        }
        _ => return false,
    };
    !after.intersects(held)
}
