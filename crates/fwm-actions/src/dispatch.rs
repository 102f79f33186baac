#![forbid(unsafe_code)]

//! Action list execution.
//!
//! The event loop calls [`Dispatcher::run_acts`] when a binding fires and
//! [`Dispatcher::interactive_input_event`] for every input event while an
//! interactive session is running.
//!
//! # Ordering
//!
//! Actions run strictly in list order and each sees the effects of the ones
//! before it. An interactive action whose `pre` accepts runs first and then
//! becomes the session, so later actions in the same list observe an active
//! session and cannot start another one.

use fwm_core::event::Event;
use fwm_core::host::WindowManager;

use crate::data::{ActionData, Gesture};
use crate::instance::ActionInstance;
use crate::kind::Flow;
use crate::list::ActionList;
use crate::session::{CancelReason, InteractiveSession};

/// Runs action lists and routes input to the interactive session.
#[derive(Debug, Default)]
pub struct Dispatcher {
    session: InteractiveSession,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every action in `acts` for one gesture.
    ///
    /// Returns `true` if this call started an interactive session; the caller
    /// should then forward input events to
    /// [`interactive_input_event`](Self::interactive_input_event).
    pub fn run_acts(
        &mut self,
        acts: &ActionList,
        gesture: Gesture,
        wm: &mut dyn WindowManager,
    ) -> bool {
        if acts.is_empty() {
            return false;
        }

        let data = ActionData::from_gesture(&gesture, wm);
        let span = tracing::debug_span!(
            "actions.run_acts",
            uact = ?data.uact,
            acts = acts.len(),
            started = tracing::field::Empty,
        );
        let _guard = span.enter();

        let mut started = false;
        let mut ran_plain = false;
        for act in acts {
            let Some(accepted) = self.consult_pre(act, &data, wm) else {
                continue;
            };

            let flow = act.run(&data, wm);
            if accepted {
                self.session.begin(act, data.state);
                started = true;
            } else {
                ran_plain = true;
            }

            if flow == Flow::Stop {
                tracing::debug!(
                    target: "fwm.actions",
                    kind = %act.name(),
                    "action stopped propagation"
                );
                break;
            }
        }

        if ran_plain && data.uact.is_user_initiated() {
            wm.update_user_time();
        }
        span.record("started", started);
        started
    }

    /// Decide how an entry takes part in this run.
    ///
    /// `None` skips the entry. `Some(true)` means it will become the session
    /// after its `run`; `Some(false)` runs it as a plain action.
    fn consult_pre(
        &self,
        act: &ActionInstance,
        data: &ActionData,
        wm: &mut dyn WindowManager,
    ) -> Option<bool> {
        let Some(hooks) = act.interactive() else {
            return Some(false);
        };
        if let Some(current) = self.session.current() {
            tracing::debug!(
                target: "fwm.session",
                kind = %act.name(),
                running = %current.name(),
                "interactive session already running, skipping action"
            );
            return None;
        }
        let accepted = hooks.pre(data.state, wm);
        if !accepted {
            tracing::debug!(
                target: "fwm.session",
                kind = %act.name(),
                "interactive action declined to start a session"
            );
        }
        Some(accepted)
    }

    /// Whether an interactive session is running.
    #[must_use]
    pub const fn is_interactive_act_running(&self) -> bool {
        self.session.is_active()
    }

    /// The instance driving the running session.
    #[must_use]
    pub fn interactive_act(&self) -> Option<&ActionInstance> {
        self.session.current()
    }

    /// Abort the running session. No-op when idle.
    pub fn interactive_cancel_act(&mut self, wm: &mut dyn WindowManager) {
        self.session.cancel(wm);
    }

    /// Offer an input event to the running session.
    ///
    /// Returns whether the event was consumed; unconsumed events continue
    /// through normal binding dispatch.
    pub fn interactive_input_event(&mut self, event: &Event, wm: &mut dyn WindowManager) -> bool {
        self.session.input(event, wm)
    }

    #[must_use]
    pub fn session(&self) -> &InteractiveSession {
        &self.session
    }

    /// Cancel any running session ahead of teardown.
    pub(crate) fn shutdown(&mut self, wm: &mut dyn WindowManager) -> bool {
        self.session.cancel_with(CancelReason::Shutdown, wm)
    }
}
