//! Muscle-selection debouncing
//!
//! The body-map gesture source can emit rapid duplicate selection events.
//! The guard here enforces the event contract: no two accepted selections
//! within the debounce window. Time is passed in explicitly so the spacing
//! invariant is testable without sleeping.

use std::time::{Duration, Instant};

/// Repeat-suppression window for muscle-selection events
pub const SELECTION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Stateful guard over a stream of selection triggers
#[derive(Debug, Clone)]
pub struct SelectionDebouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl SelectionDebouncer {
    pub fn new() -> Self {
        Self::with_window(SELECTION_DEBOUNCE)
    }

    pub fn with_window(window: Duration) -> Self {
        SelectionDebouncer {
            window,
            last_accepted: None,
        }
    }

    /// Accept or reject a trigger at the given instant
    ///
    /// A trigger is rejected when it falls inside the window measured from
    /// the last *accepted* trigger; rejected triggers do not extend the
    /// window. Out-of-order instants are rejected.
    pub fn accept(&mut self, at: Instant) -> bool {
        let ok = match self.last_accepted {
            None => true,
            Some(last) => match at.checked_duration_since(last) {
                Some(elapsed) => elapsed >= self.window,
                None => false,
            },
        };
        if ok {
            self.last_accepted = Some(at);
        }
        ok
    }

    /// Forget the last accepted trigger
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for SelectionDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
