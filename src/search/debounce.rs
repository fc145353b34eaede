use std::time::{Duration, Instant};

/// Collapses a burst of query edits into one settled value per quiescence
/// window.
///
/// Poll-driven: the UI tick loop calls [`QueryDebouncer::poll`] instead of a
/// timer thread firing. Every edit restarts the window, so only the last
/// value of a burst ever settles; dropping the debouncer mid-wait simply
/// drops the pending value with it.
#[derive(Debug)]
pub struct QueryDebouncer {
    window: Duration,
    pending: Option<String>,
    last_edit: Option<Instant>,
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_edit: None,
        }
    }

    /// Record an edit, restarting the quiescence window.
    pub fn note(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(value.into());
        self.last_edit = Some(now);
    }

    /// Return the pending value once it has been quiet for a full window.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last_edit = self.last_edit?;
        if now.duration_since(last_edit) < self.window {
            return None;
        }
        self.last_edit = None;
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
