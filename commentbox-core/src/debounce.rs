//! Leading-edge debounce for high-frequency events (scroll)

use std::time::Duration;

use tokio::time::Instant;

/// Default quiet window for scroll events
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(20);

/// Fires on the first event of a burst and swallows the rest.
///
/// Every event, fired or not, pushes the end of the window out again, so a
/// continuous stream of events closer together than `window` fires once.
/// There is no trailing call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    quiet_at: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            quiet_at: None,
        }
    }

    /// Record an event at `now`; true when the handler should run.
    pub fn hit(&mut self, now: Instant) -> bool {
        let fire = self.quiet_at.map_or(true, |quiet_at| now >= quiet_at);
        self.quiet_at = Some(now + self.window);
        fire
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
