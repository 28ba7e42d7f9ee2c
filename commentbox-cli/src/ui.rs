//! Terminal feedback helpers
//!
//! The spinner plays the part of the widget's loader while a request is in
//! flight. It is suppressed when:
//! - `--quiet` is passed
//! - `COMMENTBOX_QUIET=1` is set
//! - stderr is not a TTY (piped output)

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from flags and environment
///
/// Call once at startup with the `--quiet` flag value. Also checks
/// `COMMENTBOX_QUIET` and whether stderr is a TTY. Later calls are ignored.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("COMMENTBOX_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

/// Check if we're in quiet mode (false before `init_quiet_mode` runs)
pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner on stderr that respects quiet mode
///
/// Returns `None` in quiet mode so nothing is drawn and the caller can pass
/// the result straight to [`finish`].
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Clear the spinner without leaving a line behind
///
/// A `None` from quiet mode is a no-op.
pub fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

/// Run a future with a spinner shown for its whole duration
///
/// The spinner is cleared whatever the future returns, so errors print on a
/// clean line. In quiet mode the future just runs.
pub async fn with_spinner<T>(msg: impl Into<String>, f: impl std::future::Future<Output = T>) -> T {
    let pb = spinner(msg);
    let result = f.await;
    finish(pb);
    result
}
