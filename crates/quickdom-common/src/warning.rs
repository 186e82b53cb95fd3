//! Pipeline warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the fetcher, cache, and pipeline to report recoverable failures
//! (a failed media fetch, a discarded partial cache write) without aborting
//! the page load.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Warnings already printed in this process, keyed by component + message.
fn warned() -> &'static Mutex<HashSet<String>> {
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Warn about a recoverable failure (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("net", "media fetch failed for 'https://example.com/a.jpg'");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = warned().lock().unwrap().insert(key);

    if should_print {
        eprintln!(
            "{} {}",
            format!("[QuickDOM {component}]").yellow().bold(),
            message.yellow()
        );
    }
}

/// Clear all recorded warnings (call when loading a new page).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    warned().lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::{clear_warnings, warn_once};

    #[test]
    fn repeated_warnings_do_not_panic() {
        warn_once("test", "same message");
        warn_once("test", "same message");
        clear_warnings();
        warn_once("test", "same message");
    }
}
