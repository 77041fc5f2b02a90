//! Deduplicated warnings.
//!
//! The same problem tends to repeat across a stylesheet (one unknown
//! property used in fifty rules). Each unique `(component, message)` pair
//! is emitted once through `tracing::warn!`; later repeats are dropped.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Emit a warning once per unique message.
///
/// # Example
/// ```
/// quill_common::warn_once("CSS", "unknown property 'colr'");
/// assert!(quill_common::has_warned("CSS", "unknown property 'colr'"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_emit {
        tracing::warn!(%component, "{message}");
    }
}

/// Returns `true` if `warn_once` has already emitted this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Forget all recorded warnings (call when starting on a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
