//! Write port for client-side navigation, used by logout's optional redirect.

use std::sync::{Mutex, PoisonError};
use tracing::debug;

pub trait Navigator: Send + Sync {
    /// Sends the user to `target`. Called at most once per operation and only
    /// after the operation already succeeded.
    fn navigate(&self, target: &str);
}

/// Navigator for hosts with nowhere to go; the request is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, target: &str) {
        debug!("navigation to {} ignored: no navigator configured", target);
    }
}

/// Records navigation targets instead of acting on them, for hosts that
/// perform the navigation themselves once the call returns.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All targets recorded so far, oldest first.
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        debug!("navigation to {} recorded", target);
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        assert!(navigator.last().is_none());

        navigator.navigate("/first");
        navigator.navigate("/second");

        assert_eq!(navigator.targets(), vec!["/first", "/second"]);
        assert_eq!(navigator.last().as_deref(), Some("/second"));
    }

    #[test]
    fn noop_navigator_accepts_targets() {
        NoopNavigator.navigate("/ignored");
    }
}
