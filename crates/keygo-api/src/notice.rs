// Transient user-facing notices.
//
// The HttpClient hands a best-effort human-readable message to a Notifier
// whenever a call fails and the caller did not suppress it. How the message
// is shown is up to the view layer.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

/// Receiver for transient error notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message);
    }
}

/// Sends notices to the tracing pipeline. Used when no view layer is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(notice = message, "notice");
    }
}

/// Keeps every notice in memory, in dispatch order.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_shares_messages_across_clones() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn closures_are_notifiers() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let notifier = move |msg: &str| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(msg.to_owned());
        };
        notifier.notify("hello");
        assert_eq!(
            seen.lock().unwrap_or_else(PoisonError::into_inner).as_deref(),
            Some("hello")
        );
    }
}
