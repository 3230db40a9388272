//! Diagnostic reporting for contract violations.
//!
//! Queries that detect misuse they cannot express in their return value hand
//! a message to a [`Reporter`] instead of panicking. The reporter never
//! influences control flow.
//!
//! # Example
//!
//! ```
//! use fastpatch::algo::Reporter;
//!
//! let reporter = Reporter::new(|message| eprintln!("patch error: {}", message));
//! reporter.report("Transition patch is not quad");
//! ```

/// A sink for diagnostic messages.
pub struct Reporter {
    callback: Box<dyn Fn(&str) + Send + Sync>,
}

impl Reporter {
    /// Create a new reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report a message.
    #[inline]
    pub fn report(&self, message: &str) {
        (self.callback)(message);
    }

    /// Create a reporter that forwards messages to the `log` facade at
    /// error level.
    pub fn log() -> Self {
        Self::new(|message| log::error!("{}", message))
    }

    /// Create a no-op reporter that discards all messages.
    pub fn none() -> Self {
        Self::new(|_| {})
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::log()
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callback_receives_message() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = Reporter::new(move |m| sink.lock().unwrap().push(m.to_string()));

        reporter.report("first");
        reporter.report("second");

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_none_and_log_do_not_panic() {
        Reporter::none().report("dropped");
        Reporter::default().report("logged");
    }
}
