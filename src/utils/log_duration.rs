use std::time::{Duration, Instant};

use tracing::info;

/// LogDuration
/// Measures the lifetime of a scope and reports it as a `tracing` event when
/// dropped.
///
/// # Examples
/// ```
/// use search_server::utils::log_duration::LogDuration;
/// {
///     let _guard = LogDuration::new("build index");
///     // ... work ...
/// } // `operation="build index" elapsed_ms=..` is logged here
/// ```
#[derive(Debug)]
pub struct LogDuration {
    operation: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            operation = %self.operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "operation finished"
        );
    }
}

/// Times the rest of the enclosing scope.
///
/// ```
/// use search_server::log_duration;
/// fn work() {
///     log_duration!("work");
///     // ...
/// }
/// work();
/// ```
#[macro_export]
macro_rules! log_duration {
    ($operation:expr) => {
        let _log_duration_guard = $crate::utils::log_duration::LogDuration::new($operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_tracks_elapsed_time() {
        let guard = LogDuration::new("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(guard.elapsed() >= Duration::from_millis(5));
        assert_eq!(guard.operation(), "sleep");
    }

    #[test]
    fn macro_guards_the_scope() {
        log_duration!(String::from("scoped"));
        let value = 1 + 1;
        assert_eq!(value, 2);
    }
}
