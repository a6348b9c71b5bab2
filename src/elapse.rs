//! Scoped elapsed-time reporting for callers and tests.

use std::time::Instant;

/// Measures wall-clock time from construction to drop and logs the result,
/// whichever way the scope exits.
///
/// ```rust
/// {
///     let _elapse = segint::Elapse::new("encode");
///     // timed work
/// } // "elapse end: encode, ..." logged here
/// ```
pub struct Elapse {
    name: String,
    started: Instant,
}

impl Elapse {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            log::debug!("elapse begin");
        } else {
            log::debug!("elapse begin: {}", name);
        }

        Self {
            name,
            started: Instant::now(),
        }
    }

    /// Like [`Elapse::new`] but without the begin line.
    pub fn quiet(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: Instant::now(),
        }
    }

    /// Time elapsed so far, without ending the scope.
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Drop for Elapse {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        if self.name.is_empty() {
            log::debug!("elapse end: {:?}", elapsed);
        } else {
            log::debug!("elapse end: {}, {:?}", self.name, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let elapse = Elapse::quiet("test");
        let first = elapse.elapsed();
        let second = elapse.elapsed();
        assert!(second >= first);
    }

    #[test]
    fn test_drop_logs_without_panicking() {
        let elapse = Elapse::new("");
        drop(elapse);
    }
}
