use crate::backoff::{Backoff, Input, DEFAULT_MIN_BACKOFF};
use std::time::Duration;

/// Returns the same delay on every call, whatever the argument.
///
/// Useful for simple polling or as a no-growth baseline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fixed {
    delay: Duration,
}

impl Fixed {
    /// A zero `delay` falls back to [DEFAULT_MIN_BACKOFF].
    pub fn new(delay: Duration) -> Self {
        let delay = if delay.is_zero() {
            warn!("fixed backoff delay is zero, using default {:?}", DEFAULT_MIN_BACKOFF);
            DEFAULT_MIN_BACKOFF
        } else {
            delay
        };
        Self { delay }
    }

    pub fn base_delay(&self) -> Duration {
        self.delay
    }
}

impl Default for Fixed {
    fn default() -> Self {
        Self { delay: DEFAULT_MIN_BACKOFF }
    }
}

impl Backoff for Fixed {
    fn next(&self, _arg: i64) -> Duration {
        self.delay
    }

    fn input(&self) -> Input {
        Input::Ignored
    }

    fn max_delay(&self) -> Duration {
        self.delay
    }
}
