use crate::backoff::{exponential_limit, from_nanos, normalize, Backoff, Input};
use rand::Rng;
use std::time::Duration;

/// Exponential backoff where only the upper half of the window is randomized:
///
/// ```text
/// temp  = min(max_delay, base_delay * 2^attempt)
/// sleep = temp / 2 + random_between(0, temp / 2)
/// ```
///
/// Every delay is at least half of the current exponential limit, which keeps
/// a predictable lower bound while still desynchronizing clients.
///
/// Reference: <https://aws.amazon.com/blogs/architecture/exponential-backoff-and-jitter/>
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EqualJitter {
    base_delay: Duration,
    max_delay: Duration,
}

impl EqualJitter {
    pub fn new(delay: Duration, max: Duration) -> Self {
        let (base_delay, max_delay) = normalize(delay, max);
        Self { base_delay, max_delay }
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }
}

impl Backoff for EqualJitter {
    /// `attempt` is the retry attempt number.
    fn next(&self, attempt: i64) -> Duration {
        let half = exponential_limit(self.base_delay, self.max_delay, attempt) / 2;
        if half == 0 {
            return Duration::ZERO;
        }

        from_nanos(half + rand::rng().random_range(0..=half))
    }

    fn input(&self) -> Input {
        Input::Attempt
    }

    fn max_delay(&self) -> Duration {
        self.max_delay
    }
}
