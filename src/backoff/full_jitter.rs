use crate::backoff::{exponential_limit, from_nanos, normalize, Backoff, Input};
use rand::Rng;
use std::time::Duration;

/// Exponential backoff with a fully randomized delay:
/// `random_between(0, min(max_delay, base_delay * 2^attempt))`.
///
/// Spreads retries of many clients over the whole exponential window, at the
/// cost of occasionally very short delays.
///
/// If the computed limit is zero the strategy returns `base_delay`. Normalized
/// construction keeps `base_delay` positive, so this only guards the arithmetic.
///
/// Reference: <https://aws.amazon.com/blogs/architecture/exponential-backoff-and-jitter/>
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FullJitter {
    base_delay: Duration,
    max_delay: Duration,
}

impl FullJitter {
    pub fn new(delay: Duration, max: Duration) -> Self {
        let (base_delay, max_delay) = normalize(delay, max);
        Self { base_delay, max_delay }
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }
}

impl Backoff for FullJitter {
    /// `attempt` is the retry attempt number.
    fn next(&self, attempt: i64) -> Duration {
        let limit = exponential_limit(self.base_delay, self.max_delay, attempt);
        if limit == 0 {
            return self.base_delay;
        }

        from_nanos(rand::rng().random_range(0..=limit))
    }

    fn input(&self) -> Input {
        Input::Attempt
    }

    fn max_delay(&self) -> Duration {
        self.max_delay
    }
}
