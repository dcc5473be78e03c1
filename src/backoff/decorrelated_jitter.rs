use crate::backoff::{from_nanos, normalize, Backoff, Input};
use rand::Rng;
use std::time::Duration;

/// Jitter driven by the previous delay rather than the attempt number:
/// `random_between(base_delay, min(max_delay, previous * 3))`.
///
/// The strategy itself holds no state. The caller threads the returned delay
/// back into the next call (as nanoseconds, starting from `0`), which makes
/// successive delays a bounded random walk.
///
/// ```
/// use backoff_strategy::{Backoff, DecorrelatedJitter};
/// use std::time::Duration;
///
/// let jitter = DecorrelatedJitter::new(Duration::from_secs(1), Duration::from_secs(20));
/// let first = jitter.next(0);
/// assert_eq!(first, Duration::from_secs(1));
/// let second = jitter.next(first.as_nanos() as i64);
/// assert!(second >= Duration::from_secs(1) && second <= Duration::from_secs(3));
/// ```
///
/// Reference: <https://aws.amazon.com/blogs/architecture/exponential-backoff-and-jitter/>
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecorrelatedJitter {
    base_delay: Duration,
    max_delay: Duration,
}

impl DecorrelatedJitter {
    pub fn new(delay: Duration, max: Duration) -> Self {
        let (base_delay, max_delay) = normalize(delay, max);
        Self { base_delay, max_delay }
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }
}

impl Backoff for DecorrelatedJitter {
    /// `previous_delay` is the last returned delay in nanoseconds, `0` at first.
    fn next(&self, previous_delay: i64) -> Duration {
        let base = self.base_delay.as_nanos();
        let high = (previous_delay.max(0) as u128 * 3).clamp(base, self.max_delay.as_nanos());
        if high <= base {
            return self.base_delay;
        }

        from_nanos(rand::rng().random_range(base..=high))
    }

    fn input(&self) -> Input {
        Input::PreviousDelay
    }

    fn max_delay(&self) -> Duration {
        self.max_delay
    }
}
