pub mod decorrelated_jitter;
pub mod equal_jitter;
pub mod exponential;
pub mod fixed;
pub mod full_jitter;

pub use decorrelated_jitter::DecorrelatedJitter;
pub use equal_jitter::EqualJitter;
pub use exponential::Exponential;
pub use fixed::Fixed;
pub use full_jitter::FullJitter;

use std::sync::Arc;
use std::time::Duration;

/// Starting delay used when a strategy is built with a zero delay.
pub const DEFAULT_MIN_BACKOFF: Duration = Duration::from_secs(1);

/// Upper limit used when a strategy is built with a zero cap.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(20);

/// Growth factor used by [Exponential] when the requested one would not grow.
pub const DEFAULT_STEP: f64 = 2.0;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// How a strategy interprets the argument of [Backoff::next].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Input {
    /// The current retry attempt number (1, 2, 3...). Negative values count as 0
    /// for the jittered strategies.
    Attempt,
    /// The delay returned by the previous call, in nanoseconds
    /// (`Duration::as_nanos`). Pass 0 on the first call.
    PreviousDelay,
    /// The argument does not influence the result.
    Ignored,
}

/// Computes the delay before the next retry.
///
/// Implementations are immutable after construction and keep no per-call
/// state, so a single instance can be shared by any number of retry loops.
/// The caller owns the retry state and passes it in on every call.
pub trait Backoff: Send + Sync {
    /// Returns the delay to wait before retrying.
    ///
    /// The meaning of `arg` depends on the implementation, see [Backoff::input].
    /// The result is never larger than [Backoff::max_delay].
    fn next(&self, arg: i64) -> Duration;

    /// Which kind of value [Backoff::next] expects.
    fn input(&self) -> Input;

    /// Upper bound of every value returned by [Backoff::next].
    fn max_delay(&self) -> Duration;
}

impl<T: Backoff + ?Sized> Backoff for &T {
    fn next(&self, arg: i64) -> Duration {
        (**self).next(arg)
    }

    fn input(&self) -> Input {
        (**self).input()
    }

    fn max_delay(&self) -> Duration {
        (**self).max_delay()
    }
}

impl<T: Backoff + ?Sized> Backoff for Box<T> {
    fn next(&self, arg: i64) -> Duration {
        (**self).next(arg)
    }

    fn input(&self) -> Input {
        (**self).input()
    }

    fn max_delay(&self) -> Duration {
        (**self).max_delay()
    }
}

impl<T: Backoff + ?Sized> Backoff for Arc<T> {
    fn next(&self, arg: i64) -> Duration {
        (**self).next(arg)
    }

    fn input(&self) -> Input {
        (**self).input()
    }

    fn max_delay(&self) -> Duration {
        (**self).max_delay()
    }
}

/// Closed set of all strategies shipped with the crate.
///
/// Useful when the strategy is chosen at runtime, see
/// [BackoffConfig::build](crate::BackoffConfig::build).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Strategy {
    Fixed(Fixed),
    Exponential(Exponential),
    FullJitter(FullJitter),
    EqualJitter(EqualJitter),
    DecorrelatedJitter(DecorrelatedJitter),
}

impl Backoff for Strategy {
    fn next(&self, arg: i64) -> Duration {
        match self {
            Strategy::Fixed(s) => s.next(arg),
            Strategy::Exponential(s) => s.next(arg),
            Strategy::FullJitter(s) => s.next(arg),
            Strategy::EqualJitter(s) => s.next(arg),
            Strategy::DecorrelatedJitter(s) => s.next(arg),
        }
    }

    fn input(&self) -> Input {
        match self {
            Strategy::Fixed(s) => s.input(),
            Strategy::Exponential(s) => s.input(),
            Strategy::FullJitter(s) => s.input(),
            Strategy::EqualJitter(s) => s.input(),
            Strategy::DecorrelatedJitter(s) => s.input(),
        }
    }

    fn max_delay(&self) -> Duration {
        match self {
            Strategy::Fixed(s) => Backoff::max_delay(s),
            Strategy::Exponential(s) => Backoff::max_delay(s),
            Strategy::FullJitter(s) => Backoff::max_delay(s),
            Strategy::EqualJitter(s) => Backoff::max_delay(s),
            Strategy::DecorrelatedJitter(s) => Backoff::max_delay(s),
        }
    }
}

impl From<Fixed> for Strategy {
    fn from(s: Fixed) -> Self {
        Strategy::Fixed(s)
    }
}

impl From<Exponential> for Strategy {
    fn from(s: Exponential) -> Self {
        Strategy::Exponential(s)
    }
}

impl From<FullJitter> for Strategy {
    fn from(s: FullJitter) -> Self {
        Strategy::FullJitter(s)
    }
}

impl From<EqualJitter> for Strategy {
    fn from(s: EqualJitter) -> Self {
        Strategy::EqualJitter(s)
    }
}

impl From<DecorrelatedJitter> for Strategy {
    fn from(s: DecorrelatedJitter) -> Self {
        Strategy::DecorrelatedJitter(s)
    }
}

/// Repairs a requested `(delay, max)` pair instead of rejecting it.
///
/// Zero values fall back to the package defaults and a cap below the delay
/// is raised to the delay.
pub(crate) fn normalize(delay: Duration, max: Duration) -> (Duration, Duration) {
    let delay = if delay.is_zero() {
        warn!("backoff delay is zero, using default {:?}", DEFAULT_MIN_BACKOFF);
        DEFAULT_MIN_BACKOFF
    } else {
        delay
    };

    let max = if max.is_zero() {
        warn!("backoff max delay is zero, using default {:?}", DEFAULT_MAX_BACKOFF);
        DEFAULT_MAX_BACKOFF
    } else {
        max
    };

    if max < delay {
        warn!("backoff max delay {:?} is below delay {:?}, raising it", max, delay);
        (delay, delay)
    } else {
        (delay, max)
    }
}

/// A growth factor that would not grow (`<= 1.0`, NaN or infinite) falls back
/// to [DEFAULT_STEP].
pub(crate) fn normalize_step(step: f64) -> f64 {
    if step.is_finite() && step > 1.0 {
        step
    } else {
        warn!("backoff step {} does not grow, using default {}", step, DEFAULT_STEP);
        DEFAULT_STEP
    }
}

/// `min(max, base * 2^attempt)` in nanoseconds.
///
/// A shift or multiply that does not fit counts as exceeding `max`.
pub(crate) fn exponential_limit(base: Duration, max: Duration, attempt: i64) -> u128 {
    let max = max.as_nanos();
    let limit = u32::try_from(attempt.max(0))
        .ok()
        .and_then(|shift| 1_u128.checked_shl(shift))
        .and_then(|factor| base.as_nanos().checked_mul(factor));

    match limit {
        Some(limit) if limit <= max => limit,
        _ => max,
    }
}

/// Inverse of `Duration::as_nanos` for values that came from a `Duration`.
pub(crate) fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}
