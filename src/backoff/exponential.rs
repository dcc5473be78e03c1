use crate::backoff::{from_nanos, normalize, normalize_step, Backoff, Input, DEFAULT_STEP};
use std::time::Duration;

/// Deterministic exponential backoff: `min(max_delay, base_delay * step^attempt)`.
///
/// No randomness is involved, so the same attempt always yields the same delay.
/// Attempt `0` yields exactly `base_delay`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Exponential {
    base_delay: Duration,
    max_delay: Duration,
    step: f64,
}

impl Exponential {
    /// Binary exponential backoff ([DEFAULT_STEP]).
    pub fn new(delay: Duration, max: Duration) -> Self {
        Self::with_step(delay, max, DEFAULT_STEP)
    }

    /// A `step` that would not grow (`<= 1.0`, NaN or infinite) falls back
    /// to [DEFAULT_STEP].
    pub fn with_step(delay: Duration, max: Duration, step: f64) -> Self {
        let (base_delay, max_delay) = normalize(delay, max);
        Self { base_delay, max_delay, step: normalize_step(step) }
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Backoff for Exponential {
    /// `attempt` is the retry attempt number.
    fn next(&self, attempt: i64) -> Duration {
        let max_nanos = self.max_delay.as_nanos();
        let exponent = attempt.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let nanos = self.base_delay.as_nanos() as f64 * self.step.powi(exponent);

        if !nanos.is_finite() || nanos < 0.0 || nanos >= max_nanos as f64 {
            return self.max_delay;
        }

        from_nanos((nanos as u128).min(max_nanos))
    }

    fn input(&self) -> Input {
        Input::Attempt
    }

    fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::{DEFAULT_MAX_BACKOFF, DEFAULT_MIN_BACKOFF};

    #[test]
    fn check_exponent() {
        let strategy = Exponential::new(Duration::from_secs(1), Duration::from_secs(10));
        assert_eq!(strategy.next(0), Duration::from_secs(1));
        assert_eq!(strategy.next(1), Duration::from_secs(2));
        assert_eq!(strategy.next(2), Duration::from_secs(4));
        assert_eq!(strategy.next(3), Duration::from_secs(8));
        assert_eq!(strategy.next(4), Duration::from_secs(10));
        assert_eq!(strategy.next(10), Duration::from_secs(10));
    }

    #[test]
    fn custom_step() {
        let strategy =
            Exponential::with_step(Duration::from_millis(100), Duration::from_secs(60), 3.0);
        assert_eq!(strategy.next(0), Duration::from_millis(100));
        assert_eq!(strategy.next(1), Duration::from_millis(300));
        assert_eq!(strategy.next(2), Duration::from_millis(900));
    }

    #[test]
    fn non_growing_step_uses_default() {
        for step in [1.0, 0.5, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            let strategy =
                Exponential::with_step(Duration::from_secs(1), Duration::from_secs(20), step);
            assert_eq!(strategy.step(), DEFAULT_STEP);
        }
    }

    #[test]
    fn non_decreasing_until_clamped() {
        let strategy = Exponential::new(Duration::from_millis(10), Duration::from_secs(30));
        let mut previous = Duration::ZERO;
        for attempt in 0..200 {
            let delay = strategy.next(attempt);
            assert!(delay >= previous, "attempt {attempt}: {delay:?} < {previous:?}");
            previous = delay;
        }
        assert_eq!(previous, Duration::from_secs(30));
    }

    #[test]
    fn overflow_clamps_to_max() {
        let strategy = Exponential::new(Duration::from_secs(1), Duration::from_secs(20));
        assert_eq!(strategy.next(1_000), Duration::from_secs(20));
        assert_eq!(strategy.next(i64::MAX), Duration::from_secs(20));

        let huge = Exponential::new(Duration::from_secs(1), Duration::MAX);
        assert_eq!(huge.next(2_000), Duration::MAX);
    }

    #[test]
    fn negative_attempt_stays_in_range() {
        let strategy = Exponential::new(Duration::from_secs(1), Duration::from_secs(20));
        assert_eq!(strategy.next(-1), Duration::from_millis(500));
        assert_eq!(strategy.next(i64::MIN), Duration::ZERO);
    }

    #[test]
    fn construction_normalizes() {
        let strategy = Exponential::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(strategy.base_delay(), DEFAULT_MIN_BACKOFF);
        assert_eq!(strategy.max_delay(), DEFAULT_MAX_BACKOFF);

        let strategy = Exponential::new(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(strategy.max_delay(), Duration::from_secs(5));
        assert_eq!(strategy.next(3), Duration::from_secs(5));
    }
}
