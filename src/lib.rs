//! Delay strategies for retry loops.
//!
//! A strategy answers one question: how long should the caller wait before
//! the next attempt? It never sleeps, never runs the operation and never
//! decides when to give up. The caller owns the loop and feeds each strategy
//! the input it expects (see [Input]).
//!
//! ```
//! use backoff_strategy::{Backoff, DecorrelatedJitter, Exponential};
//! use std::time::Duration;
//!
//! let exponential = Exponential::new(Duration::from_secs(1), Duration::from_secs(10));
//! assert_eq!(exponential.next(3), Duration::from_secs(8));
//! assert_eq!(exponential.next(10), Duration::from_secs(10));
//!
//! let decorrelated = DecorrelatedJitter::new(Duration::from_secs(1), Duration::from_secs(20));
//! let mut previous = Duration::ZERO;
//! for _ in 0..10 {
//!     previous = decorrelated.next(previous.as_nanos() as i64);
//!     assert!(previous >= Duration::from_secs(1) && previous <= Duration::from_secs(20));
//! }
//! ```

#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)+) => {
        log::warn!($($arg)+)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)+) => {};
}

mod backoff;
mod config;
pub mod error;

pub use backoff::{
    Backoff, DecorrelatedJitter, EqualJitter, Exponential, Fixed, FullJitter, Input, Strategy,
    DEFAULT_MAX_BACKOFF, DEFAULT_MIN_BACKOFF, DEFAULT_STEP,
};
pub use config::{BackoffConfig, StrategyKind};
pub use error::UnknownStrategy;

#[cfg(test)]
mod tests {
    pub use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    struct HalfSecond;

    impl Backoff for HalfSecond {
        fn next(&self, _arg: i64) -> Duration {
            Duration::from_millis(500)
        }

        fn input(&self) -> Input {
            Input::Ignored
        }

        fn max_delay(&self) -> Duration {
            Duration::from_millis(500)
        }
    }

    #[test]
    fn test_custom_strategy_behind_pointers() {
        let boxed: Box<dyn Backoff> = Box::new(HalfSecond);
        assert_eq!(boxed.next(7), Duration::from_millis(500));

        let shared: Arc<dyn Backoff> = Arc::new(HalfSecond);
        let borrowed = &shared;
        assert_eq!(borrowed.next(0), Duration::from_millis(500));
        assert_eq!(borrowed.input(), Input::Ignored);
    }

    #[test]
    fn test_heterogeneous_collection() {
        let base = Duration::from_millis(100);
        let max = Duration::from_secs(5);
        let strategies: Vec<Box<dyn Backoff>> = vec![
            Box::new(Fixed::new(base)),
            Box::new(Exponential::new(base, max)),
            Box::new(FullJitter::new(base, max)),
            Box::new(EqualJitter::new(base, max)),
            Box::new(DecorrelatedJitter::new(base, max)),
        ];

        for strategy in &strategies {
            for arg in [0, 1, 5, 64, i64::MAX] {
                assert!(strategy.next(arg) <= strategy.max_delay());
            }
        }
    }
}
