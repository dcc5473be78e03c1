use crate::backoff::{
    normalize, normalize_step, DecorrelatedJitter, EqualJitter, Exponential, Fixed, FullJitter,
    Strategy, DEFAULT_MAX_BACKOFF, DEFAULT_MIN_BACKOFF, DEFAULT_STEP,
};
use crate::error::UnknownStrategy;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Names every strategy shipped with the crate.
///
/// Parses from and prints as `fixed`, `exponential`, `full_jitter`,
/// `equal_jitter` and `decorrelated_jitter`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Fixed,
    Exponential,
    FullJitter,
    EqualJitter,
    DecorrelatedJitter,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Fixed,
        StrategyKind::Exponential,
        StrategyKind::FullJitter,
        StrategyKind::EqualJitter,
        StrategyKind::DecorrelatedJitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Fixed => "fixed",
            StrategyKind::Exponential => "exponential",
            StrategyKind::FullJitter => "full_jitter",
            StrategyKind::EqualJitter => "equal_jitter",
            StrategyKind::DecorrelatedJitter => "decorrelated_jitter",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownStrategy::new(s))
    }
}

/// Parameters shared by all strategies.
///
/// Values are taken as requested and repaired only when a strategy is built
/// (or [BackoffConfig::normalized] is called), so a configuration never fails.
///
/// ```
/// use backoff_strategy::{Backoff, BackoffConfig, StrategyKind};
/// use std::time::Duration;
///
/// let strategy = BackoffConfig::new()
///     .base_delay(Duration::from_millis(100))
///     .max_delay(Duration::from_secs(10))
///     .build("full_jitter".parse::<StrategyKind>().unwrap());
/// assert!(strategy.next(3) <= Duration::from_millis(800));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BackoffConfig {
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Growth factor, only used by [Exponential].
    pub step: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self { base_delay: DEFAULT_MIN_BACKOFF, max_delay: DEFAULT_MAX_BACKOFF, step: DEFAULT_STEP }
    }
}

impl BackoffConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// The configuration every strategy built from `self` actually uses.
    pub fn normalized(self) -> Self {
        let (base_delay, max_delay) = normalize(self.base_delay, self.max_delay);
        Self { base_delay, max_delay, step: normalize_step(self.step) }
    }

    pub fn fixed(&self) -> Fixed {
        Fixed::new(self.base_delay)
    }

    pub fn exponential(&self) -> Exponential {
        Exponential::with_step(self.base_delay, self.max_delay, self.step)
    }

    pub fn full_jitter(&self) -> FullJitter {
        FullJitter::new(self.base_delay, self.max_delay)
    }

    pub fn equal_jitter(&self) -> EqualJitter {
        EqualJitter::new(self.base_delay, self.max_delay)
    }

    pub fn decorrelated_jitter(&self) -> DecorrelatedJitter {
        DecorrelatedJitter::new(self.base_delay, self.max_delay)
    }

    pub fn build(&self, kind: StrategyKind) -> Strategy {
        match kind {
            StrategyKind::Fixed => self.fixed().into(),
            StrategyKind::Exponential => self.exponential().into(),
            StrategyKind::FullJitter => self.full_jitter().into(),
            StrategyKind::EqualJitter => self.equal_jitter().into(),
            StrategyKind::DecorrelatedJitter => self.decorrelated_jitter().into(),
        }
    }
}
