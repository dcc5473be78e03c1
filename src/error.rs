use std::fmt::{Display, Formatter};

/// Returned when parsing a [StrategyKind](crate::StrategyKind) from a name
/// that does not belong to any strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy {
    pub name: String,
}

impl UnknownStrategy {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl Display for UnknownStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown backoff strategy {:?}, expected one of: \
             fixed, exponential, full_jitter, equal_jitter, decorrelated_jitter",
            self.name
        )
    }
}

impl std::error::Error for UnknownStrategy {}
