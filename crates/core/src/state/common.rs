use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable external identity (e.g. a messaging-platform user id) used as the
/// primary key for player records.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no usable identity was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Last `n` characters of the id, used for generated fallback names.
    pub fn tail(&self, n: usize) -> String {
        let skip = self.0.chars().count().saturating_sub(n);
        self.0.chars().skip(skip).collect()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of an unlockable cosmetic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CosmeticId(String);

impl CosmeticId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CosmeticId {
    /// The cosmetic every player starts with.
    fn default() -> Self {
        Self(super::DEFAULT_COSMETIC_ID.to_owned())
    }
}

impl fmt::Display for CosmeticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock instant in unix seconds, supplied by the caller.
///
/// The core never reads a clock; keeping instants as plain seconds keeps all
/// reconciliation logic deterministic and directly testable.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    pub fn unix_seconds(self) -> i64 {
        self.0
    }

    /// Seconds elapsed from this instant to `later`, clamped at zero.
    pub fn seconds_until(self, later: Timestamp) -> i64 {
        (later.0 - self.0).max(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
