use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// Totally ordered `f64` wrapper shared by key parts and document values.
///
/// IMPORTANT:
/// Ordering uses `f64::total_cmp`, so every bit pattern (including NaN) has
/// one fixed position. This order is part of deterministic scan behavior and
/// must remain fixed.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Float64(f64);

impl Float64 {
    /// Smallest finite value.
    pub const MIN: Self = Self(f64::MIN);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Least value strictly greater than `self` under total order, if any.
    ///
    /// `None` for values with no greater neighbor in the number line
    /// (positive infinity and positive NaN bit patterns).
    #[must_use]
    pub fn next_up(self) -> Option<Self> {
        let next = self.0.next_up();
        if next.total_cmp(&self.0) == Ordering::Greater {
            Some(Self(next))
        } else {
            None
        }
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i32> for Float64 {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

///
/// TESTS
///
