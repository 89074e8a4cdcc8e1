use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// A closed numeric interval `[low, high]` bounding a variable's universe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    low: f64,
    high: f64,
}

impl Domain {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if low > high {
            return Err(FuzzyError::InvertedDomain { low, high });
        }

        Ok(Domain { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn size(&self) -> f64 {
        self.high - self.low
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.low, self.high)
    }

    /// `n` evenly spaced samples across the domain, endpoints included.
    pub fn sample(&self, n: usize) -> impl Iterator<Item = f64> {
        Linspace::new(self.low, self.high, n)
    }

    /// Smallest domain covering both operands.
    pub fn union(&self, other: &Domain) -> Domain {
        Domain {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }
}

/// An ordered pair `[lower, upper]`.
///
/// Used for membership intervals, firing strengths, and the type-reduced
/// output bounds `[yL, yR]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Interval { lower, upper }
    }

    pub fn avg(&self) -> f64 {
        (self.lower + self.upper) / 2.
    }

    /// Componentwise minimum (the AND t-norm for interval firing strengths).
    pub fn min(&self, other: &Interval) -> Interval {
        Interval {
            lower: self.lower.min(other.lower),
            upper: self.upper.min(other.upper),
        }
    }

    /// Componentwise maximum (the OR t-conorm).
    pub fn max(&self, other: &Interval) -> Interval {
        Interval {
            lower: self.lower.max(other.lower),
            upper: self.upper.max(other.upper),
        }
    }
}
