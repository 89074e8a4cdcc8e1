//! Membership function layer.
//!
//! Type-1 trapezoids and interval type-2 sets built from an upper and a
//! lower type-1 envelope (the footprint of uncertainty). Modeled as a
//! closed set of concrete shapes rather than an open hierarchy; the engine
//! only ever needs `membership(x)` / `membership_interval(x)`.

use crate::domain::{Domain, Interval};
use crate::error::{FuzzyError, Result};

/// Checkpoints sampled across the support when validating envelope
/// containment at construction time.
const CONTAINMENT_CHECKPOINTS: usize = 65;

/// A type-1 trapezoidal membership function.
///
/// `points = [a, b, c, d]` are the support/core breakpoints; `levels`
/// cap the membership reached at the two shoulders, so sets that never
/// reach full membership (non-normal sets) are representable.
#[derive(Clone, Debug)]
pub struct T1Trapezoidal {
    name: String,
    points: [f64; 4],
    levels: [f64; 2],
}

impl T1Trapezoidal {
    pub fn new(name: impl Into<String>, points: [f64; 4]) -> Result<Self> {
        Self::with_levels(name, points, [1., 1.])
    }

    pub fn with_levels(name: impl Into<String>, points: [f64; 4], levels: [f64; 2]) -> Result<Self> {
        let name = name.into();

        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err(FuzzyError::NonMonotonicBreakpoints { name, points });
        }
        if let Some(&level) = levels.iter().find(|l| !(0. ..=1.).contains(*l)) {
            return Err(FuzzyError::LevelOutOfRange { name, level });
        }

        Ok(T1Trapezoidal { name, points, levels })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> [f64; 4] {
        self.points
    }

    /// Degree of membership of `x`, in `[0, 1]`. Zero outside the support.
    pub fn membership(&self, x: f64) -> f64 {
        let [a, b, c, d] = self.points;
        let [h1, h2] = self.levels;

        if x < a || x > d {
            return 0.;
        }
        // Plateau first so degenerate shoulders (a == b, c == d) stay well
        // defined.
        if b <= x && x <= c {
            return h1.min(h2);
        }
        if x < b {
            h1 * (x - a) / (b - a)
        } else {
            h2 * (d - x) / (d - c)
        }
    }

    /// Location of maximum membership: the midpoint of the core `[b, c]`.
    pub fn peak(&self) -> f64 {
        (self.points[1] + self.points[2]) / 2.
    }

    /// Tightest domain with nonzero membership.
    pub fn support(&self) -> Domain {
        // Breakpoints are validated non-decreasing at construction.
        Domain::new(self.points[0], self.points[3]).expect("validated breakpoints")
    }
}

/// An interval type-2 trapezoidal membership function.
///
/// The lower envelope is contained in the upper one for every `x`; the
/// region between them is the footprint of uncertainty.
#[derive(Clone, Debug)]
pub struct IntervalT2Trapezoidal {
    name: String,
    upper: T1Trapezoidal,
    lower: T1Trapezoidal,
    support: Domain,
}

impl IntervalT2Trapezoidal {
    pub fn new(name: impl Into<String>, upper: T1Trapezoidal, lower: T1Trapezoidal) -> Result<Self> {
        let name = name.into();
        let support = upper.support().union(&lower.support());

        // Containment is checked at the eight breakpoints plus evenly
        // spaced checkpoints; piecewise-linear envelopes that cross do so
        // near a breakpoint, so this catches misconfigured shapes early.
        let checkpoints = support
            .sample(CONTAINMENT_CHECKPOINTS)
            .chain(upper.points())
            .chain(lower.points());

        for x in checkpoints {
            if lower.membership(x) > upper.membership(x) + f64::EPSILON {
                return Err(FuzzyError::EnvelopeCrossing { name: name.clone(), x });
            }
        }

        Ok(IntervalT2Trapezoidal {
            name,
            upper,
            lower,
            support,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn support(&self) -> Domain {
        self.support
    }

    pub fn lower_bound(&self, x: f64) -> f64 {
        self.lower.membership(x)
    }

    pub fn upper_bound(&self, x: f64) -> f64 {
        self.upper.membership(x)
    }

    /// The two envelope membership values at `x`.
    pub fn membership_interval(&self, x: f64) -> Interval {
        Interval::new(self.lower.membership(x), self.upper.membership(x))
    }

    /// Location of maximum membership, averaged over the two envelopes.
    pub fn peak(&self) -> f64 {
        (self.upper.peak() + self.lower.peak()) / 2.
    }

    /// Discretize both envelopes over `domain` for an external plotter.
    pub fn sample(&self, domain: Domain, n: usize) -> SampledMf {
        let xs: Vec<f64> = domain.sample(n).collect();
        let lower = xs.iter().map(|&x| self.lower.membership(x)).collect();
        let upper = xs.iter().map(|&x| self.upper.membership(x)).collect();

        SampledMf {
            name: self.name.clone(),
            xs,
            lower,
            upper,
        }
    }
}

/// A named pair of discretized envelope curves, the payload consumed by
/// plotting front ends.
#[derive(Clone, Debug)]
pub struct SampledMf {
    pub name: String,
    pub xs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trap(points: [f64; 4]) -> T1Trapezoidal {
        T1Trapezoidal::new("t", points).unwrap()
    }

    #[test]
    fn rejects_non_monotonic_breakpoints() {
        assert!(T1Trapezoidal::new("bad", [0., 0.5, 0.3, 1.]).is_err());
    }

    #[test]
    fn rejects_out_of_range_levels() {
        assert!(T1Trapezoidal::with_levels("bad", [0., 1., 2., 3.], [1.2, 1.]).is_err());
        assert!(T1Trapezoidal::with_levels("bad", [0., 1., 2., 3.], [1., -0.1]).is_err());
    }

    #[test]
    fn trapezoid_shape() {
        let mf = trap([0.1, 0.3, 0.6, 0.9]);

        assert_eq!(mf.membership(0.1), 0.);
        assert_eq!(mf.membership(0.9), 0.);
        assert_eq!(mf.membership(0.0), 0.);
        assert_eq!(mf.membership(1.0), 0.);
        assert_relative_eq!(mf.membership(0.2), 0.5, epsilon = 1e-12);
        assert_eq!(mf.membership(0.45), 1.);
        assert_relative_eq!(mf.membership(0.75), 0.5, epsilon = 1e-12);

        // Non-decreasing on the up ramp, constant on the core,
        // non-increasing on the down ramp.
        let mut prev = 0.;
        for x in crate::linspace::Linspace::new(0.1, 0.3, 21) {
            let m = mf.membership(x);
            assert!(m >= prev);
            prev = m;
        }
        for x in crate::linspace::Linspace::new(0.3, 0.6, 21) {
            assert_eq!(mf.membership(x), 1.);
        }
        let mut prev = 1.;
        for x in crate::linspace::Linspace::new(0.6, 0.9, 21) {
            let m = mf.membership(x);
            assert!(m <= prev);
            prev = m;
        }
    }

    #[test]
    fn degenerate_left_shoulder() {
        // a == b; the plateau starts at the very left of the support.
        let mf = trap([0., 0., 0.3, 0.5]);
        assert_eq!(mf.membership(0.), 1.);
        assert_eq!(mf.membership(0.3), 1.);
        assert_relative_eq!(mf.membership(0.4), 0.5, epsilon = 1e-12);
        assert_eq!(mf.membership(0.5), 0.);
    }

    #[test]
    fn shoulder_levels_cap_the_plateau() {
        let mf = T1Trapezoidal::with_levels("capped", [0., 1., 2., 3.], [0.6, 0.8]).unwrap();
        assert_eq!(mf.membership(1.5), 0.6);
        assert_relative_eq!(mf.membership(0.5), 0.3, epsilon = 1e-12);
        assert_relative_eq!(mf.membership(2.5), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn envelope_ordering_holds_everywhere() {
        let upper = trap([0., 0.2, 0.6, 1.]);
        let lower = trap([0.1, 0.3, 0.5, 0.8]);
        let mf = IntervalT2Trapezoidal::new("t2", upper, lower).unwrap();

        for x in crate::linspace::Linspace::new(-0.5, 1.5, 201) {
            let iv = mf.membership_interval(x);
            assert!(iv.lower <= iv.upper, "crossed at {x}");
            assert!((0. ..=1.).contains(&iv.lower));
            assert!((0. ..=1.).contains(&iv.upper));
        }
    }

    #[test]
    fn crossing_envelopes_are_rejected() {
        // "Lower" wider than the upper envelope.
        let upper = trap([0.2, 0.4, 0.6, 0.8]);
        let lower = trap([0., 0.3, 0.7, 1.]);
        assert!(IntervalT2Trapezoidal::new("crossed", upper, lower).is_err());
    }

    #[test]
    fn outside_support_is_zero_not_an_error() {
        let upper = trap([0., 0.2, 0.6, 1.]);
        let lower = trap([0.1, 0.3, 0.5, 0.8]);
        let mf = IntervalT2Trapezoidal::new("t2", upper, lower).unwrap();

        assert_eq!(mf.membership_interval(42.), Interval::new(0., 0.));
        assert_eq!(mf.membership_interval(-42.), Interval::new(0., 0.));
    }

    #[test]
    fn sampling_for_the_plotter() {
        let upper = trap([0., 0.2, 0.6, 1.]);
        let lower = trap([0.1, 0.3, 0.5, 0.8]);
        let mf = IntervalT2Trapezoidal::new("t2", upper, lower).unwrap();
        let curve = mf.sample(Domain::new(0., 1.).unwrap(), 11);

        assert_eq!(curve.name, "t2");
        assert_eq!(curve.xs.len(), 11);
        assert_eq!(curve.lower.len(), 11);
        assert_eq!(curve.upper.len(), 11);
        assert_eq!(curve.xs[0], 0.);
        assert_eq!(curve.xs[10], 1.);
    }
}
