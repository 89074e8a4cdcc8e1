//! Karnik--Mendel type-reduction.
//!
//! Collapses a discretized interval type-2 fuzzy set, given as lower and
//! upper envelope samples over strictly increasing support points, into the
//! crisp interval `[yL, yR]`. Each endpoint is found by an iterative
//! switch-point search: the weighted centroid partitions the samples, the
//! partition picks which envelope weights each side, and the procedure
//! repeats until the switch point stops moving. On sorted samples the
//! switch point moves monotonically, so the search settles within N steps;
//! the cap of 2N below turns any oscillation into a hard fault instead of
//! a hang.

use num::Float;

use crate::error::{FuzzyError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Left,
    Right,
}

/// Type-reduce the envelope pair to `(yL, yR)`.
///
/// Preconditions: `xs` strictly increasing, `lower[i] <= upper[i]`, and the
/// upper envelope carries nonzero total mass (the caller reports an empty
/// aggregated set as [`FuzzyError::NoRuleFired`] before getting here).
pub fn centroid<F>(xs: &[F], lower: &[F], upper: &[F]) -> Result<(F, F)>
where
    F: Float,
{
    debug_assert_eq!(xs.len(), lower.len());
    debug_assert_eq!(xs.len(), upper.len());

    for (i, w) in xs.windows(2).enumerate() {
        if w[0] >= w[1] {
            return Err(FuzzyError::NonMonotonicSamples { index: i + 1 });
        }
    }

    let y_l = endpoint(xs, lower, upper, Endpoint::Left)?;
    let y_r = endpoint(xs, lower, upper, Endpoint::Right)?;

    Ok((y_l, y_r))
}

fn endpoint<F>(xs: &[F], lower: &[F], upper: &[F], which: Endpoint) -> Result<F>
where
    F: Float,
{
    let n = xs.len();
    let max_iterations = 2 * n;
    let two = F::one() + F::one();

    // Initial weights are the envelope midpoints.
    let weights: Vec<F> = lower
        .iter()
        .zip(upper.iter())
        .map(|(&l, &u)| (l + u) / two)
        .collect();
    let mut y = weighted_centroid(xs, &weights).ok_or(FuzzyError::Convergence { iterations: 0 })?;
    let mut switch = None;

    for _ in 0..max_iterations {
        // Largest index whose sample does not exceed the centroid; an exact
        // tie belongs to the left partition.
        let k = xs.partition_point(|&x| x <= y).saturating_sub(1);

        if switch == Some(k) {
            return Ok(y);
        }
        switch = Some(k);

        let weights = xs.iter().enumerate().map(|(i, _)| match which {
            // yR maximizes the centroid: the heavy (upper) envelope weights
            // the samples right of the switch point. yL mirrors it.
            Endpoint::Right => {
                if i <= k {
                    lower[i]
                } else {
                    upper[i]
                }
            },
            Endpoint::Left => {
                if i <= k {
                    upper[i]
                } else {
                    lower[i]
                }
            },
        });

        // A zero-mass partition means every remaining sample with weight
        // sits exactly at y: the search has collapsed onto the endpoint.
        y = match weighted_centroid_iter(xs, weights) {
            Some(next) => next,
            None => return Ok(y),
        };
    }

    Err(FuzzyError::Convergence {
        iterations: max_iterations,
    })
}

fn weighted_centroid<F: Float>(xs: &[F], weights: &[F]) -> Option<F> {
    weighted_centroid_iter(xs, weights.iter().copied())
}

fn weighted_centroid_iter<F, I>(xs: &[F], weights: I) -> Option<F>
where
    F: Float,
    I: IntoIterator<Item = F>,
{
    let mut num = F::zero();
    let mut den = F::zero();

    for (&x, w) in xs.iter().zip(weights) {
        num = num + x * w;
        den = den + w;
    }

    if den == F::zero() {
        None
    } else {
        Some(num / den)
    }
}
