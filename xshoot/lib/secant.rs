//! Secant root search with bounded steps.
//!
//! The search is seeded with a second point `max_step / 10` away from the
//! initial guess and every subsequent displacement is clamped in magnitude to
//! `max_step / 5`. Iteration stops once the (clamped) displacement falls below
//! `epsilon` or after `maxiters` iterations. Exhausting the budget is not an
//! error: the last estimate is returned with [`Status::NotConverged`].

use tracing::{ debug, warn };
use crate::error::{ XError, XResult };

/// Terminal state of a [`secant`] search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// The last displacement fell below the tolerance.
    Converged,
    /// The iteration budget ran out first.
    NotConverged,
}

impl Status {
    /// Return `true` if `self` is `Converged`.
    pub fn is_converged(&self) -> bool { matches!(self, Self::Converged) }
}

/// Result of a [`secant`] search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Search {
    /// Final estimate of the root.
    pub x: f64,
    /// Number of secant iterations performed.
    pub iters: usize,
    /// Magnitude of the final displacement.
    pub last_step: f64,
    /// Whether the tolerance was met.
    pub status: Status,
}

/// Find a root of `f` near `x0` with the secant method.
///
/// Each evaluation of `f` may fail; the first error is returned as-is.
/// Returns [`XError::DegenerateStep`] if two successive function values
/// coincide, or if the resulting step is not finite.
///
/// ```
/// use xshoot::secant::{ secant, Status };
///
/// let search = secant(|x| Ok(x * x - 2.0), 1.0, 0.5, 100, 1e-10).unwrap();
/// assert_eq!(search.status, Status::Converged);
/// assert!((search.x - 2.0_f64.sqrt()).abs() < 1e-9);
/// ```
pub fn secant<F>(
    mut f: F,
    x0: f64,
    max_step: f64,
    maxiters: usize,
    epsilon: f64,
) -> XResult<Search>
where F: FnMut(f64) -> XResult<f64>
{
    XError::check_epsilon(epsilon)?;
    XError::check_maxiters(maxiters)?;
    XError::check_step(max_step)?;

    let step_bound = max_step / 5.0;
    let mut x = x0;
    let mut dx = max_step / 10.0;
    let mut x1 = x + dx;
    let mut fx = f(x)?;
    let mut fx1: f64;
    let mut x2: f64;
    let mut k: usize = 0;
    while dx.abs() > epsilon && k < maxiters {
        fx1 = f(x1)?;
        let d = fx1 - fx;
        if d == 0.0 || x1 == x {
            return Err(XError::DegenerateStep { x0: x, x1, f0: fx, f1: fx1 });
        }
        x2 = x1 - fx1 * (x1 - x) / d;
        if !x2.is_finite() {
            return Err(XError::DegenerateStep { x0: x, x1, f0: fx, f1: fx1 });
        }
        x = x1;
        fx = fx1;
        dx = (x2 - x).signum() * (x2 - x).abs().min(step_bound);
        x1 = x + dx;
        k += 1;
        debug!(iter = k, x = x1, step = dx, f = fx, "secant step");
    }
    let status
        = if dx.abs() > epsilon {
            warn!(
                iters = k,
                x = x1,
                "secant search reached maxiters without convergence"
            );
            Status::NotConverged
        } else {
            Status::Converged
        };
    Ok(Search { x: x1, iters: k, last_step: dx.abs(), status })
}
