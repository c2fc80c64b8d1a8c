//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    // like `check`, but only requires `b` to be at least `n` elements long
    pub(crate) fn check_min(n: usize, b: usize) -> Result<(), Self> {
        (b >= n).then_some(()).ok_or(Self(n, b))
    }
}

/// Returned from [`numerov`][crate::numerov::numerov].
#[derive(Debug, Error)]
pub enum NumerovError {
    /// Returned when fewer than two points are requested; the recurrence needs
    /// both seed values.
    #[error("numerov integration requires at least 2 points; got {0}")]
    Short(usize),

    /// Returned when the coefficient or source arrays are shorter than the
    /// requested integration length.
    #[error("coefficient array too short: {0}")]
    Length(#[from] LengthError),

    /// Returned when the recurrence produces a non-finite value, usually from
    /// unchecked growth deep inside a classically forbidden region.
    #[error("numerov recurrence diverged at index {index} (value {value})")]
    Overflow { index: usize, value: f64 },
}

/// Returned from [`simpson`][crate::quad::simpson].
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when fewer than three samples are given.
    #[error("simpson integration requires at least 3 samples; got {0}")]
    Short(usize),
}

/// Describes the ways a coordinate grid can fail to be usable.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when the grid has fewer than 4 points.
    #[error("grid must have at least 4 points; got {0}")]
    TooShort(usize),

    /// Returned when the first grid step is not strictly positive.
    #[error("grid positions must be strictly increasing; got spacing {0}")]
    NonIncreasing(f64),

    /// Returned when a grid step differs from the first one.
    #[error("grid spacing is not uniform at index {index}: expected {expected}, got {got}")]
    NonUniform { index: usize, expected: f64, got: f64 },

    /// Returned when a position or potential value is NaN or infinite.
    #[error("encountered non-finite grid data at index {0}")]
    NonFinite(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from potential generation in [`potential`][crate::potential].
#[derive(Debug, Error)]
pub enum PotentialError {
    /// Returned when a potential profile name is not recognized.
    #[error("unsupported potential profile {0:?}; expected one of: oscillator, cosineh")]
    UnsupportedProfile(String),

    /// Returned when a profile or perturbation parameter is out of range.
    #[error("bad value for parameter `{name}`: {value}")]
    BadParameter { name: &'static str, value: f64 },

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Identifies where a non-finite value surfaced while evaluating a trial
/// energy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Rescaling the left branch onto the right one.
    Stitch,
    /// Normalizing the stitched wavefunction.
    Normalize,
    /// Evaluating the matching criterion.
    Mismatch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stitch => write!(f, "stitch"),
            Self::Normalize => write!(f, "normalize"),
            Self::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Returned from spatial wavefunction solver functions.
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a non-positive or non-finite maximum secant step is
    /// encountered.
    #[error("max_step must be finite and greater than 0; got {0}")]
    BadStep(f64),

    /// Returned when a non-positive or non-finite amplitude clamp is
    /// encountered.
    #[error("clamp must be finite and greater than 0; got {0}")]
    BadClamp(f64),

    /// Returned when no right turning point exists for a trial energy and the
    /// midpoint fallback is disabled.
    #[error("no right turning point found for trial energy {energy}")]
    NoTurningPoint { energy: f64 },

    /// Returned when a trial's branch lengths do not fit on the grid. This
    /// happens when the turning point sits on the very first grid point.
    #[error("branches overrun the grid at energy {energy}: nl = {nl}, nr = {nr}, nx = {nx}")]
    BranchOverrun { energy: f64, nl: usize, nr: usize, nx: usize },

    /// Returned when the secant denominator vanishes or the two energies are
    /// numerically indistinguishable.
    #[error("degenerate secant step between {x0} (f = {f0}) and {x1} (f = {f1})")]
    DegenerateStep { x0: f64, x1: f64, f0: f64, f1: f64 },

    /// Returned when a non-finite value appears after propagation.
    #[error("non-finite value during {stage} at energy {energy}")]
    Overflow { energy: f64, stage: Stage },

    /// Returned by [`Solution::converged`][crate::solve::Solution::converged]
    /// when the search exhausted its iteration budget.
    #[error("energy search did not converge after {iters} iterations; last estimate {energy}")]
    NotConverged { energy: f64, iters: usize },

    /// [`NumerovError`]
    #[error("numerov error: {0}")]
    Numerov(#[from] NumerovError),

    /// [`QuadError`]
    #[error("quadrature error: {0}")]
    Quad(#[from] QuadError),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

pub type XResult<T> = Result<T, XError>;

impl XError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_step(max_step: f64) -> Result<(), Self> {
        (max_step.is_finite() && max_step > 0.0)
            .then_some(())
            .ok_or(Self::BadStep(max_step))
    }

    pub(crate) fn check_clamp(clamp: f64) -> Result<(), Self> {
        (clamp.is_finite() && clamp > 0.0)
            .then_some(())
            .ok_or(Self::BadClamp(clamp))
    }
}
