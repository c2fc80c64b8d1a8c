//! Sampled potentials and the analytic profiles used to generate them.
//!
//! A [`PotentialTable`] is the only input the [solver][crate::solve] needs. It
//! can be built from bare arrays or generated from one of the closed set of
//! [`Profile`]s, optionally with a [`Gaussian`] bump laid over it.
//!
//! ```
//! use xshoot::potential::{ PotentialTable, Profile };
//!
//! let profile: Profile = "oscillator".parse().unwrap();
//! let table = PotentialTable::from_profile((-10.0, 10.0, 501), profile, None)
//!     .unwrap();
//! assert_eq!(table.len(), 501);
//! assert!((table.get_dx() - 0.04).abs() < 1e-12);
//! ```

use std::{ f64::consts::PI, str::FromStr };
use ndarray as nd;
use crate::error::{ GridError, LengthError, PotentialError };

pub type PotentialResult<T> = Result<T, PotentialError>;

/// Default grid used by [`PotentialTable::from_profile_default`]: `(start,
/// inclusive end, number of points)`.
pub const DEF_GRID: (f64, f64, usize) = (-10.0, 10.0, 501);

// relative tolerance on the deviation of each grid step from the first
const SPACING_RTOL: f64 = 1e-8;

// allowance for rounding in the positions themselves, in units of
// `f64::EPSILON * max |x|`
const SPACING_ULPS: f64 = 4.0;

/// Closed set of analytic potential profiles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Profile {
    /// Harmonic oscillator, `V = m ω² x² / 2`.
    Oscillator {
        /// Angular frequency (default: `1`).
        omega: f64,
        /// Mass (default: `1`).
        m: f64,
    },
    /// Shifted Pöschl-Teller well,
    /// ```text
    /// V = c (1/2 - 1 / cosh²(a x)) / 2
    /// c = a² λ (λ - 1)
    /// ```
    CoshSquared {
        /// Inverse width (default: `1`).
        a: f64,
        /// Depth parameter λ (default: `4`).
        la: f64,
    },
}

impl Profile {
    /// Harmonic oscillator with default parameters.
    pub fn oscillator() -> Self { Self::Oscillator { omega: 1.0, m: 1.0 } }

    /// Inverse-cosh² well with default parameters.
    pub fn cosh_squared() -> Self { Self::CoshSquared { a: 1.0, la: 4.0 } }

    /// Return `true` if `self` is `Oscillator`.
    pub fn is_oscillator(&self) -> bool {
        matches!(self, Self::Oscillator { .. })
    }

    /// Return `true` if `self` is `CoshSquared`.
    pub fn is_cosh_squared(&self) -> bool {
        matches!(self, Self::CoshSquared { .. })
    }

    /// Canonical name of the profile, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oscillator { .. } => "oscillator",
            Self::CoshSquared { .. } => "cosineh",
        }
    }

    fn check(&self) -> PotentialResult<()> {
        let finite = |name: &'static str, value: f64| {
            value.is_finite().then_some(())
                .ok_or(PotentialError::BadParameter { name, value })
        };
        match *self {
            Self::Oscillator { omega, m } => {
                finite("omega", omega)?;
                finite("m", m)?;
                (m > 0.0).then_some(())
                    .ok_or(PotentialError::BadParameter { name: "m", value: m })
            },
            Self::CoshSquared { a, la } => {
                finite("a", a)?;
                finite("la", la)
            },
        }
    }

    /// Evaluate the profile at a single position.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Oscillator { omega, m } => 0.5 * m * omega.powi(2) * x.powi(2),
            Self::CoshSquared { a, la } => {
                let c = a.powi(2) * la * (la - 1.0);
                c * (0.5 - (a * x).cosh().powi(2).recip()) / 2.0
            },
        }
    }
}

impl FromStr for Profile {
    type Err = PotentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oscillator" | "oscilator" | "harmonic" => Ok(Self::oscillator()),
            "cosineh" | "cosh2" | "cosh_squared" => Ok(Self::cosh_squared()),
            _ => Err(PotentialError::UnsupportedProfile(s.to_string())),
        }
    }
}

/// Normalized Gaussian bump laid over a [`Profile`],
/// ```text
/// exp(-((x - μ) / δ)² / 2) / (δ √(2π))
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gaussian {
    /// Center (default: `0`).
    pub mu: f64,
    /// Width (default: `1`).
    pub delta: f64,
}

impl Default for Gaussian {
    fn default() -> Self { Self { mu: 0.0, delta: 1.0 } }
}

impl Gaussian {
    fn check(&self) -> PotentialResult<()> {
        if !self.mu.is_finite() {
            return Err(PotentialError::BadParameter { name: "mu", value: self.mu });
        }
        (self.delta.is_finite() && self.delta > 0.0).then_some(())
            .ok_or(PotentialError::BadParameter { name: "delta", value: self.delta })
    }

    /// Evaluate the bump at a single position.
    pub fn eval(&self, x: f64) -> f64 {
        (-0.5 * ((x - self.mu) / self.delta).powi(2)).exp()
            / self.delta / (2.0 * PI).sqrt()
    }
}

/// Immutable record of a potential sampled over a uniform coordinate grid.
///
/// Arrays borrowed from this type are guaranteed to have the same length, at
/// least 4 elements, finite values, and strictly increasing, uniformly spaced
/// coordinates.
#[derive(Clone, Debug)]
pub struct PotentialTable {
    // coordinate array
    x: nd::Array1<f64>,
    // coordinate array grid spacing
    dx: f64,
    // potential array
    V: nd::Array1<f64>,
}

impl PotentialTable {
    /// Create a new `PotentialTable` from bare coordinate and potential arrays.
    pub fn new_arrays(x: nd::Array1<f64>, V: nd::Array1<f64>)
        -> Result<Self, GridError>
    {
        LengthError::check(&x, &V)?;
        let dx = check_grid(&x, &V)?;
        Ok(Self { x, dx, V })
    }

    /// Create a new `PotentialTable` from `(position, value)` pairs.
    pub fn from_pairs(data: &[(f64, f64)]) -> Result<Self, GridError> {
        let x: nd::Array1<f64> = data.iter().map(|(xk, _)| *xk).collect();
        let V: nd::Array1<f64> = data.iter().map(|(_, Vk)| *Vk).collect();
        Self::new_arrays(x, V)
    }

    /// Create a new `PotentialTable` by sampling a function over a coordinate
    /// array generated from "linspace-style" arguments (start, inclusive end,
    /// and an array length).
    pub fn new_linspace<F>(xargs: (f64, f64, usize), V: F)
        -> Result<Self, GridError>
    where F: FnMut(f64) -> f64
    {
        let x: nd::Array1<f64>
            = nd::Array1::linspace(xargs.0, xargs.1, xargs.2);
        let V: nd::Array1<f64> = x.mapv(V);
        Self::new_arrays(x, V)
    }

    /// Sample a [`Profile`], optionally perturbed by a [`Gaussian`], over a
    /// "linspace-style" coordinate grid.
    pub fn from_profile(
        xargs: (f64, f64, usize),
        profile: Profile,
        perturbation: Option<Gaussian>,
    ) -> PotentialResult<Self>
    {
        profile.check()?;
        if let Some(g) = perturbation.as_ref() { g.check()?; }
        let table = Self::new_linspace(xargs, |xk| {
            profile.eval(xk) + perturbation.map(|g| g.eval(xk)).unwrap_or(0.0)
        })?;
        Ok(table)
    }

    /// Like [`Self::from_profile`], using [`DEF_GRID`].
    pub fn from_profile_default(profile: Profile, perturbation: Option<Gaussian>)
        -> PotentialResult<Self>
    {
        Self::from_profile(DEF_GRID, profile, perturbation)
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Get the minimum value of the potential.
    pub fn min_V(&self) -> f64 {
        self.V.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Iterate over `(position, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.V.iter().copied())
    }
}

// validate grid invariants and return the spacing
fn check_grid(x: &nd::Array1<f64>, V: &nd::Array1<f64>)
    -> Result<f64, GridError>
{
    let n = x.len();
    if n < 4 { return Err(GridError::TooShort(n)); }
    if let Some(k)
        = x.iter().zip(V).position(|(xk, Vk)| !xk.is_finite() || !Vk.is_finite())
    {
        return Err(GridError::NonFinite(k));
    }
    let dx = x[1] - x[0];
    if dx <= 0.0 { return Err(GridError::NonIncreasing(dx)); }
    let xmax = x.iter().fold(0.0_f64, |acc, xk| acc.max(xk.abs()));
    let tol = SPACING_RTOL * dx + SPACING_ULPS * f64::EPSILON * xmax;
    for (k, (xk, xkp1)) in x.iter().zip(x.iter().skip(1)).enumerate().skip(1) {
        let step = xkp1 - xk;
        if (step - dx).abs() > tol {
            return Err(GridError::NonUniform { index: k, expected: dx, got: step });
        }
    }
    Ok(dx)
}
