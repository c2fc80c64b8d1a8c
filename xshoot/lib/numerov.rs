//! Numerov's scheme for linear second-order equations of the form
//! ```text
//! u''(x) = -q(x) u(x) + s(x)
//! ```
//! sampled over an evenly spaced grid.
//!
//! With `q = 2 (E - V)` and `s = 0` this is the TISE in natural units, so
//! solutions oscillate where `q > 0` and grow or decay where `q < 0`. See
//! [`docs`][crate::docs].

use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, NumerovError },
};

pub type NumerovResult<T> = Result<T, NumerovError>;

#[derive(Copy, Clone, Debug)]
struct Window(f64, f64);

impl Window {
    fn push(&mut self, val: f64) { self.0 = self.1; self.1 = val; }
}

/// Perform a Numerov integration over the first `m` points of `q` (and `s`, if
/// given), starting from seed values `u0` and `u1` and grid spacing `dx`.
///
/// `q` and `s` may be longer than `m`; only their first `m` elements are used.
/// If `clamp` is given, every newly computed value is clamped in magnitude to
/// `clamp`, which keeps growth in forbidden regions finite at the cost of
/// distorting the solution there.
///
/// Returns [`NumerovError::Overflow`] the first time a non-finite value is
/// produced.
///
/// ```
/// use ndarray as nd;
/// use xshoot::numerov::numerov;
///
/// // u'' = -u, starting from u = sin(x)
/// let dx = 0.01;
/// let q: nd::Array1<f64> = nd::Array1::from_elem(315, 1.0);
/// let u = numerov::<_, nd::OwnedRepr<f64>>(
///     315, dx, &q, None, (0.0, dx.sin()), None).unwrap();
/// assert!((u[157] - (157.0 * dx).sin()).abs() < 1e-8);
/// ```
pub fn numerov<S, T>(
    m: usize,
    dx: f64,
    q: &Arr1<S>,
    s: Option<&Arr1<T>>,
    seed: (f64, f64),
    clamp: Option<f64>,
) -> NumerovResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    if m < 2 { return Err(NumerovError::Short(m)); }
    LengthError::check_min(m, q.len())?;
    if let Some(s) = s { LengthError::check_min(m, s.len())?; }

    let g = dx.powi(2) / 12.0;
    let source = |k: usize| s.map(|s| s[k]).unwrap_or(0.0);
    let mut u: nd::Array1<f64> = nd::Array1::zeros(m);
    u[0] = seed.0;
    u[1] = seed.1;
    let mut uprev = Window(seed.0, seed.1);
    let mut unext: f64;
    let (mut c0, mut c1, mut c2, mut d): (f64, f64, f64, f64);
    for k in 1..m - 1 {
        c0 = 1.0 + g * q[k - 1];
        c1 = 2.0 - 10.0 * g * q[k];
        c2 = 1.0 + g * q[k + 1];
        d = g * (source(k + 1) + source(k - 1) + 10.0 * source(k));
        unext = (c1 * uprev.1 - c0 * uprev.0 + d) / c2;
        if let Some(bound) = clamp {
            if !unext.is_nan() { unext = unext.max(-bound).min(bound); }
        }
        if !unext.is_finite() {
            return Err(NumerovError::Overflow { index: k + 1, value: unext });
        }
        u[k + 1] = unext;
        uprev.push(unext);
    }
    Ok(u)
}

/// Like [`numerov`], but for the homogeneous equation (`s = 0`).
pub fn numerov_homogeneous<S>(
    m: usize,
    dx: f64,
    q: &Arr1<S>,
    seed: (f64, f64),
    clamp: Option<f64>,
) -> NumerovResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    numerov::<S, nd::OwnedRepr<f64>>(m, dx, q, None, seed, clamp)
}
