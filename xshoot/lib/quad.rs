//! Composite Simpson quadrature over evenly spaced samples.

use ndarray as nd;
use num_traits::Float;
use crate::error::QuadError;

pub type QuadResult<T> = Result<T, QuadError>;

/// Integrate using the composite Simpson rule.
///
/// Samples are grouped in threes with weights `(1, 4, 1) / 3`. When the number
/// of samples is even, the groups leave the last interval uncovered and it is
/// added separately from a quadratic fit to the final three samples, i.e.
/// `(5 y[n] + 8 y[n - 1] - y[n - 2]) / 12`.
///
/// Returns [`QuadError::Short`] if `y` has fewer than 3 elements.
///
/// ```
/// use ndarray as nd;
/// use xshoot::quad::simpson;
///
/// let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 21);
/// let y = x.mapv(|xk| xk.powi(3));
/// assert!((simpson(&y, x[1] - x[0]).unwrap() - 4.0).abs() < 1e-12);
/// ```
pub fn simpson<S, A>(y: &nd::ArrayBase<S, nd::Ix1>, dx: A) -> QuadResult<A>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let len = y.len();
    if len < 3 { return Err(QuadError::Short(len)); }
    let n = len - 1;
    let three = A::one() + A::one() + A::one();
    let four = three + A::one();
    let (mut s0, mut s1, mut s2) = (A::zero(), A::zero(), A::zero());
    for k in (1..n).step_by(2) {
        s0 = s0 + y[k];
        s1 = s1 + y[k - 1];
        s2 = s2 + y[k + 1];
    }
    let s = (s1 + four * s0 + s2) / three;
    if len % 2 == 0 {
        let five = four + A::one();
        let eight = four + four;
        let twelve = eight + four;
        Ok(dx * (s + (five * y[n] + eight * y[n - 1] - y[n - 2]) / twelve))
    } else {
        Ok(dx * s)
    }
}

/// Calculate the norm `∫|u|² dx` of a real wavefunction with [`simpson`].
pub fn wf_norm<S>(u: &nd::ArrayBase<S, nd::Ix1>, dx: f64) -> QuadResult<f64>
where S: nd::Data<Elem = f64>
{
    simpson(&u.mapv(|uk| uk * uk), dx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample<F>(a: f64, b: f64, n: usize, f: F) -> (nd::Array1<f64>, f64)
    where F: Fn(f64) -> f64
    {
        let x: nd::Array1<f64> = nd::Array1::linspace(a, b, n);
        (x.mapv(f), x[1] - x[0])
    }

    #[test]
    fn cubic_odd_count() {
        // ∫₋₁² (x³ - 2x² + x + 3) dx = 15/4 - 6 + 3/2 + 9
        let (y, dx) = sample(-1.0, 2.0, 31, |x| x.powi(3) - 2.0 * x * x + x + 3.0);
        assert_relative_eq!(simpson(&y, dx).unwrap(), 8.25, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_even_count() {
        // ∫₀³ (3x² - x + 1) dx = 27 - 4.5 + 3
        let (y, dx) = sample(0.0, 3.0, 30, |x| 3.0 * x * x - x + 1.0);
        assert_relative_eq!(simpson(&y, dx).unwrap(), 25.5, epsilon = 1e-12);
    }

    #[test]
    fn cubic_even_count_is_close() {
        // the trailing interval is only exact to second order, so a cubic is
        // off by a term that vanishes as dx⁴
        let exact = 8.25;
        let f = |x: f64| x.powi(3) - 2.0 * x * x + x + 3.0;
        let (y, dx) = sample(-1.0, 2.0, 30, f);
        let coarse = (simpson(&y, dx).unwrap() - exact).abs();
        let (y, dx) = sample(-1.0, 2.0, 60, f);
        let fine = (simpson(&y, dx).unwrap() - exact).abs();
        assert!(coarse < 1e-4);
        assert!(fine < coarse / 8.0);
    }

    #[test]
    fn minimal_sample_counts() {
        let y = nd::array![1.0, 1.0, 1.0];
        assert_relative_eq!(simpson(&y, 0.5).unwrap(), 1.0, epsilon = 1e-14);
        let y = nd::array![0.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(simpson(&y, 1.0).unwrap(), 4.5, epsilon = 1e-14);
    }

    #[test]
    fn single_precision() {
        let y: nd::Array1<f32> = nd::Array1::from_elem(11, 2.0);
        assert_relative_eq!(simpson(&y, 0.1_f32).unwrap(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn too_few_samples() {
        let y = nd::array![1.0, 2.0];
        assert!(matches!(simpson(&y, 1.0), Err(QuadError::Short(2))));
    }

    #[test]
    fn gaussian_norm() {
        // ∫ exp(-x²) dx = √π
        let (u, dx) = sample(-8.0, 8.0, 401, |x| (-x * x / 2.0).exp());
        assert_relative_eq!(
            wf_norm(&u, dx).unwrap(),
            std::f64::consts::PI.sqrt(),
            epsilon = 1e-10,
        );
    }
}
