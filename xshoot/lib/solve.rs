//! Two-sided shooting solver for bound states of the one-dimensional,
//! time-independent Schrödinger equation (TISE) in natural units (`ħ = m = 1`).
//!
//! For each trial energy, the wavefunction is integrated with
//! [Numerov's scheme][crate::numerov] inward from both ends of the grid to the
//! right classical turning point, where the two branches are joined. The
//! mismatch between their logarithmic derivatives at the joint is then driven
//! to zero with a bounded [secant search][crate::secant]. See
//! [`docs`][crate::docs] for background.
//!
//! ```
//! use xshoot::{ potential::{ PotentialTable, Profile }, solve::solve_eigenstate };
//!
//! let table = PotentialTable::from_profile_default(Profile::oscillator(), None)
//!     .unwrap();
//! let sol = solve_eigenstate(&table, 0.4, Default::default()).unwrap();
//! assert!(sol.is_converged());
//! assert_eq!(sol.level, 0);
//! assert!((sol.energy - 0.5).abs() < 1e-3);
//! ```

use std::cmp;
use ndarray as nd;
use tracing::warn;
use crate::{
    error::{ Stage, XError },
    numerov::numerov_homogeneous,
    potential::PotentialTable,
    quad::wf_norm,
    secant::{ self, Search, Status },
    DEF_EPSILON,
    DEF_MAXITERS,
    DEF_MAX_STEP,
};

pub use crate::error::XResult;

// boundary values at the first two points of each branch
const SEED: (f64, f64) = (0.0, 0.01);

/// Solver settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Maximum number of secant iterations (default: `100`).
    pub maxiters: usize,
    /// Bound on secant displacements; the search is seeded with a step of
    /// `max_step / 10` and steps are clamped to `max_step / 5` (default:
    /// `0.1`).
    pub max_step: f64,
    /// Convergence threshold on the secant displacement (default: `1e-6`).
    pub epsilon: f64,
    /// Clamp the magnitude of propagated amplitudes to this value (default:
    /// off).
    pub clamp: Option<f64>,
    /// Join the branches at the grid midpoint when no right turning point
    /// exists; otherwise fail with [`XError::NoTurningPoint`] (default:
    /// `true`).
    pub midpoint_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maxiters: DEF_MAXITERS,
            max_step: DEF_MAX_STEP,
            epsilon: DEF_EPSILON,
            clamp: None,
            midpoint_fallback: true,
        }
    }
}

impl Config {
    /// Set `maxiters`.
    pub fn with_maxiters(mut self, maxiters: usize) -> Self {
        self.maxiters = maxiters;
        self
    }

    /// Set `max_step`.
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// Set `epsilon`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set `clamp`.
    pub fn with_clamp(mut self, clamp: Option<f64>) -> Self {
        self.clamp = clamp;
        self
    }

    /// Set `midpoint_fallback`.
    pub fn with_midpoint_fallback(mut self, midpoint_fallback: bool) -> Self {
        self.midpoint_fallback = midpoint_fallback;
        self
    }

    /// Check that all settings are in range.
    pub fn validate(&self) -> XResult<()> {
        XError::check_epsilon(self.epsilon)?;
        XError::check_maxiters(self.maxiters)?;
        XError::check_step(self.max_step)?;
        if let Some(c) = self.clamp { XError::check_clamp(c)?; }
        Ok(())
    }
}

/// How the matching index of a trial was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Matching {
    /// At the right classical turning point.
    TurningPoint,
    /// At the grid midpoint, because no right turning point exists for the
    /// trial energy.
    Midpoint,
}

impl Matching {
    /// Return `true` if `self` is `TurningPoint`.
    pub fn is_turning_point(&self) -> bool {
        matches!(self, Self::TurningPoint)
    }

    /// Return `true` if `self` is `Midpoint`.
    pub fn is_midpoint(&self) -> bool { matches!(self, Self::Midpoint) }
}

/// Everything computed for a single trial energy.
///
/// The left branch is stored already rescaled onto the right branch.
#[derive(Clone, Debug)]
pub struct Trial {
    /// Trial energy.
    pub energy: f64,
    /// Grid index at which the branches are joined.
    pub im: usize,
    /// How `im` was chosen.
    pub matching: Matching,
    /// Left branch, integrated over `im + 2` points.
    pub ul: nd::Array1<f64>,
    /// Right branch, integrated from the right edge over `nx - im + 1` points
    /// (element `k` corresponds to grid index `nx - 1 - k`).
    pub ur: nd::Array1<f64>,
    /// Stitched, normalized wavefunction.
    pub wf: nd::Array1<f64>,
}

impl Trial {
    /// Lengths `(nl, nr)` of the left and right branches.
    pub fn branch_lens(&self) -> (usize, usize) { (self.ul.len(), self.ur.len()) }

    /// Discrete logarithmic-derivative mismatch at the joint,
    /// ```text
    /// [ul(im + 1) - ul(im - 1) - ur(im + 1) + ur(im - 1)] / (2 dx ur(im))
    /// ```
    /// where both branches are read in grid order.
    pub fn mismatch(&self, dx: f64) -> XResult<f64> {
        let (nl, nr) = self.branch_lens();
        let f0 = self.ur[nr - 1] + self.ul[nl - 1]
            - self.ur[nr - 3] - self.ul[nl - 3];
        let f = f0 / (2.0 * dx * self.ur[nr - 2]);
        f.is_finite().then_some(f)
            .ok_or(XError::Overflow { energy: self.energy, stage: Stage::Mismatch })
    }

    /// Number of nodes in the stitched wavefunction.
    pub fn level(&self) -> usize { node_count(&self.wf) }
}

/// Count the sign changes between adjacent elements of `wf`.
///
/// Exact zeros (e.g. at the boundaries) do not count.
pub fn node_count<S>(wf: &nd::ArrayBase<S, nd::Ix1>) -> usize
where S: nd::Data<Elem = f64>
{
    wf.iter().zip(wf.iter().skip(1))
        .filter(|(uk, ukp1)| *uk * *ukp1 < 0.0)
        .count()
}

/// A single solution to the TISE.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy
    pub energy: f64,
    /// Normalized wavefunction, one sample per grid point.
    pub wf: nd::Array1<f64>,
    /// Node count of `wf`.
    pub level: usize,
    /// Whether the energy search converged.
    pub status: Status,
    /// Number of secant iterations performed.
    pub iters: usize,
    /// Grid index at which the final branches were joined.
    pub im: usize,
    /// How `im` was chosen.
    pub matching: Matching,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.energy.partial_cmp(&other.energy)
    }

    /// Return `true` if the energy search converged.
    pub fn is_converged(&self) -> bool { self.status.is_converged() }

    /// Return `self` if the energy search converged, otherwise
    /// [`XError::NotConverged`].
    pub fn converged(self) -> XResult<Self> {
        if self.is_converged() {
            Ok(self)
        } else {
            Err(XError::NotConverged { energy: self.energy, iters: self.iters })
        }
    }

    /// Return `true` if the wavefunction is either symmetric or antisymmetric
    /// about `x = 0`, judged by comparing its sums over each half of the grid
    /// to within `tol`. Vanishing wavefunctions are never symmetric.
    pub fn is_symmetric<S>(&self, x: &nd::ArrayBase<S, nd::Ix1>, tol: f64) -> bool
    where S: nd::Data<Elem = f64>
    {
        let (pos, neg)
            = x.iter().zip(self.wf.iter())
            .fold((0.0, 0.0), |(pos, neg), (xk, uk)| {
                if *xk > 0.0 {
                    (pos + uk, neg)
                } else if *xk < 0.0 {
                    (pos, neg + uk)
                } else {
                    (pos, neg)
                }
            });
        pos.abs() > tol
            && ((pos - neg).abs() < tol || (pos + neg).abs() < tol)
    }
}

/// Two-sided shooting solver bound to a single potential.
///
/// The solver holds only its potential and settings; every trial energy is
/// evaluated from scratch, so a `Solver` can be shared freely.
#[derive(Clone, Debug)]
pub struct Solver {
    table: PotentialTable,
    config: Config,
}

impl Solver {
    /// Create a new `Solver`, checking the settings.
    pub fn new(table: PotentialTable, config: Config) -> XResult<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// Get a reference to the potential.
    pub fn get_table(&self) -> &PotentialTable { &self.table }

    /// Get a reference to the settings.
    pub fn get_config(&self) -> &Config { &self.config }

    // q(x) = 2 (E - V(x)) in grid order
    fn q_left(&self, energy: f64) -> nd::Array1<f64> {
        self.table.get_V().mapv(|Vk| 2.0 * (energy - Vk))
    }

    /// Find the first index `i` for which `q[i] > 0` and `q[i + 1] < 0`, i.e.
    /// the right turning point of the leftmost classically allowed region.
    pub fn matching_index<S>(q: &nd::ArrayBase<S, nd::Ix1>) -> Option<usize>
    where S: nd::Data<Elem = f64>
    {
        q.iter().zip(q.iter().skip(1))
            .position(|(qk, qkp1)| *qk * *qkp1 < 0.0 && *qk > 0.0)
    }

    /// Integrate both branches for a single trial energy, join them at the
    /// right turning point, and normalize the result.
    pub fn wave(&self, energy: f64) -> XResult<Trial> {
        let nx = self.table.len();
        let dx = self.table.get_dx();
        let ql = self.q_left(energy);
        let qr = ql.slice(nd::s![..;-1]);

        let (im, matching)
            = match Self::matching_index(&ql) {
                Some(i) => (i, Matching::TurningPoint),
                None if self.config.midpoint_fallback => {
                    warn!(energy, "no right turning point; matching at grid midpoint");
                    (nx / 2, Matching::Midpoint)
                },
                None => { return Err(XError::NoTurningPoint { energy }); },
            };
        let nl = im + 2;
        let nr = nx + 1 - im;
        if im == 0 || cmp::max(nl, nr) > nx {
            return Err(XError::BranchOverrun { energy, nl, nr, nx });
        }

        let clamp = self.config.clamp;
        let mut ul = numerov_homogeneous(nl, dx, &ql, SEED, clamp)?;
        let ur = numerov_homogeneous(nr, dx, &qr, SEED, clamp)?;

        let ratio = ur[nr - 2] / ul[im];
        if !ratio.is_finite() {
            return Err(XError::Overflow { energy, stage: Stage::Stitch });
        }
        ul *= ratio;

        let mut wf: nd::Array1<f64> = nd::Array1::zeros(nx);
        wf.slice_mut(nd::s![..im]).assign(&ul.slice(nd::s![..im]));
        wf.slice_mut(nd::s![im..]).assign(&ur.slice(nd::s![..(nr - 1);-1]));

        let norm = wf_norm(&wf, dx)?;
        if !norm.is_finite() || norm <= 0.0 {
            return Err(XError::Overflow { energy, stage: Stage::Normalize });
        }
        wf /= norm.sqrt();

        Ok(Trial { energy, im, matching, ul, ur, wf })
    }

    /// Evaluate the matching criterion for a single trial energy.
    pub fn f(&self, energy: f64) -> XResult<f64> {
        self.wave(energy)?.mismatch(self.table.get_dx())
    }

    /// Run a bounded secant search on [`Self::f`] starting from `energy`.
    pub fn secant(
        &self,
        maxiters: usize,
        epsilon: f64,
        energy: f64,
        max_step: f64,
    ) -> XResult<Search>
    {
        secant::secant(|e| self.f(e), energy, max_step, maxiters, epsilon)
    }

    /// Search for a bound state near `energy` using the solver's settings.
    ///
    /// A search that exhausts its iteration budget still returns a
    /// [`Solution`], marked with [`Status::NotConverged`]; use
    /// [`Solution::converged`] to treat that as an error.
    pub fn solve(&self, energy: f64) -> XResult<Solution> {
        let Config { maxiters, max_step, epsilon, .. } = self.config;
        let search = self.secant(maxiters, epsilon, energy, max_step)?;
        let trial = self.wave(search.x)?;
        let level = trial.level();
        Ok(Solution {
            energy: search.x,
            wf: trial.wf,
            level,
            status: search.status,
            iters: search.iters,
            im: trial.im,
            matching: trial.matching,
        })
    }
}

/// Construct a [`Solver`] and immediately search for a bound state near
/// `energy`.
pub fn solve_eigenstate(table: &PotentialTable, energy: f64, config: Config)
    -> XResult<Solution>
{
    Solver::new(table.clone(), config)?.solve(energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::{ potential::Profile, quad::simpson };

    fn oscillator() -> PotentialTable {
        PotentialTable::from_profile_default(Profile::oscillator(), None)
            .unwrap()
    }

    #[test]
    fn matching_index_finds_right_turning_point() {
        let q = nd::array![-1.0, 2.0, 3.0, -1.0, -2.0, 1.0, -1.0];
        assert_eq!(Solver::matching_index(&q), Some(2));
        let q = nd::array![1.0, 1.0, 1.0, 1.0];
        assert_eq!(Solver::matching_index(&q), None);
        let q = nd::array![-1.0, -1.0, 1.0, 1.0];
        assert_eq!(Solver::matching_index(&q), None);
    }

    #[test]
    fn wave_index_bookkeeping() {
        let solver = Solver::new(oscillator(), Config::default()).unwrap();
        let nx = solver.get_table().len();
        let trial = solver.wave(0.6).unwrap();
        let (nl, nr) = trial.branch_lens();
        assert!(trial.matching.is_turning_point());
        assert_eq!(nl, trial.im + 2);
        assert_eq!(nr, nx - trial.im + 1);
        assert_eq!(nl + nr - 3, nx);
        assert_eq!(trial.wf.len(), nx);
        // the turning point sits at x = √(2E), between im and im + 1
        let x_tp = 1.2_f64.sqrt();
        let x_im = solver.get_table().get_x()[trial.im];
        assert!(x_im < x_tp && x_im + solver.get_table().get_dx() > x_tp);
    }

    #[test]
    fn branches_join_continuously() {
        let solver = Solver::new(oscillator(), Config::default()).unwrap();
        let trial = solver.wave(0.7).unwrap();
        let (_, nr) = trial.branch_lens();
        assert_relative_eq!(trial.ul[trial.im], trial.ur[nr - 2], max_relative = 1e-12);
    }

    #[test]
    fn wave_is_normalized() {
        let solver = Solver::new(oscillator(), Config::default()).unwrap();
        let dx = solver.get_table().get_dx();
        for e in [0.3, 0.5, 0.9, 1.5, 2.2, 4.0] {
            let trial = solver.wave(e).unwrap();
            let norm = simpson(&trial.wf.mapv(|u| u * u), dx).unwrap();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn flat_potential_uses_midpoint() {
        let table = PotentialTable::new_linspace((0.0, 1.0, 101), |_| 0.0)
            .unwrap();
        let solver = Solver::new(table.clone(), Config::default()).unwrap();
        let trial = solver.wave(1.0).unwrap();
        assert!(trial.matching.is_midpoint());
        assert_eq!(trial.im, 50);

        let strict = Solver::new(
            table, Config::default().with_midpoint_fallback(false)).unwrap();
        assert!(matches!(strict.wave(1.0), Err(XError::NoTurningPoint { .. })));
    }

    #[test]
    fn turning_point_at_left_edge_overruns() {
        let table = PotentialTable::from_pairs(&[
            (0.0, 0.0), (0.1, 10.0), (0.2, 10.0), (0.3, 10.0), (0.4, 10.0),
        ]).unwrap();
        let solver = Solver::new(table, Config::default()).unwrap();
        match solver.f(1.0) {
            Err(XError::BranchOverrun { nl, nr, nx, .. }) => {
                assert_eq!((nl, nr, nx), (2, 6, 5));
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn mismatch_vanishes_at_eigenvalue() {
        let solver = Solver::new(oscillator(), Config::default()).unwrap();
        let sol = solver.solve(0.4).unwrap();
        assert!(solver.f(sol.energy).unwrap().abs() < 1e-4);
        // and is clearly nonzero away from it
        assert!(solver.f(0.45).unwrap().abs() > 1e-3);
    }

    #[test]
    fn bad_config() {
        let res = Solver::new(oscillator(), Config::default().with_epsilon(-1.0));
        assert!(matches!(res, Err(XError::BadEpsilon(_))));
        let res = Solver::new(oscillator(), Config::default().with_clamp(Some(0.0)));
        assert!(matches!(res, Err(XError::BadClamp(_))));
    }

    #[test]
    fn not_converged_is_reported() {
        let config = Config::default().with_maxiters(2);
        let sol = solve_eigenstate(&oscillator(), 0.4, config).unwrap();
        assert_eq!(sol.status, Status::NotConverged);
        assert_eq!(sol.iters, 2);
        assert!(matches!(sol.converged(), Err(XError::NotConverged { iters: 2, .. })));
    }

    #[test]
    fn solution_records_matching_index() {
        let solver = Solver::new(oscillator(), Config::default()).unwrap();
        let sol = solver.solve(0.4).unwrap();
        let q = solver.get_table().get_V().mapv(|V| 2.0 * (sol.energy - V));
        assert_eq!(Solver::matching_index(&q), Some(sol.im));
        assert_eq!(solver.wave(sol.energy).unwrap().im, sol.im);
        assert!(sol.matching.is_turning_point());
    }

    #[test]
    fn node_count_ignores_zeros() {
        let wf = nd::array![0.0, 1.0, 2.0, -1.0, 0.0, -2.0, 3.0, 0.0];
        assert_eq!(node_count(&wf), 2);
    }
}
