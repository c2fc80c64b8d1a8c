//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Numerov's scheme](#numerovs-scheme)
//! - [Two-sided shooting](#two-sided-shooting)
//! - [Energy search](#energy-search)
//! - [Normalization](#normalization)
//! - [Failure modes](#failure-modes)
//!
//! # Background
//! Everything in this crate works with the one-dimensional time-independent
//! Schrödinger equation (TISE) in units where *ħ* = *m* = 1,
//! ```text
//!   1 ∂²ψ
//! - - --- + V(x) ψ(x) = E ψ(x)
//!   2 ∂x²
//! ```
//! which can be written as
//! ```text
//! ∂²ψ
//! --- = -q(x) ψ(x),    q(x) = 2 (E - V(x))
//! ∂x²
//! ```
//! Regions where *q* > 0 (*E* > *V*) are classically allowed and the
//! wavefunction oscillates there; where *q* < 0 it grows or decays
//! exponentially. Points where *q* changes sign are the classical turning
//! points. A bound state is a solution that decays on both sides of the
//! allowed region, which only happens for a discrete set of energies.
//!
//! # Numerov's scheme
//! For equations of the more general form *u*'' = -*q* *u* + *s*, sampled on a
//! uniform grid with spacing *h*, Numerov's method[^1] is the three-point
//! recurrence
//! ```text
//! g = h² / 12
//!
//! (1 + g q[i + 1]) u[i + 1] = (2 - 10 g q[i]) u[i] - (1 + g q[i - 1]) u[i - 1]
//!                             + g (s[i + 1] + 10 s[i] + s[i - 1])
//! ```
//! with a local error of *O*(*h*⁶) per step and a global error of *O*(*h*⁴).
//! Given two seed values, the whole array follows in a single pass.
//!
//! Integrating into a classically forbidden region couples to the growing
//! exponential, so amplitudes can become very large. On the grids this crate is
//! meant for (tens to a few thousand points), growth stays within `f64` range;
//! when it does not, the recurrence reports the overflow rather than silently
//! producing infinities, and the amplitudes can optionally be clamped.
//!
//! # Two-sided shooting
//! For a trial energy *E*, the matching index *m* is the first grid point with
//! *q*\[*m*\] > 0 and *q*\[*m* + 1\] < 0, i.e. the right turning point of the
//! leftmost allowed region. The wavefunction is then integrated twice, both
//! times starting deep in a forbidden region from the seeds (0, 0.01):
//! - from the left edge over *m* + 2 points,
//! - from the right edge (with *q* reversed) over *N* - *m* + 1 points.
//!
//! Both branches therefore cover the points *m* - 1, *m*, *m* + 1. The left
//! branch is rescaled to agree with the right one at *m*, and the two are
//! concatenated. The matching criterion is the jump in logarithmic derivative
//! at *m*, using central differences on both branches:
//! ```text
//!     (uₗ[m + 1] - uₗ[m - 1]) - (uᵣ[m + 1] - uᵣ[m - 1])
//! f = -------------------------------------------------
//!                       2 h u[m]
//! ```
//! Normalizations and overall signs drop out of the ratio; for an eigenvalue
//! the two branches describe the same function and *f* vanishes.
//!
//! If *q* never changes sign from positive to negative (e.g. a flat potential
//! or an energy above the right edge of the potential), the branches are joined
//! at the grid midpoint instead. This is a heuristic; whether it finds the
//! right solution for asymmetric or multi-well potentials is not guaranteed.
//!
//! # Energy search
//! The criterion *f*(*E*) is driven to zero with the [secant method][secant].
//! Because *f* has poles wherever the right branch has a node at the matching
//! point, and the matching point itself jumps as *E* changes, unrestricted
//! secant steps can easily land on a different level or outside the
//! potential. Steps are therefore clamped to a fraction of a user-supplied
//! maximum step. The number of nodes in the final wavefunction identifies the
//! level that was found (0 for the ground state).
//!
//! # Normalization
//! The stitched wavefunction is normalized so that ∫|*ψ*|² d*x* = 1, with the
//! integral evaluated using the composite Simpson rule. For an even number of
//! samples the final interval is integrated separately using a quadratic
//! through the last three samples,
//! ```text
//! ∫ y dx  ≈  h (5 y[n] + 8 y[n - 1] - y[n - 2]) / 12
//! ```
//! over [*x*\[*n* - 1\], *x*\[*n*\]], which is exact for quadratics (but not
//! cubics).
//!
//! # Failure modes
//! - The matching point may land on the first grid point, leaving no room for
//!   the left branch; this is reported as a branch overrun.
//! - Two trial energies may produce identical criterion values, making the
//!   secant step undefined.
//! - The iteration budget may run out before the step falls below tolerance;
//!   the last estimate is still returned, but marked as not converged.
//!
//! [^1]: B. Numerov, "Note on the numerical integration of d2x/dt2 = f(x,t)."
//! Astronomische Nachrichten **230** 19 (1927).
//!
//! [secant]: https://en.wikipedia.org/wiki/Secant_method
