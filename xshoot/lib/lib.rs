#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for automated solution of the
//! one-dimensional, time-independent Schrödinger equation via Numerov's scheme
//! and a two-sided shooting method.
//!
//! Provides implementations for the following numerical routines:
//! - Numerov integration of `u'' = -q u + s` from two seed values
//! - Composite Simpson quadrature with a second-order end correction
//! - Bounded-step secant search
//! - Two-sided shooting, matched at the right classical turning point, for a
//!   bound state near an initial energy guess
//!
//! Potentials are supplied as [`PotentialTable`][potential::PotentialTable]s,
//! either sampled from bare arrays or generated from a closed set of analytic
//! [profiles][potential::Profile].
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod numerov;
pub mod quad;
pub mod potential;
pub mod secant;
pub mod solve;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 100;
pub(crate) const DEF_MAX_STEP: f64 = 0.1;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
