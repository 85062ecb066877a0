#![allow(non_snake_case)]

//! Reduced-basis emulation of solutions to the radial, two-body Schrödinger
//! equation for a family of parametrized potentials.
//!
//! A basis is trained once: snapshot wavefunctions are computed at a set of
//! training parameters by an (expensive) solver, the free solution is
//! subtracted from each, and the resulting ensemble is optionally compressed
//! via singular value decomposition. Afterwards, approximate wavefunctions
//! are reconstructed as cheap linear combinations of the basis vectors.
//!
//! Provides:
//! - [`Interaction`][interaction::Interaction]: a potential family with a
//!   reduced mass stored in 1/fm
//! - [`SnapshotOracle`][solve::SnapshotOracle] and
//!   [`ReferenceSolution`][solve::ReferenceSolution]: interfaces to external
//!   solvers, along with a bundled [Numerov integrator][solve::Numerov] and
//!   [free solution][free::FreeSolution]
//! - [`assemble`][snapshot::assemble] and [`reduce`][reduce::reduce]: the
//!   training pipeline
//! - [`RelativeBasis`][basis::RelativeBasis]: the trained basis
//!
//! ```no_run
//! use ndarray as nd;
//! use rose::{
//!     basis::{ Basis, BasisParams, RelativeBasis },
//!     free::FreeSolution,
//!     potentials,
//!     solve::Numerov,
//! };
//!
//! let mn = potentials::minnesota();
//! let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 8.0 * std::f64::consts::PI, 1000);
//! let train: Vec<Vec<f64>> = vec![
//!     vec![200.0, -91.85],
//!     vec![150.0, -80.0],
//!     vec![250.0, -100.0],
//! ];
//! let params = BasisParams::new(50.0, 0, 2);
//! let basis = RelativeBasis::new(
//!     &mn, &Numerov::default(), &FreeSolution, &train, s, params).unwrap();
//! let phi = basis.phi_hat(&[1.0, -0.5]).unwrap();
//! assert_eq!(phi.len(), 1000);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod units;
pub mod interaction;
pub mod potentials;
pub mod free;
pub mod solve;
pub mod snapshot;
pub mod reduce;
pub mod basis;
pub mod utils;

pub mod docs;

use ndarray_linalg::{ Lapack, Scalar };
use num_complex::Complex64 as C64;

pub(crate) const DEF_RANK_TOLERANCE: f64 = 1e-10;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

/// Scalar types carried through the basis pipeline: either `f64` for real
/// potentials or [`Complex64`][C64] for complex (optical) ones.
pub trait Field: Scalar<Real = f64> + Lapack {
    /// `true` for complex-valued fields.
    const IS_COMPLEX: bool;

    /// The default initial condition pair `(φ(0), φ'(0)) = (0, 1)`.
    fn default_boundary() -> (Self, Self) { (Self::zero(), Self::one()) }
}

impl Field for f64 {
    const IS_COMPLEX: bool = false;
}

impl Field for C64 {
    const IS_COMPLEX: bool = true;
}

