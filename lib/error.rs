//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;
use crate::Arr1;

/// Boxed error produced by an external solver.
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; expected {0}, got {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &Arr1<S>,
        b: &Arr1<T>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(()).ok_or(Self(expected, got))
    }
}

/// Returned when a quantity requiring a positive energy receives a
/// non-positive (or non-finite) one.
///
/// The momentum scale `p = √(2 μ E)` is undefined for real-valued models in
/// this case.
#[derive(Debug, Error)]
#[error("energy must be positive and finite; got {0} MeV")]
pub struct EnergyError(pub f64);

impl EnergyError {
    pub(crate) fn check(energy: f64) -> Result<(), Self> {
        (energy > 0.0 && energy.is_finite())
            .then_some(()).ok_or(Self(energy))
    }
}

/// Returned from the bundled solvers in [`solve`][crate::solve] and
/// [`free`][crate::free].
#[derive(Debug, Error)]
pub enum SolveError {
    /// Returned when a mesh has too few points to seed an integration.
    #[error("mesh must have at least {min} points; got {got}")]
    ShortMesh { min: usize, got: usize },

    /// Returned when an integrator requiring even spacing receives a mesh
    /// whose spacing varies.
    #[error("mesh must be uniformly spaced and increasing; step {index} differs from {expected:e} by {deviation:e}")]
    NonUniformMesh { index: usize, expected: f64, deviation: f64 },

    /// Returned when a mesh contains negative coordinates.
    #[error("radial mesh must be non-negative; got s = {0}")]
    NegativeMesh(f64),

    /// Returned when a Numerov step would divide by a vanishing or
    /// non-finite `1 + δs² Q / 12`.
    #[error("Numerov step {index} is singular")]
    SingularStep { index: usize },

    /// [`EnergyError`]
    #[error("energy error: {0}")]
    Energy(#[from] EnergyError),
}

/// Returned from basis construction and reconstruction.
#[derive(Debug, Error)]
pub enum BasisError {
    /// Returned when zero basis vectors are requested.
    #[error("number of basis vectors must be at least 1")]
    EmptyBasis,

    /// Returned when more basis vectors are requested than there are training
    /// points.
    #[error("n_basis must not exceed the training set size; got n_basis = {n_basis} for {n_train} training points")]
    BasisSize { n_basis: usize, n_train: usize },

    /// Returned when a training set is empty.
    #[error("training set must be non-empty")]
    EmptyTraining,

    /// Returned when the oracle produces a snapshot of the wrong length.
    #[error("snapshot {index} has the wrong length: {source}")]
    SnapshotLength { index: usize, source: LengthError },

    /// Returned when the reference solution has the wrong length.
    #[error("reference solution has the wrong length: {0}")]
    ReferenceLength(LengthError),

    /// Returned when pre-assembled snapshots do not match the training set or
    /// mesh they are paired with.
    #[error("snapshot matrix does not match the training set or mesh: {0}")]
    SnapshotShape(LengthError),

    /// Returned when a coefficient vector does not match the number of active
    /// basis vectors.
    #[error("expected {expected} coefficients; got {got}")]
    Coefficients { expected: usize, got: usize },

    /// Returned when a wavefunction to be projected does not match the mesh.
    #[error("wavefunction does not match the mesh: {0}")]
    Projection(LengthError),

    /// Error raised by the snapshot oracle at training point `index`.
    #[error("oracle failed at training point {index}: {source}")]
    Oracle { index: usize, source: DynError },

    /// Error raised by the reference solver.
    #[error("reference solver failed: {0}")]
    Reference(DynError),

    /// Returned when a factorization does not produce a requested factor.
    #[error("SVD did not return the left singular vectors")]
    MissingFactor,

    /// [`EnergyError`]
    #[error("energy error: {0}")]
    Energy(#[from] EnergyError),

    /// [`LinalgError`]
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl BasisError {
    pub(crate) fn check_n_basis(n_basis: usize, n_train: usize)
        -> Result<(), Self>
    {
        if n_basis == 0 { return Err(Self::EmptyBasis); }
        (n_basis <= n_train).then_some(())
            .ok_or(Self::BasisSize { n_basis, n_train })
    }

    pub(crate) fn check_coefficients(expected: usize, got: usize)
        -> Result<(), Self>
    {
        (expected == got).then_some(())
            .ok_or(Self::Coefficients { expected, got })
    }
}
