//! Reduced bases and reconstruction of approximate wavefunctions.
//!
//! A [`RelativeBasis`] is trained once per interaction, energy, angular
//! momentum and training set, and is immutable afterwards. Reconstruction
//!
//! ```text
//! φ̂(c) = φ_free + Σ_i c[i] v_i
//! ```
//!
//! costs `O(mesh size × n_basis)` and never calls the oracle again, so a
//! single basis can serve any number of concurrent callers.

use std::sync::Arc;
use ndarray as nd;
use ndarray_linalg::LeastSquaresSvd;
use log::{ debug, warn };
use crate::{
    Arr1,
    Field,
    DEF_RANK_TOLERANCE,
    error::{ BasisError, LengthError },
    interaction::Interaction,
    reduce::{ Reduction, effective_rank, reduce },
    snapshot::{ BasisResult, SnapshotMatrix, assemble },
    solve::{ ReferenceSolution, SnapshotOracle },
};

/// Common interface for all reduced bases.
pub trait Basis<A: Field> {
    /// Get the number of active basis vectors.
    fn n_basis(&self) -> usize;

    /// Get a reference to the (dimensionless) mesh.
    fn mesh(&self) -> &nd::Array1<f64>;

    /// Get a reference to the free solution the basis is built around.
    fn reference(&self) -> &nd::Array1<A>;

    /// Reconstruct an approximate wavefunction from exactly
    /// [`n_basis`][Self::n_basis] coefficients.
    fn phi_hat(&self, coefficients: &[A]) -> BasisResult<nd::Array1<A>>;
}

/// Parameters for basis construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BasisParams {
    /// Center-of-mass energy (MeV).
    pub energy: f64,
    /// Orbital angular momentum.
    pub l: usize,
    /// Number of active basis vectors.
    pub n_basis: usize,
    /// Reduce snapshots via SVD (default: `true`).
    pub use_svd: bool,
    /// Relative threshold below which singular values are reported as
    /// negligible (default: `1e-10`).
    pub rank_tolerance: Option<f64>,
}

impl BasisParams {
    /// Create a new set of parameters with SVD reduction enabled.
    pub fn new(energy: f64, l: usize, n_basis: usize) -> Self {
        Self { energy, l, n_basis, use_svd: true, rank_tolerance: None }
    }

    /// Enable or disable SVD reduction.
    pub fn with_svd(mut self, use_svd: bool) -> Self {
        self.use_svd = use_svd;
        self
    }

    /// Set the relative singular value threshold for rank diagnostics.
    pub fn with_rank_tolerance(mut self, rtol: f64) -> Self {
        self.rank_tolerance = Some(rtol);
        self
    }
}

/// A basis of snapshots relative to the free solution.
///
/// Column `i` of [`Self::all_vectors`] is either the `i`-th snapshot minus the
/// free solution (no reduction) or the `i`-th left singular vector of the
/// snapshot matrix (with reduction). The active vectors are the first
/// `n_basis` of these.
#[derive(Clone, Debug)]
pub struct RelativeBasis<A> {
    theta_train: Vec<Vec<f64>>,
    s_mesh: nd::Array1<f64>,
    n_basis: usize,
    energy: f64,
    l: usize,
    phi_0: nd::Array1<A>,
    reduction: Arc<Reduction<A>>,
    vectors: nd::Array2<A>,
}

impl<A: Field> RelativeBasis<A> {
    /// Train a new basis, solving for one snapshot per training point.
    ///
    /// Fails before any snapshot is computed if `n_basis` is zero or exceeds
    /// the training set size, and fails as a whole if any solve fails.
    pub fn new<O, R, P>(
        interaction: &Interaction<A>,
        oracle: &O,
        reference: &R,
        theta_train: &[P],
        s_mesh: nd::Array1<f64>,
        params: BasisParams,
    ) -> BasisResult<Self>
    where
        O: SnapshotOracle<A> + ?Sized,
        R: ReferenceSolution<A> + ?Sized,
        P: AsRef<[f64]>,
    {
        BasisError::check_n_basis(params.n_basis, theta_train.len())?;
        let snapshots = assemble(
            interaction,
            oracle,
            reference,
            theta_train,
            s_mesh.view(),
            params.energy,
            params.l,
        )?;
        Self::from_snapshots(snapshots, theta_train, s_mesh, params)
    }

    /// Build a basis from already assembled snapshots.
    ///
    /// `theta_train` and `s_mesh` must be those the snapshots were computed
    /// for.
    pub fn from_snapshots<P>(
        snapshots: SnapshotMatrix<A>,
        theta_train: &[P],
        s_mesh: nd::Array1<f64>,
        params: BasisParams,
    ) -> BasisResult<Self>
    where P: AsRef<[f64]>
    {
        let BasisParams { energy, l, n_basis, use_svd, rank_tolerance } = params;
        BasisError::check_n_basis(n_basis, theta_train.len())?;
        LengthError::check_len(theta_train.len(), snapshots.n_train())
            .map_err(BasisError::SnapshotShape)?;
        LengthError::check_len(s_mesh.len(), snapshots.n_mesh())
            .map_err(BasisError::SnapshotShape)?;
        let (phi_0, matrix) = snapshots.into_parts();
        let reduction = reduce(matrix, use_svd)?;
        if let Some(sv) = reduction.singular_values() {
            let rtol = rank_tolerance.unwrap_or(DEF_RANK_TOLERANCE);
            let rank = effective_rank(sv, rtol);
            if rank < sv.len() {
                warn!(
                    "basis::RelativeBasis: {} of {} singular values are below \
                    {:e} relative to the largest; training snapshots are nearly \
                    collinear",
                    sv.len() - rank, sv.len(), rtol,
                );
            }
            if rank < n_basis {
                warn!(
                    "basis::RelativeBasis: {} active vectors requested but the \
                    effective rank is {}; trailing vectors are noise-dominated",
                    n_basis, rank,
                );
            }
        }
        let vectors = reduction.truncate(n_basis)?;
        debug!(
            "trained basis: {} of {} vectors active (svd = {})",
            n_basis, reduction.len(), use_svd,
        );
        let theta_train: Vec<Vec<f64>>
            = theta_train.iter()
            .map(|theta| theta.as_ref().to_vec())
            .collect();
        Ok(Self {
            theta_train,
            s_mesh,
            n_basis,
            energy,
            l,
            phi_0,
            reduction: Arc::new(reduction),
            vectors,
        })
    }

    /// Return a copy of `self` with a different number of active vectors.
    ///
    /// The full vector set is shared with `self` rather than copied, so the
    /// first `min(n_basis, self.n_basis())` active vectors are unchanged.
    pub fn truncated(&self, n_basis: usize) -> BasisResult<Self> {
        let vectors = self.reduction.truncate(n_basis)?;
        Ok(Self { n_basis, vectors, ..self.clone() })
    }

    /// Reconstruct an approximate wavefunction from exactly `n_basis`
    /// coefficients, promoting them to the field of the basis if necessary.
    pub fn reconstruct<C>(&self, coefficients: &[C])
        -> BasisResult<nd::Array1<A>>
    where C: Copy + Into<A>
    {
        BasisError::check_coefficients(self.n_basis, coefficients.len())?;
        let c: nd::Array1<A>
            = coefficients.iter().map(|ck| (*ck).into()).collect();
        Ok(&self.phi_0 + &self.vectors.dot(&c))
    }

    /// Find the coefficients whose reconstruction best approximates `phi` in
    /// the least-squares sense.
    ///
    /// For an SVD-reduced basis, these are the inner products of the active
    /// vectors with `phi - φ_free`.
    pub fn project<S>(&self, phi: &Arr1<S>)
        -> BasisResult<nd::Array1<A>>
    where S: nd::Data<Elem = A>
    {
        LengthError::check(&self.phi_0, phi).map_err(BasisError::Projection)?;
        let rel: nd::Array1<A> = phi - &self.phi_0;
        match self.reduction.as_ref() {
            Reduction::Svd { .. } => {
                Ok(self.vectors.t().mapv(|vk| vk.conj()).dot(&rel))
            },
            Reduction::Raw(_) => {
                let res = self.vectors.least_squares(&rel)?;
                Ok(res.solution)
            },
        }
    }

    /// Get the center-of-mass energy (MeV).
    pub fn energy(&self) -> f64 { self.energy }

    /// Get the orbital angular momentum.
    pub fn l(&self) -> usize { self.l }

    /// Get the training parameters, in snapshot order.
    pub fn training(&self) -> &[Vec<f64>] { &self.theta_train }

    /// Get the reduction used, along with all available vectors.
    pub fn reduction(&self) -> &Reduction<A> { &self.reduction }

    /// Get a reference to all available basis vectors (as columns).
    pub fn all_vectors(&self) -> &nd::Array2<A> { self.reduction.vectors() }

    /// Get a reference to the active basis vectors (as columns).
    pub fn vectors(&self) -> &nd::Array2<A> { &self.vectors }

    /// Get a reference to the singular values of the snapshot matrix, if it
    /// was reduced.
    pub fn singular_values(&self) -> Option<&nd::Array1<f64>> {
        self.reduction.singular_values()
    }
}

impl<A: Field> Basis<A> for RelativeBasis<A> {
    fn n_basis(&self) -> usize { self.n_basis }

    fn mesh(&self) -> &nd::Array1<f64> { &self.s_mesh }

    fn reference(&self) -> &nd::Array1<A> { &self.phi_0 }

    fn phi_hat(&self, coefficients: &[A]) -> BasisResult<nd::Array1<A>> {
        self.reconstruct(coefficients)
    }
}
