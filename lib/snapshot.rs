//! Assembly of the snapshot matrix from oracle solutions.

use ndarray as nd;
use log::debug;
use crate::{
    Field,
    error::{ BasisError, EnergyError, LengthError },
    interaction::Interaction,
    solve::{ ReferenceSolution, SnapshotOracle },
};

pub type BasisResult<T> = Result<T, BasisError>;

/// Snapshots relative to the free solution.
///
/// Column `i` of [`Self::matrix`] is `φ(θ_i) - φ_free` for the `i`-th training
/// point, in training-set order.
#[derive(Clone, Debug)]
pub struct SnapshotMatrix<A> {
    reference: nd::Array1<A>,
    matrix: nd::Array2<A>,
}

impl<A: Field> SnapshotMatrix<A> {
    /// Get a reference to the free solution subtracted from each snapshot.
    pub fn reference(&self) -> &nd::Array1<A> { &self.reference }

    /// Get a reference to the (mesh × training size) matrix of snapshots.
    pub fn matrix(&self) -> &nd::Array2<A> { &self.matrix }

    /// Get the number of mesh points.
    pub fn n_mesh(&self) -> usize { self.matrix.nrows() }

    /// Get the number of training points.
    pub fn n_train(&self) -> usize { self.matrix.ncols() }

    /// Decompose into the reference solution and snapshot matrix.
    pub fn into_parts(self) -> (nd::Array1<A>, nd::Array2<A>) {
        (self.reference, self.matrix)
    }
}

/// Solve for a snapshot at every training point and subtract the free
/// solution from each.
///
/// For complex fields, the oracle is passed the complex initial conditions
/// `(0 + 0i, 1 + 0i)` explicitly; for real fields it is passed `None`.
///
/// Any solver failure or length mismatch fails the whole assembly.
pub fn assemble<A, O, R, P>(
    interaction: &Interaction<A>,
    oracle: &O,
    reference: &R,
    theta_train: &[P],
    s_mesh: nd::ArrayView1<f64>,
    energy: f64,
    l: usize,
) -> BasisResult<SnapshotMatrix<A>>
where
    A: Field,
    O: SnapshotOracle<A> + ?Sized,
    R: ReferenceSolution<A> + ?Sized,
    P: AsRef<[f64]>,
{
    if theta_train.is_empty() { return Err(BasisError::EmptyTraining); }
    EnergyError::check(energy)?;
    let n = s_mesh.len();
    let phi_0: nd::Array1<A>
        = reference.solve(s_mesh, l)
        .map_err(|err| BasisError::Reference(Box::new(err)))?;
    LengthError::check_len(n, phi_0.len())
        .map_err(BasisError::ReferenceLength)?;

    let boundary = A::IS_COMPLEX.then(A::default_boundary);
    debug!(
        "assembling {} snapshots on {} mesh points (E = {} MeV, l = {}, complex = {})",
        theta_train.len(), n, energy, l, A::IS_COMPLEX,
    );
    let mut matrix: nd::Array2<A> = nd::Array2::zeros((n, theta_train.len()));
    let iter
        = theta_train.iter()
        .zip(matrix.columns_mut())
        .enumerate();
    for (index, (theta, mut col)) in iter {
        let phi: nd::Array1<A>
            = oracle.solve(
                interaction, energy, theta.as_ref(), s_mesh, l, boundary)
            .map_err(|err| BasisError::Oracle { index, source: Box::new(err) })?;
        LengthError::check_len(n, phi.len())
            .map_err(|source| BasisError::SnapshotLength { index, source })?;
        nd::Zip::from(&mut col).and(&phi).and(&phi_0)
            .for_each(|ck, pk, p0k| { *ck = *pk - *p0k; });
    }
    Ok(SnapshotMatrix { reference: phi_0, matrix })
}
