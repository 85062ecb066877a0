//! Miscellaneous tools.

use ndarray as nd;
use ndarray_linalg::Scalar;
use crate::{ Arr1, error::SolveError };

/// Calculate the discrete inner product `Σ_k conj(q[k]) p[k]` of two vectors
/// sampled on the same mesh.
///
/// This is the inner product under which SVD-reduced basis vectors are
/// orthonormal. Extra elements in the longer array are ignored.
pub fn dot<S, T, A>(q: &Arr1<S>, p: &Arr1<T>) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter().zip(p)
        .fold(A::zero(), |acc, (qk, pk)| acc + qk.conj() * *pk)
}

/// Calculate the Euclidean norm of a vector.
pub fn norm<S, A>(q: &Arr1<S>) -> f64
where
    S: nd::Data<Elem = A>,
    A: Scalar<Real = f64>,
{
    q.iter()
        .fold(0.0, |acc, qk| acc + qk.square())
        .sqrt()
}

/// Return the spacing of a mesh, checking that it is increasing and uniform to
/// within a relative tolerance `rtol`.
///
/// *Panics if `x` has length less than 2*.
pub fn uniform_spacing<S>(x: &Arr1<S>, rtol: f64)
    -> Result<f64, SolveError>
where S: nd::Data<Elem = f64>
{
    let dx = x[1] - x[0];
    let bad
        = x.iter().zip(x.iter().skip(1)).enumerate()
        .map(|(k, (xk, xkp1))| (k, (*xkp1 - *xk - dx).abs()))
        .find(|(_, dev)| !(dx > 0.0 && *dev <= rtol * dx));
    match bad {
        Some((index, deviation)) => {
            Err(SolveError::NonUniformMesh { index, expected: dx, deviation })
        },
        None => Ok(dx),
    }
}

/// Check that every point in a radial mesh is non-negative.
pub fn check_radial<S>(x: &Arr1<S>) -> Result<(), SolveError>
where S: nd::Data<Elem = f64>
{
    match x.iter().find(|xk| !(**xk >= 0.0)) {
        Some(xk) => Err(SolveError::NegativeMesh(*xk)),
        None => Ok(()),
    }
}
