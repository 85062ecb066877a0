//! Dimensionality reduction of a snapshot matrix.
//!
//! With reduction enabled, the snapshot matrix `X` (mesh × training size) is
//! factored as `X = U Σ V†` and the thin set of left singular vectors
//! `U[:, ..min(m, n)]` is kept as the basis, ranked by the singular values in
//! `Σ` (non-increasing). Without reduction, the snapshots themselves are the
//! basis, in training order.
//!
//! Singular values near zero indicate nearly collinear snapshots; the
//! corresponding vectors are dominated by noise. They are kept and exposed to
//! the caller rather than silently dropped (see [`effective_rank`]).

use ndarray as nd;
use ndarray_linalg::{ JobSvd, SVDDCInto };
use crate::{
    Arr1,
    Field,
    error::BasisError,
    snapshot::BasisResult,
};

/// A set of basis vectors, tagged by how they were obtained.
#[derive(Clone, Debug)]
pub enum Reduction<A> {
    /// Raw snapshots; neither orthonormal nor ranked.
    Raw(nd::Array2<A>),
    /// Orthonormal left singular vectors with their singular values.
    Svd {
        /// Left singular vectors as columns.
        vectors: nd::Array2<A>,
        /// Singular values in non-increasing order.
        singular_values: nd::Array1<f64>,
    },
}

impl<A> Reduction<A> {
    /// Get a reference to all basis vectors (as columns).
    pub fn vectors(&self) -> &nd::Array2<A> {
        match self {
            Self::Raw(vectors) => vectors,
            Self::Svd { vectors, .. } => vectors,
        }
    }

    /// Get a reference to the singular values, if the SVD was performed.
    pub fn singular_values(&self) -> Option<&nd::Array1<f64>> {
        match self {
            Self::Raw(_) => None,
            Self::Svd { singular_values, .. } => Some(singular_values),
        }
    }

    /// Return `true` if `self` is `Raw`.
    pub fn is_raw(&self) -> bool { matches!(self, Self::Raw(_)) }

    /// Return `true` if `self` is `Svd`.
    pub fn is_svd(&self) -> bool { matches!(self, Self::Svd { .. }) }

    /// Get the total number of available basis vectors.
    pub fn len(&self) -> usize { self.vectors().ncols() }

    /// Return `true` if there are no basis vectors.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<A: Field> Reduction<A> {
    /// Copy out the first `n_basis` vectors.
    pub fn truncate(&self, n_basis: usize) -> BasisResult<nd::Array2<A>> {
        BasisError::check_n_basis(n_basis, self.len())?;
        Ok(self.vectors().slice(nd::s![.., ..n_basis]).to_owned())
    }
}

/// Reduce a snapshot matrix, optionally via a thin SVD.
///
/// Only the `min(m, n)` leading left singular vectors are ever computed.
pub fn reduce<A: Field>(matrix: nd::Array2<A>, use_svd: bool)
    -> BasisResult<Reduction<A>>
{
    if !use_svd { return Ok(Reduction::Raw(matrix)); }
    let (u, singular_values, _) = matrix.svddc_into(JobSvd::Some)?;
    let vectors: nd::Array2<A> = u.ok_or(BasisError::MissingFactor)?;
    Ok(Reduction::Svd { vectors, singular_values })
}

/// Count the singular values larger than `rtol` times the largest one.
pub fn effective_rank<S>(singular_values: &Arr1<S>, rtol: f64)
    -> usize
where S: nd::Data<Elem = f64>
{
    let smax = singular_values.iter().copied().fold(0.0, f64::max);
    if smax > 0.0 {
        singular_values.iter().filter(|&&sk| sk > rtol * smax).count()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64 as C64;
    use crate::utils::dot;

    fn snapshots() -> nd::Array2<f64> {
        let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 50);
        let mut x: nd::Array2<f64> = nd::Array2::zeros((50, 3));
        x.column_mut(0).assign(&s.mapv(|sk| sk.sin()));
        x.column_mut(1).assign(&s.mapv(|sk| sk * (-sk).exp()));
        x.column_mut(2).assign(&s.mapv(|sk| (2.0 * sk).cos() - 1.0));
        x
    }

    fn assert_orthonormal<A: Field>(v: &nd::Array2<A>) {
        for i in 0..v.ncols() {
            for j in 0..v.ncols() {
                let d: A = dot(&v.column(i), &v.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(d.re(), expected, epsilon = 1e-10);
                assert_abs_diff_eq!(d.im(), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn raw_is_passthrough() {
        let x = snapshots();
        let red = reduce(x.clone(), false).unwrap();
        assert!(red.is_raw());
        assert!(red.singular_values().is_none());
        assert_eq!(red.vectors(), &x);
    }

    #[test]
    fn svd_is_thin_ordered_orthonormal() {
        let red = reduce(snapshots(), true).unwrap();
        assert!(red.is_svd());
        assert_eq!(red.vectors().dim(), (50, 3));
        let sv = red.singular_values().unwrap();
        assert_eq!(sv.len(), 3);
        assert!(sv.iter().zip(sv.iter().skip(1)).all(|(a, b)| a >= b));
        assert_orthonormal(red.vectors());
    }

    #[test]
    fn svd_spans_snapshots() {
        // each snapshot is reproduced by projection onto the basis
        let x = snapshots();
        let red = reduce(x.clone(), true).unwrap();
        let v = red.vectors();
        for col in x.columns() {
            let c: nd::Array1<f64> = v.t().dot(&col);
            let back = v.dot(&c);
            back.iter().zip(col)
                .for_each(|(b, x)| assert_abs_diff_eq!(*b, *x, epsilon = 1e-10));
        }
    }

    #[test]
    fn complex_svd() {
        let x: nd::Array2<C64>
            = snapshots().mapv(C64::from)
            + snapshots().mapv(|xk| C64::new(0.0, 0.5 * xk.powi(2)));
        let red = reduce(x, true).unwrap();
        assert_orthonormal(red.vectors());
    }

    #[test]
    fn rank_deficiency_is_exposed() {
        let mut x = snapshots();
        let c0 = x.column(0).to_owned();
        x.column_mut(2).assign(&(2.0 * &c0));
        let red = reduce(x, true).unwrap();
        let sv = red.singular_values().unwrap();
        assert_eq!(sv.len(), 3);
        assert!(sv[2] < 1e-10 * sv[0]);
        assert_eq!(effective_rank(sv, 1e-8), 2);
        assert_eq!(effective_rank(&nd::Array1::<f64>::zeros(3), 1e-8), 0);
    }

    #[test]
    fn truncation_keeps_leading_columns() {
        let red = reduce(snapshots(), true).unwrap();
        let v1 = red.truncate(1).unwrap();
        let v2 = red.truncate(2).unwrap();
        assert_eq!(v1.column(0), v2.column(0));
        assert_eq!(v2.column(1), red.vectors().column(1));
        assert!(red.truncate(0).is_err());
        assert!(red.truncate(4).is_err());
    }

    #[test]
    fn tall_matrix_gives_thin_factor() {
        let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 20.0, 4000);
        let x: nd::Array2<f64>
            = nd::Array2::from_shape_fn((4000, 4), |(k, i)| {
                (s[k] * (i + 1) as f64).sin() * (-0.1 * s[k] * i as f64).exp()
            });
        let red = reduce(x, true).unwrap();
        assert_eq!(red.vectors().dim(), (4000, 4));
        assert_eq!(red.singular_values().unwrap().len(), 4);
        assert_orthonormal(red.vectors());
    }

    #[test]
    fn wide_matrix_keeps_min_dimension() {
        let x: nd::Array2<f64> = snapshots().t().slice(nd::s![.., ..10]).to_owned();
        let red = reduce(x, true).unwrap();
        assert_eq!(red.vectors().dim(), (3, 3));
        assert_eq!(red.singular_values().unwrap().len(), 3);
    }
}
