//! Free-particle (zero potential) solutions of the radial equation.
//!
//! In the dimensionless coordinate `s = p r`, the regular free solution is
//! the Riccati-Bessel function `F_l(s) = s j_l(s)`, with `F_0(s) = sin s`.

use ndarray as nd;
use crate::{
    Field,
    error::SolveError,
    solve::ReferenceSolution,
    utils::check_radial,
};

const SERIES_MAXITERS: usize = 500;

// power series
//   F_l(s) = s^(l+1) / (2l+1)!! Σ_k (-s²/2)^k / (k! (2l+3)(2l+5)...(2l+2k+1))
// used where upward recurrence loses precision
fn riccati_bessel_series(s: f64, l: usize) -> f64 {
    let lf = l as f64;
    let lead: f64
        = (0..=l)
        .fold(1.0, |acc, k| acc * s / (2.0 * k as f64 + 1.0));
    let x = -s.powi(2) / 2.0;
    let mut term: f64 = 1.0;
    let mut sum: f64 = 1.0;
    for k in 1..SERIES_MAXITERS {
        let kf = k as f64;
        term *= x / kf / (2.0 * lf + 2.0 * kf + 1.0);
        sum += term;
        if term.abs() <= f64::EPSILON * sum.abs() { break; }
    }
    lead * sum
}

/// Compute the Riccati-Bessel function `F_l(s) = s j_l(s)`.
///
/// Uses a power series for `s < l + 1` and upward recurrence otherwise.
pub fn riccati_bessel(s: f64, l: usize) -> f64 {
    if s == 0.0 { return 0.0; }
    if s < (l + 1) as f64 { return riccati_bessel_series(s, l); }
    let f0 = s.sin();
    if l == 0 { return f0; }
    let f1 = s.sin() / s - s.cos();
    let (mut fprev, mut fcur) = (f0, f1);
    for k in 1..l {
        let fnext = (2.0 * k as f64 + 1.0) / s * fcur - fprev;
        fprev = fcur;
        fcur = fnext;
    }
    fcur
}

/// The free solution `F_l(s)` as a [`ReferenceSolution`].
#[derive(Copy, Clone, Debug, Default)]
pub struct FreeSolution;

impl<A: Field> ReferenceSolution<A> for FreeSolution {
    type Error = SolveError;

    fn solve(&self, mesh: nd::ArrayView1<f64>, l: usize)
        -> Result<nd::Array1<A>, Self::Error>
    {
        check_radial(&mesh)?;
        Ok(mesh.mapv(|s| A::from_real(riccati_bessel(s, l))))
    }
}
