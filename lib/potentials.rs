//! Stock interactions for the nucleon-nucleon system.

use num_complex::Complex64 as C64;
use crate::{ interaction::Interaction, units::MU_NN };

/// Minnesota potential,
/// ```text
/// V(r) = V0R exp(-1.487 r²) + V0S exp(-0.465 r²)
/// ```
/// with `θ = [V0R, V0S]` in MeV.
///
/// *Panics if `theta` has fewer than 2 elements*.
pub fn mn_potential(r: f64, theta: &[f64]) -> f64 {
    let (v_0r, v_0s) = (theta[0], theta[1]);
    v_0r * (-1.487 * r.powi(2)).exp() + v_0s * (-0.465 * r.powi(2)).exp()
}

/// Minnesota potential with an imaginary singlet strength,
/// ```text
/// V(r) = V0R exp(-1.487 r²) + i V0S exp(-0.465 r²)
/// ```
/// with `θ = [V0R, V0S]` in MeV.
///
/// *Panics if `theta` has fewer than 2 elements*.
pub fn complex_mn_potential(r: f64, theta: &[f64]) -> C64 {
    let (v_r, v_i) = (theta[0], theta[1]);
    C64::new(
        v_r * (-1.487 * r.powi(2)).exp(),
        v_i * (-0.465 * r.powi(2)).exp(),
    )
}

/// The real Minnesota interaction in the NN system.
pub fn minnesota() -> Interaction<f64> {
    Interaction::new(mn_potential, MU_NN)
}

/// The complex Minnesota interaction in the NN system.
pub fn optical_minnesota() -> Interaction<C64> {
    Interaction::new(complex_mn_potential, MU_NN)
}
