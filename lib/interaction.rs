//! Parametrized potentials in coordinate space.
//!
//! An [`Interaction`] couples a potential family `V(r, θ)` to the reduced
//! mass of the two-body system it acts in. Real potentials use `f64` values
//! and complex (optical) potentials use [`Complex64`][num_complex::Complex64];
//! the choice is carried by the type parameter rather than a runtime flag.

use std::fmt;
use crate::{
    Field,
    error::EnergyError,
    units,
};

/// Boxed potential function `V(r, θ)`, with `r` in fm and the result in MeV.
pub type Potential<A> = Box<dyn Fn(f64, &[f64]) -> A + Send + Sync>;

/// A potential family `V(r, θ)` together with the reduced mass of the system.
///
/// Immutable after construction and freely shareable between threads.
pub struct Interaction<A> {
    v_r: Potential<A>,
    // reduced mass; fm⁻¹
    mu: f64,
}

impl<A> fmt::Debug for Interaction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("mu", &self.mu)
            .finish_non_exhaustive()
    }
}

impl<A: Field> Interaction<A> {
    /// Create a new `Interaction` from a potential and a reduced mass in MeV.
    ///
    /// The mass is converted to fm⁻¹ here, once; [`Self::mu`] always returns
    /// the converted value.
    pub fn new<F>(coordinate_space_potential: F, mass: f64) -> Self
    where F: Fn(f64, &[f64]) -> A + Send + Sync + 'static
    {
        Self {
            v_r: Box::new(coordinate_space_potential),
            mu: units::mass_to_inverse_length(mass),
        }
    }

    /// Get the reduced mass in fm⁻¹.
    pub fn mu(&self) -> f64 { self.mu }

    /// Return `true` if the potential is complex-valued.
    pub fn is_complex(&self) -> bool { A::IS_COMPLEX }

    /// Evaluate `V(r, θ)` for `r` in fm, returning MeV.
    pub fn evaluate(&self, r: f64, params: &[f64]) -> A {
        (self.v_r)(r, params)
    }

    /// Compute the relative momentum (fm⁻¹) associated with a center-of-mass
    /// energy (MeV).
    pub fn momentum(&self, energy: f64) -> Result<f64, EnergyError> {
        EnergyError::check(energy)?;
        Ok(units::momentum(self.mu, energy))
    }

    /// Evaluate the dimensionless potential
    /// ```text
    /// Ũ(s, θ, E) = V(s / p, θ) / E
    /// ```
    /// where `s = p r` and `p` is the relative momentum at energy `E`.
    ///
    /// Fails for non-positive energies.
    pub fn tilde(&self, s: f64, params: &[f64], energy: f64)
        -> Result<A, EnergyError>
    {
        let p = self.momentum(energy)?;
        Ok(self.evaluate(s / p, params).div_real(energy))
    }
}
