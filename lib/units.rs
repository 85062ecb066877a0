//! Physical constants and the unit conversions shared by every part of the
//! basis pipeline.
//!
//! Energies are in MeV, lengths in fm. Masses are given in MeV and stored
//! internally in fm⁻¹ after a single division by [`HBARC`]. Concrete values
//! are taken from CODATA 2018.

/// ħc (MeV fm)
pub const HBARC: f64 = 197.3269804;
//                 +/- 0 (exact)

/// neutron mass (MeV)
pub const NUCLEON_MASS: f64 = 939.565;
//                        (rounded from 939.56542052)

/// reduced mass of the nucleon-nucleon system (MeV)
pub const MU_NN: f64 = NUCLEON_MASS / 2.0;

/// Convert a mass in MeV to fm⁻¹.
///
/// This is the only place a mass changes units.
pub fn mass_to_inverse_length(mass: f64) -> f64 {
    mass / HBARC
}

/// Compute the relative momentum `p = √(2 μ E) / ħc` (fm⁻¹) for a reduced
/// mass `mu` already in fm⁻¹ and a center-of-mass energy in MeV.
///
/// This assumes `energy > 0`; callers are responsible for checking.
pub fn momentum(mu: f64, energy: f64) -> f64 {
    (2.0 * mu * energy / HBARC).sqrt()
}
