//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Numerov integration](#numerov-integration)
//! - [Reduced bases](#reduced-bases)
//!
//! # Background
//! Two-body scattering at center-of-mass energy *E* through a central
//! potential *V*(*r*, *θ*), with *θ* a vector of parameters (e.g. coupling
//! strengths), is described in each partial wave *l* by the radial
//! Schrödinger equation for *u*(*r*) ≡ *r* *R*(*r*),
//! ```text
//!    ħ² ∂²u               l (l + 1) ħ²
//! - --- --- + V(r) u(r) + ------------ u(r) = E u(r)
//!   2 μ ∂r²                  2 μ r²
//! ```
//! where *μ* is the reduced mass. Every evaluation of some observable at a new
//! *θ* requires a new solution of this equation; when many evaluations are
//! needed (e.g. for parameter estimation or uncertainty quantification), those
//! solves dominate the cost.
//!
//! # Units
//! Energies are measured in MeV and lengths in fm. Introducing the relative
//! momentum
//! ```text
//!      √(2 μ E)
//! p = ---------
//!         ħ
//! ```
//! and the dimensionless coordinate *s* ≡ *p* *r*, then dividing through by
//! *E*, gives
//! ```text
//!  ∂²φ        l (l + 1)
//! ---- + (1 - --------- - Ũ(s, θ, E)) φ(s) = 0
//!  ∂s²           s²
//!
//! Ũ(s, θ, E) = V(s / p, θ) / E
//! ```
//! with *φ*(*s*) = *u*(*s* / *p*). The reduced mass is supplied in MeV (i.e.
//! as *μ* *c*²) and converted once to fm⁻¹ by dividing by *ħ* *c*; the momentum
//! is then *p* = √(2 *μ* *E* / *ħ* *c*) in fm⁻¹. Both conversions live in
//! [`units`][crate::units] so that the scaled potential and every solver agree
//! on the same value of *p*.
//!
//! For *Ũ* = 0 the regular solution is the Riccati-Bessel function
//! *F*<sub>*l*</sub>(*s*) = *s* *j*<sub>*l*</sub>(*s*), which reduces to sin
//! *s* for *l* = 0.
//!
//! # Numerov integration
//! Writing the equation as *φ*'' = -*Q*(*s*) *φ*, Numerov's method[^1] advances
//! a uniformly sampled solution with the three-point relation
//! ```text
//!      δs²                             5 δs²                   δs²
//! (1 + --- Q[i + 1]) φ[i + 1] = 2 (1 - ----- Q[i]) φ[i] - (1 + --- Q[i - 1]) φ[i - 1]
//!      12                               12                     12
//! ```
//! which carries an *O*(*δs*⁶) local error. Integration starts at the first
//! mesh point from a pair of initial conditions (*φ*(*s*₀), *φ*'(*s*₀)),
//! by default (0, 1), with the second point seeded from a Taylor expansion.
//! For *l* ≥ 1 the product *Q* *φ* tends to a finite, non-zero limit at the
//! origin while *Q* itself diverges, so by default the integration instead
//! starts from the values of *F*<sub>*l*</sub> on the first two points past
//! the origin. For
//! complex (optical) potentials, the same recurrence is carried out in complex
//! arithmetic, and the initial conditions are taken to be complex as well.
//!
//! # Reduced bases
//! The reduced basis method[^2] exploits the fact that solutions *φ*(*s*; *θ*)
//! for different *θ* are highly correlated, and live close to a
//! low-dimensional subspace. Given a set of training points *θ*<sub>1</sub>,
//! ..., *θ*<sub>*n*</sub>, we form the snapshot matrix
//! ```text
//! X[k, i] = φ(s[k]; θ_i) - F_l(s[k])
//! ```
//! Subtracting the free solution removes the part common to every snapshot,
//! leaving only the response to the potential. The thin singular value
//! decomposition
//! ```text
//! X = U Σ V†
//! ```
//! provides orthonormal columns *U*\[:, *i*\] ranked by the singular values
//! *σ*<sub>1</sub> ≥ *σ*<sub>2</sub> ≥ ... ≥ 0, so that keeping the first
//! *n*<sub>basis</sub> columns gives the best rank-*n*<sub>basis</sub>
//! approximation to the span of the snapshots (Eckart-Young). Singular values
//! close to zero signal that the training snapshots are nearly collinear and
//! that the corresponding directions are mostly numerical noise.
//!
//! An approximate solution at any *θ* is then
//! ```text
//! φ̂(s) = F_l(s) + Σ_i c_i U[:, i]
//! ```
//! where the coefficients *c* are to be determined by some cheap procedure
//! (e.g. a Galerkin projection of the radial equation, or a least-squares fit
//! to a known solution). Reconstruction costs only *O*(*N* *n*<sub>basis</sub>)
//! for a mesh of *N* points.
//!
//! [^1]: B. Numerov, "Note on the numerical integration of d2x/dt2 = f(x,t)."
//! Astronomische Nachrichten **230** 19 (1927).
//!
//! [^2]: C. Drischler, M. Quinonez, P. G. Giuliani, A. E. Lovell, and F. M.
//! Nunes, "Toward emulating nuclear reactions using eigenvector continuation."
//! Physics Letters B **823** 136777 (2021).
