//! Interfaces to the solvers that produce snapshot and reference
//! wavefunctions, along with a Numerov integrator for the radial scattering
//! equation.
//!
//! In the dimensionless coordinate `s = p r`, the radial equation at
//! center-of-mass energy `E` and orbital angular momentum `l` reads
//! ```text
//! φ''(s) = -Q(s) φ(s)
//! Q(s) = 1 - Ũ(s, θ, E) - l (l + 1) / s²
//! ```
//! where `Ũ` is the [scaled potential][crate::interaction::Interaction::tilde].

use ndarray as nd;
use crate::{
    Arr1,
    Field,
    error::{ SolveError, SolveError::{ ShortMesh, SingularStep } },
    free::riccati_bessel,
    interaction::Interaction,
    utils::{ check_radial, uniform_spacing },
};

pub(crate) const DEF_SPACING_RTOL: f64 = 1e-8;

pub type SolveResult<T> = Result<T, SolveError>;

/// A solver producing a single (expensive) snapshot wavefunction for one
/// parameter point.
///
/// Implementors must return an array of the same length as `mesh`, and should
/// be deterministic for fixed inputs.
pub trait SnapshotOracle<A: Field> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Solve for `φ(s)` on `mesh` at energy `energy` (MeV), parameters
    /// `params`, and orbital angular momentum `l`.
    ///
    /// `boundary` overrides the initial condition pair `(φ(s₀), φ'(s₀))`;
    /// `None` means the solver's own default.
    fn solve(
        &self,
        interaction: &Interaction<A>,
        energy: f64,
        params: &[f64],
        mesh: nd::ArrayView1<f64>,
        l: usize,
        boundary: Option<(A, A)>,
    ) -> Result<nd::Array1<A>, Self::Error>;
}

/// A solver producing the free (zero potential) wavefunction subtracted from
/// every snapshot.
pub trait ReferenceSolution<A: Field> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Solve for the free `φ(s)` on `mesh` with orbital angular momentum `l`.
    fn solve(&self, mesh: nd::ArrayView1<f64>, l: usize)
        -> Result<nd::Array1<A>, Self::Error>;
}

#[derive(Copy, Clone, Debug)]
struct Window<T>(T, T);

impl<T: Copy> Window<T> {
    fn push(&mut self, val: T) { self.0 = self.1; self.1 = val; }
}

// Q(s); the centrifugal term is dropped at the origin, where the regular
// solution vanishes
fn q_func<A: Field>(u: A, s: f64, l: usize) -> A {
    let centrifugal
        = if s == 0.0 { 0.0 } else { (l * (l + 1)) as f64 / s.powi(2) };
    A::one() - u - A::from_real(centrifugal)
}

/// Perform a Numerov integration of `φ'' = -Q φ`, starting on the left, for
/// `Q` sampled over even intervals `dx`.
///
/// The second point is seeded with a third-order Taylor expansion from the
/// initial conditions `(φ(x₀), φ'(x₀)) = (q0, dq0)`, neglecting the variation
/// of `Q` across the first interval. The result is not normalized.
///
/// *Panics if `Q` has length less than 2*.
pub fn numerov<S, A>(dx: f64, Q: &Arr1<S>, q0: A, dq0: A)
    -> SolveResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Field,
{
    let h = A::from_real(dx);
    let q1
        = q0 + h * dq0
        - h * h / A::from_real(2.0) * Q[0] * q0
        - h * h * h / A::from_real(6.0) * Q[0] * dq0;
    numerov_seeded(dx, Q, q0, q1)
}

/// Perform a Numerov integration of `φ'' = -Q φ` from the first two values
/// `(φ(x₀), φ(x₁)) = (q0, q1)`, for `Q` sampled over even intervals `dx`.
///
/// Fails if a step would divide by `1 + dx² Q / 12` where it is zero or
/// non-finite.
///
/// *Panics if `Q` has length less than 2*.
pub fn numerov_seeded<S, A>(dx: f64, Q: &Arr1<S>, q0: A, q1: A)
    -> SolveResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Field,
{
    let n = Q.len();
    let a = A::from_real(dx.powi(2) / 12.0);
    let mut q: nd::Array1<A> = nd::Array1::zeros(n);
    q[0] = q0;
    q[1] = q1;
    let mut qprev = Window(q0, q1);
    let mut Fprev = Window(A::one() + a * Q[0], A::one() + a * Q[1]);
    let mut qnext: A;
    let mut Fnext: A;
    let iter = q.iter_mut().zip(Q.iter()).enumerate().skip(2);
    for (index, (qk, &Qk)) in iter {
        Fnext = A::one() + a * Qk;
        let finite = Fnext.re().is_finite() && Fnext.im().is_finite();
        if Fnext.is_zero() || !finite { return Err(SingularStep { index }); }
        qnext = (
            (A::from_real(12.0) - A::from_real(10.0) * Fprev.1) * qprev.1
            - Fprev.0 * qprev.0
        ) / Fnext;
        *qk = qnext;
        qprev.push(qnext);
        Fprev.push(Fnext);
    }
    Ok(q)
}

/// Numerov-based [`SnapshotOracle`] for the radial scattering equation.
///
/// Requires a uniformly spaced, non-negative mesh of at least 3 points.
/// Explicit initial conditions `(φ(s₀), φ'(s₀))` are applied at the first
/// mesh point. Without them, the `s`-wave starts from `(0, 1)` and higher
/// partial waves are seeded with the regular free solution `F_l` on the
/// first two mesh points away from the origin, so that a vanishing potential reproduces
/// [`FreeSolution`][crate::free::FreeSolution] exactly.
#[derive(Copy, Clone, Debug)]
pub struct Numerov {
    /// Relative tolerance on mesh spacing (default: `1e-8`).
    pub spacing_rtol: f64,
}

impl Default for Numerov {
    fn default() -> Self { Self { spacing_rtol: DEF_SPACING_RTOL } }
}

impl Numerov {
    /// Solve for `φ(s)` on `mesh`.
    pub fn phi<A: Field>(
        &self,
        interaction: &Interaction<A>,
        energy: f64,
        params: &[f64],
        mesh: nd::ArrayView1<f64>,
        l: usize,
        boundary: Option<(A, A)>,
    ) -> SolveResult<nd::Array1<A>>
    {
        let n = mesh.len();
        if n < 3 { return Err(ShortMesh { min: 3, got: n }); }
        check_radial(&mesh)?;
        let ds = uniform_spacing(&mesh, self.spacing_rtol)?;
        interaction.momentum(energy)?;
        let Q: nd::Array1<A>
            = mesh.iter()
            .map(|&s| {
                interaction.tilde(s, params, energy)
                    .map(|u| q_func(u, s, l))
            })
            .collect::<Result<_, _>>()?;
        match boundary {
            Some((q0, dq0)) => numerov(ds, &Q, q0, dq0),
            None if l == 0 => {
                let (q0, dq0) = A::default_boundary();
                numerov(ds, &Q, q0, dq0)
            },
            None => {
                // Q φ has a finite limit at the origin that Q alone doesn't
                // carry, so start past it
                let k0 = usize::from(mesh[0] == 0.0);
                let q0 = A::from_real(riccati_bessel(mesh[k0], l));
                let q1 = A::from_real(riccati_bessel(mesh[k0 + 1], l));
                let tail = numerov_seeded(ds, &Q.slice(nd::s![k0..]), q0, q1)
                    .map_err(|err| match err {
                        SingularStep { index } => {
                            SingularStep { index: index + k0 }
                        },
                        err => err,
                    })?;
                let mut phi: nd::Array1<A> = nd::Array1::zeros(n);
                phi.slice_mut(nd::s![k0..]).assign(&tail);
                Ok(phi)
            },
        }
    }
}

impl<A: Field> SnapshotOracle<A> for Numerov {
    type Error = SolveError;

    fn solve(
        &self,
        interaction: &Interaction<A>,
        energy: f64,
        params: &[f64],
        mesh: nd::ArrayView1<f64>,
        l: usize,
        boundary: Option<(A, A)>,
    ) -> SolveResult<nd::Array1<A>>
    {
        self.phi(interaction, energy, params, mesh, l, boundary)
    }
}
