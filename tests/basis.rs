use std::f64::consts::PI;
use approx::assert_abs_diff_eq;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rose::{
    basis::{ Basis, BasisParams, RelativeBasis },
    error::{ BasisError, SolveError },
    free::FreeSolution,
    interaction::Interaction,
    potentials,
    snapshot::assemble,
    solve::{ Numerov, SnapshotOracle },
    units::MU_NN,
    utils::{ dot, norm },
};

const ENERGY: f64 = 50.0; // MeV

fn training() -> Vec<Vec<f64>> {
    vec![
        vec![200.0, -91.85],
        vec![150.0, -70.0],
        vec![260.0, -110.0],
    ]
}

#[test]
fn minnesota_three_snapshots_two_vectors() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 50);
    let basis = RelativeBasis::new(
        &potentials::minnesota(),
        &Numerov::default(),
        &FreeSolution,
        &training(),
        s,
        BasisParams::new(ENERGY, 0, 2),
    ).unwrap();

    assert_eq!(basis.vectors().dim(), (50, 2));
    let sv = basis.singular_values().unwrap();
    assert_eq!(sv.len(), 3);
    assert!(sv.iter().zip(sv.iter().skip(1)).all(|(a, b)| a >= b));

    let phi = basis.reconstruct(&[1.0, 0.0]).unwrap();
    let expected = basis.reference() + &basis.vectors().column(0);
    phi.iter().zip(&expected)
        .for_each(|(p, e)| assert_abs_diff_eq!(*p, *e, epsilon = 1e-12));

    let v = basis.vectors();
    assert_abs_diff_eq!(dot(&v.column(0), &v.column(0)), 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(dot(&v.column(1), &v.column(1)), 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(dot(&v.column(0), &v.column(1)), 0.0, epsilon = 1e-10);

    assert!(matches!(
        basis.reconstruct(&[1.0]),
        Err(BasisError::Coefficients { expected: 2, got: 1 })
    ));
}

#[test]
fn raw_basis_reproduces_oracle_snapshots() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 6.0 * PI, 400);
    let mn = potentials::minnesota();
    let oracle = Numerov::default();
    let train = training();
    let basis = RelativeBasis::new(
        &mn, &oracle, &FreeSolution, &train, s.clone(),
        BasisParams::new(ENERGY, 0, 3).with_svd(false),
    ).unwrap();
    assert!(basis.singular_values().is_none());
    for (i, theta) in train.iter().enumerate() {
        let mut c = [0.0; 3];
        c[i] = 1.0;
        let phi = basis.phi_hat(&c).unwrap();
        let direct = oracle.phi(&mn, ENERGY, theta, s.view(), 0, None).unwrap();
        phi.iter().zip(&direct)
            .for_each(|(p, d)| assert_abs_diff_eq!(*p, *d, epsilon = 1e-12));
    }
}

#[test]
fn emulates_unseen_parameters() {
    // a point inside the training region should be well captured by the span
    // of the training snapshots
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 6.0 * PI, 600);
    let mn = potentials::minnesota();
    let oracle = Numerov::default();
    let train: Vec<Vec<f64>>
        = (0..4)
        .flat_map(|i| (0..4).map(move |j| (i, j)))
        .map(|(i, j)| {
            vec![150.0 + 100.0 * i as f64 / 3.0, -110.0 + 40.0 * j as f64 / 3.0]
        })
        .collect();
    let basis = RelativeBasis::new(
        &mn, &oracle, &FreeSolution, &train, s.clone(),
        BasisParams::new(ENERGY, 0, 12),
    ).unwrap();
    let theta = [210.0, -85.0];
    let exact = oracle.phi(&mn, ENERGY, &theta, s.view(), 0, None).unwrap();
    let c = basis.project(&exact).unwrap();
    let phi_hat = basis.reconstruct(c.as_slice().unwrap()).unwrap();
    let err = norm(&(&phi_hat - &exact)) / norm(&exact);
    assert!(err < 1e-2, "relative error {:e}", err);
}

#[test]
fn truncation_only_appends() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 200);
    let full = RelativeBasis::new(
        &potentials::minnesota(), &Numerov::default(), &FreeSolution,
        &training(), s, BasisParams::new(ENERGY, 0, 1),
    ).unwrap();
    let two = full.truncated(2).unwrap();
    let three = full.truncated(3).unwrap();
    assert_eq!(two.vectors().column(0), full.vectors().column(0));
    assert_eq!(three.vectors().slice(nd::s![.., ..2]), two.vectors().view());
}

#[test]
fn free_interaction_has_vanishing_residuals() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 6.0 * PI, 3000);
    let free: Interaction<f64>
        = Interaction::new(|_: f64, theta: &[f64]| 0.0 * theta[0], MU_NN);
    let train = [[1.0], [2.0]];
    let snaps = assemble(
        &free, &Numerov::default(), &FreeSolution, &train, s.view(), ENERGY, 0,
    ).unwrap();
    assert!(snaps.matrix().iter().all(|x| x.abs() < 1e-6));
}

#[test]
fn free_interaction_has_vanishing_residuals_in_higher_waves() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 6.0 * PI, 3000);
    let free: Interaction<f64>
        = Interaction::new(|_: f64, theta: &[f64]| 0.0 * theta[0], MU_NN);
    let train = [[1.0], [2.0]];
    for l in [1, 2] {
        let snaps = assemble(
            &free, &Numerov::default(), &FreeSolution, &train, s.view(),
            ENERGY, l,
        ).unwrap();
        let worst = snaps.matrix().iter().fold(0.0, |a: f64, x| a.max(x.abs()));
        assert!(worst < 1e-6, "l = {}: residual {:e}", l, worst);
    }
}

#[test]
fn optical_basis_is_complex() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 300);
    let train = vec![vec![200.0, -10.0], vec![180.0, -20.0], vec![220.0, -5.0]];
    let basis: RelativeBasis<C64> = RelativeBasis::new(
        &potentials::optical_minnesota(),
        &Numerov::default(),
        &FreeSolution,
        &train,
        s,
        BasisParams::new(ENERGY, 0, 2),
    ).unwrap();
    let phi: nd::Array1<C64> = basis.reconstruct(&[1.0, 0.5]).unwrap();
    assert_eq!(phi.len(), 300);
    assert!(phi.iter().any(|p| p.im.abs() > 1e-8));
    let zero = basis.reconstruct(&[0.0, 0.0]).unwrap();
    assert_eq!(&zero, basis.reference());
}

#[test]
fn oracle_errors_abort_training() {
    let uneven = nd::array![0.0, 0.1, 0.25, 0.3, 0.4];
    let res = RelativeBasis::new(
        &potentials::minnesota(), &Numerov::default(), &FreeSolution,
        &training(), uneven, BasisParams::new(ENERGY, 0, 2),
    );
    match res {
        Err(BasisError::Oracle { index, source }) => {
            assert_eq!(index, 0);
            assert!(matches!(
                source.downcast_ref::<SolveError>(),
                Some(SolveError::NonUniformMesh { .. })
            ));
        },
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn oracle_as_trait_object() {
    let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 100);
    let oracle: Box<dyn SnapshotOracle<f64, Error = SolveError>>
        = Box::new(Numerov::default());
    let basis = RelativeBasis::new(
        &potentials::minnesota(), oracle.as_ref(), &FreeSolution,
        &training(), s, BasisParams::new(ENERGY, 0, 3),
    ).unwrap();
    assert_eq!(basis.n_basis(), 3);
}
