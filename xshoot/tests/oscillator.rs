use approx::assert_abs_diff_eq;
use ndarray as nd;
use xshoot::{
    potential::{ Gaussian, PotentialTable, Profile },
    quad::simpson,
    secant::Status,
    solve::{ node_count, solve_eigenstate, Config, Solution, Solver },
};

fn oscillator() -> PotentialTable {
    PotentialTable::new_linspace((-10.0, 10.0, 501), |x| 0.5 * x * x).unwrap()
}

fn norm(sol: &Solution, dx: f64) -> f64 {
    simpson(&sol.wf.mapv(|u| u * u), dx).unwrap()
}

#[test]
fn ground_state() {
    let table = oscillator();
    let sol = solve_eigenstate(&table, 0.4, Config::default()).unwrap();
    assert_eq!(sol.status, Status::Converged);
    assert!(sol.iters < 100);
    assert_abs_diff_eq!(sol.energy, 0.5, epsilon = 1e-3);
    assert_eq!(sol.level, 0);
    assert!(sol.matching.is_turning_point());
    assert_eq!(sol.wf.len(), table.len());
    assert_abs_diff_eq!(norm(&sol, table.get_dx()), 1.0, epsilon = 1e-6);

    // single-signed and symmetric
    let sign = sol.wf.iter().copied().fold(0.0, f64::max) > 0.0;
    assert!(sol.wf.iter().all(|u| if sign { *u >= 0.0 } else { *u <= 0.0 }));
    let n = sol.wf.len();
    for k in 0..n / 2 {
        assert_abs_diff_eq!(sol.wf[k], sol.wf[n - 1 - k], epsilon = 1e-6);
    }
    assert!(sol.is_symmetric(table.get_x(), 1e-2));

    // compare against the analytic ground state, π^(-1/4) exp(-x²/2)
    let exact = table.get_x()
        .mapv(|x| std::f64::consts::PI.powf(-0.25) * (-x * x / 2.0).exp());
    let diff = (&sol.wf.mapv(f64::abs) - &exact).mapv(f64::abs);
    assert!(diff.iter().all(|d| *d < 1e-4));
}

#[test]
fn first_excited_state() {
    let table = oscillator();
    let sol = solve_eigenstate(&table, 1.3, Config::default()).unwrap();
    assert!(sol.is_converged());
    assert_abs_diff_eq!(sol.energy, 1.5, epsilon = 1e-3);
    assert_eq!(sol.level, 1);
    assert_eq!(node_count(&sol.wf), 1);
    assert_abs_diff_eq!(norm(&sol, table.get_dx()), 1.0, epsilon = 1e-6);

    // antisymmetric
    let n = sol.wf.len();
    for k in 0..n / 2 {
        assert_abs_diff_eq!(sol.wf[k], -sol.wf[n - 1 - k], epsilon = 1e-6);
    }
    assert!(sol.is_symmetric(table.get_x(), 1e-2));
}

#[test]
fn levels_increase_with_energy() {
    let solver = Solver::new(oscillator(), Config::default()).unwrap();
    let sols: Vec<Solution>
        = [0.4, 1.3, 2.3, 3.4].into_iter()
        .map(|e| solver.solve(e).unwrap().converged().unwrap())
        .collect();
    for (n, sol) in sols.iter().enumerate() {
        assert_eq!(sol.level, n);
        assert_abs_diff_eq!(sol.energy, n as f64 + 0.5, epsilon = 1e-3);
    }
    assert!(
        sols.iter().zip(sols.iter().skip(1))
            .all(|(a, b)| a.cmp_energy(b) == Some(std::cmp::Ordering::Less))
    );
}

#[test]
fn mismatch_round_trip() {
    let solver = Solver::new(oscillator(), Config::default()).unwrap();
    for e0 in [0.4, 1.3] {
        let sol = solver.solve(e0).unwrap();
        let trial = solver.wave(sol.energy).unwrap();
        assert_eq!(trial.wf, sol.wf);
        let f = trial.mismatch(solver.get_table().get_dx()).unwrap();
        assert!(f.abs() < 1e-4, "mismatch too large: {f}");
    }
}

#[test]
fn cosh_squared_well() {
    // V = 3 - 6 sech²(x); bound states at 3 - (3 - n)² / 2
    let table = PotentialTable::from_profile_default(Profile::cosh_squared(), None)
        .unwrap();
    let solver = Solver::new(table, Config::default()).unwrap();
    for (n, e0) in [-1.7, 0.8, 2.3].into_iter().enumerate() {
        let sol = solver.solve(e0).unwrap();
        assert!(sol.is_converged());
        assert_eq!(sol.level, n);
        let exact = 3.0 - (3.0 - n as f64).powi(2) / 2.0;
        assert_abs_diff_eq!(sol.energy, exact, epsilon = 1e-3);
    }
}

#[test]
fn perturbed_oscillator_scan() {
    // the scan performed by the sweep driver, for a single potential
    let bump = Gaussian { mu: 1.0, delta: 0.8 };
    let table = PotentialTable::from_profile_default(Profile::oscillator(), Some(bump))
        .unwrap();
    let config = Config::default().with_max_step(1.0);
    let solver = Solver::new(table.clone(), config).unwrap();
    let guesses: nd::Array1<f64> = nd::Array1::linspace(table.min_V(), 1.0, 10);
    let ground: Vec<f64>
        = guesses.iter()
        .filter_map(|e| solver.solve(*e).ok())
        .filter(|sol| sol.is_converged() && sol.level == 0)
        .map(|sol| sol.energy)
        .collect();
    assert!(!ground.is_empty());
    // all level-0 solutions agree, and the bump raises the energy
    assert!(ground.iter().all(|e| (e - ground[0]).abs() < 1e-5));
    assert!(ground[0] > 0.5 && ground[0] < 1.0);
}

#[test]
fn clamped_propagation_matches_unclamped() {
    // values stay far below the clamp on this grid, so results are identical
    let table = oscillator();
    let free = solve_eigenstate(&table, 0.4, Config::default()).unwrap();
    let clamped = solve_eigenstate(
        &table, 0.4, Config::default().with_clamp(Some(1e200))).unwrap();
    assert_eq!(free.energy, clamped.energy);
}
