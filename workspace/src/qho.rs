use anyhow::Context;
use lib::init_tracing;
use xshoot::{
    potential::{ PotentialTable, Profile },
    solve::{ Config, Solver },
};

// solve for the lowest eigenstates of the quantum harmonic oscillator

fn main() -> anyhow::Result<()> {
    const OMEGA: f64 = 1.0;
    const TARGET_N: usize = 5; // highest level to solve for

    init_tracing();

    let profile = Profile::Oscillator { omega: OMEGA, m: 1.0 };
    let table = PotentialTable::from_profile((-10.0, 10.0, 1001), profile, None)?;
    let solver = Solver::new(table, Config::default())?;
    let e = move |n: usize| OMEGA * (0.5 + n as f64);

    println!("  n level      expected      computed  iters");
    for n in 0..=TARGET_N {
        // start a little below each level
        let guess = e(n) - 0.2 * OMEGA;
        let sol = solver.solve(guess)
            .with_context(|| format!("failed to solve for level {n}"))?;
        if !sol.is_converged() {
            tracing::warn!(n, energy = sol.energy, "search did not converge");
        }
        println!(
            "{:3} {:5} {:13.6} {:13.6} {:6}",
            n, sol.level, e(n), sol.energy, sol.iters,
        );
    }
    Ok(())
}
