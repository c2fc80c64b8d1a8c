use ndarray as nd;
use lib::init_tracing;
use xshoot::{
    potential::{ Gaussian, PotentialTable, Profile },
    solve::{ Config, Solution, Solver },
};

// sweep a family of perturbed harmonic oscillators and report the ground state
// of each, found by scanning initial guesses upward from the bottom of the
// potential

const NUM_GUESSES: usize = 10;

// first converged level-0 solution over a scan of initial guesses
fn ground_state(table: PotentialTable, omega: f64)
    -> anyhow::Result<Option<(f64, Solution)>>
{
    let guesses: nd::Array1<f64>
        = nd::Array1::linspace(table.min_V(), omega, NUM_GUESSES);
    let solver = Solver::new(table, Config::default().with_max_step(omega))?;
    for &e0 in guesses.iter() {
        match solver.solve(e0) {
            Ok(sol) if sol.is_converged() && sol.level == 0 => {
                return Ok(Some((e0, sol)));
            },
            Ok(sol) => {
                tracing::debug!(
                    e0,
                    energy = sol.energy,
                    level = sol.level,
                    converged = sol.is_converged(),
                    "skipping solution"
                );
            },
            Err(err) => {
                tracing::debug!(e0, %err, "trial failed");
            },
        }
    }
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let omegas: nd::Array1<f64> = nd::Array1::linspace(0.3, 1.0, 3);
    let masses: nd::Array1<f64> = nd::Array1::linspace(0.3, 1.0, 3);
    let mus: [f64; 3] = [-1.0, 0.0, 1.0];
    let deltas: [f64; 3] = [0.6, 0.8, 1.0];

    let mut found: usize = 0;
    let mut missed: usize = 0;
    println!("    m omega    mu delta level    init_value   eigenvalue");
    for &omega in omegas.iter() {
        for &m in masses.iter() {
            for &mu in mus.iter() {
                for &delta in deltas.iter() {
                    let table = PotentialTable::from_profile_default(
                        Profile::Oscillator { omega, m },
                        Some(Gaussian { mu, delta }),
                    )?;
                    match ground_state(table, omega)? {
                        Some((e0, sol)) => {
                            found += 1;
                            println!(
                                "{:5.2} {:5.2} {:5.2} {:5.2} {:5} {:13.4} {:12.4}",
                                m, omega, mu, delta, sol.level, e0, sol.energy,
                            );
                        },
                        None => {
                            missed += 1;
                            tracing::warn!(m, omega, mu, delta, "no ground state found");
                        },
                    }
                }
            }
        }
    }
    tracing::info!(found, missed, "sweep finished");
    Ok(())
}
