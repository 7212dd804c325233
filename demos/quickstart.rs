//! Quickstart: drive the two strategies by hand, then let `Simulation` do it.
//!
//! Run with:
//!   cargo run --example quickstart

use banditsim::{EpsilonGreedy, Environment, Simulation, SimulationConfig, Strategy, Ucb1};

fn main() -> banditsim::Result<()> {
    // -----------------------------------------------------------------
    // 1. Manual loop: select -> pull -> update.
    // -----------------------------------------------------------------
    let mut env = Environment::with_seed(5, 42)?;
    let mut ucb = Ucb1::new(env.arm_count())?;
    let mut eg = EpsilonGreedy::with_seed(env.arm_count(), 0.1, 7)?;

    for _ in 0..500 {
        let a = ucb.select_arm();
        let r = env.pull(a)?;
        ucb.update(a, r)?;

        let b = eg.select_arm();
        let r = env.pull(b)?;
        eg.update(b, r)?;
    }

    println!("true means: {:?}", env.true_means());
    println!("best arm:   {}", env.best_arm());
    println!("UCB1 pulls:           {:?}", ucb.stats().pulls());
    println!("Epsilon-Greedy pulls: {:?}", eg.stats().pulls());

    // -----------------------------------------------------------------
    // 2. The same thing as a lazy iterator over rounds.
    // -----------------------------------------------------------------
    let sim = Simulation::new(SimulationConfig::new(5, 500, 0.1).seed(42))?;
    for record in sim.skip(99).step_by(100) {
        let record = record?;
        println!(
            "round {:>3}: UCB1 {:+.3}  Epsilon-Greedy {:+.3}",
            record.round, record.metrics[0], record.metrics[1]
        );
    }
    Ok(())
}
