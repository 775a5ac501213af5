//! Profiling binary for game execution
//!
//! Runs games in a tight loop for profiling with cargo-flamegraph. Unlike
//! the Criterion benchmarks, this has minimal overhead and produces cleaner
//! flamegraphs.
//!
//! Usage:
//!   cargo flamegraph --bin profile

use mtg_rules_engine::{
    game::{Engine, GameLoop, PlayerController, RandomController},
    loader::{builtin, GameSettings},
};
use std::sync::Arc;

fn main() -> mtg_rules_engine::Result<()> {
    let registry = Arc::new(builtin::registry()?);

    // Allow overriding iterations via environment variable
    let iterations: u64 = std::env::var("PROFILE_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    println!("Profiling game execution...");
    println!("Running {iterations} games starting at seed 42");

    let mut decisions = 0;
    for i in 0..iterations {
        let seed = 42 + i;
        let settings = GameSettings::default().with_seed(seed);
        let mut engine = Engine::start_game(settings, Arc::clone(&registry))?;
        let mut controllers: Vec<Box<dyn PlayerController>> = engine
            .state()
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| {
                Box::new(RandomController::with_seed(p.id, seed + seat as u64))
                    as Box<dyn PlayerController>
            })
            .collect();

        let result = GameLoop::new(&mut engine).run_game(&mut controllers)?;
        decisions += result.decisions_made;

        if (i + 1) % 100 == 0 {
            println!("Completed {} games", i + 1);
        }
    }

    println!("\nProfiling complete! {iterations} games, {decisions} decisions.");
    Ok(())
}
