//! Performance benchmarks for the rules engine
//!
//! Measures game execution with Criterion.rs in two modes:
//!
//! 1. **Fresh** - start a new engine for each iteration
//! 2. **Transition** - a single reducer step on a mid-game state
//!
//! Games are RandomController vs RandomController with the built-in red and
//! green-white decks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mtg_rules_engine::{
    core::PlayerDecision,
    game::{decisions_for, transition, Engine, GameLoop, PlayerController, RandomController},
    loader::{builtin, CardRegistry, GameSettings},
    Result,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    turns: u32,
    decisions: usize,
    events: usize,
    duration: Duration,
}

impl GameMetrics {
    fn decisions_per_sec(&self) -> f64 {
        self.decisions as f64 / self.duration.as_secs_f64()
    }

    fn decisions_per_turn(&self) -> f64 {
        if self.turns == 0 {
            0.0
        } else {
            self.decisions as f64 / self.turns as f64
        }
    }
}

fn run_game_with_metrics(registry: &Arc<CardRegistry>, seed: u64) -> Result<GameMetrics> {
    let start = Instant::now();

    let settings = GameSettings::default().with_seed(seed);
    let mut engine = Engine::start_game(settings, Arc::clone(registry))?;
    let mut controllers: Vec<Box<dyn PlayerController>> = engine
        .state()
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Box::new(RandomController::with_seed(p.id, seed + i as u64))
                as Box<dyn PlayerController>
        })
        .collect();

    let result = GameLoop::new(&mut engine).run_game(&mut controllers)?;

    Ok(GameMetrics {
        turns: result.turns_played,
        decisions: result.decisions_made,
        events: engine.events().len(),
        duration: start.elapsed(),
    })
}

/// Benchmark: Fresh mode - new engine each iteration
fn bench_game_fresh(c: &mut Criterion) {
    let registry = match builtin::registry() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Skipping benchmark - failed to build card pool: {e}");
            return;
        }
    };

    let mut group = c.benchmark_group("game_execution");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let seed = 42u64;
    println!("\nWarmup game (seed {seed}):");
    if let Ok(metrics) = run_game_with_metrics(&registry, seed) {
        println!("  Turns: {}", metrics.turns);
        println!("  Decisions: {}", metrics.decisions);
        println!("  Events: {}", metrics.events);
        println!("  Duration: {:?}", metrics.duration);
        println!("  Decisions/sec: {:.2}", metrics.decisions_per_sec());
        println!("  Decisions/turn: {:.2}", metrics.decisions_per_turn());
    }

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| run_game_with_metrics(&registry, black_box(seed)).expect("game should complete"));
    });
    group.finish();
}

/// Benchmark: one enumerate-and-apply step on a state with a full hand
fn bench_transition(c: &mut Criterion) {
    let registry = Arc::new(builtin::registry().expect("built-in card pool"));
    let engine = Engine::start_game(GameSettings::default(), registry).expect("game should start");
    let state = engine.state().clone();
    let player = state.priority_player.expect("someone holds priority");

    let mut group = c.benchmark_group("reducer");
    group.bench_function("decisions_for", |b| b.iter(|| decisions_for(black_box(&state))));
    group.bench_function("transition_pass", |b| {
        b.iter(|| {
            transition(black_box(&state), player, PlayerDecision::PassPriority)
                .expect("pass is legal")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_game_fresh, bench_transition);
criterion_main!(benches);
