//! Tournament mode for running many games in parallel and collecting statistics
//!
//! Games run concurrently on rayon worker threads. Each game owns its own
//! engine and controllers; only the statistics are shared.

use crate::{
    core::PlayerId,
    game::{
        Engine, GameEndReason, GameLoop, PlayerController, RandomController, ZeroController,
    },
    loader::{CardRegistry, GameSettings},
    Result,
};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Controller type for simulated players
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ControllerType {
    /// Always chooses the first meaningful decision
    Zero,
    /// Makes seeded random choices
    Random,
}

/// Build a controller for one player
pub fn make_controller(
    kind: ControllerType,
    player: PlayerId,
    seed: u64,
) -> Box<dyn PlayerController> {
    match kind {
        ControllerType::Zero => Box::new(ZeroController::new(player)),
        ControllerType::Random => Box::new(RandomController::with_seed(player, seed)),
    }
}

/// Seed of the `index`-th game of a tournament
pub fn game_seed(tournament_seed: u64, index: usize) -> u64 {
    tournament_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    pub seed: u64,
    /// One entry per seat; missing seats use the last entry
    pub controllers: Vec<ControllerType>,
    pub max_turns: u32,
    pub settings: GameSettings,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 100,
            seed: 42,
            controllers: vec![ControllerType::Random],
            max_turns: 1000,
            settings: GameSettings::default(),
        }
    }
}

/// Statistics collected during a tournament
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentStats {
    /// Wins per seat, in turn order
    pub wins: Vec<usize>,
    pub draws: usize,
    pub turn_limits: usize,
    pub kill_switches: usize,
    pub administrative: usize,
    pub failures: usize,
    pub total_turns: u64,
    pub total_decisions: u64,
}

impl TournamentStats {
    pub fn games_played(&self) -> usize {
        self.wins.iter().sum::<usize>()
            + self.draws
            + self.turn_limits
            + self.kill_switches
            + self.administrative
    }

    fn record(
        &mut self,
        seat_of_winner: Option<usize>,
        reason: &GameEndReason,
        turns: u32,
        decisions: usize,
    ) {
        match (seat_of_winner, reason) {
            (Some(seat), _) => {
                if self.wins.len() <= seat {
                    self.wins.resize(seat + 1, 0);
                }
                self.wins[seat] += 1;
            }
            (None, GameEndReason::TurnLimit) => self.turn_limits += 1,
            (None, GameEndReason::KillSwitch(_)) => self.kill_switches += 1,
            (None, GameEndReason::Administrative(_)) => self.administrative += 1,
            (None, _) => self.draws += 1,
        }
        self.total_turns += u64::from(turns);
        self.total_decisions += decisions as u64;
    }

    /// Print a summary to stdout
    pub fn report(&self, elapsed_secs: f64) {
        let total = self.games_played();
        println!("\n=== Tournament Complete ===");
        println!("Total games played: {total}");
        if self.failures > 0 {
            println!("Failed games: {}", self.failures);
        }
        println!("Elapsed time: {elapsed_secs:.2}s");
        if elapsed_secs > 0.0 {
            println!("Games per second: {:.2}", total as f64 / elapsed_secs);
        }
        if total == 0 {
            return;
        }

        let pct = |n: usize| 100.0 * n as f64 / total as f64;
        println!("\n=== Results ===");
        for (seat, wins) in self.wins.iter().enumerate() {
            println!("P{} wins: {wins} ({:.1}%)", seat + 1, pct(*wins));
        }
        println!("Draws: {} ({:.1}%)", self.draws, pct(self.draws));
        println!("Turn limit: {} ({:.1}%)", self.turn_limits, pct(self.turn_limits));
        println!("Kill switch: {} ({:.1}%)", self.kill_switches, pct(self.kill_switches));
        println!(
            "Average turns: {:.1}, average decisions: {:.1}",
            self.total_turns as f64 / total as f64,
            self.total_decisions as f64 / total as f64
        );
    }
}

/// Play one game of the tournament
fn play_one(
    config: &TournamentConfig,
    registry: &Arc<CardRegistry>,
    index: usize,
) -> Result<(Option<usize>, GameEndReason, u32, usize)> {
    let seed = game_seed(config.seed, index);
    let settings = config.settings.clone().with_seed(seed);
    let mut engine = Engine::start_game(settings, Arc::clone(registry))?;

    let seats: Vec<PlayerId> = engine.state().players.iter().map(|p| p.id).collect();
    let mut controllers: Vec<Box<dyn PlayerController>> = seats
        .iter()
        .enumerate()
        .map(|(seat, &player)| {
            let kind = config
                .controllers
                .get(seat)
                .or(config.controllers.last())
                .copied()
                .unwrap_or(ControllerType::Random);
            make_controller(kind, player, seed.wrapping_add(seat as u64 + 1))
        })
        .collect();

    let result = GameLoop::new(&mut engine)
        .with_max_turns(config.max_turns)
        .run_game(&mut controllers)?;
    let seat_of_winner = result
        .winner
        .and_then(|winner| seats.iter().position(|&p| p == winner));
    Ok((seat_of_winner, result.end_reason, result.turns_played, result.decisions_made))
}

/// Run the tournament: play every game in parallel and collect statistics
pub fn run_tourney(
    config: &TournamentConfig,
    registry: Arc<CardRegistry>,
) -> Result<TournamentStats> {
    config.settings.validate()?;

    let stats = Mutex::new(TournamentStats {
        wins: vec![0; config.settings.players.len()],
        ..Default::default()
    });
    let completed = Mutex::new(0usize);

    (0..config.games).into_par_iter().for_each(|index| {
        let outcome = play_one(config, &registry, index);
        let Ok(mut stats) = stats.lock() else {
            return;
        };
        match outcome {
            Ok((winner, reason, turns, decisions)) => {
                stats.record(winner, &reason, turns, decisions)
            }
            Err(e) => {
                eprintln!("Warning: Game {index} failed: {e}");
                stats.failures += 1;
            }
        }
        drop(stats);

        if let Ok(mut count) = completed.lock() {
            *count += 1;
            if *count % 100 == 0 {
                println!("Completed {} games", *count);
            }
        }
    });

    Ok(stats.into_inner().unwrap_or_default())
}

/// Run the tournament and print the summary
pub fn run_and_report(
    config: &TournamentConfig,
    registry: Arc<CardRegistry>,
) -> Result<TournamentStats> {
    println!("=== MTG Rules Engine - Tournament Mode ===\n");
    println!("Running {} games, seed {}", config.games, config.seed);
    println!("Controllers: {:?}\n", config.controllers);

    let start = Instant::now();
    let stats = run_tourney(config, registry)?;
    stats.report(start.elapsed().as_secs_f64());
    Ok(stats)
}
