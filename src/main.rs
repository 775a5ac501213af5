//! MTG rules engine - main binary
//!
//! Runs simulated games between computer controllers, one at a time with a
//! readable log, or many in parallel with summary statistics.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mtg_rules_engine::{
    game::{Engine, GameLogger, GameLoop, OutputFormat, OutputMode, VerbosityLevel},
    loader::{builtin, CardRegistry, DeckList, GameSettings},
    tournament::{make_controller, run_and_report, ControllerType, TournamentConfig},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Where the game comes from: a settings file, or built-in decks
#[derive(Debug, clap::Args)]
struct GameArgs {
    /// Game settings JSON file (players, decks, life, kill switch)
    #[arg(long, value_name = "SETTINGS_JSON")]
    settings: Option<PathBuf>,

    /// Card definitions JSON file (default: built-in card pool)
    #[arg(long, value_name = "CARDS_JSON")]
    cards: Option<PathBuf>,

    /// Built-in deck or deck file for player 1 (red, gw, ub, echo)
    #[arg(long, default_value = "red")]
    deck1: String,

    /// Built-in deck or deck file for player 2 (red, gw, ub, echo)
    #[arg(long, default_value = "gw")]
    deck2: String,

    /// Player 1 controller type
    #[arg(long, value_enum, default_value = "random")]
    p1: ControllerType,

    /// Player 2 controller type
    #[arg(long, value_enum, default_value = "random")]
    p2: ControllerType,

    /// Maximum turns before the game is stopped
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,
}

#[derive(Parser)]
#[command(name = "mtg")]
#[command(about = "MTG rules engine - simulated games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one simulated game and print its log
    Sim {
        #[command(flatten)]
        game: GameArgs,

        /// Set random seed for deterministic games
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print events as JSON, one object per line
        #[arg(long)]
        json: bool,

        /// Print the state hash after every decision
        #[arg(long)]
        debug_state_hash: bool,
    },

    /// Run many games in parallel and print statistics
    Tourney {
        #[command(flatten)]
        game: GameArgs,

        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Tournament seed; each game derives its own seed from it
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            game,
            seed,
            verbosity,
            json,
            debug_state_hash,
        } => run_sim(&game, seed, verbosity.into(), json, debug_state_hash),
        Commands::Tourney { game, games, seed } => run_tourney(&game, games, seed),
    }
}

fn load_registry(args: &GameArgs) -> anyhow::Result<Arc<CardRegistry>> {
    let registry = match &args.cards {
        Some(path) => CardRegistry::load_from_file(path)
            .with_context(|| format!("loading card definitions from {}", path.display()))?,
        None => builtin::registry().context("building the built-in card pool")?,
    };
    Ok(Arc::new(registry))
}

/// A built-in deck name, or a path to a deck file
fn load_deck(name: &str) -> anyhow::Result<DeckList> {
    if let Some(deck) = builtin::deck_by_name(name) {
        return Ok(deck);
    }
    let path = Path::new(name);
    if !path.exists() {
        bail!("unknown deck '{name}' (built-in decks: red, gw, ub, echo)");
    }
    DeckList::load_from_file(path).with_context(|| format!("loading deck {}", path.display()))
}

fn load_settings(args: &GameArgs) -> anyhow::Result<GameSettings> {
    let mut settings = match &args.settings {
        Some(path) => GameSettings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    if args.settings.is_none() {
        settings.players[0].deck = load_deck(&args.deck1)?;
        settings.players[1].deck = load_deck(&args.deck2)?;
    }
    settings.validate().context("invalid game settings")?;
    Ok(settings)
}

fn run_sim(
    args: &GameArgs,
    seed: u64,
    verbosity: VerbosityLevel,
    json: bool,
    debug_state_hash: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(args)?;
    let settings = load_settings(args)?.with_seed(seed);

    let mut logger = GameLogger::with_verbosity(verbosity);
    logger.set_output_mode(OutputMode::Stdout);
    if json {
        logger.set_output_format(OutputFormat::Json);
    }
    logger.set_debug_state_hash(debug_state_hash);

    let mut engine = Engine::start_game_with_logger(settings, registry, logger)
        .context("starting the game")?;
    let kinds = [args.p1, args.p2];
    let mut controllers: Vec<_> = engine
        .state()
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let kind = kinds.get(seat).copied().unwrap_or(args.p2);
            make_controller(kind, p.id, seed.wrapping_add(seat as u64 + 1))
        })
        .collect();

    let result = GameLoop::new(&mut engine)
        .with_max_turns(args.max_turns)
        .run_game(&mut controllers)
        .context("running the game")?;

    if verbosity >= VerbosityLevel::Minimal && !json {
        let winner = result
            .winner
            .and_then(|id| engine.state().get_player(id).ok())
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| "nobody".to_string());
        println!(
            "Winner: {winner} after {} turns, {} decisions ({})",
            result.turns_played, result.decisions_made, result.end_reason
        );
    }
    Ok(())
}

fn run_tourney(args: &GameArgs, games: usize, seed: u64) -> anyhow::Result<()> {
    let registry = load_registry(args)?;
    let config = TournamentConfig {
        games,
        seed,
        controllers: vec![args.p1, args.p2],
        max_turns: args.max_turns,
        settings: load_settings(args)?,
    };
    run_and_report(&config, registry).context("running the tournament")?;
    Ok(())
}
