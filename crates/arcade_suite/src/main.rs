//! Arcade - command-line front end
//!
//! Manages player profiles and plays tic-tac-toe against the computer.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use arcade_suite::{
    ArcadeConfig, ConsolePlayer, GameSuiteController, JsonFileStore, PlayerLedger, RandomPlayer,
    play_game,
};
use arcade_tictactoe::{Difficulty, Outcome};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ArcadeConfig::load(&cli.config)?.with_env_overrides();
    if let Some(path) = cli.ledger {
        config = config.with_ledger_path(path);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(ledger = %config.ledger_path().display(), "Arcade starting");

    match cli.command {
        Command::Players => list_players(&config),
        Command::Create { name } => create_player(&config, &name),
        Command::Delete { name } => delete_player(&config, &name),
        Command::HighScores { limit } => show_high_scores(&config, limit),
        Command::Stats => show_stats(&config),
        Command::Tiers => {
            show_tiers();
            Ok(())
        }
        Command::Simulate {
            player,
            difficulty,
            games,
            seed,
        } => simulate(&config, &player, difficulty, games, seed),
        Command::Play { player, difficulty } => play(&config, &player, difficulty),
    }
}

/// Opens the ledger named by the config, reporting unreadable data.
fn open_ledger(config: &ArcadeConfig) -> Result<PlayerLedger<JsonFileStore>> {
    let store = JsonFileStore::new(config.ledger_path());
    let (ledger, warning) = PlayerLedger::open(store)
        .with_context(|| format!("opening {}", config.ledger_path().display()))?;
    if let Some(warning) = warning {
        eprintln!("Warning: {}", warning);
    }
    Ok(ledger)
}

fn list_players(config: &ArcadeConfig) -> Result<()> {
    let ledger = open_ledger(config)?;
    if ledger.ledger().is_empty() {
        println!("No players yet.");
        return Ok(());
    }

    println!(
        "{:<20} {:>6} {:>10} {:>9}  {}",
        "Player", "Games", "Total", "Average", "Created"
    );
    for profile in ledger.ledger().players() {
        println!(
            "{:<20} {:>6} {:>10} {:>9.2}  {}",
            profile.name(),
            profile.games_played(),
            profile.total_score(),
            profile.average_score(),
            profile.created_date()
        );
    }
    Ok(())
}

fn create_player(config: &ArcadeConfig, name: &str) -> Result<()> {
    let mut ledger = open_ledger(config)?;
    let profile = ledger.create_player(name)?;
    println!("Created player '{}'.", profile.name());
    Ok(())
}

fn delete_player(config: &ArcadeConfig, name: &str) -> Result<()> {
    let mut ledger = open_ledger(config)?;
    ledger.delete_player(name)?;
    println!("Deleted player '{}'.", name);
    Ok(())
}

fn show_high_scores(config: &ArcadeConfig, limit: usize) -> Result<()> {
    let ledger = open_ledger(config)?;
    let table = ledger.ledger().high_score_table(limit);
    if table.is_empty() {
        println!("No scores recorded yet.");
        return Ok(());
    }

    for (game, entries) in table {
        println!("{}", game);
        for (rank, entry) in entries.iter().enumerate() {
            println!("  {}. {:<20} {:>8}", rank + 1, entry.player(), entry.score());
        }
    }
    Ok(())
}

fn show_stats(config: &ArcadeConfig) -> Result<()> {
    let ledger = open_ledger(config)?;
    let Some(stats) = ledger.ledger().suite_statistics() else {
        println!("No games played yet.");
        return Ok(());
    };

    println!("Players:                  {}", stats.total_players());
    println!("Games played:             {}", stats.total_games());
    println!("Games per player:         {:.2}", stats.average_games_per_player());
    println!("Average score:            {:.2}", stats.overall_average_score());
    let (name, games) = stats.most_active();
    println!("Most active:              {} ({} games)", name, games);
    let (name, average) = stats.highest_average();
    println!("Highest average:          {} ({:.2})", name, average);
    Ok(())
}

fn show_tiers() {
    println!("{:<8} {:>7} {:>11}", "Level", "Search", "Multiplier");
    for difficulty in Difficulty::iter() {
        let tier = difficulty.tier();
        println!(
            "{:<8} {:>6.0}% {:>10}x",
            difficulty,
            tier.search_probability() * 100.0,
            tier.score_multiplier()
        );
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[instrument(skip(config))]
fn simulate(
    config: &ArcadeConfig,
    player: &str,
    difficulty: Option<Difficulty>,
    games: u32,
    seed: Option<u64>,
) -> Result<()> {
    let tier = difficulty.unwrap_or(*config.difficulty()).tier();
    let mut rng = seeded_rng(seed);
    let stand_in_rng = StdRng::from_rng(&mut rng)?;

    let ledger = open_ledger(config)?;
    let mut controller = GameSuiteController::new(ledger, rng, *config.human_mark());
    controller.login(player)?;
    let mut stand_in = RandomPlayer::new(player, stand_in_rng);

    for game in 1..=games {
        let played = play_game(&mut controller, &mut stand_in, &tier, player)?;
        println!(
            "Game {:>3}: {:<5} {:>5} points{}",
            game,
            played.report().outcome(),
            played.report().score().unwrap_or(0),
            if *played.report().new_high_score() {
                "  new high score!"
            } else {
                ""
            }
        );
    }

    let tally = controller.tally();
    println!(
        "\n{} games at {}: {} won, {} lost, {} drawn",
        tally.total(),
        tier.name(),
        tally.wins(),
        tally.losses(),
        tally.draws()
    );
    Ok(())
}

#[instrument(skip(config))]
fn play(config: &ArcadeConfig, player: &str, difficulty: Option<Difficulty>) -> Result<()> {
    let tier = difficulty.unwrap_or(*config.difficulty()).tier();
    let ledger = open_ledger(config)?;
    let mut controller =
        GameSuiteController::new(ledger, StdRng::from_entropy(), *config.human_mark());
    controller.login(player)?;

    println!(
        "{} plays {} against the computer ({}).",
        player,
        controller.human_mark(),
        tier.name()
    );

    let stdin = std::io::stdin();
    let mut console = ConsolePlayer::new(player, stdin.lock(), std::io::stdout());
    let played = play_game(&mut controller, &mut console, &tier, player)?;

    println!("\n{}\n", played.final_state().board().display());
    let report = played.report();
    match report.outcome() {
        Outcome::Cancelled => println!("Game cancelled. Nothing recorded."),
        outcome => {
            println!(
                "Result: {}. {} points after {} moves.",
                outcome,
                report.score().unwrap_or(0),
                played.moves_taken()
            );
            if *report.new_high_score() {
                println!("New high score!");
            }
        }
    }
    Ok(())
}
