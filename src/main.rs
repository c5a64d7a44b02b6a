mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pokemon_duel::{
    GameConfig, GameSession, ResultStore, RonResultStore, TurnRng, load_pokemon, logging,
};
use std::path::PathBuf;
use std::thread;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pokemon-duel")]
#[command(about = "Pokemon Duel - a trainer against a pool of wild pokemon", long_about = None)]
struct Cli {
    /// RON configuration file
    #[arg(long, short, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full session and record its result
    Play {
        /// Creature definitions document (JSON)
        #[arg(long, value_name = "DATA_FILE")]
        data: Option<PathBuf>,

        /// Trainer name
        #[arg(long)]
        trainer: Option<String>,

        /// Set random seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the pacing delays
        #[arg(long)]
        fast: bool,
    },

    /// List recorded sessions, best score first
    Leaderboard {
        /// Delete every recorded session
        #[arg(long)]
        clear: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match GameConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            logging::init(&GameConfig::default().log_path, tracing::Level::INFO);
            error!(%err, "cannot load configuration");
            eprintln!("Error loading configuration: {}", err);
            std::process::exit(2);
        }
    };
    // Already validated while loading.
    let level = config.level().unwrap_or(tracing::Level::INFO);
    logging::init(&config.log_path, level);

    let command = cli.command.unwrap_or(Commands::Play {
        data: None,
        trainer: None,
        seed: None,
        fast: false,
    });

    let result = match command {
        Commands::Play {
            data,
            trainer,
            seed,
            fast,
        } => {
            let mut config = config;
            if let Some(data) = data {
                config.data_path = data;
            }
            if let Some(trainer) = trainer {
                config.trainer_name = trainer;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if fast {
                config = config.without_delays();
            }
            play(&config)
        }
        Commands::Leaderboard { clear } => leaderboard(&config, clear),
    };

    if let Err(err) = result {
        error!("session aborted: {err:#}");
        eprintln!("Error running the game");
        eprintln!("Details: {err:#}");
        std::process::exit(1);
    }
}

fn play(config: &GameConfig) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => TurnRng::from_seed(seed),
        None => TurnRng::new_random(),
    };
    let wild_pokemon = load_pokemon(&config.data_path, &mut rng)
        .with_context(|| format!("cannot start a session from {}", config.data_path.display()))?;

    let mut session = GameSession::new(config.trainer_name.clone(), wild_pokemon, rng);
    let trainer = config.trainer_name.as_str();

    display::print_intro(trainer);
    for event in session.begin(config.party_size).events() {
        display::print_event(trainer, event);
    }
    thread::sleep(config.start_delay());

    let summary = session.run_to_end(|report| {
        display::clear_screen();
        display::print_turn(trainer, report);
        thread::sleep(config.turn_delay());
        Ok::<(), anyhow::Error>(())
    })?;
    display::print_summary(&summary);

    let mut store = RonResultStore::new(&config.leaderboard_path)
        .with_replace_on_insert(config.replace_results_on_insert);
    store
        .record(summary.to_record())
        .context("cannot record the session result")?;
    info!(path = %store.path().display(), "session result recorded");
    Ok(())
}

fn leaderboard(config: &GameConfig, clear: bool) -> anyhow::Result<()> {
    let mut store = RonResultStore::new(&config.leaderboard_path);
    if clear {
        store.clear().context("cannot clear the leaderboard")?;
        println!("Leaderboard cleared.");
        return Ok(());
    }
    let records = store.results_by_score().context("cannot read the leaderboard")?;
    display::print_leaderboard(&records);
    Ok(())
}
