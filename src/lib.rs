//! Pokemon Duel
//!
//! A turn-based battle between a trainer and a pool of wild pokemon: random
//! turn order, type matchups, critical hits, captures after a knockout and a
//! running score, with finished sessions kept on a leaderboard.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod leaderboard;
pub mod logging;
pub mod pokedex;
pub mod pokemon;
pub mod trainer;
pub mod wild_pool;

// --- PUBLIC API RE-EXPORTS ---

// Data definitions shared with the `schema` crate.
pub use schema::{PokedexDocument, PokemonRecord, SessionOutcome, SessionRecord};

// Session driver and its per-turn output.
pub use battle::runner::{GameSession, SessionSummary, TurnReport};
pub use battle::scoring::Score;
pub use battle::state::{BattleEvent, EventBus, SessionState, Side, Turn, TurnRng};

// Core runtime types.
pub use pokemon::{Effectiveness, Pokemon};
pub use trainer::{PokemonSummary, RosterSummary, Trainer};
pub use wild_pool::WildPool;

pub use config::GameConfig;
pub use leaderboard::{MemoryResultStore, ResultStore, RonResultStore};
pub use pokedex::load_pokemon;

pub use errors::{
    CatchError, ConfigError, GameError, GameResult, PokedexError, PokedexResult, StoreError,
    StoreResult, TrainerError,
};
