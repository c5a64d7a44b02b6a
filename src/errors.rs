use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Pokemon Duel simulator
#[derive(Debug, Error)]
pub enum GameError {
    /// Error loading the creature definitions document
    #[error("Pokedex error: {0}")]
    Pokedex(#[from] PokedexError),
    /// Error reading or writing the session leaderboard
    #[error("Leaderboard error: {0}")]
    Store(#[from] StoreError),
    /// Error reading the game configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading creature definitions. All of them are fatal to
/// session startup.
#[derive(Debug, Error)]
pub enum PokedexError {
    /// The document could not be read from disk
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not a valid creature definitions document
    #[error("malformed creature document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// An entry parsed but breaks an invariant of the battle model
    #[error("invalid creature entry #{id} ({name}): {reason}")]
    InvalidEntry { id: u32, name: String, reason: String },
}

/// Recoverable roster errors, reported to the player instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainerError {
    /// The party is empty, so nothing can be sent into battle
    #[error("no pokemon left in the party")]
    NoPokemonLeft,
}

/// Reasons a capture did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatchError {
    /// No ball was thrown this turn
    #[error("no pokeball was thrown")]
    BallNotThrown,
    /// Only knocked out pokemon can be caught
    #[error("{pokemon} is still standing")]
    TargetNotFainted { pokemon: String },
}

/// Errors from the session results store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupted results file: {0}")]
    Decode(#[from] ron::error::SpannedError),
    #[error("cannot encode results: {0}")]
    Encode(#[from] ron::Error),
}

/// Errors from loading the game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Malformed(#[from] ron::error::SpannedError),
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
