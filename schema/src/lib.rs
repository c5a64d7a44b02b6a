// Pokemon Duel Schema - Shared type definitions
// This crate contains the serde data definitions shared between the battle
// library, its creature document loader and the session leaderboard.

// Re-export the main types
pub use pokedex_data::*;
pub use session_data::*;

pub mod pokedex_data;
pub mod session_data;
