//! Loading of the creature definitions document.

use crate::battle::state::TurnRng;
use crate::errors::{PokedexError, PokedexResult};
use crate::pokemon::Pokemon;
use schema::{PokedexDocument, PokemonRecord};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Parse the raw records of a creature document.
pub fn parse_pokedex(content: &str) -> PokedexResult<Vec<PokemonRecord>> {
    let document: PokedexDocument = serde_json::from_str(content)?;
    Ok(document.pokemons)
}

/// Turn records into battle-ready pokemon, each with a freshly rolled hp.
pub fn build_pokemon(records: &[PokemonRecord], rng: &mut TurnRng) -> PokedexResult<Vec<Pokemon>> {
    records
        .iter()
        .map(|record| Pokemon::from_record(record, rng))
        .collect()
}

/// Read the document at `path` and build every pokemon in it.
pub fn load_pokemon(path: &Path, rng: &mut TurnRng) -> PokedexResult<Vec<Pokemon>> {
    let result = fs::read_to_string(path)
        .map_err(|source| PokedexError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|content| parse_pokedex(&content))
        .and_then(|records| build_pokemon(&records, rng));

    match &result {
        Ok(pokemon) => info!(path = %path.display(), count = pokemon.len(), "pokedex loaded"),
        Err(err) => error!(path = %path.display(), %err, "failed to load pokedex"),
    }
    result
}
