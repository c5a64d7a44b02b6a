use serde::{Deserialize, Serialize};

/// One entry of the creature definitions document.
///
/// Field names follow the document's keys, which are in Spanish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    #[serde(rename = "poder")]
    pub power: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    pub icon: String,
    pub icon_element: String,
    #[serde(rename = "tipo")]
    pub types: Vec<String>,
    #[serde(rename = "evoluciones")]
    pub evolutions: Vec<String>,
    #[serde(rename = "debilidad")]
    pub weaknesses: Vec<String>,
    #[serde(rename = "fortaleza")]
    pub strengths: Vec<String>,
    #[serde(rename = "ataques")]
    pub attacks: Vec<String>,
}

/// The top-level creature definitions document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexDocument {
    pub pokemons: Vec<PokemonRecord>,
}
