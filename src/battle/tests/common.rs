use crate::battle::state::TurnRng;
use crate::pokemon::{MIN_HP, Pokemon};
use crate::trainer::Trainer;
use schema::PokemonRecord;

/// A builder for creating test pokemon with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_types(vec!["Electrico"])
///     .with_hp(80.0)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    power: u32,
    types: Vec<String>,
    weaknesses: Vec<String>,
    strengths: Vec<String>,
    attacks: Vec<String>,
    icon: String,
    icon_element: String,
    hp: f64,
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

impl TestPokemonBuilder {
    /// Creates a builder with a neutral type, a single attack, no power and 100 hp.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            power: 0,
            types: vec!["Normal".to_string()],
            weaknesses: Vec::new(),
            strengths: Vec::new(),
            attacks: vec!["Tackle".to_string()],
            icon: String::new(),
            icon_element: String::new(),
            hp: 100.0,
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_types(mut self, types: Vec<&str>) -> Self {
        self.types = owned(types);
        self
    }

    /// Types this pokemon takes extra damage from.
    pub fn with_weaknesses(mut self, weaknesses: Vec<&str>) -> Self {
        self.weaknesses = owned(weaknesses);
        self
    }

    /// Types this pokemon resists.
    pub fn with_strengths(mut self, strengths: Vec<&str>) -> Self {
        self.strengths = owned(strengths);
        self
    }

    pub fn with_attacks(mut self, attacks: Vec<&str>) -> Self {
        self.attacks = owned(attacks);
        self
    }

    pub fn with_icons(mut self, icon: &str, icon_element: &str) -> Self {
        self.icon = icon.to_string();
        self.icon_element = icon_element.to_string();
        self
    }

    pub fn with_hp(mut self, hp: f64) -> Self {
        self.hp = hp;
        self
    }

    pub fn record(&self) -> PokemonRecord {
        PokemonRecord {
            id: 0,
            power: self.power,
            name: self.name.clone(),
            icon: self.icon.clone(),
            icon_element: self.icon_element.clone(),
            types: self.types.clone(),
            evolutions: Vec::new(),
            weaknesses: self.weaknesses.clone(),
            strengths: self.strengths.clone(),
            attacks: self.attacks.clone(),
        }
    }

    pub fn build(self) -> Pokemon {
        let mut rng = TurnRng::new_for_test(vec![MIN_HP]);
        let mut pokemon = match Pokemon::from_record(&self.record(), &mut rng) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test pokemon {}: {}", self.name, err),
        };
        pokemon.set_hp(self.hp);
        pokemon
    }
}

/// Creates a trainer holding `party`, with nothing sent out yet.
pub fn create_test_trainer(party: Vec<Pokemon>) -> Trainer {
    Trainer::with_party("Ash", party)
}

/// Scripted outcomes for one player turn that lands a normal, non critical
/// hit: coin, ball, attack choice, damage roll, critical slot.
pub fn player_hit(ball: u32, damage_roll: u32) -> Vec<u32> {
    vec![1, ball, 0, damage_roll, 0]
}

/// Scripted outcomes for one wild turn against a pokemon already in battle.
pub fn wild_hit(damage_roll: u32) -> Vec<u32> {
    vec![0, 0, damage_roll, 0]
}
