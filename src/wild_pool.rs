use crate::battle::state::TurnRng;
use crate::pokemon::Pokemon;
use std::collections::VecDeque;
use tracing::warn;

/// Wild pokemon nobody owns yet, consumed from the front as the session goes.
#[derive(Debug, Clone, Default)]
pub struct WildPool {
    pokemon: VecDeque<Pokemon>,
}

impl WildPool {
    /// Take ownership of `pokemon` and shuffle them once.
    pub fn new(mut pokemon: Vec<Pokemon>, rng: &mut TurnRng) -> Self {
        rng.shuffle(&mut pokemon);
        Self {
            pokemon: pokemon.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.pokemon.iter().map(|pokemon| pokemon.name.clone()).collect()
    }

    /// Pop the next wild opponent.
    pub fn next_pokemon(&mut self) -> Option<Pokemon> {
        let next = self.pokemon.pop_front();
        if next.is_none() {
            warn!("no wild pokemon left in the pool");
        }
        next
    }

    /// Remove a uniformly chosen pokemon from anywhere in the pool.
    pub fn draw_random(&mut self, rng: &mut TurnRng) -> Option<Pokemon> {
        if self.pokemon.is_empty() {
            return None;
        }
        let index = rng.next_index(self.pokemon.len(), "initial pokemon draw");
        self.pokemon.remove(index)
    }
}
