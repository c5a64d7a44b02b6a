use crate::pokemon::Effectiveness;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use schema::SessionOutcome;
use serde::{Deserialize, Serialize};

/// Whose attack resolves this turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Player,
    Wild,
}

/// Which side of the field a pokemon belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Trainer,
    Wild,
}

/// Phases a session walks through on every turn.
///
/// A turn runs to completion inside one call, so between calls a session is
/// only ever seen in a settled state: `AwaitingTurn` or `SessionOver`. The
/// other phases are only held while that turn is being resolved.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingTurn,
    ResolvingAttack,
    ApplyingResult,
    CheckingTermination,
    SessionOver,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Session Setup
    WildPokemonFound {
        count: usize,
    },
    InitialPokemonAssigned {
        pokemon: String,
    },

    // Turn Management
    TurnStarted {
        turn_number: u32,
        turn: Turn,
    },
    TurnEnded,

    // Roster Changes
    WildPokemonAppeared {
        pokemon: String,
        hp: f64,
    },
    PokemonSentOut {
        pokemon: String,
    },
    NoPokemonLeft,
    ReturnedToBall {
        pokemon: String,
    },

    // Attacks
    PokeballThrown {
        thrown: bool,
    },
    AttackUsed {
        side: Side,
        attacker: String,
        defender: String,
        attack: String,
        damage: f64,
        effectiveness: Effectiveness,
        critical: bool,
        remaining_hp: f64,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },

    // Capture
    PokemonCaught {
        pokemon: String,
        hp: f64,
    },

    // Scoring and Session End
    ScoreUpdated {
        score: u32,
    },
    SessionEnded {
        outcome: SessionOutcome,
    },
}

/// Collects the events produced while resolving part of a session.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Move every event of `other` to the end of this bus.
    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Random(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// Source of every random decision in a session.
///
/// In play it wraps a `StdRng`. Tests script the exact outcomes instead, one
/// value per draw in the order the battle consumes them:
/// - ranged rolls return the value clamped into the range,
/// - coin flips are `true` for any non-zero value,
/// - index picks use the value modulo the collection length,
/// - shuffles leave the slice untouched.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Random(StdRng::from_os_rng()),
        }
    }

    /// A reproducible random source.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Random(StdRng::seed_from_u64(seed)),
        }
    }

    fn next_scripted(outcomes: &[u32], index: &mut usize, reason: &str) -> u32 {
        if *index >= outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        *index += 1;
        outcome
    }

    /// Uniform integer in `low..=high`.
    pub fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        match &mut self.source {
            RngSource::Random(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason).clamp(low, high)
            }
        }
    }

    /// Fair coin flip.
    pub fn next_bool(&mut self, reason: &str) -> bool {
        match &mut self.source {
            RngSource::Random(rng) => rng.random_bool(0.5),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason) != 0
            }
        }
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty collection: {}", reason);
        match &mut self.source {
            RngSource::Random(rng) => rng.random_range(0..len),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason) as usize % len
            }
        }
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if let RngSource::Random(rng) = &mut self.source {
            items.shuffle(rng);
        }
    }

    /// Number of scripted outcomes not consumed yet. Always zero for random sources.
    pub fn remaining_outcomes(&self) -> usize {
        match &self.source {
            RngSource::Random(_) => 0,
            RngSource::Scripted { outcomes, index } => outcomes.len().saturating_sub(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scripted_rng_follows_script() {
        let mut rng = TurnRng::new_for_test(vec![15, 0, 7, 300, 2]);

        assert_eq!(rng.next_in_range(10, 20, "damage"), 15);
        assert!(!rng.next_bool("turn"));
        assert_eq!(rng.next_index(4, "attack"), 3);
        assert_eq!(rng.next_in_range(50, 250, "hp"), 250);
        assert_eq!(rng.remaining_outcomes(), 1);
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_bool("turn");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut first = TurnRng::from_seed(7);
        let mut second = TurnRng::from_seed(7);

        let a: Vec<u32> = (0..20).map(|_| first.next_in_range(50, 250, "hp")).collect();
        let b: Vec<u32> = (0..20).map(|_| second.next_in_range(50, 250, "hp")).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|hp| (50..=250).contains(hp)));
    }

    #[test]
    fn test_scripted_shuffle_keeps_order() {
        let mut rng = TurnRng::new_for_test(vec![]);
        let mut items = vec![1, 2, 3];
        rng.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_event_bus_collects_events() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(BattleEvent::NoPokemonLeft);
        let mut other = EventBus::new();
        other.push(BattleEvent::TurnEnded);
        bus.extend(other);

        assert_eq!(bus.len(), 2);
        assert_eq!(bus.events()[1], BattleEvent::TurnEnded);
        assert!(bus.to_string().contains("NoPokemonLeft"));
    }
}
