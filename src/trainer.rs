use crate::battle::state::TurnRng;
use crate::errors::{CatchError, TrainerError};
use crate::pokemon::Pokemon;
use crate::wild_pool::WildPool;
use schema::SessionOutcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Number of pokemon a trainer receives at the start of a session.
pub const INITIAL_PARTY_SIZE: usize = 3;

/// Name, hp and display tokens of a pokemon, as shown in the turn panel and
/// the end-of-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub hp: f64,
    pub icon: String,
    pub icon_element: String,
}

impl From<&Pokemon> for PokemonSummary {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            hp: pokemon.hp(),
            icon: pokemon.icon.clone(),
            icon_element: pokemon.icon_element.clone(),
        }
    }
}

/// Party and defeated listing of a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub party: Vec<PokemonSummary>,
    pub defeated: Vec<PokemonSummary>,
}

/// The player. Owns every pokemon it has, in exactly one of three places: the
/// party queue, the battle slot, or the defeated pile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    name: String,
    party: VecDeque<Pokemon>,
    pokemon_in_battle: Option<Pokemon>,
    defeated: Vec<Pokemon>,
    pokeball_thrown: bool,
}

impl Trainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            party: VecDeque::new(),
            pokemon_in_battle: None,
            defeated: Vec::new(),
            pokeball_thrown: false,
        }
    }

    /// Build a trainer that already owns `party`.
    pub fn with_party(name: impl Into<String>, party: Vec<Pokemon>) -> Self {
        let mut trainer = Self::new(name);
        trainer.party = party.into();
        trainer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn party(&self) -> impl ExactSizeIterator<Item = &Pokemon> {
        self.party.iter()
    }

    pub fn party_len(&self) -> usize {
        self.party.len()
    }

    pub fn party_names(&self) -> Vec<String> {
        self.party.iter().map(|pokemon| pokemon.name.clone()).collect()
    }

    pub fn pokemon_in_battle(&self) -> Option<&Pokemon> {
        self.pokemon_in_battle.as_ref()
    }

    pub fn pokemon_in_battle_mut(&mut self) -> Option<&mut Pokemon> {
        self.pokemon_in_battle.as_mut()
    }

    pub fn defeated(&self) -> &[Pokemon] {
        &self.defeated
    }

    /// Every pokemon the trainer still holds, fainted or not.
    pub fn total_pokemon(&self) -> usize {
        self.party.len() + self.defeated.len() + usize::from(self.pokemon_in_battle.is_some())
    }

    /// Draw `count` random pokemon out of the wild pool into the party.
    /// Returns the names of the pokemon received.
    pub fn assign_initial_pokemon(
        &mut self,
        pool: &mut WildPool,
        count: usize,
        rng: &mut TurnRng,
    ) -> Vec<String> {
        let mut assigned = Vec::with_capacity(count);
        for _ in 0..count {
            match pool.draw_random(rng) {
                Some(pokemon) => {
                    assigned.push(pokemon.name.clone());
                    self.party.push_back(pokemon);
                }
                None => {
                    warn!(trainer = %self.name, "wild pool ran out while assigning the party");
                    break;
                }
            }
        }
        info!(trainer = %self.name, party = ?assigned, "initial party assigned");
        assigned
    }

    /// Send the first pokemon of the party into battle. The battle slot must
    /// be empty.
    pub fn next_pokemon(&mut self) -> Result<&Pokemon, TrainerError> {
        debug_assert!(
            self.pokemon_in_battle.is_none(),
            "next_pokemon called while a pokemon is still in battle"
        );
        match self.party.pop_front() {
            Some(pokemon) => {
                debug!(trainer = %self.name, pokemon = %pokemon.name, "pokemon sent out");
                let sent_out: &Pokemon = self.pokemon_in_battle.insert(pokemon);
                Ok(sent_out)
            }
            None => {
                warn!(trainer = %self.name, "no pokemon left to send out");
                Err(TrainerError::NoPokemonLeft)
            }
        }
    }

    /// Move the pokemon in battle to the defeated pile, clearing the battle slot.
    pub fn return_to_ball(&mut self) -> Option<&Pokemon> {
        let pokemon = self.pokemon_in_battle.take()?;
        debug!(trainer = %self.name, pokemon = %pokemon.name, "pokemon returned to its ball");
        self.defeated.push(pokemon);
        self.defeated.last()
    }

    /// Arm a capture attempt for this turn. Returns the flag.
    pub fn throw_pokeball(&mut self) -> bool {
        self.pokeball_thrown = true;
        self.pokeball_thrown
    }

    pub fn set_pokeball_thrown(&mut self, thrown: bool) {
        self.pokeball_thrown = thrown;
    }

    pub fn check_pokeball(&self) -> bool {
        self.pokeball_thrown
    }

    /// Catch a knocked out wild pokemon. The party receives its own healed copy,
    /// the wild one is left untouched.
    pub fn try_catch(
        &mut self,
        wild: &Pokemon,
        rng: &mut TurnRng,
    ) -> Result<PokemonSummary, CatchError> {
        if wild.has_hp() {
            return Err(CatchError::TargetNotFainted {
                pokemon: wild.name.clone(),
            });
        }

        let mut caught = wild.clone();
        caught.reset_battle_buffs();
        caught.heal(rng);
        info!(trainer = %self.name, pokemon = %caught.name, hp = caught.hp(), "pokemon caught");
        let summary = PokemonSummary::from(&caught);
        self.party.push_back(caught);
        Ok(summary)
    }

    pub fn catch_if_pokeball_thrown(
        &mut self,
        wild: &Pokemon,
        rng: &mut TurnRng,
    ) -> Result<PokemonSummary, CatchError> {
        if !self.check_pokeball() {
            return Err(CatchError::BallNotThrown);
        }
        self.try_catch(wild, rng)
    }

    /// True while the trainer still has someone to fight with.
    pub fn check_win_or_lose(&self) -> bool {
        !self.party.is_empty() || self.pokemon_in_battle.is_some()
    }

    /// Settle the session for this trainer. A pokemon still in battle goes back
    /// to the front of the party.
    pub fn finalize_status(&mut self) -> SessionOutcome {
        if !self.check_win_or_lose() {
            info!(trainer = %self.name, "trainer ran out of pokemon");
            return SessionOutcome::Lost;
        }

        if let Some(mut pokemon) = self.pokemon_in_battle.take() {
            pokemon.reset_battle_buffs();
            self.party.push_front(pokemon);
        }
        info!(trainer = %self.name, party = self.party.len(), "trainer won the league");
        SessionOutcome::Won
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary {
            party: self.party.iter().map(PokemonSummary::from).collect(),
            defeated: self.defeated.iter().map(PokemonSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestPokemonBuilder;
    use pretty_assertions::assert_eq;

    fn trainer_with(names: &[&str]) -> Trainer {
        let party = names
            .iter()
            .map(|name| TestPokemonBuilder::new(name).build())
            .collect();
        Trainer::with_party("Ash", party)
    }

    #[test]
    fn test_assign_initial_pokemon_draws_without_replacement() {
        let pool_pokemon = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|name| TestPokemonBuilder::new(name).build())
            .collect();
        let mut rng = TurnRng::new_for_test(vec![1, 0, 2]);
        let mut pool = WildPool::new(pool_pokemon, &mut rng);
        let mut trainer = Trainer::new("Ash");

        let assigned = trainer.assign_initial_pokemon(&mut pool, INITIAL_PARTY_SIZE, &mut rng);

        // B, then A, then index 2 of [C, D, E]
        assert_eq!(assigned, vec!["B", "A", "E"]);
        assert_eq!(trainer.party_names(), assigned);
        assert_eq!(pool.names(), vec!["C", "D"]);
    }

    #[test]
    fn test_next_pokemon_pops_front() {
        let mut trainer = trainer_with(&["Pikachu", "Bulbasaur"]);

        assert_eq!(trainer.next_pokemon().unwrap().name, "Pikachu");
        assert_eq!(trainer.pokemon_in_battle().unwrap().name, "Pikachu");
        assert_eq!(trainer.party_names(), vec!["Bulbasaur"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "still in battle")]
    fn test_next_pokemon_with_occupied_slot() {
        let mut trainer = trainer_with(&["Pikachu", "Bulbasaur"]);
        trainer.next_pokemon().unwrap();
        let _ = trainer.next_pokemon();
    }

    #[test]
    fn test_next_pokemon_with_empty_party() {
        let mut trainer = Trainer::new("Ash");
        assert_eq!(trainer.next_pokemon().unwrap_err(), TrainerError::NoPokemonLeft);
        assert!(trainer.pokemon_in_battle().is_none());
    }

    #[test]
    fn test_return_to_ball_moves_pokemon_to_defeated() {
        let mut trainer = trainer_with(&["Pikachu"]);
        trainer.next_pokemon().unwrap();
        trainer.pokemon_in_battle_mut().unwrap().faint();

        let returned = trainer.return_to_ball().map(|p| p.name.clone());

        assert_eq!(returned.as_deref(), Some("Pikachu"));
        assert!(trainer.pokemon_in_battle().is_none());
        assert_eq!(trainer.defeated().len(), 1);
        assert!(trainer.return_to_ball().is_none());
    }

    #[test]
    fn test_try_catch_requires_fainted_target() {
        let mut trainer = trainer_with(&["Pikachu"]);
        let wild = TestPokemonBuilder::new("Zubat").with_hp(30.0).build();
        let mut rng = TurnRng::new_for_test(vec![]);

        let result = trainer.try_catch(&wild, &mut rng);

        assert_eq!(
            result.unwrap_err(),
            CatchError::TargetNotFainted { pokemon: "Zubat".to_string() }
        );
        assert_eq!(trainer.party_len(), 1);
    }

    #[test]
    fn test_try_catch_heals_an_independent_copy() {
        let mut trainer = trainer_with(&["Pikachu"]);
        let wild = TestPokemonBuilder::new("Zubat").with_hp(0.0).build();
        let mut rng = TurnRng::new_for_test(vec![180]);

        let caught_hp = trainer.try_catch(&wild, &mut rng).unwrap().hp;

        assert_eq!(caught_hp, 180.0);
        assert_eq!(wild.hp(), 0.0);
        assert_eq!(trainer.party_names(), vec!["Pikachu", "Zubat"]);
    }

    #[test]
    fn test_catch_is_gated_by_pokeball() {
        let mut trainer = Trainer::new("Ash");
        let wild = TestPokemonBuilder::new("Zubat").with_hp(0.0).build();
        let mut rng = TurnRng::new_for_test(vec![100]);

        assert_eq!(
            trainer.catch_if_pokeball_thrown(&wild, &mut rng).unwrap_err(),
            CatchError::BallNotThrown
        );
        assert!(trainer.throw_pokeball());
        assert!(trainer.catch_if_pokeball_thrown(&wild, &mut rng).is_ok());
        assert_eq!(trainer.party_len(), 1);
    }

    #[test]
    fn test_check_win_or_lose() {
        let mut trainer = trainer_with(&["Pikachu"]);
        assert!(trainer.check_win_or_lose());

        trainer.next_pokemon().unwrap();
        assert!(trainer.check_win_or_lose(), "pokemon in battle keeps the trainer going");

        trainer.return_to_ball();
        assert!(!trainer.check_win_or_lose());
    }

    #[test]
    fn test_finalize_status_win_puts_battler_first() {
        let mut trainer = trainer_with(&["Pikachu", "Bulbasaur"]);
        trainer.next_pokemon().unwrap();

        assert_eq!(trainer.finalize_status(), SessionOutcome::Won);
        assert_eq!(trainer.party_names(), vec!["Pikachu", "Bulbasaur"]);
        assert!(trainer.pokemon_in_battle().is_none());
    }

    #[test]
    fn test_finalize_status_loss() {
        let mut trainer = trainer_with(&["Pikachu"]);
        trainer.next_pokemon().unwrap();
        trainer.return_to_ball();

        assert_eq!(trainer.finalize_status(), SessionOutcome::Lost);
        let summary = trainer.summary();
        assert!(summary.party.is_empty());
        assert_eq!(summary.defeated[0].name, "Pikachu");
        assert_eq!(trainer.total_pokemon(), 1);
    }
}
