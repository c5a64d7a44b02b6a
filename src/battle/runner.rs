use crate::battle::scoring::Score;
use crate::battle::state::{BattleEvent, EventBus, SessionState, Turn, TurnRng};
use crate::battle::turn_orchestrator::{
    apply_turn_result, decide_turn, manage_game_turn, resolve_capture,
};
use crate::pokemon::Pokemon;
use crate::trainer::{PokemonSummary, RosterSummary, Trainer};
use crate::wild_pool::WildPool;
use schema::{SessionOutcome, SessionRecord};
use tracing::{debug, info};

/// Everything the presentation layer needs to draw one turn.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub turn_number: u32,
    pub turn: Turn,
    pub trainer_pokemon: Option<PokemonSummary>,
    pub wild_pokemon: Option<PokemonSummary>,
    pub party: Vec<String>,
    pub score: u32,
    pub events: EventBus,
}

/// Final result of a session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub trainer_name: String,
    pub outcome: SessionOutcome,
    pub score: u32,
    pub total_pokemon: usize,
    pub roster: RosterSummary,
    pub events: EventBus,
}

impl SessionSummary {
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord::new(
            self.trainer_name.clone(),
            self.outcome,
            self.total_pokemon,
            self.score,
        )
    }
}

/// Drives a trainer through the wild pool, one random turn at a time, until
/// the trainer runs out of pokemon or the pool runs dry.
#[derive(Debug)]
pub struct GameSession {
    trainer: Trainer,
    wild_pool: WildPool,
    wild_pokemon: Option<Pokemon>,
    score: Score,
    rng: TurnRng,
    state: SessionState,
    turn_number: u32,
}

impl GameSession {
    /// Create a session over `wild_pokemon`, shuffled once.
    pub fn new(trainer_name: impl Into<String>, wild_pokemon: Vec<Pokemon>, mut rng: TurnRng) -> Self {
        let wild_pool = WildPool::new(wild_pokemon, &mut rng);
        Self::from_parts(Trainer::new(trainer_name), wild_pool, None, Score::default(), rng)
    }

    /// Assemble a session from already prepared pieces.
    pub fn from_parts(
        trainer: Trainer,
        wild_pool: WildPool,
        wild_pokemon: Option<Pokemon>,
        score: Score,
        rng: TurnRng,
    ) -> Self {
        Self {
            trainer,
            wild_pool,
            wild_pokemon,
            score,
            rng,
            state: SessionState::AwaitingTurn,
            turn_number: 0,
        }
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn wild_pool(&self) -> &WildPool {
        &self.wild_pool
    }

    pub fn wild_pokemon(&self) -> Option<&Pokemon> {
        self.wild_pokemon.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score.points()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Hand the trainer its starting party, seed the score and put the first
    /// pokemon of each side on the field.
    pub fn begin(&mut self, party_size: usize) -> EventBus {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::WildPokemonFound {
            count: self.wild_pool.len(),
        });

        for pokemon in
            self.trainer
                .assign_initial_pokemon(&mut self.wild_pool, party_size, &mut self.rng)
        {
            bus.push(BattleEvent::InitialPokemonAssigned { pokemon });
        }

        update_score(&mut self.score, &self.trainer, &mut bus);

        match self.trainer.next_pokemon() {
            Ok(pokemon) => bus.push(BattleEvent::PokemonSentOut {
                pokemon: pokemon.name.clone(),
            }),
            Err(_) => bus.push(BattleEvent::NoPokemonLeft),
        }

        self.draw_wild_pokemon(&mut bus);
        self.refresh_state();

        info!(
            trainer = %self.trainer.name(),
            wild_pokemon = self.wild_pool.len(),
            score = self.score.points(),
            "session started"
        );
        bus
    }

    /// The session keeps going while the trainer can fight and wild pokemon remain.
    pub fn can_continue(&self) -> bool {
        self.trainer.check_win_or_lose() && !self.wild_pool.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::SessionOver
    }

    /// Play a single turn. Returns `None` once the session is over.
    ///
    /// The session leaves this call in `AwaitingTurn` or `SessionOver`.
    pub fn play_turn(&mut self) -> Option<TurnReport> {
        if self.is_over() || !self.can_continue() {
            self.state = SessionState::SessionOver;
            return None;
        }

        let mut bus = EventBus::new();

        // Awaiting turn
        self.state = SessionState::AwaitingTurn;
        if self.wild_pokemon.as_ref().map_or(true, Pokemon::is_fainted) {
            self.draw_wild_pokemon(&mut bus);
        }
        self.turn_number += 1;
        let turn = decide_turn(&mut self.rng);
        bus.push(BattleEvent::TurnStarted {
            turn_number: self.turn_number,
            turn,
        });
        debug!(turn_number = self.turn_number, ?turn, "turn started");

        let Some(wild) = self.wild_pokemon.as_mut() else {
            self.state = SessionState::SessionOver;
            return None;
        };

        // Resolving attack
        self.state = SessionState::ResolvingAttack;
        manage_game_turn(turn, &mut self.trainer, wild, &mut self.rng, &mut bus);

        // Applying result
        self.state = SessionState::ApplyingResult;
        update_score(&mut self.score, &self.trainer, &mut bus);
        let trainer_pokemon = self.trainer.pokemon_in_battle().map(PokemonSummary::from);
        let wild_pokemon = Some(PokemonSummary::from(&*wild));
        apply_turn_result(&mut self.trainer, wild, &mut bus);
        let party = self.trainer.party_names();

        // Checking termination
        self.state = SessionState::CheckingTermination;
        if self.trainer.check_win_or_lose() {
            resolve_capture(&mut self.trainer, wild, &mut self.rng, &mut bus);
        }
        bus.push(BattleEvent::TurnEnded);
        self.refresh_state();

        Some(TurnReport {
            turn_number: self.turn_number,
            turn,
            trainer_pokemon,
            wild_pokemon,
            party,
            score: self.score.points(),
            events: bus,
        })
    }

    /// Settle the trainer's status and compute the final score.
    pub fn finish(&mut self) -> SessionSummary {
        self.state = SessionState::SessionOver;
        let mut bus = EventBus::new();

        let outcome = self.trainer.finalize_status();
        update_score(&mut self.score, &self.trainer, &mut bus);
        bus.push(BattleEvent::SessionEnded { outcome });

        info!(
            trainer = %self.trainer.name(),
            %outcome,
            score = self.score.points(),
            turns = self.turn_number,
            "session finished"
        );

        SessionSummary {
            trainer_name: self.trainer.name().to_string(),
            outcome,
            score: self.score.points(),
            total_pokemon: self.trainer.total_pokemon(),
            roster: self.trainer.summary(),
            events: bus,
        }
    }

    /// Play every remaining turn, handing each report to `on_turn`, then finish.
    /// An error from `on_turn` stops the session early.
    pub fn run_to_end<E>(
        &mut self,
        mut on_turn: impl FnMut(&TurnReport) -> Result<(), E>,
    ) -> Result<SessionSummary, E> {
        while let Some(report) = self.play_turn() {
            on_turn(&report)?;
        }
        Ok(self.finish())
    }

    fn draw_wild_pokemon(&mut self, bus: &mut EventBus) {
        self.wild_pokemon = self.wild_pool.next_pokemon();
        if let Some(wild) = &self.wild_pokemon {
            debug!(pokemon = %wild.name, hp = wild.hp(), "wild pokemon appeared");
            bus.push(BattleEvent::WildPokemonAppeared {
                pokemon: wild.name.clone(),
                hp: wild.hp(),
            });
        }
    }

    fn refresh_state(&mut self) {
        self.state = if self.can_continue() {
            SessionState::AwaitingTurn
        } else {
            SessionState::SessionOver
        };
    }
}

fn update_score(score: &mut Score, trainer: &Trainer, bus: &mut EventBus) {
    *score = score.calculate(trainer);
    bus.push(BattleEvent::ScoreUpdated {
        score: score.points(),
    });
}
