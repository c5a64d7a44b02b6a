use crate::trainer::Trainer;
use serde::{Deserialize, Serialize};

/// Points per party member when the score is seeded.
pub const POINTS_PER_PARTY_MEMBER: i64 = 10;
/// Points lost per defeated pokemon once the trainer has nobody left.
pub const PENALTY_PER_DEFEATED: i64 = 2;

/// Running score of a session. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn points(self) -> u32 {
        self.0
    }

    /// Next score value for `trainer`.
    ///
    /// A score of 0 counts as unset and is seeded from the party size, so a
    /// session that falls back to exactly 0 gets reseeded on the next call.
    pub fn calculate(self, trainer: &Trainer) -> Score {
        let current = i64::from(self.0);
        let next = if current == 0 {
            POINTS_PER_PARTY_MEMBER * trainer.party_len() as i64
        } else if trainer.pokemon_in_battle().is_some() || trainer.party_len() > 0 {
            let tag = trainer
                .pokemon_in_battle()
                .map_or(0, |pokemon| pokemon.effectiveness_tag());
            current + i64::from(tag)
        } else {
            current - PENALTY_PER_DEFEATED * trainer.defeated().len() as i64
        };
        Score(next.clamp(0, i64::from(u32::MAX)) as u32)
    }
}
