use serde::{Deserialize, Serialize};
use std::fmt;

/// How a session ended for the trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOutcome {
    Won,
    Lost,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            SessionOutcome::Won => "win",
            SessionOutcome::Lost => "lose",
        };
        write!(f, "{}", display_name)
    }
}

/// A finished session as stored on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub trainer_name: String,
    pub outcome: SessionOutcome,
    /// Party plus defeated creatures at the end of the session.
    pub pokemon_count: usize,
    pub score: u32,
}

impl SessionRecord {
    pub fn new(
        trainer_name: impl Into<String>,
        outcome: SessionOutcome,
        pokemon_count: usize,
        score: u32,
    ) -> Self {
        Self {
            trainer_name: trainer_name.into(),
            outcome,
            pokemon_count,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(SessionOutcome::Won.to_string(), "win");
        assert_eq!(SessionOutcome::Lost.to_string(), "lose");
    }

    #[test]
    fn test_record_ron_shape() {
        let record = SessionRecord::new("Ash Ketchum", SessionOutcome::Won, 5, 42);
        let text = ron::to_string(&record).unwrap();
        let back: SessionRecord = ron::from_str(&text).unwrap();
        assert_eq!(back, record);
        assert!(text.contains("Won"));
    }
}
