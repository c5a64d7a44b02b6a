use crate::pokemon::{Effectiveness, Pokemon};

/// True if any of the attacker's types is one the defender is strong against.
pub fn has_weakness(attacker: &Pokemon, defender: &Pokemon) -> bool {
    attacker
        .types
        .iter()
        .any(|pokemon_type| defender.strengths.contains(pokemon_type))
}

/// True if any of the attacker's types is one the defender is weak against.
pub fn has_strength(attacker: &Pokemon, defender: &Pokemon) -> bool {
    attacker
        .types
        .iter()
        .any(|pokemon_type| defender.weaknesses.contains(pokemon_type))
}

/// Classify an attack from `attacker` on `defender`.
///
/// Weak-only and strong-only matchups are shifted by the critical flag. A
/// matchup that is both weak and strong, or neither, is plain damage whatever
/// the critical roll.
pub fn resolve_effectiveness(attacker: &Pokemon, defender: &Pokemon, critical: bool) -> Effectiveness {
    let weak = has_weakness(attacker, defender);
    let strong = has_strength(attacker, defender);

    match (weak, strong, critical) {
        (true, false, false) => Effectiveness::NotVeryEffective,
        (true, false, true) => Effectiveness::NotVeryEffectiveCritical,
        (false, true, false) => Effectiveness::SuperEffective,
        (false, true, true) => Effectiveness::SuperEffectiveCritical,
        _ => Effectiveness::Normal,
    }
}
