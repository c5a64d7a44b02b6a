use crate::battle::state::TurnRng;
use crate::errors::{PokedexError, PokedexResult};
use schema::PokemonRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MIN_HP: u32 = 50;
pub const MAX_HP: u32 = 250;

/// Bounds of the random part of an attack's base damage.
pub const MIN_ATTACK_ROLL: u32 = 10;
pub const MAX_ATTACK_ROLL: u32 = 20;

/// One hit in four is critical: a pick over this table, slot 1 is the hit.
const CRITICAL_CHANCES: [bool; 4] = [false, true, false, false];

/// Outcome of the type matchup for a single attack.
///
/// A critical hit does not stack on top of the matchup multiplier. It softens
/// the penalty when the attacker is weak and raises the bonus when it is strong.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    NotVeryEffective,
    NotVeryEffectiveCritical,
    SuperEffective,
    SuperEffectiveCritical,
    Normal,
}

impl Effectiveness {
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::NotVeryEffective => 0.85,
            Effectiveness::NotVeryEffectiveCritical => 0.95,
            Effectiveness::SuperEffective => 1.15,
            Effectiveness::SuperEffectiveCritical => 1.25,
            Effectiveness::Normal => 1.0,
        }
    }

    /// Score delta awarded for landing this attack.
    pub fn tag(self) -> i32 {
        match self {
            Effectiveness::NotVeryEffective => -3,
            Effectiveness::NotVeryEffectiveCritical => -2,
            Effectiveness::SuperEffective => 3,
            Effectiveness::SuperEffectiveCritical => 4,
            Effectiveness::Normal => 1,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Effectiveness::NotVeryEffective => "It's not very effective! Damage -15%",
            Effectiveness::NotVeryEffectiveCritical => {
                "It's not very effective! Damage -5% [CRITICAL DAMAGE]"
            }
            Effectiveness::SuperEffective => "It's super effective! Damage +15%",
            Effectiveness::SuperEffectiveCritical => {
                "It's super effective! Damage +25% [CRITICAL DAMAGE]"
            }
            Effectiveness::Normal => "Normal damage!",
        }
    }

    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Effectiveness::NotVeryEffectiveCritical | Effectiveness::SuperEffectiveCritical
        )
    }
}

/// Round to two decimals, the precision hp and damage are kept at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub power: u32,
    pub icon: String,
    pub icon_element: String,
    pub types: BTreeSet<String>,
    pub evolutions: Vec<String>,
    pub weaknesses: BTreeSet<String>,
    pub strengths: BTreeSet<String>,
    attacks: Vec<String>,

    // Battle state
    hp: f64,
    current_attack: Option<String>,
    attack_damage: f64,
    effectiveness: Option<Effectiveness>,
    critical_hit: bool,
}

impl Pokemon {
    /// Build a pokemon from its document entry, rolling its starting hp.
    pub fn from_record(record: &PokemonRecord, rng: &mut TurnRng) -> PokedexResult<Self> {
        if record.attacks.is_empty() {
            return Err(PokedexError::InvalidEntry {
                id: record.id,
                name: record.name.clone(),
                reason: "a pokemon needs at least one attack".to_string(),
            });
        }

        let mut pokemon = Pokemon {
            id: record.id,
            name: capitalize(&record.name),
            power: record.power,
            icon: record.icon.clone(),
            icon_element: record.icon_element.clone(),
            types: record.types.iter().cloned().collect(),
            evolutions: record.evolutions.clone(),
            weaknesses: record.weaknesses.iter().cloned().collect(),
            strengths: record.strengths.iter().cloned().collect(),
            attacks: record.attacks.clone(),
            hp: 0.0,
            current_attack: None,
            attack_damage: 0.0,
            effectiveness: None,
            critical_hit: false,
        };
        pokemon.heal(rng);
        Ok(pokemon)
    }

    pub fn attacks(&self) -> &[String] {
        &self.attacks
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    /// Overwrite hp directly, clamped to the valid range.
    pub fn set_hp(&mut self, hp: f64) {
        self.hp = round2(hp.clamp(0.0, MAX_HP as f64));
    }

    pub fn current_attack(&self) -> Option<&str> {
        self.current_attack.as_deref()
    }

    pub fn attack_damage(&self) -> f64 {
        self.attack_damage
    }

    pub fn effectiveness(&self) -> Option<Effectiveness> {
        self.effectiveness
    }

    /// Score delta of the last resolved attack, 0 when none is pending.
    pub fn effectiveness_tag(&self) -> i32 {
        self.effectiveness.map_or(0, Effectiveness::tag)
    }

    pub fn effectiveness_message(&self) -> &'static str {
        self.effectiveness.map_or("", Effectiveness::message)
    }

    pub fn is_critical_hit(&self) -> bool {
        self.critical_hit
    }

    pub fn has_hp(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_fainted(&self) -> bool {
        !self.has_hp()
    }

    /// Reroll hp uniformly in [MIN_HP, MAX_HP]. Used at creation and on capture.
    pub fn heal(&mut self, rng: &mut TurnRng) {
        self.hp = rng.next_in_range(MIN_HP, MAX_HP, "pokemon hp") as f64;
    }

    /// Damage that does not fit in the remaining hp knocks the pokemon out.
    pub fn subtract_hp(&mut self, amount: f64) {
        if amount <= self.hp {
            self.hp = round2(self.hp - amount);
        } else {
            self.faint();
        }
    }

    pub fn faint(&mut self) {
        self.hp = 0.0;
    }

    pub fn roll_critical_chance(rng: &mut TurnRng) -> bool {
        CRITICAL_CHANCES[rng.next_index(CRITICAL_CHANCES.len(), "critical hit")]
    }

    /// Roll the raw damage of an attack and whether it lands as a critical hit.
    pub fn compute_base_damage(&mut self, rng: &mut TurnRng) -> u32 {
        let roll = rng.next_in_range(MIN_ATTACK_ROLL, MAX_ATTACK_ROLL, "attack damage");
        self.critical_hit = Self::roll_critical_chance(rng);
        roll + self.power
    }

    /// Damage against `enemy` after the type matchup. Records the matchup and
    /// the critical flag on this pokemon.
    pub fn compute_effective_damage(&mut self, enemy: &Pokemon, rng: &mut TurnRng) -> f64 {
        let base_damage = self.compute_base_damage(rng);
        let effectiveness =
            crate::battle::calculators::resolve_effectiveness(self, enemy, self.critical_hit);
        self.effectiveness = Some(effectiveness);
        round2(base_damage as f64 * effectiveness.multiplier())
    }

    /// Pick one of the known attacks at random and land it on `enemy`.
    pub fn attack(&mut self, enemy: &mut Pokemon, rng: &mut TurnRng) {
        let attack_index = rng.next_index(self.attacks.len(), "attack choice");
        let damage = self.compute_effective_damage(enemy, rng);
        self.current_attack = Some(self.attacks[attack_index].clone());
        self.attack_damage = damage;
        enemy.subtract_hp(damage);
    }

    /// Attack only when the enemy can still be hurt. Returns whether an attack happened.
    pub fn continue_battle_if_alive(&mut self, enemy: &mut Pokemon, rng: &mut TurnRng) -> bool {
        if enemy.has_hp() {
            self.attack(enemy, rng);
            true
        } else {
            false
        }
    }

    /// Clear the per-turn attack data.
    pub fn reset_battle_buffs(&mut self) {
        self.current_attack = None;
        self.attack_damage = 0.0;
        self.effectiveness = None;
        self.critical_hit = false;
    }
}

fn capitalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
