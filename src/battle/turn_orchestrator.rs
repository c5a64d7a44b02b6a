use crate::battle::state::{BattleEvent, EventBus, Side, Turn, TurnRng};
use crate::errors::CatchError;
use crate::pokemon::{Effectiveness, Pokemon};
use crate::trainer::Trainer;
use tracing::debug;

/// Flip a fair coin for who attacks next.
pub fn decide_turn(rng: &mut TurnRng) -> Turn {
    if rng.next_bool("turn order") {
        Turn::Player
    } else {
        Turn::Wild
    }
}

/// Resolve one turn: the side whose turn it is attacks, or the trainer spends
/// the turn sending out a pokemon when none is in battle.
pub fn manage_game_turn(
    turn: Turn,
    trainer: &mut Trainer,
    wild: &mut Pokemon,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match turn {
        Turn::Player => match trainer.pokemon_in_battle().map(Pokemon::has_hp) {
            Some(true) => {
                let thrown = rng.next_bool("pokeball throw");
                trainer.set_pokeball_thrown(thrown);
                bus.push(BattleEvent::PokeballThrown { thrown });

                if let Some(attacker) = trainer.pokemon_in_battle_mut() {
                    if attacker.continue_battle_if_alive(wild, rng) {
                        push_attack_event(Side::Trainer, attacker, wild, bus);
                    }
                }
            }
            Some(false) => {
                debug!("pokemon in battle is fainted, player turn skipped");
            }
            None => send_out_next(trainer, bus),
        },
        Turn::Wild => {
            if trainer.pokemon_in_battle().is_none() {
                send_out_next(trainer, bus);
            }
            if let Some(defender) = trainer.pokemon_in_battle_mut() {
                if defender.has_hp() && wild.continue_battle_if_alive(defender, rng) {
                    push_attack_event(Side::Wild, wild, defender, bus);
                }
            }
        }
    }
}

fn send_out_next(trainer: &mut Trainer, bus: &mut EventBus) {
    match trainer.next_pokemon() {
        Ok(pokemon) => bus.push(BattleEvent::PokemonSentOut {
            pokemon: pokemon.name.clone(),
        }),
        Err(_) => bus.push(BattleEvent::NoPokemonLeft),
    }
}

fn push_attack_event(side: Side, attacker: &Pokemon, defender: &Pokemon, bus: &mut EventBus) {
    let event = BattleEvent::AttackUsed {
        side,
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        attack: attacker.current_attack().unwrap_or_default().to_string(),
        damage: attacker.attack_damage(),
        effectiveness: attacker.effectiveness().unwrap_or(Effectiveness::Normal),
        critical: attacker.is_critical_hit(),
        remaining_hp: defender.hp(),
    };
    debug!(?event, "attack resolved");
    bus.push(event);
}

/// Retire a knocked out trainer pokemon, report a knocked out wild one and
/// clear the per-turn attack data on both.
pub fn apply_turn_result(trainer: &mut Trainer, wild: &mut Pokemon, bus: &mut EventBus) {
    let fainted = trainer
        .pokemon_in_battle()
        .filter(|pokemon| pokemon.is_fainted())
        .map(|pokemon| pokemon.name.clone());
    if let Some(pokemon) = fainted {
        bus.push(BattleEvent::PokemonFainted {
            side: Side::Trainer,
            pokemon,
        });
        if let Some(returned) = trainer.return_to_ball() {
            bus.push(BattleEvent::ReturnedToBall {
                pokemon: returned.name.clone(),
            });
        }
    }

    if wild.is_fainted() {
        bus.push(BattleEvent::PokemonFainted {
            side: Side::Wild,
            pokemon: wild.name.clone(),
        });
    }

    reset_battle_buffs(trainer, wild);
}

pub fn reset_battle_buffs(trainer: &mut Trainer, wild: &mut Pokemon) {
    if let Some(pokemon) = trainer.pokemon_in_battle_mut() {
        pokemon.reset_battle_buffs();
    }
    wild.reset_battle_buffs();
}

/// Catch the wild pokemon if a ball was thrown and it is knocked out. A
/// failed capture is not an error for the session.
pub fn resolve_capture(trainer: &mut Trainer, wild: &Pokemon, rng: &mut TurnRng, bus: &mut EventBus) {
    match trainer.catch_if_pokeball_thrown(wild, rng) {
        Ok(caught) => bus.push(BattleEvent::PokemonCaught {
            pokemon: caught.name,
            hp: caught.hp,
        }),
        Err(CatchError::BallNotThrown) => {}
        Err(error @ CatchError::TargetNotFainted { .. }) => {
            debug!(%error, "capture skipped");
        }
    }
}
