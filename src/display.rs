//! Terminal rendering of session events. The only place colors and emoji live.

use pokemon_duel::{BattleEvent, SessionOutcome, SessionRecord, SessionSummary, Side, TurnReport};

const B_RED: &str = "\x1b[41m";
const B_GREEN: &str = "\x1b[42m";
const B_BLUE: &str = "\x1b[44m";
const B_WHITE: &str = "\x1b[47m";
const F_RED: &str = "\x1b[1;31m";
const F_WHITE: &str = "\x1b[37m";
const F_BLACK: &str = "\x1b[30m";
const NO_COLOR: &str = "\x1b[0m";

const I_WIN: &str = "🎉";
const I_LOSE: &str = "😵‍💫💀☠️";
const I_START: &str = "🦾😎";

fn speak(trainer: &str, colors: &str, message: &str, suffix: &str) {
    println!("{colors}{trainer}: {message}{suffix}{NO_COLOR}");
}

pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

pub fn print_intro(trainer: &str) {
    speak(trainer, &format!("{B_WHITE}{F_RED}"), "Time for a pokemon duel!", I_START);
}

/// Render one event. Turn bookkeeping events print nothing.
pub fn print_event(trainer: &str, event: &BattleEvent) {
    match event {
        BattleEvent::WildPokemonFound { count } => {
            println!("System: {count} wild pokemon found!");
        }
        BattleEvent::InitialPokemonAssigned { pokemon } => {
            println!("System: {trainer} received {pokemon}.");
        }
        BattleEvent::WildPokemonAppeared { pokemon, hp } => {
            println!(">> A wild {pokemon} appeared with {hp:.2} HP!");
        }
        BattleEvent::PokemonSentOut { pokemon } => {
            speak(trainer, &format!("{B_BLUE}{F_WHITE}"), &format!("{pokemon}, I choose you!"), " 👉🏼⛔");
        }
        BattleEvent::NoPokemonLeft => {
            speak(trainer, &format!("{B_RED}{F_WHITE}"), "I have no pokemon left!", "");
        }
        BattleEvent::ReturnedToBall { pokemon } => {
            println!(">> {pokemon} returns to its pokeball.");
        }
        BattleEvent::AttackUsed {
            side,
            attacker,
            defender,
            attack,
            damage,
            effectiveness,
            ..
        } => {
            let critical = if effectiveness.is_critical() { " 💥" } else { "" };
            match side {
                Side::Trainer => println!(
                    ">>⬆️  {B_GREEN}{F_BLACK}{attacker} used {attack} against the wild {defender} and dealt {damage:.2} damage{NO_COLOR} {}{critical}",
                    effectiveness.message()
                ),
                Side::Wild => println!(
                    ">>⬇️  {B_RED}{F_WHITE}The wild {attacker} used {attack} against {defender} and dealt {damage:.2} damage{NO_COLOR} {}{critical}",
                    effectiveness.message()
                ),
            }
        }
        BattleEvent::PokemonFainted { pokemon, .. } => {
            println!(">>> {pokemon} has been defeated!");
        }
        BattleEvent::PokemonCaught { pokemon, .. } => {
            println!("{B_GREEN}{F_BLACK}Congratulations! You caught a {pokemon}!{NO_COLOR}");
            speak(trainer, &format!("{B_GREEN}{F_BLACK}"), &format!("I caught a {pokemon}!!"), "");
        }
        BattleEvent::SessionEnded { outcome } => match outcome {
            SessionOutcome::Won => {
                speak(trainer, &format!("{B_WHITE}{F_RED}"), "I won the pokemon league!", I_WIN)
            }
            SessionOutcome::Lost => {
                speak(trainer, &format!("{B_RED}{F_WHITE}"), "I ran out of pokemon!", I_LOSE)
            }
        },
        BattleEvent::TurnStarted { .. }
        | BattleEvent::TurnEnded
        | BattleEvent::PokeballThrown { .. }
        | BattleEvent::ScoreUpdated { .. } => {}
    }
}

/// Render the status panel of a turn followed by its events.
pub fn print_turn(trainer: &str, report: &TurnReport) {
    let (mine, my_hp) = report
        .trainer_pokemon
        .as_ref()
        .map_or(("-", 0.0), |pokemon| (pokemon.name.as_str(), pokemon.hp));
    let (wild, wild_hp) = report
        .wild_pokemon
        .as_ref()
        .map_or(("-", 0.0), |pokemon| (pokemon.name.as_str(), pokemon.hp));

    let icons = report
        .trainer_pokemon
        .as_ref()
        .map_or(String::new(), |pokemon| format!("{} {}", pokemon.icon, pokemon.icon_element));

    println!(
        "Turn {:<4}   Current pokemon: {} {:<8}   Score: {}",
        report.turn_number, mine, icons, report.score
    );
    println!("Remaining: {:02}", report.party.len());
    println!("Pokemon: {}", report.party.join(" | "));
    for event in report.events.events() {
        print_event(trainer, event);
    }
    println!("    Your pokemon: {mine:<10}            Wild: {wild:<10}");
    println!("    HP: {my_hp:06.2}                       HP: {wild_hp:06.2}");
}

pub fn print_summary(summary: &SessionSummary) {
    for event in summary.events.events() {
        print_event(&summary.trainer_name, event);
    }

    speak(&summary.trainer_name, &format!("{B_BLUE}{F_WHITE}"), "My pokemon are:", "");
    for pokemon in &summary.roster.party {
        println!("{}: {} with {:.2} HP.", summary.trainer_name, pokemon.name, pokemon.hp);
    }
    speak(&summary.trainer_name, &format!("{B_BLUE}{F_WHITE}"), "My defeated pokemon are:", "");
    for pokemon in &summary.roster.defeated {
        println!("{}: {} with {:.2} HP.", summary.trainer_name, pokemon.name, pokemon.hp);
    }
    println!("Final score: {}", summary.score);
}

pub fn print_leaderboard(records: &[SessionRecord]) {
    println!("Players ordered by score DESC:");
    println!("{:<4} {:<20} {:<6} {:>8} {:>6}", "#", "trainer", "status", "pokemon", "score");
    for (position, record) in records.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<6} {:>8} {:>6}",
            position + 1,
            record.trainer_name,
            record.outcome.to_string(),
            record.pokemon_count,
            record.score
        );
    }
}
