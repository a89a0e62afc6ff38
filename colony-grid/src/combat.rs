use crate::cell::Cell;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    DefenderWins,
    AttackerWins,
    Tie,
}

pub fn resolve(defender: &Cell, attacker: &Cell) -> CombatOutcome {
    match defender.traits.strength.cmp(&attacker.traits.strength) {
        Ordering::Greater => CombatOutcome::DefenderWins,
        Ordering::Less => CombatOutcome::AttackerWins,
        Ordering::Equal => CombatOutcome::Tie,
    }
}
