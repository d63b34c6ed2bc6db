//! Single-battle simulation with a scripted player.

use crate::character::stats::CharacterStats;
use crate::combat::logic::{resolve_monster_turn, resolve_turn};
use crate::combat::spells::{available_spells, Spell};
use crate::combat::types::{BattleAction, BattleContext, BattleResult, BattleState};
use crate::core::constants::*;
use crate::monsters::types::MonsterStats;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How the simulated player picks actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStrategy {
    /// Melee every turn
    #[default]
    AttackOnly,
    /// Heal when low, otherwise the strongest affordable damage spell,
    /// falling back to melee when out of MP
    SpellsFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// Hit the turn cap; counted as a loss
    TurnLimit,
}

impl BattleOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }
}

/// What happened in one simulated battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleLog {
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub player_hp_remaining: u32,
    pub monster_hp_remaining: u32,
}

/// Strongest castable spell of the requested kind, by maximum effect.
fn best_spell(state: &BattleState, healing: bool) -> Option<(usize, &'static Spell)> {
    let character = &state.character;
    available_spells(character.level)
        .filter(|(_, s)| s.is_healing == healing)
        .filter(|(_, s)| s.can_cast(character.level, character.current_mp))
        .max_by_key(|(_, s)| s.base_effect + s.random_bonus)
}

/// Picks the next action for `strategy`. Only ever returns legal actions.
pub fn choose_action(state: &BattleState, strategy: PlayerStrategy) -> BattleAction {
    match strategy {
        PlayerStrategy::AttackOnly => BattleAction::Attack,
        PlayerStrategy::SpellsFirst => {
            if state.character.hp_fraction() < SPELLS_FIRST_HEAL_THRESHOLD {
                if let Some((index, _)) = best_spell(state, true) {
                    return BattleAction::CastSpell(index);
                }
            }
            match best_spell(state, false) {
                Some((index, _)) => BattleAction::CastSpell(index),
                None => BattleAction::Attack,
            }
        }
    }
}

/// One player action followed by the monster's reply, if it gets one.
/// Returns the new state with the damage dealt and taken this round.
/// A failed flee's counterattack counts as damage taken.
fn play_round(
    state: &BattleState,
    action: BattleAction,
    ctx: &BattleContext,
    rng: &mut impl Rng,
) -> (BattleState, u32, u32) {
    let mut next = resolve_turn(state, action, ctx, rng);
    let dealt = state.monster.current_hp.saturating_sub(next.monster.current_hp);
    let mut taken = state.character.current_hp.saturating_sub(next.character.current_hp);

    if !next.is_over() {
        let player_hp = next.character.current_hp;
        next = resolve_monster_turn(&next, ctx, rng);
        taken = taken.saturating_add(player_hp.saturating_sub(next.character.current_hp));
    }
    (next, dealt, taken)
}

/// Fights until the battle ends or the turn cap is hit, returning the log
/// and the final state. The player acts first each round.
pub fn run_battle(
    character: &CharacterStats,
    monster: &MonsterStats,
    ctx: &BattleContext,
    strategy: PlayerStrategy,
    rng: &mut impl Rng,
) -> (BattleLog, BattleState) {
    let mut state = BattleState::new(character.clone(), monster.clone());
    let mut turns = 0;
    let mut damage_dealt = 0u32;
    let mut damage_taken = 0u32;

    while !state.is_over() && turns < MAX_TURNS_PER_BATTLE {
        turns += 1;
        let action = choose_action(&state, strategy);
        let (next, dealt, taken) = play_round(&state, action, ctx, rng);
        state = next;
        damage_dealt = damage_dealt.saturating_add(dealt);
        damage_taken = damage_taken.saturating_add(taken);
    }

    let outcome = match state.result {
        BattleResult::Victory => BattleOutcome::Victory,
        BattleResult::InProgress => BattleOutcome::TurnLimit,
        BattleResult::Defeat | BattleResult::Fled => BattleOutcome::Defeat,
    };
    trace!(
        monster = state.monster.name(),
        ?outcome,
        turns,
        "battle finished"
    );

    let log = BattleLog {
        outcome,
        turns,
        damage_dealt,
        damage_taken,
        player_hp_remaining: state.character.current_hp,
        monster_hp_remaining: state.monster.current_hp,
    };
    (log, state)
}

/// Runs one battle from fresh copies of the combatants.
pub fn simulate_battle(
    character: &CharacterStats,
    monster: &MonsterStats,
    ctx: &BattleContext,
    strategy: PlayerStrategy,
    rng: &mut impl Rng,
) -> BattleLog {
    run_battle(character, monster, ctx, strategy, rng).0
}
