use super::spells::{available_spells, spell_at};
use super::types::{BattleAction, BattleContext, BattleResult, BattleState, Turn};
use crate::core::constants::*;
use rand::Rng;

/// Player melee damage: base attack plus effective weapon bonus. No variance.
pub fn player_attack_damage(state: &BattleState, ctx: &BattleContext) -> u32 {
    ctx.total_attack(&state.character)
}

/// Monster counterattack damage against `total_defense`.
///
/// `max(1, floor(attack * K / (defense + K) * m))` with `m` uniform in
/// the variance band.
pub fn monster_damage(attack_power: u32, total_defense: u32, rng: &mut impl Rng) -> u32 {
    let mitigated = attack_power as f64 * DAMAGE_K / (total_defense as f64 + DAMAGE_K);
    let variance = rng.gen_range(MONSTER_DAMAGE_VARIANCE_MIN..=MONSTER_DAMAGE_VARIANCE_MAX);
    ((mitigated * variance).floor() as u32).max(MIN_MONSTER_DAMAGE)
}

/// One flee roll. Succeeds on `FLEE_SUCCESS_ROLL` out of `FLEE_ROLL_SIDES`.
pub fn roll_flee(rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=FLEE_ROLL_SIDES) == FLEE_SUCCESS_ROLL
}

/// Applies a player action and returns the next state.
///
/// Actions out of turn, after the battle ended, or not currently legal
/// (unknown or unaffordable spell) return the state unchanged.
pub fn resolve_turn(
    state: &BattleState,
    action: BattleAction,
    ctx: &BattleContext,
    rng: &mut impl Rng,
) -> BattleState {
    if state.is_over() || state.turn != Turn::Player {
        return state.clone();
    }

    let mut next = state.clone();
    match action {
        BattleAction::Attack => player_attack(&mut next, ctx),
        BattleAction::Magic => {
            if available_spells(next.character.level).next().is_none() {
                return state.clone();
            }
            next.spell_menu_open = true;
        }
        BattleAction::Run => attempt_flee(&mut next, ctx, rng),
        BattleAction::CastSpell(index) => {
            if !cast_spell(&mut next, index, ctx, rng) {
                return state.clone();
            }
        }
    }
    next
}

/// Performs the monster's counterattack when it holds the turn, then hands
/// the turn back to the player.
pub fn resolve_monster_turn(
    state: &BattleState,
    ctx: &BattleContext,
    rng: &mut impl Rng,
) -> BattleState {
    if state.is_over() || state.turn != Turn::Monster {
        return state.clone();
    }

    let mut next = state.clone();
    monster_counterattack(&mut next, ctx, rng);
    next.turn = Turn::Player;
    next
}

fn player_attack(state: &mut BattleState, ctx: &BattleContext) {
    let damage = player_attack_damage(state, ctx);
    state.spell_menu_open = false;
    state.monster.take_damage(damage);
    state.push_message(format!(
        "You hit the {} for {} damage.",
        state.monster.name(),
        damage
    ));
    end_player_turn(state);
}

fn attempt_flee(state: &mut BattleState, ctx: &BattleContext, rng: &mut impl Rng) {
    state.spell_menu_open = false;
    if roll_flee(rng) {
        state.result = BattleResult::Fled;
        state.push_message("You ran away safely.".to_string());
        return;
    }

    state.push_message("You couldn't escape!".to_string());
    monster_counterattack(state, ctx, rng);
}

/// Returns false when the spell is unknown or unaffordable; the state is
/// untouched in that case.
fn cast_spell(
    state: &mut BattleState,
    index: usize,
    ctx: &BattleContext,
    rng: &mut impl Rng,
) -> bool {
    let Some(spell) = spell_at(index) else {
        return false;
    };
    let level = state.character.level;
    if !spell.can_cast(level, state.character.current_mp) {
        return false;
    }
    state.character.spend_mp(spell.mp_cost);

    state.spell_menu_open = false;
    let effect = spell.roll_effect(level, ctx.spell_multiplier(), rng);
    if spell.is_healing {
        let restored = state.character.heal(effect);
        state.push_message(format!("{} restores {} HP.", spell.name, restored));
    } else {
        state.monster.take_damage(effect);
        state.push_message(format!(
            "{} hits the {} for {} damage.",
            spell.name,
            state.monster.name(),
            effect
        ));
    }
    end_player_turn(state);
    true
}

fn end_player_turn(state: &mut BattleState) {
    state.check_battle_end();
    if !state.is_over() {
        state.turn = Turn::Monster;
    }
}

fn monster_counterattack(state: &mut BattleState, ctx: &BattleContext, rng: &mut impl Rng) {
    let defense = ctx.total_defense(&state.character);
    let damage = monster_damage(state.monster.attack_power, defense, rng);
    state.character.take_damage(damage);
    state.push_message(format!(
        "The {} hits you for {} damage.",
        state.monster.name(),
        damage
    ));
    state.check_battle_end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::CharacterStats;
    use crate::equipment::{Armor, Weapon};
    use crate::monsters::types::{MonsterKind, MonsterStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn battle(level: u32, kind: MonsterKind, scale: u32) -> BattleState {
        BattleState::new(
            CharacterStats::at_level(level, Weapon::None, Armor::None),
            MonsterStats::scaled(kind, scale),
        )
    }

    #[test]
    fn test_monster_damage_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 20 * 20 / 40 = 10, band [8.4, 11.6]
        for _ in 0..10_000 {
            let dmg = monster_damage(20, 20, &mut rng);
            assert!((8..=11).contains(&dmg), "damage {}", dmg);
        }
    }

    #[test]
    fn test_monster_damage_minimum_is_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1_000 {
            assert_eq!(monster_damage(1, 10_000, &mut rng), 1);
            assert_eq!(monster_damage(0, 0, &mut rng), 1);
        }
    }

    #[test]
    fn test_attack_is_deterministic_and_hands_turn_over() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let ctx = BattleContext::default();
        let state = battle(1, MonsterKind::Bat, 1);
        let next = resolve_turn(&state, BattleAction::Attack, &ctx, &mut rng);
        assert_eq!(next.monster.current_hp, 5);
        assert_eq!(next.turn, Turn::Monster);
        assert_eq!(next.result, BattleResult::InProgress);

        let back = resolve_monster_turn(&next, &ctx, &mut rng);
        assert_eq!(back.turn, Turn::Player);
        assert!(back.character.current_hp < back.character.max_hp);
    }

    #[test]
    fn test_killing_blow_is_victory() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let state = battle(1, MonsterKind::Slime, 1);
        let next = resolve_turn(&state, BattleAction::Attack, &BattleContext::default(), &mut rng);
        assert_eq!(next.monster.current_hp, 0);
        assert_eq!(next.result, BattleResult::Victory);
    }

    #[test]
    fn test_out_of_turn_actions_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ctx = BattleContext::default();
        let mut state = battle(1, MonsterKind::Bat, 1);
        state.turn = Turn::Monster;
        assert_eq!(resolve_turn(&state, BattleAction::Attack, &ctx, &mut rng), state);

        state.turn = Turn::Player;
        assert_eq!(resolve_monster_turn(&state, &ctx, &mut rng), state);
    }

    #[test]
    fn test_finished_battle_is_frozen() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let ctx = BattleContext::default();
        let mut state = battle(1, MonsterKind::Bat, 1);
        state.result = BattleResult::Fled;
        for action in [
            BattleAction::Attack,
            BattleAction::Magic,
            BattleAction::Run,
            BattleAction::CastSpell(0),
        ] {
            assert_eq!(resolve_turn(&state, action, &ctx, &mut rng), state);
        }
    }

    #[test]
    fn test_invalid_spells_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ctx = BattleContext::default();
        let mut state = battle(1, MonsterKind::Bat, 1);

        // Cure needs level 2; index 99 does not exist
        assert_eq!(resolve_turn(&state, BattleAction::CastSpell(1), &ctx, &mut rng), state);
        assert_eq!(resolve_turn(&state, BattleAction::CastSpell(99), &ctx, &mut rng), state);

        state.character.current_mp = 2;
        assert_eq!(resolve_turn(&state, BattleAction::CastSpell(0), &ctx, &mut rng), state);
    }

    #[test]
    fn test_damage_spell_spends_mp() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let state = battle(1, MonsterKind::Spook, 3);
        let ctx = BattleContext::default();
        let next = resolve_turn(&state, BattleAction::CastSpell(0), &ctx, &mut rng);
        assert_eq!(next.character.current_mp, state.character.current_mp - 3);
        let dealt = state.monster.current_hp - next.monster.current_hp;
        assert!((12..=21).contains(&dealt), "dealt {}", dealt);
        assert_eq!(next.turn, Turn::Monster);
    }

    #[test]
    fn test_healing_never_exceeds_max() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = battle(2, MonsterKind::Bat, 1);
        state.character.take_damage(3);
        let ctx = BattleContext::default();
        let next = resolve_turn(&state, BattleAction::CastSpell(1), &ctx, &mut rng);
        assert_eq!(next.character.current_hp, next.character.max_hp);
        assert_eq!(next.monster, state.monster);
    }

    #[test]
    fn test_magic_only_opens_menu() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let state = battle(1, MonsterKind::Bat, 1);
        let next = resolve_turn(&state, BattleAction::Magic, &BattleContext::default(), &mut rng);
        assert!(next.spell_menu_open);
        assert_eq!(next.turn, Turn::Player);
        assert_eq!(next.character, state.character);
        assert_eq!(next.monster, state.monster);
    }

    #[test]
    fn test_failed_flee_counterattacks_and_keeps_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ctx = BattleContext::default();
        let state = battle(1, MonsterKind::Bat, 1);
        let mut saw_failure = false;
        for _ in 0..100 {
            let next = resolve_turn(&state, BattleAction::Run, &ctx, &mut rng);
            if next.result == BattleResult::Fled {
                assert_eq!(next.character.current_hp, state.character.current_hp);
            } else {
                saw_failure = true;
                assert!(next.character.current_hp < state.character.current_hp);
                assert_eq!(next.turn, Turn::Player);
            }
        }
        assert!(saw_failure);
    }

    #[test]
    fn test_flee_rate_is_one_in_four() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let ctx = BattleContext::default();
        let state = battle(10, MonsterKind::Slime, 1);
        let trials = 100_000;
        let fled = (0..trials)
            .filter(|_| {
                resolve_turn(&state, BattleAction::Run, &ctx, &mut rng).result == BattleResult::Fled
            })
            .count();
        let rate = fled as f64 / trials as f64;
        assert!((rate - 0.25).abs() < 0.01, "flee rate {}", rate);
    }

    #[test]
    fn test_random_play_keeps_values_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let ctx = BattleContext::default();
        let actions = [
            BattleAction::Attack,
            BattleAction::Magic,
            BattleAction::Run,
            BattleAction::CastSpell(0),
            BattleAction::CastSpell(1),
            BattleAction::CastSpell(4),
        ];
        for round in 0..500 {
            let level = 1 + round % 8;
            let mut state = battle(level, MonsterKind::ALL[round as usize % 9], 1 + round % 4);
            for _ in 0..200 {
                if state.is_over() {
                    break;
                }
                let action = actions[rng.gen_range(0..actions.len())];
                state = resolve_turn(&state, action, &ctx, &mut rng);
                state = resolve_monster_turn(&state, &ctx, &mut rng);
                assert!(state.character.current_hp <= state.character.max_hp);
                assert!(state.character.current_mp <= state.character.max_mp);
                assert!(state.monster.current_hp <= state.monster.max_hp);
                assert!(state.messages.len() <= BATTLE_LOG_CAPACITY);
            }
        }
    }
}
