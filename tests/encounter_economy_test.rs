//! Integration test: encounters, rewards and leveling
//!
//! Statistical and table checks over the monster generator and the
//! victory pipeline, through the public API.

use zargon::challenge::{apply_difficulty_to_monster, ChallengeConfig, DifficultyLevel};
use zargon::character::{xp_multiplier, CharacterStats, PrestigeData};
use zargon::combat::{resolve_monster_turn, resolve_turn, BattleAction, BattleContext, BattleState};
use zargon::core::{BATTLE_LOG_CAPACITY, INITIAL_NEXT_LEVEL_XP};
use zargon::equipment::{Armor, Weapon};
use zargon::monsters::{
    generate_monster, generate_monster_for_challenge, roll_monster_kind, roll_scaling_factor,
    EncounterContext, EnvironmentFlags, MonsterKind, MonsterStats, WorldPosition,
};
use zargon::progression::{
    award_victory, compute_rewards, gold_reward, next_level_threshold, xp_reward, SpecialItem,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[test]
fn test_scaling_factor_is_binomial() {
    let mut rng = ChaCha8Rng::seed_from_u64(1001);
    let samples: Vec<f64> = (0..20_000)
        .map(|_| roll_scaling_factor(11, &mut rng))
        .inspect(|f| assert!((1..=11).contains(f)))
        .map(|f| f as f64)
        .collect();

    // Binomial(10, 0.5) + 1: mean 6, variance 2.5
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    assert!((mean - 6.0).abs() < 0.1, "mean {}", mean);
    assert!((variance - 2.5).abs() < 0.2, "variance {}", variance);

    for _ in 0..100 {
        assert_eq!(roll_scaling_factor(1, &mut rng), 1);
    }
}

#[test]
fn test_level_one_never_meets_gated_monsters() {
    let mut rng = ChaCha8Rng::seed_from_u64(1002);
    let mut seen = HashSet::new();
    for _ in 0..5_000 {
        let kind = roll_monster_kind(1, &mut rng);
        assert!(kind.min_level() <= 1, "{:?} at level 1", kind);
        seen.insert(kind);
    }
    for kind in [MonsterKind::Slime, MonsterKind::Bat, MonsterKind::Babble, MonsterKind::Spook] {
        assert!(seen.contains(&kind));
    }
}

#[test]
fn test_high_level_meets_the_whole_table() {
    let mut rng = ChaCha8Rng::seed_from_u64(1003);
    let seen: HashSet<MonsterKind> = (0..5_000)
        .map(|_| generate_monster(&EncounterContext::wandering(10), &mut rng).kind)
        .collect();
    let expected: HashSet<MonsterKind> = MonsterKind::WANDERING.into_iter().collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_great_prefix_matches_scale() {
    let mut rng = ChaCha8Rng::seed_from_u64(1004);
    for _ in 0..500 {
        let monster = generate_monster(&EncounterContext::wandering(6), &mut rng);
        let prefixes = monster.label.matches("Great ").count() as u32;
        assert_eq!(prefixes, monster.scaling_factor - 1);
        assert!(monster.label.ends_with(monster.kind.display_name()));
    }
}

#[test]
fn test_ship_always_meets_the_kraken() {
    let mut rng = ChaCha8Rng::seed_from_u64(1005);
    let ctx = EncounterContext {
        environment: EnvironmentFlags { in_ship: true },
        ..EncounterContext::wandering(3)
    };
    for _ in 0..50 {
        let monster = generate_monster(&ctx, &mut rng);
        assert_eq!(monster.kind, MonsterKind::Kraken);
        assert_eq!(monster.scaling_factor, 1);
    }
}

#[test]
fn test_zargon_guards_the_lair() {
    let mut rng = ChaCha8Rng::seed_from_u64(1006);
    let ctx = EncounterContext {
        position: WorldPosition::new(3, 2, 14, 5),
        ..EncounterContext::wandering(12)
    };
    let monster = generate_monster(&ctx, &mut rng);
    assert_eq!(monster.kind, MonsterKind::Zargon);
    assert_eq!(monster.attack_power, 60);
    assert_eq!(monster.max_hp, 300);

    let insane = ChallengeConfig {
        difficulty: DifficultyLevel::Insane,
        ..ChallengeConfig::default()
    };
    let boosted = generate_monster_for_challenge(&ctx, &insane, &mut rng);
    assert_eq!(boosted.attack_power, 300);
    assert_eq!(boosted.max_hp, 1_500);
    assert!(boosted.label.starts_with("massive"));
}

#[test]
fn test_normal_difficulty_changes_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(1007);
    for _ in 0..200 {
        let monster = generate_monster(&EncounterContext::wandering(8), &mut rng);
        let adjusted = apply_difficulty_to_monster(&monster, DifficultyLevel::Normal);
        assert_eq!(adjusted, monster);
    }
}

#[test]
fn test_boss_rewards_ignore_scale() {
    for kind in [MonsterKind::Kraken, MonsterKind::Zargon] {
        assert_eq!(xp_reward(kind, 1), xp_reward(kind, 7));
        // Only the per-scale gold bonus moves
        assert_eq!(gold_reward(kind, 4) - gold_reward(kind, 1), 9);
    }
    assert_eq!(xp_reward(MonsterKind::Spook, 3), 3 * xp_reward(MonsterKind::Spook, 1));
    assert_eq!(gold_reward(MonsterKind::Bat, 2), 5 * 2 + 6);
}

#[test]
fn test_necro_drops_a_soul_only_in_its_world() {
    let lair = WorldPosition::new(4, 2, 0, 0);
    let home = WorldPosition::home();
    assert_eq!(
        compute_rewards(MonsterKind::Necro, 1, &lair).item,
        Some(SpecialItem::TrappedSoul)
    );
    assert_eq!(compute_rewards(MonsterKind::Necro, 1, &home).item, None);
    assert_eq!(compute_rewards(MonsterKind::Bat, 1, &lair).item, None);
}

#[test]
fn test_level_thresholds_strictly_increase() {
    let mut threshold = INITIAL_NEXT_LEVEL_XP;
    for level in 1..=20 {
        let next = next_level_threshold(level, threshold);
        assert!(next > threshold);
        threshold = next;
    }
}

#[test]
fn test_victory_levels_and_heals() {
    let mut rng = ChaCha8Rng::seed_from_u64(1008);
    let mut character = CharacterStats::new();
    character.take_damage(15);
    let monster = MonsterStats::scaled(MonsterKind::Beleth, 2);

    let rewards = award_victory(
        &mut character,
        &monster,
        &WorldPosition::home(),
        &PrestigeData::new(),
        &mut rng,
    );

    assert_eq!(rewards.xp, 36);
    assert_eq!(rewards.gold, 46);
    assert_eq!(rewards.level_ups.len(), 1);
    assert_eq!(character.level, 2);
    assert_eq!(character.next_level_xp, 90);
    assert_eq!(character.current_hp, character.max_hp);
    assert!(character.max_hp > 20);
}

#[test]
fn test_prestige_multiplies_xp() {
    let mut prestige = PrestigeData::new();
    prestige.xp_multiplier_bonus = 0.5;
    let mut rng = ChaCha8Rng::seed_from_u64(1009);
    let mut character = CharacterStats::new();

    let rewards = award_victory(
        &mut character,
        &MonsterStats::scaled(MonsterKind::Bat, 1),
        &WorldPosition::home(),
        &prestige,
        &mut rng,
    );
    assert_eq!(rewards.xp, (4.0 * xp_multiplier(&prestige)).round() as u32);
    assert_eq!(rewards.xp, 6);
}

/// Random legal and illegal actions never break the battle invariants
#[test]
fn test_random_battles_keep_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(1010);
    let ctx = BattleContext::default();
    let actions = [
        BattleAction::Attack,
        BattleAction::Magic,
        BattleAction::Run,
        BattleAction::CastSpell(0),
        BattleAction::CastSpell(1),
        BattleAction::CastSpell(7),
        BattleAction::CastSpell(42),
    ];

    for _ in 0..300 {
        let level = rng.gen_range(1..=10);
        let mut state = BattleState::new(
            CharacterStats::at_level(level, Weapon::None, Armor::None),
            generate_monster(&EncounterContext::wandering(level), &mut rng),
        );

        for _ in 0..200 {
            if state.is_over() {
                let frozen = resolve_turn(&state, BattleAction::Attack, &ctx, &mut rng);
                assert_eq!(frozen, state);
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
