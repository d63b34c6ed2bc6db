use super::rewards::{compute_rewards, SpecialItem};
use crate::character::prestige::{xp_multiplier, PrestigeData};
use crate::character::stats::CharacterStats;
use crate::core::constants::*;
use crate::monsters::generator::WorldPosition;
use crate::monsters::types::MonsterStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stat increases from a single level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpGains {
    pub new_level: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
}

/// Everything a victory granted, for logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictoryRewards {
    pub xp: u32,
    pub gold: u32,
    pub item: Option<SpecialItem>,
    pub level_ups: Vec<LevelUpGains>,
}

/// XP needed for the level after `level`, given the current threshold.
pub fn next_level_threshold(level: u32, current_threshold: u32) -> u32 {
    current_threshold
        .saturating_add(current_threshold)
        .saturating_add(level.saturating_mul(NEXT_LEVEL_XP_PER_LEVEL))
}

/// Applies one level-up: random stat gains, a new threshold and full HP/MP.
pub fn level_up(character: &mut CharacterStats, rng: &mut impl Rng) -> LevelUpGains {
    let level = character.level;
    let attack = rng.gen_range(0..=level).saturating_add(LEVEL_UP_ATTACK_BONUS);
    let defense = rng.gen_range(0..=level).saturating_add(LEVEL_UP_DEFENSE_BONUS);
    let magic = rng.gen_range(0..=level).saturating_add(LEVEL_UP_MAGIC_BONUS);

    character.base_attack = character.base_attack.saturating_add(attack);
    character.base_defense = character.base_defense.saturating_add(defense);
    character.max_hp = character.max_hp.saturating_add(defense);
    character.max_mp = character.max_mp.saturating_add(magic);
    character.next_level_xp = next_level_threshold(level, character.next_level_xp);
    character.level = character.level.saturating_add(1);
    character.full_restore();

    LevelUpGains {
        new_level: character.level,
        attack,
        defense,
        magic,
    }
}

/// Levels up as many times as the accumulated experience allows.
pub fn apply_experience(character: &mut CharacterStats, rng: &mut impl Rng) -> Vec<LevelUpGains> {
    let mut gains = Vec::new();
    while character.experience >= character.next_level_xp {
        let threshold = character.next_level_xp;
        gains.push(level_up(character, rng));
        // Saturated threshold
        if character.next_level_xp == threshold {
            break;
        }
    }
    gains
}

/// Grants the rewards for defeating `monster` and runs leveling.
pub fn award_victory(
    character: &mut CharacterStats,
    monster: &MonsterStats,
    position: &WorldPosition,
    prestige: &PrestigeData,
    rng: &mut impl Rng,
) -> VictoryRewards {
    let rewards = compute_rewards(monster.kind, monster.scaling_factor, position);
    let xp = (rewards.xp as f64 * xp_multiplier(prestige)).round() as u32;

    character.gain_experience(xp);
    character.gain_gold(rewards.gold);
    let level_ups = apply_experience(character, rng);

    VictoryRewards {
        xp,
        gold: rewards.gold,
        item: rewards.item,
        level_ups,
    }
}
