//! Kill rewards: experience, gold and scripted item drops.

use crate::core::constants::*;
use crate::monsters::generator::WorldPosition;
use crate::monsters::types::MonsterKind;
use serde::{Deserialize, Serialize};

/// Quest items dropped by specific monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialItem {
    TrappedSoul,
}

impl SpecialItem {
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecialItem::TrappedSoul => "trapped soul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
    pub item: Option<SpecialItem>,
}

fn base_xp(kind: MonsterKind) -> u32 {
    match kind {
        MonsterKind::Slime => 2,
        MonsterKind::Bat => 4,
        MonsterKind::Babble => 6,
        MonsterKind::Spook => 12,
        MonsterKind::Beleth => 18,
        MonsterKind::Necro => 20,
        MonsterKind::SkanderSnake => 25,
        MonsterKind::Kraken => 45,
        MonsterKind::Zargon => 100,
    }
}

fn base_gold(kind: MonsterKind) -> u32 {
    match kind {
        MonsterKind::Slime => 3,
        MonsterKind::Bat => 5,
        MonsterKind::Babble => 10,
        MonsterKind::Spook => 14,
        MonsterKind::Beleth => 20,
        MonsterKind::Necro => 20,
        MonsterKind::SkanderSnake => 25,
        MonsterKind::Kraken => 30,
        MonsterKind::Zargon => 100,
    }
}

fn table_multiplier(kind: MonsterKind, scaling_factor: u32) -> u32 {
    if kind.is_non_scaling() {
        1
    } else {
        scaling_factor.max(1)
    }
}

/// Base XP for a kill, before the prestige multiplier.
pub fn xp_reward(kind: MonsterKind, scaling_factor: u32) -> u32 {
    base_xp(kind).saturating_mul(table_multiplier(kind, scaling_factor))
}

/// Table gold (flat for bosses) plus the per-scale bonus every kind pays.
pub fn gold_reward(kind: MonsterKind, scaling_factor: u32) -> u32 {
    let scale = scaling_factor.max(1);
    base_gold(kind)
        .saturating_mul(table_multiplier(kind, scale))
        .saturating_add(scale.saturating_mul(GOLD_BONUS_PER_SCALE))
}

pub fn special_drop(kind: MonsterKind, position: &WorldPosition) -> Option<SpecialItem> {
    match kind {
        MonsterKind::Necro if position.on_world(4, 2) => Some(SpecialItem::TrappedSoul),
        _ => None,
    }
}

pub fn compute_rewards(
    kind: MonsterKind,
    scaling_factor: u32,
    position: &WorldPosition,
) -> Rewards {
    Rewards {
        xp: xp_reward(kind, scaling_factor),
        gold: gold_reward(kind, scaling_factor),
        item: special_drop(kind, position),
    }
}
