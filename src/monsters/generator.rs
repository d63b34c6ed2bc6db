//! Random encounter generation.
//!
//! Selection order:
//! 1. Environment overrides (aboard the ship: the Kraken).
//! 2. Fixed-location bosses gated on world cell and story progress.
//! 3. A 1..=21 roll mapped onto the wandering table. Kinds above the
//!    player's level are rejected and the roll is redrawn, which skews
//!    low-level encounters toward the weakest tiers.
//!
//! Wandering monsters then get a scaling factor of 1 plus one fair coin
//! flip per level above 1, i.e. Binomial(level - 1, 0.5) + 1.

use super::types::{MonsterKind, MonsterStats};
use crate::challenge::config::ChallengeConfig;
use crate::challenge::modifiers::{apply_difficulty_to_monster, monster_display_name};
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Where the player stands: which world map and which cell on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub world_x: i32,
    pub world_y: i32,
    pub x: i32,
    pub y: i32,
}

impl WorldPosition {
    pub fn new(world_x: i32, world_y: i32, x: i32, y: i32) -> Self {
        Self {
            world_x,
            world_y,
            x,
            y,
        }
    }

    /// Starting square between the weapon shop and the healer.
    pub fn home() -> Self {
        Self::new(2, 4, 6, 7)
    }

    pub fn on_world(&self, world_x: i32, world_y: i32) -> bool {
        self.world_x == world_x && self.world_y == world_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentFlags {
    pub in_ship: bool,
}

/// Everything the generator needs to know about the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterContext {
    pub player_level: u32,
    pub environment: EnvironmentFlags,
    pub position: WorldPosition,
    pub story_progress: f32,
}

impl EncounterContext {
    pub fn wandering(player_level: u32) -> Self {
        Self {
            player_level,
            environment: EnvironmentFlags::default(),
            position: WorldPosition::home(),
            story_progress: 1.0,
        }
    }
}

/// A scripted encounter pinned to a world cell.
struct FixedEncounter {
    kind: MonsterKind,
    world: (i32, i32),
    cells_x: RangeInclusive<i32>,
    cells_y: RangeInclusive<i32>,
    min_story: f32,
    attack_power: u32,
    hp: u32,
}

impl FixedEncounter {
    fn matches(&self, ctx: &EncounterContext) -> bool {
        ctx.position.on_world(self.world.0, self.world.1)
            && self.cells_x.contains(&ctx.position.x)
            && self.cells_y.contains(&ctx.position.y)
            && ctx.story_progress >= self.min_story
    }
}

fn fixed_encounters() -> [FixedEncounter; 2] {
    [
        FixedEncounter {
            kind: MonsterKind::Zargon,
            world: (3, 2),
            cells_x: 13..=16,
            cells_y: 4..=6,
            min_story: 0.0,
            attack_power: 60,
            hp: 300,
        },
        FixedEncounter {
            kind: MonsterKind::Necro,
            world: (4, 2),
            cells_x: 3..=3,
            cells_y: 2..=2,
            min_story: 3.0,
            attack_power: 45,
            hp: 30,
        },
    ]
}

/// Returns the override monster for this context, if any.
pub fn special_encounter(ctx: &EncounterContext) -> Option<MonsterStats> {
    if ctx.environment.in_ship {
        let kraken = MonsterKind::Kraken;
        return Some(MonsterStats::fixed(kraken, kraken.base_attack(), kraken.base_hp()));
    }

    fixed_encounters()
        .into_iter()
        .find(|e| e.matches(ctx))
        .map(|e| MonsterStats::fixed(e.kind, e.attack_power, e.hp))
}

/// Maps an encounter roll (1..=21) onto the wandering table.
pub fn kind_for_roll(roll: u32) -> Option<MonsterKind> {
    match roll {
        1..=4 => Some(MonsterKind::Bat),
        5..=7 => Some(MonsterKind::Babble),
        8..=9 => Some(MonsterKind::Spook),
        10..=12 => Some(MonsterKind::Beleth),
        13..=16 => Some(MonsterKind::Slime),
        17..=19 => Some(MonsterKind::SkanderSnake),
        20..=21 => Some(MonsterKind::Necro),
        _ => None,
    }
}

/// Draws a wandering monster kind the player is allowed to meet.
///
/// Always terminates: the Bat, Babble, Spook and Slime ranges are open at
/// level 1.
pub fn roll_monster_kind(player_level: u32, rng: &mut impl Rng) -> MonsterKind {
    loop {
        let roll = rng.gen_range(1..=ENCOUNTER_ROLL_MAX);
        if let Some(kind) = kind_for_roll(roll) {
            if kind.min_level() <= player_level {
                return kind;
            }
        }
    }
}

/// Binomial(level - 1, 0.5) + 1.
pub fn roll_scaling_factor(player_level: u32, rng: &mut impl Rng) -> u32 {
    let mut scaling_factor = 1;
    for _ in 1..player_level {
        if rng.gen_bool(SCALING_COIN_PROBABILITY) {
            scaling_factor += 1;
        }
    }
    scaling_factor
}

/// Builds a wandering monster with a rolled scaling factor. Each step above
/// 1 adds a "Great " prefix to the label.
pub fn create_scaled_monster(
    kind: MonsterKind,
    player_level: u32,
    rng: &mut impl Rng,
) -> MonsterStats {
    let scaling_factor = roll_scaling_factor(player_level, rng);
    let mut monster = MonsterStats::scaled(kind, scaling_factor);
    if scaling_factor > 1 {
        monster.label = format!(
            "{}{}",
            GREAT_PREFIX.repeat((scaling_factor - 1) as usize),
            kind.display_name()
        );
    }
    monster
}

/// Selects the monster for an encounter.
pub fn generate_monster(ctx: &EncounterContext, rng: &mut impl Rng) -> MonsterStats {
    if let Some(monster) = special_encounter(ctx) {
        return monster;
    }

    let kind = roll_monster_kind(ctx.player_level, rng);
    create_scaled_monster(kind, ctx.player_level, rng)
}

/// `generate_monster` followed by the challenge's difficulty multiplier
/// and label.
pub fn generate_monster_for_challenge(
    ctx: &EncounterContext,
    config: &ChallengeConfig,
    rng: &mut impl Rng,
) -> MonsterStats {
    let base = generate_monster(ctx, rng);
    let mut monster = apply_difficulty_to_monster(&base, config.difficulty);
    monster.label = monster_display_name(&monster.label, config.difficulty);
    monster
}
