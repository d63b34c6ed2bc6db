// Character baseline (level 1)
pub const BASE_ATTACK: u32 = 5;
pub const BASE_DEFENSE: u32 = 20;
pub const BASE_HP: u32 = 20;
pub const BASE_MP: u32 = 10;

// Canonical per-level growth used to build sweep characters
pub const ATTACK_PER_LEVEL: u32 = 3;
pub const DEFENSE_PER_LEVEL: u32 = 6;
pub const MP_PER_LEVEL: u32 = 4;

// Monster counterattack: damage = AP * K / (defense + K) * variance
pub const DAMAGE_K: f64 = 20.0;
pub const MONSTER_DAMAGE_VARIANCE_MIN: f64 = 0.84;
pub const MONSTER_DAMAGE_VARIANCE_MAX: f64 = 1.16;
pub const MIN_MONSTER_DAMAGE: u32 = 1;

// Flee: roll 1..=FLEE_ROLL_SIDES, escape on FLEE_SUCCESS_ROLL
pub const FLEE_ROLL_SIDES: u32 = 4;
pub const FLEE_SUCCESS_ROLL: u32 = 1;

// Battle log
pub const BATTLE_LOG_CAPACITY: usize = 5;
pub const MAX_TURNS_PER_BATTLE: u32 = 10_000;

// Encounter table
pub const ENCOUNTER_ROLL_MAX: u32 = 21;
pub const SCALING_COIN_PROBABILITY: f64 = 0.5;
pub const GREAT_PREFIX: &str = "Great ";

// Leveling
pub const INITIAL_NEXT_LEVEL_XP: u32 = 30;
pub const NEXT_LEVEL_XP_PER_LEVEL: u32 = 30;
pub const LEVEL_UP_ATTACK_BONUS: u32 = 2;
pub const LEVEL_UP_DEFENSE_BONUS: u32 = 5;
pub const LEVEL_UP_MAGIC_BONUS: u32 = 4;

// Rewards
pub const GOLD_BONUS_PER_SCALE: u32 = 3;

// Prestige
pub const PRESTIGE_FLAT_STAT_BONUS: u32 = 5;
pub const PRESTIGE_MAX_STARTING_GOLD_BONUS: u32 = 100;
pub const PRESTIGE_STARTING_GOLD_STEP: u32 = 25;
pub const PRESTIGE_MAX_XP_MULTIPLIER_BONUS: f64 = 0.5;
pub const PRESTIGE_XP_MULTIPLIER_STEP: f64 = 0.1;

// Simulation strategy
pub const SPELLS_FIRST_HEAL_THRESHOLD: f64 = 0.35;
