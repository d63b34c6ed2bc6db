use serde::{Deserialize, Serialize};

/// Stable monster identity. Display text lives in `MonsterStats::label`
/// and never takes part in identity comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterKind {
    Slime,
    Bat,
    Babble,
    Spook,
    Beleth,
    SkanderSnake,
    Necro,
    Kraken,
    Zargon,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 9] = [
        MonsterKind::Slime,
        MonsterKind::Bat,
        MonsterKind::Babble,
        MonsterKind::Spook,
        MonsterKind::Beleth,
        MonsterKind::SkanderSnake,
        MonsterKind::Necro,
        MonsterKind::Kraken,
        MonsterKind::Zargon,
    ];

    /// Kinds that appear in the random encounter table.
    pub const WANDERING: [MonsterKind; 7] = [
        MonsterKind::Slime,
        MonsterKind::Bat,
        MonsterKind::Babble,
        MonsterKind::Spook,
        MonsterKind::Beleth,
        MonsterKind::SkanderSnake,
        MonsterKind::Necro,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MonsterKind::Slime => "Slime",
            MonsterKind::Bat => "Bat",
            MonsterKind::Babble => "Babble",
            MonsterKind::Spook => "Spook",
            MonsterKind::Beleth => "Beleth",
            MonsterKind::SkanderSnake => "SkanderSnake",
            MonsterKind::Necro => "Necro",
            MonsterKind::Kraken => "Kraken",
            MonsterKind::Zargon => "ZARGON",
        }
    }

    /// Base attack power at scaling factor 1.
    pub fn base_attack(&self) -> u32 {
        match self {
            MonsterKind::Slime => 1,
            MonsterKind::Bat => 2,
            MonsterKind::Babble => 5,
            MonsterKind::Spook => 7,
            MonsterKind::Beleth => 8,
            MonsterKind::SkanderSnake => 12,
            MonsterKind::Necro => 13,
            MonsterKind::Kraken => 40,
            MonsterKind::Zargon => 100,
        }
    }

    /// Base HP ("defense" in the old tables) at scaling factor 1.
    pub fn base_hp(&self) -> u32 {
        match self {
            MonsterKind::Slime => 5,
            MonsterKind::Bat => 10,
            MonsterKind::Babble => 12,
            MonsterKind::Spook => 14,
            MonsterKind::Beleth => 16,
            MonsterKind::SkanderSnake => 20,
            MonsterKind::Necro => 30,
            MonsterKind::Kraken => 200,
            MonsterKind::Zargon => 400,
        }
    }

    /// Minimum player level before this kind can be encountered.
    pub fn min_level(&self) -> u32 {
        match self {
            MonsterKind::Beleth => 2,
            MonsterKind::SkanderSnake => 5,
            MonsterKind::Necro => 6,
            _ => 1,
        }
    }

    /// Boss-tier kinds whose rewards ignore the scaling factor.
    pub fn is_non_scaling(&self) -> bool {
        matches!(self, MonsterKind::Kraken | MonsterKind::Zargon)
    }
}

/// An enemy combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub kind: MonsterKind,
    pub label: String,
    pub attack_power: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub scaling_factor: u32,
}

impl MonsterStats {
    /// Base stats multiplied by `scaling_factor` (clamped to at least 1).
    /// Saturates at `u32::MAX`.
    pub fn scaled(kind: MonsterKind, scaling_factor: u32) -> Self {
        let scale = scaling_factor.max(1);
        let hp = kind.base_hp().saturating_mul(scale);
        Self {
            kind,
            label: kind.display_name().to_string(),
            attack_power: kind.base_attack().saturating_mul(scale),
            current_hp: hp,
            max_hp: hp,
            scaling_factor: scale,
        }
    }

    /// Fixed, non-scaled stats for scripted encounters.
    pub fn fixed(kind: MonsterKind, attack_power: u32, hp: u32) -> Self {
        Self {
            kind,
            label: kind.display_name().to_string(),
            attack_power,
            current_hp: hp,
            max_hp: hp,
            scaling_factor: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.label
    }

    /// Identity comparison by kind tag only.
    pub fn same_kind(&self, other: &MonsterStats) -> bool {
        self.kind == other.kind
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }
}
