use crate::core::constants::*;
use crate::equipment::{Armor, Weapon};
use serde::{Deserialize, Serialize};

/// The player combatant.
///
/// HP, MP and gold are unsigned and every mutation saturates, so none of
/// them can go negative. Current HP/MP never exceed their maxima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub level: u32,
    pub experience: u32,
    pub next_level_xp: u32,
    pub gold: u32,

    pub base_attack: u32,
    pub base_defense: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub max_mp: u32,
    pub current_mp: u32,

    pub weapon: Weapon,
    pub armor: Armor,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            next_level_xp: INITIAL_NEXT_LEVEL_XP,
            gold: 0,
            base_attack: BASE_ATTACK,
            base_defense: BASE_DEFENSE,
            max_hp: BASE_HP,
            current_hp: BASE_HP,
            max_mp: BASE_MP,
            current_mp: BASE_MP,
            weapon: Weapon::None,
            armor: Armor::None,
        }
    }
}

impl CharacterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the canonical character for `level` with linear stat growth
    /// and full HP/MP. Used by the sweep so every cell at a level starts
    /// from the same baseline.
    pub fn at_level(level: u32, weapon: Weapon, armor: Armor) -> Self {
        let gained = level.saturating_sub(1);
        let grow = |base: u32, per_level: u32| {
            base.saturating_add(gained.saturating_mul(per_level))
        };
        let defense = grow(BASE_DEFENSE, DEFENSE_PER_LEVEL);
        let hp = grow(BASE_HP, DEFENSE_PER_LEVEL);
        let mp = grow(BASE_MP, MP_PER_LEVEL);

        Self {
            level: level.max(1),
            base_attack: grow(BASE_ATTACK, ATTACK_PER_LEVEL),
            base_defense: defense,
            max_hp: hp,
            current_hp: hp,
            max_mp: mp,
            current_mp: mp,
            weapon,
            armor,
            ..Self::default()
        }
    }

    pub fn weapon_bonus(&self) -> u32 {
        self.weapon.attack_bonus()
    }

    pub fn armor_bonus(&self) -> u32 {
        self.armor.defense_bonus()
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Heals up to `amount`, returning the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.current_hp));
        self.current_hp += restored;
        restored
    }

    /// Spends MP if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.current_mp < cost {
            return false;
        }
        self.current_mp -= cost;
        true
    }

    pub fn full_restore(&mut self) {
        self.current_hp = self.max_hp;
        self.current_mp = self.max_mp;
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spends gold if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }
}
