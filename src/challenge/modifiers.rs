//! Pure functions mapping base values to challenge/prestige-adjusted ones.

use super::config::{DifficultyLevel, EquipmentMode};
use crate::character::prestige::PrestigeData;
use crate::character::stats::CharacterStats;
use crate::core::constants::PRESTIGE_MAX_STARTING_GOLD_BONUS;
use crate::monsters::types::MonsterStats;

/// Weapon bonus after the challenge's weapon mode is applied.
pub fn effective_weapon_bonus(base_bonus: u32, mode: EquipmentMode) -> u32 {
    scale_equipment_bonus(base_bonus, mode)
}

/// Armor bonus after the challenge's armor mode is applied.
pub fn effective_armor_bonus(base_bonus: u32, mode: EquipmentMode) -> u32 {
    scale_equipment_bonus(base_bonus, mode)
}

fn scale_equipment_bonus(base_bonus: u32, mode: EquipmentMode) -> u32 {
    if !mode.enabled() {
        return 0;
    }
    (base_bonus as f64 * mode.power_multiplier()).round() as u32
}

/// Shop price under an equipment mode.
pub fn adjusted_price(base_price: u32, mode: EquipmentMode) -> u32 {
    (base_price as f64 * mode.cost_multiplier()).round() as u32
}

/// Multiplies monster attack and HP by the difficulty tier's multiplier.
/// The neutral tier returns the stats untouched.
pub fn apply_difficulty_to_monster(
    stats: &MonsterStats,
    difficulty: DifficultyLevel,
) -> MonsterStats {
    if difficulty == DifficultyLevel::Normal {
        return stats.clone();
    }

    let multiplier = difficulty.monster_multiplier();
    MonsterStats {
        attack_power: stats.attack_power.saturating_mul(multiplier),
        current_hp: stats.current_hp.saturating_mul(multiplier),
        max_hp: stats.max_hp.saturating_mul(multiplier),
        ..stats.clone()
    }
}

/// Applies creation-time prestige bonuses: only starting gold, capped at
/// `PRESTIGE_MAX_STARTING_GOLD_BONUS`.
pub fn apply_prestige_bonuses_to_character(
    stats: &CharacterStats,
    prestige: &PrestigeData,
) -> CharacterStats {
    let mut next = stats.clone();
    next.gain_gold(prestige.starting_gold_bonus.min(PRESTIGE_MAX_STARTING_GOLD_BONUS));
    next
}

/// Spell effect multiplier granted by prestige. No prestige bonus currently
/// touches spells, so this is the neutral multiplier.
pub fn spell_effect_multiplier(_prestige: &PrestigeData) -> f64 {
    1.0
}

/// Gear name as shown under an equipment mode, e.g. "Great long sword".
pub fn equipment_display_name(base_name: &str, mode: EquipmentMode) -> String {
    match mode.label() {
        Some(label) => format!("{} {}", label, base_name),
        None => base_name.to_string(),
    }
}

/// Monster name as shown under a difficulty tier, e.g. "massive Bat".
pub fn monster_display_name(base_name: &str, difficulty: DifficultyLevel) -> String {
    match difficulty.monster_label() {
        Some(label) => format!("{} {}", label, base_name),
        None => base_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::types::MonsterKind;

    #[test]
    fn test_effective_bonus_by_mode() {
        assert_eq!(effective_weapon_bonus(5, EquipmentMode::None), 0);
        assert_eq!(effective_weapon_bonus(5, EquipmentMode::Normal), 5);
        assert_eq!(effective_weapon_bonus(5, EquipmentMode::Great), 10);
        assert_eq!(effective_weapon_bonus(5, EquipmentMode::Beatdown), 50);
        assert_eq!(effective_armor_bonus(28, EquipmentMode::None), 0);
        assert_eq!(effective_armor_bonus(28, EquipmentMode::Great), 56);
    }

    #[test]
    fn test_adjusted_price() {
        assert_eq!(adjusted_price(65, EquipmentMode::Normal), 65);
        assert_eq!(adjusted_price(65, EquipmentMode::Great), 130);
        assert_eq!(adjusted_price(65, EquipmentMode::Beatdown), 650);
        assert_eq!(adjusted_price(65, EquipmentMode::None), 0);
    }

    #[test]
    fn test_neutral_difficulty_is_identity() {
        let mut monster = MonsterStats::scaled(MonsterKind::Spook, 4);
        monster.label = "Great Great Great Spook".to_string();
        monster.take_damage(3);
        let adjusted = apply_difficulty_to_monster(&monster, DifficultyLevel::Normal);
        assert_eq!(adjusted, monster);
    }

    #[test]
    fn test_difficulty_multiplies_attack_and_hp() {
        let monster = MonsterStats::scaled(MonsterKind::Bat, 2);
        let hard = apply_difficulty_to_monster(&monster, DifficultyLevel::Hard);
        assert_eq!(hard.attack_power, 12);
        assert_eq!(hard.max_hp, 60);
        assert_eq!(hard.current_hp, 60);
        assert_eq!(hard.scaling_factor, 2);

        let insane = apply_difficulty_to_monster(&monster, DifficultyLevel::Insane);
        assert_eq!(insane.attack_power, 20);
        assert_eq!(insane.max_hp, 100);
    }

    #[test]
    fn test_prestige_only_changes_gold() {
        let base = CharacterStats::new();
        let prestige = PrestigeData {
            starting_gold_bonus: 75,
            has_ap_bonus: true,
            ..PrestigeData::default()
        };
        let boosted = apply_prestige_bonuses_to_character(&base, &prestige);
        assert_eq!(boosted.gold, 75);
        assert_eq!(boosted.base_attack, base.base_attack);
        assert_eq!(boosted.max_hp, base.max_hp);
    }

    #[test]
    fn test_starting_gold_is_capped() {
        let prestige = PrestigeData {
            starting_gold_bonus: 5_000,
            ..PrestigeData::default()
        };
        let boosted = apply_prestige_bonuses_to_character(&CharacterStats::new(), &prestige);
        assert_eq!(boosted.gold, PRESTIGE_MAX_STARTING_GOLD_BONUS);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(equipment_display_name("dagger", EquipmentMode::Great), "Great dagger");
        assert_eq!(equipment_display_name("dagger", EquipmentMode::Normal), "dagger");
        assert_eq!(monster_display_name("Bat", DifficultyLevel::Insane), "massive Bat");
        assert_eq!(monster_display_name("Bat", DifficultyLevel::Normal), "Bat");
    }
}
