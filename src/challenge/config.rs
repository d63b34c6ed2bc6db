//! Challenge configurations and presets.

use serde::{Deserialize, Serialize};

/// Monster difficulty tier. `Normal` is the neutral tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyLevel {
    #[default]
    Normal,
    Hard,
    Insane,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Normal,
        DifficultyLevel::Hard,
        DifficultyLevel::Insane,
    ];

    /// Integer multiplier applied to monster attack and HP.
    pub fn monster_multiplier(&self) -> u32 {
        match self {
            DifficultyLevel::Normal => 1,
            DifficultyLevel::Hard => 3,
            DifficultyLevel::Insane => 5,
        }
    }

    pub fn monster_label(&self) -> Option<&'static str> {
        match self {
            DifficultyLevel::Normal => None,
            DifficultyLevel::Hard => Some("huge"),
            DifficultyLevel::Insane => Some("massive"),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            DifficultyLevel::Normal => "NORMAL",
            DifficultyLevel::Hard => "HARD",
            DifficultyLevel::Insane => "INSANE",
        }
    }
}

/// How weapons or armor behave under a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentMode {
    None,
    #[default]
    Normal,
    Great,
    Beatdown,
}

impl EquipmentMode {
    pub const ALL: [EquipmentMode; 4] = [
        EquipmentMode::None,
        EquipmentMode::Normal,
        EquipmentMode::Great,
        EquipmentMode::Beatdown,
    ];

    pub fn enabled(&self) -> bool {
        !matches!(self, EquipmentMode::None)
    }

    pub fn power_multiplier(&self) -> f64 {
        match self {
            EquipmentMode::None => 0.0,
            EquipmentMode::Normal => 1.0,
            EquipmentMode::Great => 2.0,
            EquipmentMode::Beatdown => 10.0,
        }
    }

    pub fn cost_multiplier(&self) -> f64 {
        match self {
            EquipmentMode::None => 0.0,
            EquipmentMode::Normal => 1.0,
            EquipmentMode::Great => 2.0,
            EquipmentMode::Beatdown => 10.0,
        }
    }

    /// Prefix shown before gear names, if any.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            EquipmentMode::None => Some("No"),
            EquipmentMode::Normal => None,
            EquipmentMode::Great => Some("Great"),
            EquipmentMode::Beatdown => Some("Beatdown"),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            EquipmentMode::None => "NONE",
            EquipmentMode::Normal => "NORMAL",
            EquipmentMode::Great => "GREAT",
            EquipmentMode::Beatdown => "BEATDOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimedChallenge {
    #[default]
    None,
    Quick,
    Fast,
}

impl TimedChallenge {
    pub const ALL: [TimedChallenge; 3] = [
        TimedChallenge::None,
        TimedChallenge::Quick,
        TimedChallenge::Fast,
    ];

    pub fn duration_minutes(&self) -> Option<u32> {
        match self {
            TimedChallenge::None => None,
            TimedChallenge::Quick => Some(10),
            TimedChallenge::Fast => Some(30),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            TimedChallenge::None => "NONE",
            TimedChallenge::Quick => "QUICK",
            TimedChallenge::Fast => "FAST",
        }
    }
}

/// A rules variant applied to a run or a sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChallengeConfig {
    pub difficulty: DifficultyLevel,
    pub weapon_mode: EquipmentMode,
    pub armor_mode: EquipmentMode,
    pub permanent_death: bool,
    pub timed_challenge: TimedChallenge,
    #[serde(default)]
    pub preset_name: Option<String>,
}

impl ChallengeConfig {
    /// Stable identifier used to record completions. Excludes the preset
    /// name, so a custom config equal to a preset shares its id.
    pub fn challenge_id(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.difficulty.id(),
            self.weapon_mode.id(),
            self.armor_mode.id(),
            self.permanent_death,
            self.timed_challenge.id()
        )
    }

    pub fn display_name(&self) -> &str {
        self.preset_name.as_deref().unwrap_or("Custom Challenge")
    }

    /// Number of distinct challenge ids.
    pub fn total_combinations() -> usize {
        DifficultyLevel::ALL.len()
            * EquipmentMode::ALL.len()
            * EquipmentMode::ALL.len()
            * 2
            * TimedChallenge::ALL.len()
    }

    fn preset(
        name: &str,
        difficulty: DifficultyLevel,
        weapon_mode: EquipmentMode,
        armor_mode: EquipmentMode,
        permanent_death: bool,
        timed_challenge: TimedChallenge,
    ) -> Self {
        Self {
            difficulty,
            weapon_mode,
            armor_mode,
            permanent_death,
            timed_challenge,
            preset_name: Some(name.to_string()),
        }
    }

    pub fn beginner() -> Self {
        Self::preset(
            "Beginner",
            DifficultyLevel::Normal,
            EquipmentMode::Normal,
            EquipmentMode::Normal,
            false,
            TimedChallenge::None,
        )
    }

    pub fn easy_beatdown() -> Self {
        Self::preset(
            "Easy Beatdown",
            DifficultyLevel::Normal,
            EquipmentMode::Beatdown,
            EquipmentMode::Beatdown,
            false,
            TimedChallenge::None,
        )
    }

    pub fn glass_cannon() -> Self {
        Self::preset(
            "Glass Cannon",
            DifficultyLevel::Hard,
            EquipmentMode::Beatdown,
            EquipmentMode::None,
            false,
            TimedChallenge::None,
        )
    }

    pub fn tank_mode() -> Self {
        Self::preset(
            "Tank Mode",
            DifficultyLevel::Normal,
            EquipmentMode::None,
            EquipmentMode::Beatdown,
            false,
            TimedChallenge::None,
        )
    }

    pub fn speedrun() -> Self {
        Self::preset(
            "Speedrun",
            DifficultyLevel::Normal,
            EquipmentMode::Great,
            EquipmentMode::Great,
            false,
            TimedChallenge::Fast,
        )
    }

    pub fn nightmare() -> Self {
        Self::preset(
            "Nightmare",
            DifficultyLevel::Insane,
            EquipmentMode::Normal,
            EquipmentMode::Normal,
            true,
            TimedChallenge::None,
        )
    }

    pub fn true_mastery() -> Self {
        Self::preset(
            "True Mastery",
            DifficultyLevel::Insane,
            EquipmentMode::None,
            EquipmentMode::None,
            true,
            TimedChallenge::Quick,
        )
    }

    pub fn presets() -> Vec<ChallengeConfig> {
        vec![
            Self::beginner(),
            Self::easy_beatdown(),
            Self::glass_cannon(),
            Self::tank_mode(),
            Self::speedrun(),
            Self::nightmare(),
            Self::true_mastery(),
        ]
    }

    /// Looks up a preset by case-insensitive name.
    pub fn preset_by_name(name: &str) -> Option<ChallengeConfig> {
        Self::presets()
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(name))
    }
}

/// Every distinct challenge configuration, without preset names.
pub fn all_challenge_configs() -> Vec<ChallengeConfig> {
    let mut configs = Vec::with_capacity(ChallengeConfig::total_combinations());
    for difficulty in DifficultyLevel::ALL {
        for weapon_mode in EquipmentMode::ALL {
            for armor_mode in EquipmentMode::ALL {
                for permanent_death in [false, true] {
                    for timed_challenge in TimedChallenge::ALL {
                        configs.push(ChallengeConfig {
                            difficulty,
                            weapon_mode,
                            armor_mode,
                            permanent_death,
                            timed_challenge,
                            preset_name: None,
                        });
                    }
                }
            }
        }
    }
    configs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_id_format() {
        let config = ChallengeConfig::nightmare();
        assert_eq!(config.challenge_id(), "INSANE_NORMAL_NORMAL_true_NONE");
        assert_eq!(ChallengeConfig::default().challenge_id(), "NORMAL_NORMAL_NORMAL_false_NONE");
    }

    #[test]
    fn test_total_combinations() {
        assert_eq!(ChallengeConfig::total_combinations(), 288);
    }

    #[test]
    fn test_presets_have_unique_ids() {
        let presets = ChallengeConfig::presets();
        let mut ids: Vec<String> = presets.iter().map(|p| p.challenge_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), presets.len());
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        let found = ChallengeConfig::preset_by_name("glass cannon").expect("preset exists");
        assert_eq!(found.difficulty, DifficultyLevel::Hard);
        assert!(!found.armor_mode.enabled());
        assert!(ChallengeConfig::preset_by_name("nope").is_none());
    }

    #[test]
    fn test_enabled_modes_have_positive_multipliers() {
        for mode in EquipmentMode::ALL.iter().filter(|m| m.enabled()) {
            assert!(mode.power_multiplier() > 0.0);
            assert!(mode.cost_multiplier() > 0.0);
        }
    }
}
