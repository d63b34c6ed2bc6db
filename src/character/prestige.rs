use crate::challenge::config::{ChallengeConfig, DifficultyLevel};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bonuses carried across playthroughs, earned by completing challenges.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrestigeData {
    pub completed_challenges: BTreeSet<String>,
    pub total_completions: u32,
    pub has_ap_bonus: bool,
    pub has_dp_bonus: bool,
    pub starting_gold_bonus: u32,
    pub xp_multiplier_bonus: f64,
}

impl PrestigeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permanent_ap_bonus(&self) -> u32 {
        if self.has_ap_bonus {
            PRESTIGE_FLAT_STAT_BONUS
        } else {
            0
        }
    }

    pub fn permanent_dp_bonus(&self) -> u32 {
        if self.has_dp_bonus {
            PRESTIGE_FLAT_STAT_BONUS
        } else {
            0
        }
    }

    pub fn has_completed(&self, config: &ChallengeConfig) -> bool {
        self.completed_challenges.contains(&config.challenge_id())
    }

    pub fn completion_percentage(&self) -> f64 {
        self.completed_challenges.len() as f64 / ChallengeConfig::total_combinations() as f64
            * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.completed_challenges.len() >= ChallengeConfig::total_combinations()
    }
}

/// Records a completed challenge and grants its rewards.
///
/// Completing the same challenge id again changes nothing. Rewards:
/// - Insane difficulty: +0.1 XP multiplier bonus (capped at 0.5)
/// - any timed challenge: +25 starting gold (capped at 100)
/// - weapons disabled: permanent +5 attack
/// - armor disabled: permanent +5 defense
pub fn record_completion(config: &ChallengeConfig, prestige: &PrestigeData) -> PrestigeData {
    let id = config.challenge_id();
    if prestige.completed_challenges.contains(&id) {
        return prestige.clone();
    }

    let mut next = prestige.clone();
    next.completed_challenges.insert(id);
    next.total_completions += 1;

    if config.difficulty == DifficultyLevel::Insane {
        next.xp_multiplier_bonus = (next.xp_multiplier_bonus + PRESTIGE_XP_MULTIPLIER_STEP)
            .min(PRESTIGE_MAX_XP_MULTIPLIER_BONUS);
    }
    if config.timed_challenge.duration_minutes().is_some() {
        next.starting_gold_bonus = (next.starting_gold_bonus + PRESTIGE_STARTING_GOLD_STEP)
            .min(PRESTIGE_MAX_STARTING_GOLD_BONUS);
    }
    if !config.weapon_mode.enabled() {
        next.has_ap_bonus = true;
    }
    if !config.armor_mode.enabled() {
        next.has_dp_bonus = true;
    }

    next
}

/// Multiplier applied to base XP rewards.
pub fn xp_multiplier(prestige: &PrestigeData) -> f64 {
    1.0 + prestige
        .xp_multiplier_bonus
        .clamp(0.0, PRESTIGE_MAX_XP_MULTIPLIER_BONUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_bonuses() {
        let p = PrestigeData::new();
        assert_eq!(p.permanent_ap_bonus(), 0);
        assert_eq!(p.permanent_dp_bonus(), 0);
        assert_eq!(xp_multiplier(&p), 1.0);
    }

    #[test]
    fn test_record_completion_is_idempotent() {
        let config = ChallengeConfig::nightmare();
        let once = record_completion(&config, &PrestigeData::new());
        let twice = record_completion(&config, &once);
        assert_eq!(once, twice);
        assert_eq!(twice.total_completions, 1);
        assert!(twice.has_completed(&config));
    }

    #[test]
    fn test_true_mastery_grants_everything() {
        let p = record_completion(&ChallengeConfig::true_mastery(), &PrestigeData::new());
        assert!(p.has_ap_bonus);
        assert!(p.has_dp_bonus);
        assert_eq!(p.starting_gold_bonus, 25);
        assert!((p.xp_multiplier_bonus - 0.1).abs() < 1e-9);
        assert_eq!(p.permanent_ap_bonus(), 5);
    }

    #[test]
    fn test_bonuses_are_capped() {
        let mut p = PrestigeData::new();
        for config in crate::challenge::config::all_challenge_configs() {
            p = record_completion(&config, &p);
        }
        assert!(p.is_complete());
        assert_eq!(p.total_completions, 288);
        assert_eq!(p.starting_gold_bonus, 100);
        assert!((p.xp_multiplier_bonus - 0.5).abs() < 1e-9);
        assert!((p.completion_percentage() - 100.0).abs() < 1e-9);
    }
}
