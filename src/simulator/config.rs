//! Simulation configuration.

use super::battle_sim::PlayerStrategy;
use super::error::{Result, SimError};
use crate::challenge::config::ChallengeConfig;
use crate::character::prestige::PrestigeData;
use crate::combat::types::BattleContext;
use crate::equipment::{Armor, Weapon};
use crate::monsters::types::MonsterKind;
use serde::{Deserialize, Serialize};

/// Parameter grid for a balance sweep. Every combination of the five axes
/// becomes one scenario, run `trials_per_scenario` times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub levels: Vec<u32>,
    pub weapons: Vec<Weapon>,
    pub armors: Vec<Armor>,
    pub monsters: Vec<MonsterKind>,
    pub scales: Vec<u32>,

    /// Independent battles per scenario
    pub trials_per_scenario: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub challenge: ChallengeConfig,
    pub prestige: PrestigeData,
    pub strategy: PlayerStrategy,

    /// Refuse to start when the sweep would run more battles than this
    pub max_total_battles: Option<u64>,

    /// Skip scenarios whose monster can't be met at that level
    pub respect_level_gates: bool,

    /// Run scenarios on the rayon pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            levels: (1..=15).collect(),
            weapons: Weapon::ALL.to_vec(),
            armors: Armor::ALL.to_vec(),
            monsters: MonsterKind::ALL.to_vec(),
            scales: (1..=10).collect(),
            trials_per_scenario: 1000,
            seed: None,
            challenge: ChallengeConfig::default(),
            prestige: PrestigeData::default(),
            strategy: PlayerStrategy::default(),
            max_total_battles: None,
            respect_level_gates: true,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Quick config for a single matchup
    pub fn single(
        level: u32,
        weapon: Weapon,
        armor: Armor,
        monster: MonsterKind,
        scale: u32,
    ) -> Self {
        Self {
            levels: vec![level],
            weapons: vec![weapon],
            armors: vec![armor],
            monsters: vec![monster],
            scales: vec![scale],
            ..Default::default()
        }
    }

    /// Quick config: wandering monsters only, small grid, few trials
    pub fn quick_balance_check() -> Self {
        Self {
            levels: (1..=5).collect(),
            monsters: MonsterKind::WANDERING.to_vec(),
            scales: (1..=3).collect(),
            trials_per_scenario: 100,
            seed: Some(12345),
            ..Default::default()
        }
    }

    /// Quick config for the boss fights across the late levels
    pub fn boss_check() -> Self {
        Self {
            levels: (10..=15).collect(),
            monsters: vec![MonsterKind::Kraken, MonsterKind::Zargon],
            scales: vec![1],
            trials_per_scenario: 500,
            ..Default::default()
        }
    }

    pub fn battle_context(&self) -> BattleContext {
        BattleContext::new(self.challenge.clone(), self.prestige.clone())
    }

    /// Upper bound on scenarios, before level gating.
    pub fn grid_size(&self) -> usize {
        self.levels.len()
            * self.weapons.len()
            * self.armors.len()
            * self.monsters.len()
            * self.scales.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(SimError::EmptyParameter("levels"));
        }
        if self.weapons.is_empty() {
            return Err(SimError::EmptyParameter("weapons"));
        }
        if self.armors.is_empty() {
            return Err(SimError::EmptyParameter("armors"));
        }
        if self.monsters.is_empty() {
            return Err(SimError::EmptyParameter("monsters"));
        }
        if self.scales.is_empty() {
            return Err(SimError::EmptyParameter("scales"));
        }
        if self.trials_per_scenario == 0 {
            return Err(SimError::ZeroTrials);
        }
        if self.levels.contains(&0) {
            return Err(SimError::InvalidValue {
                parameter: "levels",
                value: 0,
            });
        }
        if self.scales.contains(&0) {
            return Err(SimError::InvalidValue {
                parameter: "scales",
                value: 0,
            });
        }
        Ok(())
    }
}

/// Configuration for full-progression campaign runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Number of independent runs
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level at which a run counts as completed
    pub target_level: u32,

    /// Battles per run before giving up
    pub max_battles: u32,

    pub challenge: ChallengeConfig,
    pub prestige: PrestigeData,
    pub strategy: PlayerStrategy,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            target_level: 10,
            max_battles: 5_000,
            challenge: ChallengeConfig::default(),
            prestige: PrestigeData::default(),
            strategy: PlayerStrategy::default(),
        }
    }
}

impl CampaignConfig {
    /// Quick config for one challenge preset
    pub fn for_challenge(challenge: ChallengeConfig) -> Self {
        Self {
            num_runs: 100,
            challenge,
            ..Default::default()
        }
    }

    pub fn battle_context(&self) -> BattleContext {
        BattleContext::new(self.challenge.clone(), self.prestige.clone())
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(SimError::InvalidValue {
                parameter: "num_runs",
                value: 0,
            });
        }
        if self.target_level == 0 {
            return Err(SimError::InvalidValue {
                parameter: "target_level",
                value: 0,
            });
        }
        if self.max_battles == 0 {
            return Err(SimError::InvalidValue {
                parameter: "max_battles",
                value: 0,
            });
        }
        Ok(())
    }
}
