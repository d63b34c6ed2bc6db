//! Balance sweep runner.
//!
//! Each scenario (level, weapon, armor, monster, scale) is an independent
//! cell with its own ChaCha8 stream derived from the sweep seed and the
//! cell's position in enumeration order, so results do not depend on how
//! rayon schedules the cells.

use super::battle_sim::{simulate_battle, BattleLog, PlayerStrategy};
use super::config::SweepConfig;
use super::error::{Result, SimError};
use crate::challenge::config::ChallengeConfig;
use crate::challenge::modifiers::apply_difficulty_to_monster;
use crate::character::stats::CharacterStats;
use crate::combat::types::BattleContext;
use crate::equipment::{Armor, Weapon};
use crate::monsters::types::{MonsterKind, MonsterStats};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// One cell of the sweep grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {
    pub level: u32,
    pub weapon: Weapon,
    pub armor: Armor,
    pub monster: MonsterKind,
    pub scale: u32,
}

impl Scenario {
    /// False when the monster can't appear at this level.
    pub fn is_reachable(&self) -> bool {
        self.monster.min_level() <= self.level
    }
}

/// Canonical full-health character for the scenario's level and gear.
pub fn character_for_scenario(scenario: &Scenario) -> CharacterStats {
    CharacterStats::at_level(scenario.level, scenario.weapon, scenario.armor)
}

/// Base stats times scale, then the challenge difficulty.
pub fn monster_for_scenario(scenario: &Scenario, challenge: &ChallengeConfig) -> MonsterStats {
    let monster = MonsterStats::scaled(scenario.monster, scenario.scale);
    apply_difficulty_to_monster(&monster, challenge.difficulty)
}

/// Aggregate statistics for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub iterations: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub avg_turns_win: f64,
    pub avg_turns_lose: f64,
    pub avg_hp_remaining: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
}

/// Running totals folded from battle logs.
#[derive(Debug, Clone, Default)]
pub struct ScenarioAccumulator {
    iterations: u32,
    wins: u32,
    turns_win: u64,
    turns_lose: u64,
    hp_remaining_win: u64,
    damage_dealt: u64,
    damage_taken: u64,
}

fn average(total: u64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

impl ScenarioAccumulator {
    pub fn record(&mut self, log: &BattleLog) {
        self.iterations += 1;
        if log.outcome.is_win() {
            self.wins += 1;
            self.turns_win += log.turns as u64;
            self.hp_remaining_win += log.player_hp_remaining as u64;
        } else {
            self.turns_lose += log.turns as u64;
        }
        self.damage_dealt += log.damage_dealt as u64;
        self.damage_taken += log.damage_taken as u64;
    }

    pub fn finish(self, scenario: Scenario) -> ScenarioResult {
        let losses = self.iterations - self.wins;
        ScenarioResult {
            scenario,
            iterations: self.iterations,
            wins: self.wins,
            losses,
            win_rate: average(self.wins as u64, self.iterations),
            avg_turns_win: average(self.turns_win, self.wins),
            avg_turns_lose: average(self.turns_lose, losses),
            avg_hp_remaining: average(self.hp_remaining_win, self.wins),
            avg_damage_dealt: average(self.damage_dealt, self.iterations),
            avg_damage_taken: average(self.damage_taken, self.iterations),
        }
    }
}

/// Whole-sweep output, in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub total_scenarios: usize,
    pub total_battles: u64,
    pub execution_time_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SimulationSummary {
    pub fn from_results(results: Vec<ScenarioResult>, seed: u64, execution_time_ms: u64) -> Self {
        Self {
            seed,
            total_scenarios: results.len(),
            total_battles: results.iter().map(|r| r.iterations as u64).sum(),
            execution_time_ms,
            results,
        }
    }
}

/// Runs `trials` independent battles for one scenario.
pub fn run_scenario(
    scenario: &Scenario,
    trials: u32,
    ctx: &BattleContext,
    strategy: PlayerStrategy,
    rng: &mut impl Rng,
) -> ScenarioResult {
    let character = character_for_scenario(scenario);
    let monster = monster_for_scenario(scenario, &ctx.challenge);

    let mut acc = ScenarioAccumulator::default();
    for _ in 0..trials {
        acc.record(&simulate_battle(&character, &monster, ctx, strategy, rng));
    }
    acc.finish(*scenario)
}

/// Cartesian product of the config axes in (level, weapon, armor, monster,
/// scale) order, minus level-gated cells when gating is on.
pub fn plan_scenarios(config: &SweepConfig) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(config.grid_size());
    for &level in &config.levels {
        for &weapon in &config.weapons {
            for &armor in &config.armors {
                for &monster in &config.monsters {
                    for &scale in &config.scales {
                        let scenario = Scenario {
                            level,
                            weapon,
                            armor,
                            monster,
                            scale,
                        };
                        if config.respect_level_gates && !scenario.is_reachable() {
                            continue;
                        }
                        scenarios.push(scenario);
                    }
                }
            }
        }
    }
    scenarios
}

fn cell_rng(seed: u64, cell: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(cell as u64);
    rng
}

/// Runs the full sweep and returns the summary.
///
/// Fails before running anything if the config is invalid or the planned
/// battle count exceeds `max_total_battles`.
pub fn run_sweep(config: &SweepConfig) -> Result<SimulationSummary> {
    config.validate()?;

    let scenarios = plan_scenarios(config);
    let planned = scenarios.len() as u64 * config.trials_per_scenario as u64;
    if let Some(limit) = config.max_total_battles {
        if planned > limit {
            return Err(SimError::BattleLimitExceeded { planned, limit });
        }
    }

    let seed = config
        .seed
        .unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());
    let ctx = config.battle_context();
    info!(
        scenarios = scenarios.len(),
        battles = planned,
        seed,
        challenge = %config.challenge.challenge_id(),
        "starting sweep"
    );

    let start = Instant::now();
    let run_cell = |(cell, scenario): (usize, &Scenario)| {
        let mut rng = cell_rng(seed, cell);
        let result = run_scenario(
            scenario,
            config.trials_per_scenario,
            &ctx,
            config.strategy,
            &mut rng,
        );
        debug!(
            cell,
            level = scenario.level,
            monster = ?scenario.monster,
            scale = scenario.scale,
            win_rate = result.win_rate,
            "scenario done"
        );
        result
    };

    let results: Vec<ScenarioResult> = if config.parallel {
        scenarios.par_iter().enumerate().map(run_cell).collect()
    } else {
        scenarios.iter().enumerate().map(run_cell).collect()
    };

    let summary =
        SimulationSummary::from_results(results, seed, start.elapsed().as_millis() as u64);
    info!(
        scenarios = summary.total_scenarios,
        battles = summary.total_battles,
        elapsed_ms = summary.execution_time_ms,
        "sweep finished"
    );
    Ok(summary)
}
