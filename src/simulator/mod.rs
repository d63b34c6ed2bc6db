//! Game balance simulator for Monte Carlo analysis.
//!
//! Two kinds of runs:
//! - Sweeps: every (level, weapon, armor, monster, scale) cell fought N
//!   times from full health, aggregated into win rates
//! - Campaigns: fresh characters grinding, shopping and leveling up to a
//!   target level
//!
//! Both drive the real combat resolver in `crate::combat`, so results match
//! in-game battles.

mod battle_sim;
mod config;
mod error;
mod progression_sim;
mod report;
mod runner;

pub use battle_sim::{
    choose_action, run_battle, simulate_battle, BattleLog, BattleOutcome, PlayerStrategy,
};
pub use config::{CampaignConfig, SweepConfig};
pub use error::SimError;
pub use progression_sim::{run_campaign, simulate_single_run, visit_shops, CampaignRun};
pub use report::{CampaignReport, CSV_HEADER, DANGEROUS_WIN_RATE};
pub use runner::{
    character_for_scenario, monster_for_scenario, plan_scenarios, run_scenario, run_sweep, Scenario,
    ScenarioAccumulator, ScenarioResult, SimulationSummary,
};
