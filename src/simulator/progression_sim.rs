//! Campaign simulation: a fresh character grinding wandering monsters,
//! buying gear and leveling until it reaches the target level.

use super::battle_sim::{run_battle, BattleOutcome};
use super::config::CampaignConfig;
use super::error::Result;
use super::report::CampaignReport;
use crate::challenge::config::ChallengeConfig;
use crate::challenge::modifiers::{adjusted_price, apply_prestige_bonuses_to_character};
use crate::character::stats::CharacterStats;
use crate::equipment::{Armor, Weapon};
use crate::monsters::generator::{generate_monster_for_challenge, EncounterContext, WorldPosition};
use crate::progression::leveling::award_victory;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of one campaign run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRun {
    pub final_level: u32,
    pub battles: u32,
    pub wins: u32,
    pub deaths: u32,
    pub final_gold: u32,
    pub weapon: Weapon,
    pub armor: Armor,
    pub items_found: u32,
    pub reached_target: bool,
    /// Ended by a death under permanent death
    pub perished: bool,
}

/// Buys the next weapon tier, then the next armor tier, if affordable.
/// Disabled equipment is never bought.
pub fn visit_shops(character: &mut CharacterStats, challenge: &ChallengeConfig) {
    if challenge.weapon_mode.enabled() {
        if let Some(next) = character.weapon.next_tier() {
            let price = adjusted_price(next.base_price(), challenge.weapon_mode);
            if character.spend_gold(price) {
                character.weapon = next;
            }
        }
    }
    if challenge.armor_mode.enabled() {
        if let Some(next) = character.armor.next_tier() {
            let price = adjusted_price(next.base_price(), challenge.armor_mode);
            if character.spend_gold(price) {
                character.armor = next;
            }
        }
    }
}

/// Plays one run to the target level, the battle cap or a permanent death.
pub fn simulate_single_run(config: &CampaignConfig, rng: &mut impl Rng) -> CampaignRun {
    let ctx = config.battle_context();
    let position = WorldPosition::home();
    let mut character =
        apply_prestige_bonuses_to_character(&CharacterStats::new(), &config.prestige);
    let mut battles = 0;
    let mut wins = 0;
    let mut deaths = 0;
    let mut items_found = 0;
    let mut perished = false;

    while battles < config.max_battles && character.level < config.target_level {
        visit_shops(&mut character, &config.challenge);

        let encounter = EncounterContext {
            position,
            ..EncounterContext::wandering(character.level)
        };
        let monster = generate_monster_for_challenge(&encounter, &config.challenge, rng);
        let (log, state) = run_battle(&character, &monster, &ctx, config.strategy, rng);
        battles += 1;
        character = state.character;

        match log.outcome {
            BattleOutcome::Victory => {
                wins += 1;
                let rewards =
                    award_victory(&mut character, &monster, &position, &config.prestige, rng);
                if rewards.item.is_some() {
                    items_found += 1;
                }
            }
            BattleOutcome::Defeat | BattleOutcome::TurnLimit => {
                deaths += 1;
                if config.challenge.permanent_death {
                    perished = true;
                    break;
                }
                character.full_restore();
            }
        }
    }

    CampaignRun {
        final_level: character.level,
        battles,
        wins,
        deaths,
        final_gold: character.gold,
        weapon: character.weapon,
        armor: character.armor,
        items_found,
        reached_target: character.level >= config.target_level,
        perished,
    }
}

/// Runs every campaign and aggregates the report.
pub fn run_campaign(config: &CampaignConfig) -> Result<CampaignReport> {
    config.validate()?;
    info!(
        runs = config.num_runs,
        target_level = config.target_level,
        challenge = %config.challenge.challenge_id(),
        "starting campaign"
    );

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);
        debug!(
            run = run_idx + 1,
            level = run.final_level,
            battles = run.battles,
            deaths = run.deaths,
            gold = run.final_gold,
            "campaign run finished"
        );
        all_runs.push(run);
    }

    let report = CampaignReport::from_runs(all_runs, config.target_level);
    info!(
        completed = report.runs_completed,
        avg_level = report.avg_final_level,
        "campaign finished"
    );
    Ok(report)
}
