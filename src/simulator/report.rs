//! Simulation report generation.

use super::progression_sim::CampaignRun;
use super::runner::{ScenarioResult, SimulationSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CSV_HEADER: &str = "Level,Weapon,WeaponBonus,Armor,ArmorBonus,Monster,ScaleFactor,\
Iterations,Wins,Losses,WinRate,AvgTurnsWin,AvgTurnsLose,AvgPlayerHPRemaining,\
AvgDamageDealt,AvgDamageTaken";

/// Scenarios below this win rate are flagged as high risk.
pub const DANGEROUS_WIN_RATE: f64 = 0.5;
const MAX_DANGEROUS_ROWS: usize = 50;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl SimulationSummary {
    /// High-risk scenarios, lowest win rate first.
    pub fn dangerous(&self) -> Vec<&ScenarioResult> {
        let mut dangerous: Vec<&ScenarioResult> = self
            .results
            .iter()
            .filter(|r| r.win_rate < DANGEROUS_WIN_RATE)
            .collect();
        dangerous.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
        dangerous
    }

    pub fn impossible(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| r.wins == 0).collect()
    }

    /// Console report: win rate per monster and scale, averaged over the
    /// other axes.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("               ZARGON BATTLE BALANCE SIMULATION\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Total scenarios: {}\n", self.total_scenarios));
        report.push_str(&format!("Total battles:   {}\n", self.total_battles));
        report.push_str(&format!(
            "Execution time:  {}ms ({:.1}s)\n",
            self.execution_time_ms,
            self.execution_time_ms as f64 / 1000.0
        ));
        report.push_str(&format!("Seed:            {}\n\n", self.seed));

        let mut by_monster: BTreeMap<_, BTreeMap<u32, Vec<&ScenarioResult>>> = BTreeMap::new();
        for r in &self.results {
            by_monster
                .entry(r.scenario.monster)
                .or_default()
                .entry(r.scenario.scale)
                .or_default()
                .push(r);
        }

        report.push_str("── WIN RATE BY MONSTER AND SCALE ────────────────────────────────\n");
        for (monster, scales) in &by_monster {
            report.push_str(&format!("\n  {}\n", monster.display_name()));
            report.push_str("  Scale   Win Rate   Battles\n");
            report.push_str("  ─────   ────────   ───────\n");
            for (scale, results) in scales {
                let win_rate = mean(results.iter().map(|r| r.win_rate));
                let battles: u64 = results.iter().map(|r| r.iterations as u64).sum();
                let bar = "█".repeat((win_rate * 20.0) as usize);
                report.push_str(&format!(
                    "  {:>5}   {:>7.1}%   {:>7} {}\n",
                    scale,
                    win_rate * 100.0,
                    battles,
                    bar
                ));
            }
        }

        report.push_str("\n── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        report.push_str(&format!(
            "  High risk (<{:.0}%): {}\n",
            DANGEROUS_WIN_RATE * 100.0,
            self.dangerous().len()
        ));
        report.push_str(&format!("  Impossible (0%):  {}\n", self.impossible().len()));
        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// One row per scenario, in sweep order.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(64 * (self.results.len() + 1));
        csv.push_str(CSV_HEADER);
        csv.push('\n');
        for r in &self.results {
            let s = &r.scenario;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                s.level,
                s.weapon.display_name(),
                s.weapon.attack_bonus(),
                s.armor.display_name(),
                s.armor.defense_bonus(),
                s.monster.display_name(),
                s.scale,
                r.iterations,
                r.wins,
                r.losses,
                r.win_rate,
                r.avg_turns_win,
                r.avg_turns_lose,
                r.avg_hp_remaining,
                r.avg_damage_dealt,
                r.avg_damage_taken
            ));
        }
        csv
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Zargon Battle Balance Report\n\n");
        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Total Scenarios:** {}\n", self.total_scenarios));
        md.push_str(&format!("- **Total Battles:** {}\n", self.total_battles));
        md.push_str(&format!(
            "- **Execution Time:** {}ms ({:.1}s)\n",
            self.execution_time_ms,
            self.execution_time_ms as f64 / 1000.0
        ));
        md.push_str(&format!("- **Seed:** {}\n\n", self.seed));

        md.push_str("## High Risk Combinations (<50% win rate)\n\n");
        md.push_str("| Level | Weapon | Armor | Monster | Scale | Win Rate | Avg Turns (Win) |\n");
        md.push_str("|-------|--------|-------|---------|-------|----------|-----------------|\n");
        for r in self.dangerous().into_iter().take(MAX_DANGEROUS_ROWS) {
            let s = &r.scenario;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {}x | {:.1}% | {:.1} |\n",
                s.level,
                s.weapon.display_name(),
                s.armor.display_name(),
                s.monster.display_name(),
                s.scale,
                r.win_rate * 100.0,
                r.avg_turns_win
            ));
        }
        md.push('\n');

        let impossible = self.impossible();
        if !impossible.is_empty() {
            md.push_str("## Impossible Scenarios (0% win rate)\n\n");
            md.push_str("| Level | Weapon | Armor | Monster | Scale |\n");
            md.push_str("|-------|--------|-------|---------|-------|\n");
            for r in impossible {
                let s = &r.scenario;
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {}x |\n",
                    s.level,
                    s.weapon.display_name(),
                    s.armor.display_name(),
                    s.monster.display_name(),
                    s.scale
                ));
            }
            md.push('\n');
        }

        let mut by_level: BTreeMap<u32, Vec<&ScenarioResult>> = BTreeMap::new();
        for r in &self.results {
            by_level.entry(r.scenario.level).or_default().push(r);
        }
        md.push_str("## Win Rate by Player Level\n\n");
        md.push_str("| Level | Avg Win Rate | Dangerous Scenarios | Impossible Scenarios |\n");
        md.push_str("|-------|--------------|---------------------|----------------------|\n");
        for (level, results) in &by_level {
            let win_rate = mean(results.iter().map(|r| r.win_rate));
            let dangerous = results
                .iter()
                .filter(|r| r.win_rate < DANGEROUS_WIN_RATE)
                .count();
            let impossible = results.iter().filter(|r| r.wins == 0).count();
            md.push_str(&format!(
                "| {} | {:.1}% | {} | {} |\n",
                level,
                win_rate * 100.0,
                dangerous,
                impossible
            ));
        }

        md
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Aggregated results from multiple campaign runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub num_runs: u32,
    pub target_level: u32,
    pub runs_completed: u32,
    pub runs_perished: u32,

    pub avg_final_level: f64,
    pub avg_battles: f64,
    pub avg_wins: f64,
    pub avg_deaths: f64,
    pub avg_final_gold: f64,

    pub level_distribution: BTreeMap<u32, u32>,

    // Individual runs for detailed analysis
    pub runs: Vec<CampaignRun>,
}

impl CampaignReport {
    pub fn from_runs(runs: Vec<CampaignRun>, target_level: u32) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_perished = runs.iter().filter(|r| r.perished).count() as u32;

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            target_level,
            runs_completed,
            runs_perished,
            avg_final_level: mean(runs.iter().map(|r| r.final_level as f64)),
            avg_battles: mean(runs.iter().map(|r| r.battles as f64)),
            avg_wins: mean(runs.iter().map(|r| r.wins as f64)),
            avg_deaths: mean(runs.iter().map(|r| r.deaths as f64)),
            avg_final_gold: mean(runs.iter().map(|r| r.final_gold as f64)),
            level_distribution,
            runs,
        }
    }

    pub fn completion_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        self.runs_completed as f64 / self.num_runs as f64
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    CAMPAIGN REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached level {}, {} lost to permanent death\n\n",
            self.num_runs, self.runs_completed, self.target_level, self.runs_perished
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:  {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Battles:      {:.1}\n", self.avg_battles));
        report.push_str(&format!("  Avg Wins:         {:.1}\n", self.avg_wins));
        report.push_str(&format!("  Avg Deaths:       {:.2}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Final Gold:   {:.0}\n", self.avg_final_gold));
        report.push_str(&format!(
            "  Completion Rate:  {:.1}%\n\n",
            self.completion_rate() * 100.0
        ));

        report.push_str("── FINAL LEVEL DISTRIBUTION ─────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = *count as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
