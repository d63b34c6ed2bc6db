//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS] <COMMAND>
//!
//! Examples:
//!   cargo run --release --bin simulate -- sweep                 # Full sweep, CSV + Markdown
//!   cargo run --release --bin simulate -- sweep --quick --json  # Small grid
//!   cargo run --release --bin simulate -- --seed 42 sweep --levels 1-5 --monsters slime,bat
//!   cargo run --release --bin simulate -- campaign --preset nightmare --runs 500

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use zargon::build_info::{banner, LONG_VERSION};
use zargon::challenge::{
    all_challenge_configs, ChallengeConfig, DifficultyLevel, EquipmentMode, TimedChallenge,
};
use zargon::character::{record_completion, PrestigeData};
use zargon::equipment::{Armor, Weapon};
use zargon::monsters::MonsterKind;
use zargon::simulator::{
    run_campaign, run_sweep, CampaignConfig, PlayerStrategy, SimulationSummary, SweepConfig,
};

/// Monte Carlo balance simulator for Zargon's combat economy
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only warnings and the final report
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Win rates for every (level, weapon, armor, monster, scale) cell
    Sweep(SweepArgs),
    /// Full runs from level 1 with shopping and leveling
    Campaign(CampaignArgs),
}

#[derive(Args, Debug)]
struct ChallengeArgs {
    /// Challenge preset name, e.g. "glass cannon"; overrides the modes below
    #[arg(long)]
    preset: Option<String>,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Normal)]
    weapon_mode: ModeArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Normal)]
    armor_mode: ModeArg,

    /// End a campaign run on its first death
    #[arg(long)]
    permadeath: bool,

    /// Apply a full prestige (all challenges completed)
    #[arg(long)]
    max_prestige: bool,

    #[arg(long, value_enum, default_value_t = StrategyArg::AttackOnly)]
    strategy: StrategyArg,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Player levels, as a range "1-15" or a list "1,5,10"
    #[arg(long, default_value = "1-15")]
    levels: String,

    /// Monster scaling factors, as a range or a list
    #[arg(long, default_value = "1-10")]
    scales: String,

    /// Comma-separated weapon names (default: all tiers)
    #[arg(long, value_delimiter = ',')]
    weapons: Vec<String>,

    /// Comma-separated armor names (default: all tiers)
    #[arg(long, value_delimiter = ',')]
    armors: Vec<String>,

    /// Comma-separated monster names (default: all kinds)
    #[arg(long, value_delimiter = ',')]
    monsters: Vec<String>,

    /// Battles per scenario
    #[arg(short = 'n', long, default_value_t = 1000)]
    trials: u32,

    /// Refuse sweeps that would run more battles than this
    #[arg(long)]
    max_battles: Option<u64>,

    /// Also simulate monsters above the player's level gate
    #[arg(long)]
    ignore_level_gates: bool,

    /// Run scenarios on a single thread
    #[arg(long)]
    sequential: bool,

    /// Small grid with few trials; ignores the grid options
    #[arg(long)]
    quick: bool,

    #[command(flatten)]
    challenge: ChallengeArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct CampaignArgs {
    /// Number of runs
    #[arg(short = 'n', long, default_value_t = 200)]
    runs: u32,

    /// Level that counts as completing a run
    #[arg(long, default_value_t = 10)]
    target_level: u32,

    /// Battles per run before giving up
    #[arg(long, default_value_t = 5_000)]
    max_battles: u32,

    #[command(flatten)]
    challenge: ChallengeArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory for report files
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,

    /// Print to the console only
    #[arg(long)]
    no_files: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DifficultyArg {
    Normal,
    Hard,
    Insane,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    None,
    Normal,
    Great,
    Beatdown,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    AttackOnly,
    SpellsFirst,
}

impl From<DifficultyArg> for DifficultyLevel {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Normal => DifficultyLevel::Normal,
            DifficultyArg::Hard => DifficultyLevel::Hard,
            DifficultyArg::Insane => DifficultyLevel::Insane,
        }
    }
}

impl From<ModeArg> for EquipmentMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::None => EquipmentMode::None,
            ModeArg::Normal => EquipmentMode::Normal,
            ModeArg::Great => EquipmentMode::Great,
            ModeArg::Beatdown => EquipmentMode::Beatdown,
        }
    }
}

impl From<StrategyArg> for PlayerStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::AttackOnly => PlayerStrategy::AttackOnly,
            StrategyArg::SpellsFirst => PlayerStrategy::SpellsFirst,
        }
    }
}

impl ChallengeArgs {
    fn challenge(&self) -> Result<ChallengeConfig> {
        if let Some(name) = &self.preset {
            return ChallengeConfig::preset_by_name(name)
                .with_context(|| format!("unknown challenge preset \"{}\"", name));
        }
        Ok(ChallengeConfig {
            difficulty: self.difficulty.into(),
            weapon_mode: self.weapon_mode.into(),
            armor_mode: self.armor_mode.into(),
            permanent_death: self.permadeath,
            timed_challenge: TimedChallenge::None,
            preset_name: None,
        })
    }

    fn prestige(&self) -> PrestigeData {
        let mut prestige = PrestigeData::new();
        if self.max_prestige {
            for config in all_challenge_configs() {
                prestige = record_completion(&config, &prestige);
            }
        }
        prestige
    }
}

/// Parses "3", "1-15" or "1,4,9" into a list of positive integers.
fn parse_u32_list(input: &str) -> Result<Vec<u32>> {
    let input = input.trim();
    if let Some((lo, hi)) = input.split_once('-') {
        let lo: u32 = lo
            .trim()
            .parse()
            .with_context(|| format!("bad range start in \"{}\"", input))?;
        let hi: u32 = hi
            .trim()
            .parse()
            .with_context(|| format!("bad range end in \"{}\"", input))?;
        if lo > hi {
            bail!("empty range \"{}\"", input);
        }
        return Ok((lo..=hi).collect());
    }
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse()
                .with_context(|| format!("\"{}\" is not a number", part))
        })
        .collect()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Resolves names against `all` by display name, ignoring case and spacing.
/// An empty selection means every entry.
fn select<T: Copy>(
    names: &[String],
    all: &[T],
    name_of: fn(&T) -> &'static str,
    what: &str,
) -> Result<Vec<T>> {
    if names.is_empty() {
        return Ok(all.to_vec());
    }
    names
        .iter()
        .map(|name| {
            let wanted = normalize(name);
            all.iter()
                .copied()
                .find(|item| normalize(name_of(item)) == wanted)
                .with_context(|| format!("unknown {} \"{}\"", what, name))
        })
        .collect()
}

fn init_tracing(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_report(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Report saved to: {}", path.display());
    Ok(())
}

fn write_sweep_reports(summary: &SimulationSummary, output: &OutputArgs) -> Result<()> {
    if output.no_files {
        return Ok(());
    }
    fs::create_dir_all(&output.out_dir)
        .with_context(|| format!("failed to create {}", output.out_dir.display()))?;

    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let dir = &output.out_dir;
    write_report(dir, &format!("balance_{}.csv", stamp), &summary.to_csv())?;
    write_report(dir, &format!("balance_{}.md", stamp), &summary.to_markdown())?;
    if output.json {
        write_report(dir, &format!("balance_{}.json", stamp), &summary.to_json())?;
    }
    Ok(())
}

fn sweep(seed: Option<u64>, args: &SweepArgs) -> Result<()> {
    let base = if args.quick {
        SweepConfig::quick_balance_check()
    } else {
        SweepConfig {
            levels: parse_u32_list(&args.levels)?,
            scales: parse_u32_list(&args.scales)?,
            weapons: select(&args.weapons, &Weapon::ALL, Weapon::display_name, "weapon")?,
            armors: select(&args.armors, &Armor::ALL, Armor::display_name, "armor")?,
            monsters: select(
                &args.monsters,
                &MonsterKind::ALL,
                MonsterKind::display_name,
                "monster",
            )?,
            trials_per_scenario: args.trials,
            ..SweepConfig::default()
        }
    };
    let config = SweepConfig {
        seed: seed.or(base.seed),
        challenge: args.challenge.challenge()?,
        prestige: args.challenge.prestige(),
        strategy: args.challenge.strategy.into(),
        max_total_battles: args.max_battles,
        respect_level_gates: !args.ignore_level_gates,
        parallel: !args.sequential,
        ..base
    };

    println!("Challenge:  {}", config.challenge.display_name());
    println!("Grid:       {} cells before level gating", config.grid_size());
    println!("Trials:     {} per scenario", config.trials_per_scenario);
    println!();

    let summary = run_sweep(&config)?;
    println!("{}", summary.to_text());
    write_sweep_reports(&summary, &args.output)
}

fn campaign(seed: Option<u64>, args: &CampaignArgs) -> Result<()> {
    let config = CampaignConfig {
        num_runs: args.runs,
        seed,
        target_level: args.target_level,
        max_battles: args.max_battles,
        challenge: args.challenge.challenge()?,
        prestige: args.challenge.prestige(),
        strategy: args.challenge.strategy.into(),
    };

    println!("Challenge:    {}", config.challenge.display_name());
    println!("Runs:         {}", config.num_runs);
    println!("Target Level: {}", config.target_level);
    println!();

    let report = run_campaign(&config)?;
    println!("{}", report.to_text());

    if args.output.json && !args.output.no_files {
        let dir = &args.output.out_dir;
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        write_report(dir, &format!("campaign_{}.json", stamp), &report.to_json())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ZARGON BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  {}", banner());
    println!();

    match &cli.command {
        Command::Sweep(args) => sweep(cli.seed, args),
        Command::Campaign(args) => campaign(cli.seed, args),
    }
}
