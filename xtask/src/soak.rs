//! Randomized soak runner
//!
//! This module provides the `soak` subcommand: a long randomized sequence of
//! inserts and deletes against `RbTree`, with the invariant validator run
//! after every operation and a JSON report at the end.

use anyhow::{Context, Result, bail};
use clap::Args;
use ordtree::RbTree;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_OPERATIONS: u64 = 20_000;
const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_KEY_SPACE: u64 = 4_096;
const DEFAULT_DELETE_PERCENT: u8 = 40;

/// Arguments for the soak subcommand
#[derive(Args, Debug)]
pub struct SoakArgs {
    /// Scenario YAML file path
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Override number of operations
    #[arg(long)]
    pub operations: Option<u64>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override key space (keys are drawn from 0..key_space)
    #[arg(long)]
    pub key_space: Option<u64>,

    /// Override share of operations that are deletes (0-100)
    #[arg(long)]
    pub delete_percent: Option<u8>,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Scenario configuration from YAML
#[derive(Debug, Default, Deserialize)]
struct ScenarioConfig {
    name: Option<String>,
    operations: Option<u64>,
    seed: Option<u64>,
    key_space: Option<u64>,
    delete_percent: Option<u8>,
}

/// Fully resolved soak settings
#[derive(Debug, Clone, Serialize)]
struct SoakSettings {
    name: String,
    operations: u64,
    seed: u64,
    key_space: u64,
    delete_percent: u8,
}

impl SoakSettings {
    /// Priority: CLI > Environment > Scenario YAML > Default
    fn from_args_and_scenario(args: &SoakArgs, scenario: &ScenarioConfig) -> Result<Self> {
        let operations = args
            .operations
            .or_else(|| env_number("SOAK_OPERATIONS"))
            .or(scenario.operations)
            .unwrap_or(DEFAULT_OPERATIONS);

        let seed = args
            .seed
            .or_else(|| env_number("SOAK_SEED"))
            .or(scenario.seed)
            .unwrap_or(DEFAULT_SEED);

        let key_space = args
            .key_space
            .or_else(|| env_number("SOAK_KEY_SPACE"))
            .or(scenario.key_space)
            .unwrap_or(DEFAULT_KEY_SPACE);

        let delete_percent = args
            .delete_percent
            .or_else(|| env_number("SOAK_DELETE_PERCENT"))
            .or(scenario.delete_percent)
            .unwrap_or(DEFAULT_DELETE_PERCENT);

        if key_space == 0 {
            bail!("key space must be at least 1");
        }
        if delete_percent > 100 {
            bail!("delete percent must be within 0-100, got {delete_percent}");
        }

        Ok(Self {
            name: scenario.name.clone().unwrap_or_else(|| "default".to_string()),
            operations,
            seed,
            key_space,
            delete_percent,
        })
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

/// Report written at the end of a run
#[derive(Debug, Serialize)]
struct SoakReport {
    settings: SoakSettings,
    inserts: u64,
    deletes_hit: u64,
    deletes_missed: u64,
    validations: u64,
    final_len: usize,
    peak_len: usize,
    elapsed_ms: u128,
}

fn soak(settings: &SoakSettings) -> Result<SoakReport> {
    let started = Instant::now();
    // Fixed algorithm: a seed replays identically.
    let mut random = ChaCha8Rng::seed_from_u64(settings.seed);
    let mut tree: RbTree<u64, u64> = RbTree::new();

    let mut inserts = 0;
    let mut deletes_hit = 0;
    let mut deletes_missed = 0;
    let mut validations = 0;
    let mut peak_len = 0;
    let progress_step = (settings.operations / 10).max(1);

    for step in 0..settings.operations {
        let key = random.random_range(0..settings.key_space);
        if random.random_ratio(u32::from(settings.delete_percent), 100) {
            if tree.delete_key(&key).is_some() {
                deletes_hit += 1;
            } else {
                deletes_missed += 1;
            }
        } else {
            tree.insert(key, step);
            inserts += 1;
        }

        tree.validate()
            .with_context(|| format!("invariant broken after operation {step} (key {key})"))?;
        validations += 1;
        peak_len = peak_len.max(tree.len());

        let expected_len = inserts - deletes_hit;
        if u64::try_from(tree.len()).ok() != Some(expected_len) {
            bail!(
                "size drifted after operation {step}: tree reports {}, expected {expected_len}",
                tree.len()
            );
        }

        if (step + 1) % progress_step == 0 {
            log::debug!(
                "{}/{} operations, {} live entries",
                step + 1,
                settings.operations,
                tree.len()
            );
        }
    }

    Ok(SoakReport {
        settings: settings.clone(),
        inserts,
        deletes_hit,
        deletes_missed,
        validations,
        final_len: tree.len(),
        peak_len,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    serde_yaml::from_str(&content).context("Failed to parse scenario YAML")
}

/// Main entry point for soak command
pub fn run(args: SoakArgs) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => ScenarioConfig::default(),
    };
    let settings = SoakSettings::from_args_and_scenario(&args, &scenario)?;

    log::info!(
        "soak '{}': {} operations, seed {}, key space {}, {}% deletes",
        settings.name,
        settings.operations,
        settings.seed,
        settings.key_space,
        settings.delete_percent
    );

    let report = soak(&settings)?;
    log::info!(
        "soak finished: {} validations passed in {} ms",
        report.validations,
        report.elapsed_ms
    );

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
