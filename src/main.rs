use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridq::{
    algo::tabular::QTableAgent,
    env::{GridMap, GridWorld},
    render::render_policy,
    Config,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Learn a grid world with tabular Q-learning and print the greedy policy
#[derive(Parser)]
#[command(name = "gridq", version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory map names are resolved in
    #[arg(long, default_value = "maps")]
    maps_dir: PathBuf,

    /// Seed for the random source, overrides the configured seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration {}", cli.config.display()))?;
    let map_path = config.map_path(&cli.maps_dir);
    let map = GridMap::load(&map_path)
        .with_context(|| format!("loading map {}", map_path.display()))?;

    let mode = config.mode();
    let world = GridWorld::new(map, mode.rewards());
    let mut agent = QTableAgent::new(&world, config.agent_config())
        .context("setting up the agent")?;

    let mut rng = match cli.seed.or(config.seed()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("running in {mode} mode");
    let report = agent.train(&mut rng).context("training")?;

    if let Some(path) = config.trace_path() {
        report
            .save_csv(&path)
            .with_context(|| format!("writing trace {}", path.display()))?;
    }

    for row in render_policy(world.map(), agent.table())? {
        println!("{row}");
    }

    Ok(())
}
