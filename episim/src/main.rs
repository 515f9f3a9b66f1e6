use anyhow::Result;
use clap::Parser;
use episim::{CsvReporter, ExperimentConfig, Pendulum, RandomAgent};
use episim_core::{record::NullRecorder, LogReporter, Reporter, Simulation};
use log::info;
use std::path::PathBuf;

type Sim = Simulation<Pendulum, RandomAgent<Pendulum>>;

/// Train an agent on the pendulum environment until the rolling mean of scores
/// reaches the target score
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Experiment configuration in YAML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the score of each episode to this CSV file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Run an episode with random actions instead of training
    #[arg(long, default_value_t = false)]
    random: bool,

    /// The number of evaluation episodes after training
    #[arg(short, long, default_value_t = 0)]
    eval: usize,

    /// Overrides the target score
    #[arg(long, allow_hyphen_values = true)]
    target_score: Option<f32>,

    /// Overrides the maximum number of episodes
    #[arg(long)]
    max_episodes: Option<usize>,

    /// Overrides the number of stacked observations
    #[arg(long)]
    stack_depth: Option<usize>,
}

fn load_config(args: &Args) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(v) = args.target_score {
        config.trainer.target_score = v;
    }
    if let Some(v) = args.max_episodes {
        config.trainer.max_episodes = v;
    }
    if let Some(v) = args.stack_depth {
        config.stack_depth = v;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut sim = Sim::build(
        &config.env,
        config.seed,
        config.stack_depth,
        config.agent.clone(),
    )?;

    if args.random {
        let score = sim.test_random(config.agent.verbose)?;
        info!("Score of the random episode: {}", score);
        return Ok(());
    }

    let history = sim.train(config.trainer.clone(), &mut NullRecorder::new())?;
    LogReporter::new().report(&history)?;
    if let Some(path) = &args.report {
        CsvReporter::new(path).report(&history)?;
    }

    if args.eval > 0 {
        let record = sim.evaluate(args.eval)?;
        info!(
            "Mean score of {} evaluation episodes: {}",
            args.eval,
            record.get_scalar("episode_return")?
        );
    }

    Ok(())
}
