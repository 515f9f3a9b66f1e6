//! Configuration of experiments.
use crate::PendulumConfig;
use anyhow::{Context, Result};
use episim_core::{AgentConfig, TrainerConfig};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of an experiment.
///
/// ```yaml
/// env:
///   max_steps: 200
///   g: 10.0
/// seed: 0
/// stack_depth: 1
/// trainer:
///   target_score: -200.0
///   max_episodes: 1000
///   process_average_over: 100
///   test_every: 200
///   test_on: 5
/// agent:
///   gamma: 0.99
///   hidden_dense_layers: [128, 64]
///   verbose: true
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Configuration of the environment.
    pub env: PendulumConfig,

    /// Random seed of the environment.
    pub seed: i64,

    /// The number of stacked observations in a state.
    pub stack_depth: usize,

    /// Configuration of the training loop.
    pub trainer: TrainerConfig,

    /// Configuration of the agent.
    pub agent: AgentConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            env: PendulumConfig::default(),
            seed: 0,
            stack_depth: 1,
            trainer: TrainerConfig::default()
                .target_score(-200.0)
                .max_episodes(1000)
                .process_average_over(100)
                .test_every(200)
                .test_on(5),
            agent: AgentConfig::default().verbose(true),
        }
    }
}

impl ExperimentConfig {
    /// Constructs [`ExperimentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr)
            .with_context(|| format!("Malformed experiment configuration in {:?}", path))?;
        config.trainer.validate()?;
        config.agent.validate()?;
        Ok(config)
    }

    /// Saves [`ExperimentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
