//! Configuration of agents.
use crate::error::EpisimError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of an agent.
///
/// These are the options recognized by the harness. Unknown keys, values of a
/// wrong type and values out of range are configuration errors.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Weight of the entropy term for exploration.
    pub temperature: f64,

    /// Clip width of the trust region.
    pub epsilon: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Learning rate of the first optimizer.
    pub lr1: f64,

    /// Learning rate of the second optimizer. Same as `lr1` when `None`.
    pub lr2: Option<f64>,

    /// `(filters, kernel_size)` of each hidden convolutional layer.
    pub hidden_conv_layers: Vec<(usize, usize)>,

    /// Number of units of each hidden dense layer.
    pub hidden_dense_layers: Vec<usize>,

    /// Print progress after every episode.
    pub verbose: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            epsilon: 0.2,
            gamma: 0.99,
            lr1: 1e-2,
            lr2: None,
            hidden_conv_layers: vec![],
            hidden_dense_layers: vec![128, 64],
            verbose: false,
        }
    }
}

impl AgentConfig {
    /// Sets the temperature.
    pub fn temperature(mut self, v: f64) -> Self {
        self.temperature = v;
        self
    }

    /// Sets the clip width.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the first learning rate.
    pub fn lr1(mut self, v: f64) -> Self {
        self.lr1 = v;
        self
    }

    /// Sets the second learning rate.
    pub fn lr2(mut self, v: Option<f64>) -> Self {
        self.lr2 = v;
        self
    }

    /// Sets the hidden convolutional layers.
    pub fn hidden_conv_layers(mut self, v: Vec<(usize, usize)>) -> Self {
        self.hidden_conv_layers = v;
        self
    }

    /// Sets the hidden dense layers.
    pub fn hidden_dense_layers(mut self, v: Vec<usize>) -> Self {
        self.hidden_dense_layers = v;
        self
    }

    /// Sets the verbosity.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Returns the learning rate of the second optimizer.
    pub fn effective_lr2(&self) -> f64 {
        self.lr2.unwrap_or(self.lr1)
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), EpisimError> {
        if !(self.temperature.is_finite() && self.temperature >= 0.0) {
            return Err(EpisimError::config(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(EpisimError::config(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(EpisimError::config(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        for (name, lr) in [("lr1", Some(self.lr1)), ("lr2", self.lr2)].iter() {
            if let Some(lr) = lr {
                if !(lr.is_finite() && *lr > 0.0) {
                    return Err(EpisimError::config(format!(
                        "{} must be positive, got {}",
                        name, lr
                    )));
                }
            }
        }
        if let Some((filters, kernel)) = self
            .hidden_conv_layers
            .iter()
            .find(|(f, k)| *f == 0 || *k == 0)
        {
            return Err(EpisimError::config(format!(
                "invalid convolutional layer ({}, {})",
                filters, kernel
            )));
        }
        if self.hidden_dense_layers.contains(&0) {
            return Err(EpisimError::config(
                "dense layers must have at least one unit",
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration given as a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, EpisimError> {
        let config: Self = serde_yaml::from_str(s)
            .map_err(|e| EpisimError::config(format!("malformed agent configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Constructs [`AgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr)
            .map_err(|e| EpisimError::config(format!("malformed agent configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves [`AgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
