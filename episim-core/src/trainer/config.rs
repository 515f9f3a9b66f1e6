//! Configuration of [`Trainer`](super::Trainer).
use crate::error::EpisimError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
///
/// In YAML, `target_score` is required and unknown keys are rejected; the other
/// fields fall back to their defaults. [`TrainerConfig::default()`] sets
/// `target_score` to `f32::INFINITY`, which no rolling mean reaches, so a run with
/// the default configuration always lasts `max_episodes` episodes.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct TrainerConfig {
    /// Training stops when the rolling mean of returns reaches this value.
    pub target_score: f32,

    /// The maximum number of episodes.
    #[serde(default = "default_max_episodes")]
    pub max_episodes: usize,

    /// The number of the latest episodes the rolling mean is taken over.
    #[serde(default = "default_process_average_over")]
    pub process_average_over: usize,

    /// Period of the inspection windows in episodes.
    #[serde(default = "default_test_every")]
    pub test_every: usize,

    /// The number of rendered episodes in each inspection window. `0` disables rendering.
    #[serde(default)]
    pub test_on: usize,
}

fn default_max_episodes() -> usize {
    1000
}

fn default_process_average_over() -> usize {
    100
}

fn default_test_every() -> usize {
    50
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            target_score: f32::INFINITY,
            max_episodes: default_max_episodes(),
            process_average_over: default_process_average_over(),
            test_every: default_test_every(),
            test_on: 0,
        }
    }
}

impl TrainerConfig {
    /// Sets the target score.
    pub fn target_score(mut self, v: f32) -> Self {
        self.target_score = v;
        self
    }

    /// Sets the maximum number of episodes.
    pub fn max_episodes(mut self, v: usize) -> Self {
        self.max_episodes = v;
        self
    }

    /// Sets the size of the window of the rolling mean.
    pub fn process_average_over(mut self, v: usize) -> Self {
        self.process_average_over = v;
        self
    }

    /// Sets the period of the inspection windows.
    pub fn test_every(mut self, v: usize) -> Self {
        self.test_every = v;
        self
    }

    /// Sets the number of rendered episodes in each inspection window.
    pub fn test_on(mut self, v: usize) -> Self {
        self.test_on = v;
        self
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), EpisimError> {
        if self.target_score.is_nan() {
            return Err(EpisimError::config("target_score must not be NaN"));
        }
        if self.process_average_over == 0 {
            return Err(EpisimError::config(
                "process_average_over must be at least 1",
            ));
        }
        if self.test_on > 0 && self.test_every == 0 {
            return Err(EpisimError::config(
                "test_every must be at least 1 when test_on > 0",
            ));
        }
        if self.test_on > self.test_every {
            return Err(EpisimError::config(format!(
                "test_on ({}) must not exceed test_every ({})",
                self.test_on, self.test_every
            )));
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr).map_err(|e| {
            EpisimError::config(format!("malformed trainer configuration: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .target_score(70.0)
            .max_episodes(1000)
            .process_average_over(100)
            .test_every(200)
            .test_on(5);

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");
        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_inspection_window_larger_than_period() {
        let config = TrainerConfig::default().test_every(5).test_on(6);
        assert!(matches!(
            config.validate(),
            Err(EpisimError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_zero_period() {
        assert!(TrainerConfig::default().test_every(0).test_on(1).validate().is_err());
        assert!(TrainerConfig::default().test_every(0).test_on(0).validate().is_ok());
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Result<()> {
        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");
        std::fs::write(&path, "target_scor: 70.0\nmax_episodes: 3\n")?;
        let err = TrainerConfig::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EpisimError>(),
            Some(EpisimError::ConfigurationError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_target_score_is_required() -> Result<()> {
        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");
        std::fs::write(&path, "max_episodes: 3\n")?;
        assert!(TrainerConfig::load(&path).is_err());

        std::fs::write(&path, "target_score: -150.0\n")?;
        let config = TrainerConfig::load(&path)?;
        assert_eq!(config.target_score, -150.0);
        assert_eq!(config.max_episodes, 1000);
        assert_eq!(config.test_on, 0);
        Ok(())
    }

    #[test]
    fn test_default_target_is_unreachable() {
        assert_eq!(TrainerConfig::default().target_score, f32::INFINITY);
    }

    #[test]
    fn test_empty_window() {
        assert!(TrainerConfig::default()
            .process_average_over(0)
            .validate()
            .is_err());
    }
}
