//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Bounds of a continuous action space.
///
/// They are read once, when an agent is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBounds {
    /// Lower bound of each action dimension.
    pub low: Vec<f32>,

    /// Upper bound of each action dimension.
    pub high: Vec<f32>,
}

impl ActionBounds {
    /// Constructs bounds from the lower and upper limits.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        Self { low, high }
    }

    /// Returns the number of action dimensions.
    pub fn dim(&self) -> usize {
        self.low.len()
    }
}

/// Represents an environment, typically an MDP.
///
/// All methods are synchronous and block for the duration of one step.
/// Errors are never retried by the harness: a failing environment aborts the
/// training run.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Returns the bounds of the action space.
    fn action_bounds(&self) -> ActionBounds;

    /// Samples an action uniformly from the action space.
    fn sample_action(&mut self) -> Self::Act;

    /// Renders the current state of the environment.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    /// Releases resources used for rendering.
    fn close(&mut self) {}
}
