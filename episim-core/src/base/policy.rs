//! Policy.
use super::{ActionBounds, AgentConfig, Env, State};
use anyhow::Result;

/// A policy on an environment.
///
/// Policy is a mapping from a state to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Sample an action given a state.
    ///
    /// `train` is `true` while training, where the policy may explore.
    fn sample(&mut self, state: &State, train: bool) -> Result<E::Act>;
}

/// An agent which can be built from the shape of states, the action bounds of the
/// environment and an [`AgentConfig`].
pub trait Configurable<E: Env> {
    /// Builds the object.
    ///
    /// `config` is validated before this method is called. `seed` is the seed of the
    /// experiment, the same one the environment is built with; agents sampling random
    /// numbers seed their generator with it.
    fn build(
        state_shape: &[usize],
        bounds: &ActionBounds,
        config: AgentConfig,
        seed: i64,
    ) -> Result<Self>
    where
        Self: Sized;
}
