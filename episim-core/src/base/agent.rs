//! Agent.
use super::{Env, ExperienceBufferBase, Policy, Transition};
use crate::record::Record;
use anyhow::Result;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env>: Policy<E> {
    /// Memory receiving the transitions of every training episode.
    type Memory: ExperienceBufferBase<Item = Transition<E::Act>>;

    /// Returns the memory of the agent.
    fn memory(&mut self) -> &mut Self::Memory;

    /// Performs the learning step at the end of an episode.
    ///
    /// The returned record is merged into the record of the episode.
    fn learn_end_episode(&mut self) -> Result<Record>;

    /// Reports training progress after each episode.
    ///
    /// Agents usually print something here only when configured as verbose.
    #[allow(unused_variables)]
    fn report_progress(
        &self,
        episode: usize,
        max_episodes: usize,
        episode_return: f32,
        rolling_mean: f32,
    ) {
    }
}
