//! Baseline agent.
use anyhow::Result;
use episim_core::{
    record::{Record, RecordValue},
    ActionBounds, Agent, AgentConfig, Configurable, Env, EpisodeMemory, ExperienceBufferBase,
    Policy, State, Transition,
};
use log::info;

/// An agent sampling actions uniformly within the action bounds.
///
/// It does not learn. The learning hook only computes the discounted return of the
/// episode in its memory and clears the memory.
pub struct RandomAgent<E: Env> {
    bounds: ActionBounds,
    rng: fastrand::Rng,
    memory: EpisodeMemory<Transition<E::Act>>,
    gamma: f64,
    verbose: bool,
}

impl<E: Env> RandomAgent<E> {
    /// Returns the action bounds given at construction.
    pub fn bounds(&self) -> &ActionBounds {
        &self.bounds
    }
}

impl<E> Policy<E> for RandomAgent<E>
where
    E: Env,
    E::Act: From<Vec<f32>>,
{
    fn sample(&mut self, _state: &State, _train: bool) -> Result<E::Act> {
        let rng = &self.rng;
        let act: Vec<f32> = self
            .bounds
            .low
            .iter()
            .zip(self.bounds.high.iter())
            .map(|(&low, &high)| low + rng.f32() * (high - low))
            .collect();
        Ok(act.into())
    }
}

impl<E> Configurable<E> for RandomAgent<E>
where
    E: Env,
    E::Act: From<Vec<f32>>,
{
    fn build(
        _state_shape: &[usize],
        bounds: &ActionBounds,
        config: AgentConfig,
        seed: i64,
    ) -> Result<Self> {
        Ok(Self {
            bounds: bounds.clone(),
            rng: fastrand::Rng::with_seed(seed as u64),
            memory: EpisodeMemory::new(),
            gamma: config.gamma,
            verbose: config.verbose,
        })
    }
}

impl<E> Agent<E> for RandomAgent<E>
where
    E: Env,
    E::Act: From<Vec<f32>>,
{
    type Memory = EpisodeMemory<Transition<E::Act>>;

    fn memory(&mut self) -> &mut Self::Memory {
        &mut self.memory
    }

    fn learn_end_episode(&mut self) -> Result<Record> {
        let n_transitions = self.memory.len();
        let discounted_return = self
            .memory
            .iter()
            .rev()
            .fold(0f64, |g, tr| tr.reward() as f64 + self.gamma * g);
        self.memory.clear();

        Ok(Record::from_slice(&[
            (
                "discounted_return",
                RecordValue::Scalar(discounted_return as f32),
            ),
            ("n_transitions", RecordValue::Scalar(n_transitions as f32)),
        ]))
    }

    fn report_progress(
        &self,
        episode: usize,
        max_episodes: usize,
        episode_return: f32,
        rolling_mean: f32,
    ) {
        if self.verbose {
            info!(
                "Episode {}/{}: score = {:.2}, rolling mean = {:.2}",
                episode + 1,
                max_episodes,
                episode_return,
                rolling_mean
            );
        }
    }
}
