//! This module is used for tests.
//!
//! [`ScriptedEnv`] replays fixed reward sequences, one per episode, and
//! [`ScriptedAgent`] counts the calls of its hooks.
use crate::{
    record::Record, ActionBounds, Agent, AgentConfig, Configurable, Env, EpisodeMemory,
    ExperienceBufferBase, Policy, State, Step, Transition,
};
use anyhow::{anyhow, Result};
use ndarray::{Array1, ArrayD};

#[derive(Clone, Debug, PartialEq)]
/// Dummy action.
pub struct DummyAct(pub f32);

impl crate::Act for DummyAct {}

/// Configuration of [`ScriptedEnv`].
#[derive(Clone, Debug)]
pub struct ScriptedEnvConfig {
    /// Rewards of each episode. Episode `i` uses `episodes[i % episodes.len()]`,
    /// which must not be empty.
    pub episodes: Vec<Vec<f32>>,

    /// Length of observations.
    pub obs_dim: usize,

    /// Index of the episode in which [`Env::step`] fails.
    pub fail_on_episode: Option<usize>,
}

impl ScriptedEnvConfig {
    /// Configuration with the given reward sequences.
    pub fn new(episodes: Vec<Vec<f32>>) -> Self {
        Self {
            episodes,
            obs_dim: 4,
            fail_on_episode: None,
        }
    }
}

/// An environment replaying fixed reward sequences.
///
/// The observation at step `t` of episode `e` is filled with `1000 * e + t`.
pub struct ScriptedEnv {
    config: ScriptedEnvConfig,
    n_resets: usize,
    t: usize,

    /// Indices of the episodes in which [`Env::render`] was called.
    pub rendered_episodes: Vec<usize>,

    /// The number of calls of [`Env::close`].
    pub n_closes: usize,
}

impl ScriptedEnv {
    fn episode(&self) -> usize {
        self.n_resets.saturating_sub(1)
    }

    fn rewards(&self) -> &[f32] {
        let episodes = &self.config.episodes;
        &episodes[self.episode() % episodes.len()]
    }

    fn obs(&self) -> ArrayD<f64> {
        let v = (1000 * self.episode() + self.t) as f64;
        Array1::from_elem(self.config.obs_dim, v).into_dyn()
    }
}

impl Env for ScriptedEnv {
    type Config = ScriptedEnvConfig;
    type Act = DummyAct;
    type Obs = ArrayD<f64>;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            n_resets: 0,
            t: 0,
            rendered_episodes: vec![],
            n_closes: 0,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.n_resets += 1;
        self.t = 0;
        Ok(self.obs())
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if self.config.fail_on_episode == Some(self.episode()) {
            return Err(anyhow!("scripted failure in episode {}", self.episode()));
        }
        let reward = self.rewards()[self.t];
        self.t += 1;
        let is_terminated = self.t == self.rewards().len();
        Ok(Step::new(self.obs(), a.clone(), reward, is_terminated, false, ()))
    }

    fn action_bounds(&self) -> ActionBounds {
        ActionBounds::new(vec![-1.0], vec![1.0])
    }

    fn sample_action(&mut self) -> Self::Act {
        DummyAct(0.0)
    }

    fn render(&mut self) -> Result<()> {
        let episode = self.episode();
        if self.rendered_episodes.last() != Some(&episode) {
            self.rendered_episodes.push(episode);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.n_closes += 1;
    }
}

/// An agent counting the calls of its hooks.
pub struct ScriptedAgent {
    memory: EpisodeMemory<Transition<DummyAct>>,

    /// Shape of states given at construction.
    pub state_shape: Vec<usize>,

    /// Seed given at construction.
    pub seed: i64,

    /// The number of calls of [`Agent::learn_end_episode`].
    pub n_learns: usize,

    /// The number of transitions consumed by the learning hook.
    pub n_transitions: usize,

    /// Arguments of [`Agent::report_progress`], `(episode, return, rolling_mean)`.
    pub progress: std::cell::RefCell<Vec<(usize, f32, f32)>>,

    /// The `train` flags given to [`Policy::sample`].
    pub train_flags: Vec<bool>,
}

impl Policy<ScriptedEnv> for ScriptedAgent {
    fn sample(&mut self, state: &State, train: bool) -> Result<DummyAct> {
        self.train_flags.push(train);
        Ok(DummyAct(state.as_array().sum()))
    }
}

impl Configurable<ScriptedEnv> for ScriptedAgent {
    fn build(
        state_shape: &[usize],
        _bounds: &ActionBounds,
        _config: AgentConfig,
        seed: i64,
    ) -> Result<Self> {
        Ok(Self {
            memory: EpisodeMemory::new(),
            state_shape: state_shape.to_vec(),
            seed,
            n_learns: 0,
            n_transitions: 0,
            progress: std::cell::RefCell::new(vec![]),
            train_flags: vec![],
        })
    }
}

impl Agent<ScriptedEnv> for ScriptedAgent {
    type Memory = EpisodeMemory<Transition<DummyAct>>;

    fn memory(&mut self) -> &mut Self::Memory {
        &mut self.memory
    }

    fn learn_end_episode(&mut self) -> Result<Record> {
        let n = self.memory.len();
        self.memory.clear();
        self.n_learns += 1;
        self.n_transitions += n;
        Ok(Record::from_scalar("n_transitions", n as f32))
    }

    fn report_progress(
        &self,
        episode: usize,
        _max_episodes: usize,
        episode_return: f32,
        rolling_mean: f32,
    ) {
        self.progress
            .borrow_mut()
            .push((episode, episode_return, rolling_mean));
    }
}
