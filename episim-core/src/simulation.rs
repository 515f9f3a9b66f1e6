//! An environment, an agent and the way states are composed, put together.
use crate::{
    evaluator::evaluate_episodes,
    record::{Record, Recorder},
    Agent, AgentConfig, Configurable, Env, EpisodeRunner, StateCompositor, Trainer,
    TrainerConfig, TrainingHistory,
};
use anyhow::{Context, Result};
use log::info;

/// Owns an environment and an agent acting on states composed by an
/// [`EpisodeRunner`].
pub struct Simulation<E: Env, A> {
    env: E,
    agent: A,
    runner: EpisodeRunner,
}

impl<E, A> Simulation<E, A>
where
    E: Env,
    A: Agent<E> + Configurable<E>,
{
    /// Builds the environment and the agent.
    ///
    /// The environment is reset once to know the shape of states, which is given to
    /// the agent together with the action bounds of the environment. Both are built
    /// with `seed`, so simulations built with the same arguments behave the same.
    pub fn build(
        env_config: &E::Config,
        seed: i64,
        stack_depth: usize,
        agent_config: AgentConfig,
    ) -> Result<Self> {
        let compositor = StateCompositor::new(stack_depth)?;
        agent_config.validate()?;

        let mut env = E::build(env_config, seed)?;
        let obs = env.reset().context("Failed to reset the environment")?;
        let state_shape = compositor.state_shape(&obs)?;
        let bounds = env.action_bounds();
        info!(
            "State shape = {:?}, action bounds = {:?}",
            state_shape, bounds
        );
        let agent = A::build(&state_shape, &bounds, agent_config, seed)?;

        Ok(Self::from_parts(env, agent, EpisodeRunner::new(compositor)))
    }
}

impl<E, A> Simulation<E, A>
where
    E: Env,
    A: Agent<E>,
{
    /// Puts together already constructed objects.
    pub fn from_parts(env: E, agent: A, runner: EpisodeRunner) -> Self {
        Self { env, agent, runner }
    }

    /// Trains the agent.
    pub fn train(
        &mut self,
        config: TrainerConfig,
        recorder: &mut dyn Recorder,
    ) -> Result<TrainingHistory> {
        let trainer = Trainer::build(config)?;
        trainer.train(&mut self.env, &mut self.agent, &self.runner, recorder)
    }

    /// Runs episodes without training and returns the mean return.
    pub fn evaluate(&mut self, n_episodes: usize) -> Result<Record> {
        evaluate_episodes(&mut self.env, &self.runner, &mut self.agent, n_episodes)
    }

    /// Runs an episode with random actions sampled from the environment, rendering
    /// every step. Returns the sum of rewards.
    pub fn test_random(&mut self, verbose: bool) -> Result<f32> {
        self.env.reset().context("Failed to reset the environment")?;
        let mut r_total = 0f32;
        loop {
            self.env.render()?;
            let act = self.env.sample_action();
            let step = self.env.step(&act)?;
            r_total += step.reward;
            if verbose {
                info!("obs = {:?}, reward = {}", step.obs, step.reward);
            }
            if step.is_done() {
                self.env.render()?;
                break;
            }
        }
        self.env.close();
        Ok(r_total)
    }

    /// Returns the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Returns the runner.
    pub fn runner(&self) -> &EpisodeRunner {
        &self.runner
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dummy::{ScriptedAgent, ScriptedEnv, ScriptedEnvConfig},
        error::EpisimError,
        record::NullRecorder,
    };

    type Sim = Simulation<ScriptedEnv, ScriptedAgent>;

    #[test]
    fn test_agent_receives_state_shape() -> Result<()> {
        let config = ScriptedEnvConfig::new(vec![vec![1.0]]);
        let sim = Sim::build(&config, 0, 3, AgentConfig::default())?;
        assert_eq!(sim.agent().state_shape, vec![4, 3]);

        let sim = Sim::build(&config, 17, 1, AgentConfig::default())?;
        assert_eq!(sim.agent().state_shape, vec![4]);
        assert_eq!(sim.agent().seed, 17);
        Ok(())
    }

    #[test]
    fn test_invalid_configurations() {
        let config = ScriptedEnvConfig::new(vec![vec![1.0]]);
        let err = Sim::build(&config, 0, 0, AgentConfig::default()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<EpisimError>(),
            Some(EpisimError::ConfigurationError(_))
        ));

        let err = Sim::build(&config, 0, 1, AgentConfig::default().gamma(-0.1))
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<EpisimError>(),
            Some(EpisimError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_train_and_evaluate() -> Result<()> {
        let config = ScriptedEnvConfig::new(vec![vec![1.0, 2.0]]);
        let mut sim = Sim::build(&config, 0, 2, AgentConfig::default())?;
        let history = sim.train(
            TrainerConfig::default()
                .target_score(3.0)
                .max_episodes(10)
                .process_average_over(2),
            &mut NullRecorder::new(),
        )?;
        assert_eq!(history.len(), 1);
        assert!(history.is_converged());
        assert_eq!(sim.agent().n_learns, 1);

        let record = sim.evaluate(2)?;
        assert_eq!(record.get_scalar("episode_return")?, 3.0);
        assert_eq!(sim.agent().n_learns, 1);
        Ok(())
    }

    #[test]
    fn test_random_episode() -> Result<()> {
        let config = ScriptedEnvConfig::new(vec![vec![0.5, 0.5, 1.0]]);
        let mut sim = Sim::build(&config, 0, 1, AgentConfig::default())?;
        let r = sim.test_random(true)?;
        assert_eq!(r, 2.0);
        // reset in build() is episode 0, test_random() runs episode 1
        assert_eq!(sim.env().rendered_episodes, vec![1]);
        assert_eq!(sim.env().n_closes, 1);
        Ok(())
    }
}
