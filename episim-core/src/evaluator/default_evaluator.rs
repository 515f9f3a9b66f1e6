//! Default implementation of the [`Evaluator`] trait.
use super::{evaluate_episodes, Evaluator};
use crate::{record::Record, Env, EpisodeRunner, Policy};
use anyhow::Result;

/// Runs a fixed number of episodes on its own environment and returns the average
/// return.
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<Pendulum>::new(&config, 42, 10, runner)?;
/// let record = evaluator.evaluate(&mut agent)?;
/// println!("Average return: {}", record.get_scalar("episode_return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,

    runner: EpisodeRunner,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        evaluate_episodes(&mut self.env, &self.runner, policy, self.n_episodes)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    /// * `runner` - Runner composing states the same way as in training
    pub fn new(
        config: &E::Config,
        seed: i64,
        n_episodes: usize,
        runner: EpisodeRunner,
    ) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
            runner,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dummy::{ScriptedAgent, ScriptedEnv, ScriptedEnvConfig},
        error::EpisimError,
        ActionBounds, AgentConfig, Configurable, ExperienceBufferBase, StateCompositor,
        Agent,
    };

    #[test]
    fn test_default_evaluator() -> Result<()> {
        let config = ScriptedEnvConfig::new(vec![vec![1.0, 1.0], vec![4.0]]);
        let runner = EpisodeRunner::new(StateCompositor::new(2)?);
        let mut evaluator = DefaultEvaluator::<ScriptedEnv>::new(&config, 0, 4, runner)?;
        let bounds = ActionBounds::new(vec![-1.0], vec![1.0]);
        let mut agent = ScriptedAgent::build(&[4, 2], &bounds, AgentConfig::default(), 0)?;

        let record = evaluator.evaluate(&mut agent)?;
        assert_eq!(record.get_scalar("episode_return")?, 3.0);
        assert!(agent.train_flags.iter().all(|&train| !train));
        assert_eq!(agent.memory().len(), 0);
        assert_eq!(agent.n_learns, 0);
        Ok(())
    }

    #[test]
    fn test_zero_episodes() -> Result<()> {
        let config = ScriptedEnvConfig::new(vec![vec![1.0]]);
        let runner = EpisodeRunner::new(StateCompositor::new(1)?);
        let mut evaluator = DefaultEvaluator::<ScriptedEnv>::new(&config, 0, 0, runner)?;
        let bounds = ActionBounds::new(vec![-1.0], vec![1.0]);
        let mut agent = ScriptedAgent::build(&[4], &bounds, AgentConfig::default(), 0)?;

        let err = evaluator.evaluate(&mut agent).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EpisimError>(),
            Some(EpisimError::ConfigurationError(_))
        ));
        assert!(agent.train_flags.is_empty());
        Ok(())
    }
}
