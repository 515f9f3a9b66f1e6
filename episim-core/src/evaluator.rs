//! Evaluate [`Policy`].
use crate::{error::EpisimError, record::Record, Env, EpisodeRunner, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Evaluate [`Policy`].
    ///
    /// Episodes are run with `train = false`; the memory and the learning hook of
    /// agents are not used.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>;
}

/// Runs `n_episodes` episodes without training and returns the mean return as
/// `"episode_return"`.
///
/// `n_episodes` must be at least 1.
pub fn evaluate_episodes<E, P>(
    env: &mut E,
    runner: &EpisodeRunner,
    policy: &mut P,
    n_episodes: usize,
) -> Result<Record>
where
    E: Env,
    P: Policy<E>,
{
    if n_episodes == 0 {
        return Err(EpisimError::config("n_episodes of evaluation must be at least 1").into());
    }

    let mut r_total = 0f32;
    for _ in 0..n_episodes {
        r_total += runner.run(env, policy, false, false)?.episode_return;
        env.close();
    }
    Ok(Record::from_scalar(
        "episode_return",
        r_total / n_episodes as f32,
    ))
}
