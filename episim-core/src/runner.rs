//! Running episodes.
//!
//! An episode starts with [`Env::reset`] and ends at the first [`Step`] flagged as
//! done. On every step:
//!
//! 1. The policy selects an action given the current state.
//! 2. The environment performs the action.
//! 3. The next state is composed from the current state and the new observation.
//! 4. A [`Transition`] is appended to the trajectory.
//!
//! Errors from the environment or the policy are not retried. They abort the episode
//! and are returned with a short context.
//!
//! [`Step`]: crate::Step
use crate::{Env, Policy, StateCompositor, Transition};
use anyhow::{Context, Result};
use log::trace;

/// The outcome of an episode.
#[derive(Debug)]
pub struct Episode<A> {
    /// Transitions in the order they were produced.
    pub transitions: Vec<Transition<A>>,

    /// Sum of rewards.
    pub episode_return: f32,
}

impl<A> Episode<A> {
    /// Returns the number of environment steps of the episode.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if the episode has no step.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Runs episodes of an environment with a policy.
#[derive(Debug, Clone)]
pub struct EpisodeRunner {
    compositor: StateCompositor,
}

impl EpisodeRunner {
    /// Creates a runner composing states with `compositor`.
    pub fn new(compositor: StateCompositor) -> Self {
        Self { compositor }
    }

    /// Returns the state compositor.
    pub fn compositor(&self) -> &StateCompositor {
        &self.compositor
    }

    /// Runs an episode until the environment signals done.
    ///
    /// `train` is passed to [`Policy::sample`]. If `visualize` is `true`,
    /// [`Env::render`] is called after every step.
    ///
    /// This method blocks forever on an environment which never finishes an episode.
    pub fn run<E, P>(
        &self,
        env: &mut E,
        policy: &mut P,
        train: bool,
        visualize: bool,
    ) -> Result<Episode<E::Act>>
    where
        E: Env,
        P: Policy<E>,
    {
        let obs = env.reset().context("Failed to reset the environment")?;
        let mut state = self.compositor.initial_state(&obs)?;
        let mut transitions = Vec::new();
        let mut episode_return = 0f32;

        loop {
            let act = policy
                .sample(&state, train)
                .context("Failed to sample an action")?;
            let step = env
                .step(&act)
                .with_context(|| format!("Failed to step the environment with {:?}", act))?;
            if visualize {
                env.render().context("Failed to render the environment")?;
            }

            episode_return += step.reward;
            let is_done = step.is_done();
            let next_state = self.compositor.next_state(&state, &step.obs)?;
            trace!(
                "step {}: reward = {}, done = {}",
                transitions.len(),
                step.reward,
                is_done
            );
            transitions.push(Transition::new(
                state,
                act,
                step.reward,
                next_state.clone(),
                is_done,
            ));

            if is_done {
                break;
            }
            state = next_state;
        }

        Ok(Episode {
            transitions,
            episode_return,
        })
    }
}
