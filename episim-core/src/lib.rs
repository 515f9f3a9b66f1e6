#![warn(missing_docs)]
//! Core of an episodic reinforcement learning experiment harness.
//!
//! An agent ([`Agent`]) interacts with an environment ([`Env`]) episode by episode.
//! Observations are turned into agent-visible states by a [`StateCompositor`],
//! optionally stacking the last frames. The [`Trainer`] repeats episodes with an
//! [`EpisodeRunner`] until the rolling mean of returns computed by a
//! [`ConvergenceTracker`] reaches a target score, or an episode limit is hit.
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{
    Act, ActionBounds, Agent, AgentConfig, Configurable, Env, EpisodeMemory,
    ExperienceBufferBase, Info, Obs, Policy, State, Step, Transition,
};

mod compositor;
pub use compositor::StateCompositor;

mod runner;
pub use runner::{Episode, EpisodeRunner};

mod tracker;
pub use tracker::ConvergenceTracker;

mod trainer;
pub use trainer::{Trainer, TrainerConfig, TrainingHistory};

mod evaluator;
pub use evaluator::{evaluate_episodes, DefaultEvaluator, Evaluator};

mod report;
pub use report::{LogReporter, Reporter};

mod simulation;
pub use simulation::Simulation;
