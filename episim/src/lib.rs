//! Experiments with the episim harness.
//!
//! * [`Pendulum`] - the classic pendulum swing-up task, written in Rust
//! * [`RandomAgent`] - a baseline agent acting uniformly within the action bounds
//! * [`CsvReporter`] - writes the scores of a training run to a CSV file
//! * [`ExperimentConfig`] - everything needed to run an experiment, in YAML
mod config;
mod csv_reporter;
mod pendulum;
mod random_agent;

pub use config::ExperimentConfig;
pub use csv_reporter::CsvReporter;
pub use pendulum::{ContinuousAct, Pendulum, PendulumConfig};
pub use random_agent::RandomAgent;
