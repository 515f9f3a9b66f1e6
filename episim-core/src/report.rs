//! Reporting the result of a training run.
use crate::TrainingHistory;
use anyhow::Result;
use log::info;

/// Consumes the history of a finished training run, e.g., to plot or store it.
pub trait Reporter {
    /// Reports the history.
    fn report(&mut self, history: &TrainingHistory) -> Result<()>;
}

/// Writes a summary of the run with the logging facade.
#[derive(Debug, Default)]
pub struct LogReporter {}

impl LogReporter {
    /// Constructs the reporter.
    pub fn new() -> Self {
        Self {}
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, history: &TrainingHistory) -> Result<()> {
        let status = match history.is_converged() {
            true => "converged",
            false => "not converged",
        };
        info!(
            "{} after {} episodes: best score = {:?}, rolling mean = {:?}, target score = {}",
            status,
            history.len(),
            history.best_score(),
            history.last_rolling_mean(),
            history.target_score()
        );
        Ok(())
    }
}
