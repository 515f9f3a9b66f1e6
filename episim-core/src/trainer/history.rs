//! Per-episode scores of a training run.
use serde::Serialize;

/// Scores and rolling means of the episodes executed in a training run.
///
/// Holds exactly one entry per executed episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingHistory {
    target_score: f32,
    scores: Vec<f32>,
    rolling_means: Vec<f32>,
}

impl TrainingHistory {
    /// Creates an empty history with room for `capacity` episodes.
    pub fn with_capacity(target_score: f32, capacity: usize) -> Self {
        Self {
            target_score,
            scores: Vec::with_capacity(capacity),
            rolling_means: Vec::with_capacity(capacity),
        }
    }

    /// Appends the score of an episode and the rolling mean after it.
    pub fn push(&mut self, score: f32, rolling_mean: f32) {
        self.scores.push(score);
        self.rolling_means.push(rolling_mean);
    }

    /// Returns the target score of the run.
    pub fn target_score(&self) -> f32 {
        self.target_score
    }

    /// Returns the score of each episode.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Returns the rolling mean after each episode.
    pub fn rolling_means(&self) -> &[f32] {
        &self.rolling_means
    }

    /// Returns an iterator over `(score, rolling_mean)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.scores
            .iter()
            .copied()
            .zip(self.rolling_means.iter().copied())
    }

    /// Returns the number of executed episodes.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if no episode was executed.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the rolling mean after the last episode.
    pub fn last_rolling_mean(&self) -> Option<f32> {
        self.rolling_means.last().copied()
    }

    /// Returns the best episode score.
    pub fn best_score(&self) -> Option<f32> {
        self.scores.iter().copied().fold(None, |m, v| match m {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    /// Returns `true` if the rolling mean reached the target score.
    pub fn is_converged(&self) -> bool {
        self.last_rolling_mean()
            .map_or(false, |m| m >= self.target_score)
    }
}
