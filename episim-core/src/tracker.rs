//! Rolling mean of episode returns.
use crate::error::EpisimError;
use std::collections::VecDeque;

/// Keeps the last `capacity` episode returns and their mean, the signal used to
/// stop training.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    window: VecDeque<f32>,
    capacity: usize,
}

impl ConvergenceTracker {
    /// Constructs a tracker averaging over `capacity` episodes.
    pub fn new(capacity: usize) -> Result<Self, EpisimError> {
        if capacity == 0 {
            return Err(EpisimError::config(
                "the number of episodes to average over must be at least 1",
            ));
        }
        Ok(Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Appends the return of an episode, evicting the oldest one if the window is full.
    pub fn record(&mut self, episode_return: f32) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(episode_return);
    }

    /// Returns the mean of the returns in the window.
    ///
    /// An empty window gives negative infinity, which never reaches a target score.
    pub fn current_mean(&self) -> f32 {
        if self.window.is_empty() {
            return f32::NEG_INFINITY;
        }
        let sum: f64 = self.window.iter().map(|&v| v as f64).sum();
        (sum / self.window.len() as f64) as f32
    }

    /// Returns the number of returns in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if no return has been recorded.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns `true` if the window holds `capacity` returns.
    pub fn is_full(&self) -> bool {
        self.window.len() == self.capacity
    }

    /// Returns the size of the window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the returns in the window, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, f32> {
        self.window.iter()
    }
}
