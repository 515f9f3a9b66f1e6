//! Agent-visible states and transitions.
use ndarray::{ArrayD, ArrayViewD, Axis};

/// The agent-visible representation of an environment.
///
/// Without frame stacking, this is the observation itself converted to `f32`.
/// With a stack depth `k > 1`, the last axis is the temporal axis of length `k`,
/// ordered from the oldest to the newest frame.
#[derive(Clone, Debug, PartialEq)]
pub struct State(pub(crate) ArrayD<f32>);

impl State {
    /// Returns the shape of the state.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Returns the underlying array.
    pub fn as_array(&self) -> &ArrayD<f32> {
        &self.0
    }

    /// Returns the `i`-th frame along the temporal (last) axis.
    ///
    /// Only meaningful for stacked states. Returns `None` for a 0-dimensional state
    /// or when `i` is out of the range of the last axis.
    pub fn frame(&self, i: usize) -> Option<ArrayViewD<'_, f32>> {
        let axis = Axis(self.0.ndim().checked_sub(1)?);
        if i >= self.0.len_of(axis) {
            return None;
        }
        Some(self.0.index_axis(axis, i))
    }
}

/// A transition `(s_t, a_t, r_t, s_t+1, done_t)`.
///
/// Created by [`EpisodeRunner`](crate::EpisodeRunner) and owned by the memory of
/// the agent afterwards. Fields are read-only.
#[derive(Clone, Debug)]
pub struct Transition<A> {
    state: State,
    act: A,
    reward: f32,
    next_state: State,
    is_done: bool,
}

impl<A> Transition<A> {
    /// Constructs a transition.
    pub fn new(state: State, act: A, reward: f32, next_state: State, is_done: bool) -> Self {
        Self {
            state,
            act,
            reward,
            next_state,
            is_done,
        }
    }

    /// State `s_t`.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Action `a_t`.
    pub fn act(&self) -> &A {
        &self.act
    }

    /// Reward `r_t`.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// State `s_t+1`.
    pub fn next_state(&self) -> &State {
        &self.next_state
    }

    /// If the episode ended at this transition.
    pub fn is_done(&self) -> bool {
        self.is_done
    }
}
