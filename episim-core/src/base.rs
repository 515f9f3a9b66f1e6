//! Core functionalities.
mod agent;
mod agent_config;
mod env;
mod memory;
mod policy;
mod state;
mod step;
pub use agent::Agent;
pub use agent_config::AgentConfig;
pub use env::{ActionBounds, Env};
pub use memory::{EpisodeMemory, ExperienceBufferBase};
pub use policy::{Configurable, Policy};
pub use state::{State, Transition};
use ndarray::ArrayD;
use num_traits::AsPrimitive;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// The harness only needs a numeric n-d array of a fixed shape, converted to `f32`
/// when the agent-visible state is composed.
pub trait Obs: Clone + Debug {
    /// Converts the observation into an `f32` array.
    fn to_array(&self) -> ArrayD<f32>;
}

impl<T> Obs for ArrayD<T>
where
    T: AsPrimitive<f32> + Debug,
{
    fn to_array(&self) -> ArrayD<f32> {
        self.mapv(|v| v.as_())
    }
}

/// An action of an environment.
pub trait Act: Clone + Debug {}
