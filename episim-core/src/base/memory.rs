//! Experience memory of agents.
use anyhow::Result;

/// Interface for buffers that store experiences from environments.
///
/// The training loop pushes every [`Transition`](crate::Transition) of an
/// episode into the memory of the agent before calling its learning hook.
pub trait ExperienceBufferBase {
    /// The type of items stored in the buffer.
    type Item;

    /// Pushes a new experience into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A growable buffer keeping experiences in insertion order.
///
/// This is what on-policy agents typically use: transitions of the current episode
/// are collected, consumed by the learning hook and then cleared.
#[derive(Debug, Clone)]
pub struct EpisodeMemory<T> {
    items: Vec<T>,
}

impl<T> Default for EpisodeMemory<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EpisodeMemory<T> {
    /// Constructs an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the stored items, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> ExperienceBufferBase for EpisodeMemory<T> {
    type Item = T;

    fn push(&mut self, tr: T) -> Result<()> {
        self.items.push(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
