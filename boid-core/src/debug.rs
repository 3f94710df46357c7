use boid_shared::DebugBoid;

use crate::error::{FlockError, Result};

/// Designated boids whose neighbour lists are reported every frame.
///
/// Records are copied out of the physics pass's neighbour lists; nothing here
/// feeds back into the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugIntrospector {
    indices: Vec<usize>,
}

impl Default for DebugIntrospector {
    fn default() -> Self {
        Self { indices: vec![0] }
    }
}

impl DebugIntrospector {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Checks `indices` against a population of `count` boids.
    pub fn validate(indices: &[usize], count: usize) -> Result<()> {
        match indices.iter().find(|&&index| index >= count) {
            Some(&index) => Err(FlockError::InvalidDebugIndex { index, count }),
            None => Ok(()),
        }
    }

    /// Replaces the set. Callers validate first.
    pub fn replace(&mut self, indices: Vec<usize>) {
        self.indices = indices;
    }

    /// Drops indices that no longer exist after the population changed.
    pub fn retain_within(&mut self, count: usize) {
        let before = self.indices.len();
        self.indices.retain(|&index| index < count);
        if self.indices.len() != before {
            log::warn!(
                "dropped {} debug indices outside population of {}",
                before - self.indices.len(),
                count
            );
        }
    }

    pub fn record(&self, neighbourhoods: &[Vec<usize>]) -> Vec<DebugBoid> {
        self.indices
            .iter()
            .filter_map(|&index| {
                neighbourhoods.get(index).map(|neighbours| DebugBoid {
                    index,
                    neighbours: neighbours.clone(),
                })
            })
            .collect()
    }
}
