//! Flocking engine for a wrapping 2D domain.
//!
//! The host calls [`FlockEngine::init`] once and then [`FlockEngine::update`]
//! every frame; each update returns a [`Snapshot`] with boid states, the
//! neighbour lists of the debug boids and the full settings in effect.

pub mod behavior;
pub mod boid;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod integrator;
pub mod json;
pub mod neighbours;
pub mod vector;

pub use boid::{Boid, BoidStore};
pub use config::ConfigStore;
pub use engine::{FlockEngine, MAX_POPULATION};
pub use error::{FlockError, Result};
pub use geometry::Domain;
pub use neighbours::{BruteForce, NeighbourSearch, NeighbourStrategy, SpatialGrid};
pub use vector::Vector2D;

pub use boid_shared::{BoidSettings, DebugBoid, Position, SettingsUpdate, Snapshot, UpdateRequest};
