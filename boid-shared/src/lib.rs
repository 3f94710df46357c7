//! Wire types exchanged between the flocking engine and its host.
//!
//! Everything here is plain data with camelCase field names on the wire, so a
//! browser host can build requests and read snapshots as ordinary JS objects.

use serde::{Deserialize, Serialize};

/// Represents a 2D position in domain coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Full set of tunable simulation parameters, echoed back with every snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoidSettings {
    pub width: f64,
    pub height: f64,
    pub dist_max: f64,
    pub velocity_max: f64,
    pub separation_factor: f64,
    pub cohesion_factor: f64,
    pub alignment_factor: f64,
    pub random_factor: f64,
    pub fear_factor: f64,
}

impl Default for BoidSettings {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            dist_max: 50.0,
            velocity_max: 200.0,
            separation_factor: 3.0,
            cohesion_factor: 1.0,
            alignment_factor: 3.0,
            random_factor: 1.0,
            fear_factor: 1.0,
        }
    }
}

/// Partial settings sent by the host each frame. Absent fields keep their
/// previous value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fear_factor: Option<f64>,
}

impl SettingsUpdate {
    /// Returns `base` with every present field of this update applied.
    pub fn merged_into(&self, base: &BoidSettings) -> BoidSettings {
        BoidSettings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            dist_max: self.dist_max.unwrap_or(base.dist_max),
            velocity_max: self.velocity_max.unwrap_or(base.velocity_max),
            separation_factor: self.separation_factor.unwrap_or(base.separation_factor),
            cohesion_factor: self.cohesion_factor.unwrap_or(base.cohesion_factor),
            alignment_factor: self.alignment_factor.unwrap_or(base.alignment_factor),
            random_factor: self.random_factor.unwrap_or(base.random_factor),
            fear_factor: self.fear_factor.unwrap_or(base.fear_factor),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-frame request from the host
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Elapsed seconds since the previous frame
    pub time_step: f64,
    #[serde(default)]
    pub settings: SettingsUpdate,
    /// Pointer position boids flee from, if the host has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Position>,
    /// Replacement set of debug boid indices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_boids: Option<Vec<usize>>,
}

impl UpdateRequest {
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: SettingsUpdate) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_pointer(mut self, pointer: Position) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Neighbour list of a designated boid for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugBoid {
    pub index: usize,
    pub neighbours: Vec<usize>,
}

/// Engine output for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// `[x, y, vx, vy]` per boid, in index order
    pub boids: Vec<[f64; 4]>,
    pub debug_boids: Vec<DebugBoid>,
    pub settings: BoidSettings,
}
