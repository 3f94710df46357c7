//! String-level frame API for hosts that speak JSON.

use rand::Rng;

use boid_shared::UpdateRequest;

use crate::engine::FlockEngine;
use crate::error::Result;

/// Decodes an [`UpdateRequest`], advances one frame and encodes the snapshot.
pub fn update_json<R: Rng>(engine: &mut FlockEngine<R>, request: &str) -> Result<String> {
    let request: UpdateRequest = serde_json::from_str(request)?;
    let snapshot = engine.update(&request)?;
    Ok(serde_json::to_string(&snapshot)?)
}
