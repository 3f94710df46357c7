//! Steering rules. Each rule reads the previous frame only; neighbour
//! positions are taken relative to the steering boid across the wrap.

use rand::Rng;

use crate::boid::Boid;
use crate::geometry::{Domain, EPSILON};
use crate::vector::Vector2D;
use boid_shared::{BoidSettings, Position};

/// Boids further than this from the pointer ignore it.
pub const FEAR_RADIUS: f64 = 100.0;

/// Weighted contributions of each rule for one boid and one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub separation: Vector2D,
    pub cohesion: Vector2D,
    pub alignment: Vector2D,
    pub random: Vector2D,
    pub fear: Vector2D,
}

impl Steering {
    /// Sum of all rules, saturated so huge factors never produce NaN.
    pub fn acceleration(&self) -> Vector2D {
        let terms = [
            self.separation,
            self.cohesion,
            self.alignment,
            self.random,
            self.fear,
        ];
        terms
            .iter()
            .fold(Vector2D::zero(), |sum, term| sum + term.saturate())
            .saturate()
    }
}

/// Sum of `offset / d²` away from each neighbour: unit direction, `1/d` strength.
pub fn separation(boid: &Boid, boids: &[Boid], neighbours: &[usize], domain: &Domain) -> Vector2D {
    let mut steering = Vector2D::zero();
    for &j in neighbours {
        let offset = domain.delta(boid.position, boids[j].position);
        let d = offset.magnitude().max(EPSILON);
        steering += offset / (d * d);
    }
    steering
}

/// Offset from the boid to the wrapped centroid of its neighbours.
pub fn cohesion(boid: &Boid, boids: &[Boid], neighbours: &[usize], domain: &Domain) -> Vector2D {
    if neighbours.is_empty() {
        return Vector2D::zero();
    }
    let mut sum = Vector2D::zero();
    for &j in neighbours {
        sum += domain.delta(boids[j].position, boid.position);
    }
    sum / neighbours.len() as f64
}

/// Difference between the neighbours' mean velocity and the boid's own.
pub fn alignment(boid: &Boid, boids: &[Boid], neighbours: &[usize]) -> Vector2D {
    if neighbours.is_empty() {
        return Vector2D::zero();
    }
    let mut sum = Vector2D::zero();
    for &j in neighbours {
        sum += boids[j].velocity;
    }
    sum / neighbours.len() as f64 - boid.velocity
}

/// Push directly away from the pointer when it is within [`FEAR_RADIUS`].
pub fn fear(boid: &Boid, pointer: Vector2D, domain: &Domain) -> Vector2D {
    let away = domain.delta(boid.position, pointer);
    if away.magnitude() > FEAR_RADIUS {
        Vector2D::zero()
    } else {
        away
    }
}

/// Uniform draw in `[-1, 1]` on each axis.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Vector2D {
    Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}

/// Applies every rule for boid `index` against the frozen `boids` slice.
///
/// Exactly one jitter draw is taken per call regardless of the random factor,
/// so the generator stream only depends on population size and frame count.
pub fn steer<R: Rng + ?Sized>(
    index: usize,
    boids: &[Boid],
    neighbours: &[usize],
    domain: &Domain,
    settings: &BoidSettings,
    pointer: Option<Position>,
    rng: &mut R,
) -> Steering {
    let boid = &boids[index];
    let random = jitter(rng) * settings.random_factor;
    let fear = pointer
        .map(|p| fear(boid, Vector2D::new(p.x, p.y), domain) * settings.fear_factor)
        .unwrap_or_default();

    Steering {
        separation: separation(boid, boids, neighbours, domain) * settings.separation_factor,
        cohesion: cohesion(boid, boids, neighbours, domain) * settings.cohesion_factor,
        alignment: alignment(boid, boids, neighbours) * settings.alignment_factor,
        random,
        fear,
    }
}
