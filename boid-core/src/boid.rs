use std::f64::consts::TAU;

use rand::Rng;

use crate::geometry::Domain;
use crate::vector::Vector2D;

/// A single boid entity. Its identity is its index in the [`BoidStore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    /// Uniform position in the domain, uniform heading, speed in `[0, max_speed]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, domain: &Domain, max_speed: f64) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..domain.width),
            rng.gen_range(0.0..domain.height),
        );
        let heading = rng.gen_range(0.0..TAU);
        let speed = if max_speed > 0.0 {
            rng.gen_range(0.0..=max_speed)
        } else {
            0.0
        };
        let velocity = Vector2D::new(heading.cos(), heading.sin()) * speed;
        Self::new(position, velocity)
    }

    /// `[x, y, vx, vy]` as sent to the host
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        ]
    }
}

/// Fixed-size population with a scratch buffer for the next frame
#[derive(Debug, Clone)]
pub struct BoidStore {
    boids: Vec<Boid>,
    next: Vec<Boid>,
}

impl BoidStore {
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        domain: &Domain,
        count: usize,
        max_speed: f64,
    ) -> Self {
        let boids = (0..count)
            .map(|_| Boid::random(rng, domain, max_speed))
            .collect();
        Self::from_boids(boids)
    }

    pub fn from_boids(boids: Vec<Boid>) -> Self {
        let next = boids.clone();
        Self { boids, next }
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Current frame (read-only) and next-frame buffer (write-only).
    pub(crate) fn split(&mut self) -> (&[Boid], &mut [Boid]) {
        (&self.boids, &mut self.next)
    }

    /// Makes the next-frame buffer current.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.boids, &mut self.next);
    }

    /// Re-wraps every position, used after the domain changes size.
    pub fn rewrap(&mut self, domain: &Domain) {
        for boid in &mut self.boids {
            boid.position = domain.wrap(boid.position);
        }
    }
}
