//! Single explicit Euler step with a speed cap. No substepping: a large `dt`
//! clamps speed once and then moves once.

use crate::boid::Boid;
use crate::geometry::{wrap, Domain};
use crate::vector::Vector2D;

/// `velocity + acceleration·dt`, limited to `max_speed`.
pub fn next_velocity(velocity: Vector2D, acceleration: Vector2D, dt: f64, max_speed: f64) -> Vector2D {
    let raw = velocity + acceleration * dt;
    if raw.is_finite() {
        raw.limit(max_speed)
    } else {
        // Overflowed: the infinite components give the heading.
        raw.direction() * max_speed
    }
}

/// `position + velocity·dt`, wrapped into the domain.
pub fn next_position(position: Vector2D, velocity: Vector2D, dt: f64, domain: &Domain) -> Vector2D {
    let step = |p: f64, v: f64, dim: f64| {
        let travel = v * dt;
        if travel.is_finite() {
            wrap(p + travel % dim, dim)
        } else {
            p
        }
    };
    Vector2D::new(
        step(position.x, velocity.x, domain.width),
        step(position.y, velocity.y, domain.height),
    )
}

pub fn integrate(boid: &Boid, acceleration: Vector2D, dt: f64, max_speed: f64, domain: &Domain) -> Boid {
    let velocity = next_velocity(boid.velocity, acceleration, dt, max_speed);
    let position = next_position(boid.position, velocity, dt, domain);
    Boid::new(position, velocity)
}
