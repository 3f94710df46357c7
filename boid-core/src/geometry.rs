//! Toroidal arithmetic over the bounded simulation plane.
//!
//! Opposite edges of the domain are identified, so every offset and distance
//! in the engine goes through [`Domain::delta`] rather than plain subtraction.

use crate::error::{FlockError, Result};
use crate::vector::Vector2D;

/// Guard for distance denominators.
pub const EPSILON: f64 = 1e-6;

/// Maps `value` into `[0, dim)`.
pub fn wrap(value: f64, dim: f64) -> f64 {
    ((value % dim) + dim) % dim
}

/// Shortest signed offset `a - b` across the wrap boundary.
///
/// Both inputs are expected to lie in `[0, dim)`.
pub fn toroidal_delta(a: f64, b: f64, dim: f64) -> f64 {
    let d = a - b;
    if d > dim / 2.0 {
        d - dim
    } else if d < -dim / 2.0 {
        d + dim
    } else {
        d
    }
}

/// Width and height of the wrapping plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub width: f64,
    pub height: f64,
}

impl Domain {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FlockError::InvalidConfig(format!(
                "domain must be finite and positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn wrap(&self, p: Vector2D) -> Vector2D {
        Vector2D::new(wrap(p.x, self.width), wrap(p.y, self.height))
    }

    /// Offset from `b` to `a` along the shortest wrapped path.
    pub fn delta(&self, a: Vector2D, b: Vector2D) -> Vector2D {
        Vector2D::new(
            toroidal_delta(a.x, b.x, self.width),
            toroidal_delta(a.y, b.y, self.height),
        )
    }

    pub fn distance(&self, a: Vector2D, b: Vector2D) -> f64 {
        self.delta(a, b).magnitude()
    }

    pub fn contains(&self, p: Vector2D) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Minimum distance over the 3x3 grid of mirrored copies of `b`.
    fn mirrored_distance(domain: &Domain, a: Vector2D, b: Vector2D) -> f64 {
        let mut best = f64::INFINITY;
        for ox in [-domain.width, 0.0, domain.width] {
            for oy in [-domain.height, 0.0, domain.height] {
                let d = (a - (b + Vector2D::new(ox, oy))).magnitude();
                best = best.min(d);
            }
        }
        best
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(5.0, 10.0), 5.0);
        assert_eq!(wrap(-3.0, 10.0), 7.0);
        assert_eq!(wrap(13.0, 10.0), 3.0);
        assert_eq!(wrap(10.0, 10.0), 0.0);
        assert_eq!(wrap(-25.0, 10.0), 5.0);
    }

    #[test]
    fn test_toroidal_delta_crosses_edge() {
        assert_eq!(toroidal_delta(1.0, 99.0, 100.0), 2.0);
        assert_eq!(toroidal_delta(99.0, 1.0, 100.0), -2.0);
        assert_eq!(toroidal_delta(40.0, 10.0, 100.0), 30.0);
    }

    #[test]
    fn test_distance_across_boundary() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let d = domain.distance(Vector2D::new(1.0, 1.0), Vector2D::new(99.0, 1.0));
        assert_relative_eq!(d, 2.0);

        let corner = domain.distance(Vector2D::new(1.0, 1.0), Vector2D::new(99.0, 99.0));
        assert_relative_eq!(corner, 8.0_f64.sqrt());
    }

    #[test]
    fn test_domain_rejects_non_positive() {
        assert!(Domain::new(0.0, 10.0).is_err());
        assert!(Domain::new(10.0, -1.0).is_err());
        assert!(Domain::new(f64::NAN, 10.0).is_err());
    }

    proptest! {
        #[test]
        fn wrap_stays_in_range(v in -1e6f64..1e6, dim in 0.1f64..1e4) {
            let w = wrap(v, dim);
            prop_assert!(w >= 0.0 && w < dim);
        }

        #[test]
        fn delta_matches_mirrored_minimum(
            ax in 0.0f64..200.0, ay in 0.0f64..80.0,
            bx in 0.0f64..200.0, by in 0.0f64..80.0,
        ) {
            let domain = Domain::new(200.0, 80.0).unwrap();
            let a = Vector2D::new(ax, ay);
            let b = Vector2D::new(bx, by);
            let expected = mirrored_distance(&domain, a, b);
            prop_assert!((domain.distance(a, b) - expected).abs() < 1e-9);
            prop_assert_eq!(domain.distance(a, b), domain.distance(b, a));
        }
    }
}
