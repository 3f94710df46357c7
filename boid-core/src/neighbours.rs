//! Radius queries over the wrapping plane.
//!
//! Every implementation returns, for each boid, the ascending list of other
//! boid indices within `radius` by toroidal distance. Implementations differ
//! only in how many candidates they inspect, never in the result.

use crate::boid::Boid;
use crate::geometry::Domain;

/// Upper bound on grid cells per axis. Small radii just get coarser cells.
const MAX_CELLS_PER_AXIS: usize = 256;

/// Cell edges are grown by this relative margin so float rounding in the
/// cell lookup can never push a true neighbour two cells away.
const CELL_MARGIN: f64 = 1e-9;

/// Neighbour search over a whole population for one frame
pub trait NeighbourSearch {
    /// Neighbour lists for every boid, indexed like `boids`, each ascending.
    fn neighbourhoods(&mut self, boids: &[Boid], domain: &Domain, radius: f64) -> Vec<Vec<usize>>;

    fn name(&self) -> &'static str;
}

/// Which [`NeighbourSearch`] an engine uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighbourStrategy {
    BruteForce,
    #[default]
    Grid,
}

impl NeighbourStrategy {
    pub fn build(self) -> Box<dyn NeighbourSearch> {
        match self {
            Self::BruteForce => Box::new(BruteForce),
            Self::Grid => Box::new(SpatialGrid::default()),
        }
    }
}

#[inline]
fn is_neighbour(boids: &[Boid], domain: &Domain, radius: f64, i: usize, j: usize) -> bool {
    i != j && domain.distance(boids[i].position, boids[j].position) <= radius
}

/// Checks every pair. O(n²).
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForce;

impl NeighbourSearch for BruteForce {
    fn neighbourhoods(&mut self, boids: &[Boid], domain: &Domain, radius: f64) -> Vec<Vec<usize>> {
        (0..boids.len())
            .map(|i| {
                (0..boids.len())
                    .filter(|&j| is_neighbour(boids, domain, radius, i, j))
                    .collect()
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }
}

/// Uniform bucket grid wrapping at the domain edges.
///
/// Cells are at least `radius` wide on each axis, so any neighbour lies in the
/// same cell or one of the eight (wrapped) cells around it.
#[derive(Debug, Default, Clone)]
pub struct SpatialGrid {
    cols: usize,
    rows: usize,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    fn cells_along(extent: f64, radius: f64) -> usize {
        let mut n = (extent / radius).floor().min(MAX_CELLS_PER_AXIS as f64).max(1.0) as usize;
        while n > 1 && extent / (n as f64) < radius * (1.0 + CELL_MARGIN) {
            n -= 1;
        }
        n
    }

    fn rebuild(&mut self, boids: &[Boid], domain: &Domain, radius: f64) {
        self.cols = Self::cells_along(domain.width, radius);
        self.rows = Self::cells_along(domain.height, radius);
        self.cell_width = domain.width / self.cols as f64;
        self.cell_height = domain.height / self.rows as f64;

        let total = self.cols * self.rows;
        self.cells.truncate(total);
        for cell in &mut self.cells {
            cell.clear();
        }
        self.cells.resize_with(total, Vec::new);

        for (i, boid) in boids.iter().enumerate() {
            let (cx, cy) = self.cell_of(boid.position.x, boid.position.y);
            self.cells[cy * self.cols + cx].push(i);
        }
    }

    #[inline]
    fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let cx = ((x / self.cell_width) as usize).min(self.cols - 1);
        let cy = ((y / self.cell_height) as usize).min(self.rows - 1);
        (cx, cy)
    }

    /// Distinct cell ids in the wrapped 3x3 block around `(cx, cy)`.
    fn block(&self, cx: usize, cy: usize) -> Vec<usize> {
        let mut ids = Vec::with_capacity(9);
        for dy in -1..=1isize {
            let row = (cy as isize + dy).rem_euclid(self.rows as isize) as usize;
            for dx in -1..=1isize {
                let col = (cx as isize + dx).rem_euclid(self.cols as isize) as usize;
                ids.push(row * self.cols + col);
            }
        }
        // Grids narrower than three cells revisit the same cell.
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl NeighbourSearch for SpatialGrid {
    fn neighbourhoods(&mut self, boids: &[Boid], domain: &Domain, radius: f64) -> Vec<Vec<usize>> {
        self.rebuild(boids, domain, radius);

        boids
            .iter()
            .enumerate()
            .map(|(i, boid)| {
                let (cx, cy) = self.cell_of(boid.position.x, boid.position.y);
                let mut found: Vec<usize> = self
                    .block(cx, cy)
                    .into_iter()
                    .flat_map(|id| self.cells[id].iter().copied())
                    .filter(|&j| is_neighbour(boids, domain, radius, i, j))
                    .collect();
                found.sort_unstable();
                found
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "SpatialGrid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f64, y: f64) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::zero())
    }

    fn both(boids: &[Boid], domain: &Domain, radius: f64) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let brute = BruteForce.neighbourhoods(boids, domain, radius);
        let grid = SpatialGrid::default().neighbourhoods(boids, domain, radius);
        (brute, grid)
    }

    #[test]
    fn test_wraps_across_vertical_edge() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let boids = [at(1.0, 1.0), at(99.0, 1.0)];
        let (brute, grid) = both(&boids, &domain, 5.0);

        assert_eq!(brute, vec![vec![1], vec![0]]);
        assert_eq!(grid, brute);
    }

    #[test]
    fn test_wraps_across_corner() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let boids = [at(1.0, 1.0), at(99.0, 99.0), at(50.0, 50.0)];
        let (brute, grid) = both(&boids, &domain, 5.0);

        assert_eq!(brute, vec![vec![1], vec![0], vec![]]);
        assert_eq!(grid, brute);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let boids = [at(10.0, 10.0), at(13.0, 14.0)];
        let (brute, grid) = both(&boids, &domain, 5.0);

        assert_eq!(brute, vec![vec![1], vec![0]]);
        assert_eq!(grid, brute);
    }

    #[test]
    fn test_zero_radius_only_matches_coincident() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let boids = [at(10.0, 10.0), at(10.0, 10.0), at(10.5, 10.0)];
        let (brute, grid) = both(&boids, &domain, 0.0);

        assert_eq!(brute, vec![vec![1], vec![0], vec![]]);
        assert_eq!(grid, brute);
    }

    #[test]
    fn test_radius_larger_than_domain() {
        let domain = Domain::new(50.0, 30.0).unwrap();
        let boids = [at(1.0, 1.0), at(25.0, 15.0), at(49.0, 29.0)];
        let (brute, grid) = both(&boids, &domain, 200.0);

        assert_eq!(brute, vec![vec![1, 2], vec![0, 2], vec![0, 1]]);
        assert_eq!(grid, brute);
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(SpatialGrid::cells_along(100.0, 10.0), 9);
        assert_eq!(SpatialGrid::cells_along(100.0, 30.0), 3);
        assert_eq!(SpatialGrid::cells_along(100.0, 500.0), 1);
        assert_eq!(SpatialGrid::cells_along(100.0, 0.0), MAX_CELLS_PER_AXIS);
    }

    #[test]
    fn test_grid_reuse_between_frames() {
        let domain = Domain::new(100.0, 100.0).unwrap();
        let mut grid = SpatialGrid::default();

        let first = [at(10.0, 10.0), at(12.0, 10.0)];
        assert_eq!(grid.neighbourhoods(&first, &domain, 5.0), vec![vec![1], vec![0]]);

        let second = [at(10.0, 10.0), at(60.0, 10.0), at(61.0, 10.0)];
        assert_eq!(
            grid.neighbourhoods(&second, &domain, 50.0),
            BruteForce.neighbourhoods(&second, &domain, 50.0)
        );
    }

    #[test]
    fn test_strategy_build() {
        assert_eq!(NeighbourStrategy::default(), NeighbourStrategy::Grid);
        assert_eq!(NeighbourStrategy::BruteForce.build().name(), "BruteForce");
        assert_eq!(NeighbourStrategy::Grid.build().name(), "SpatialGrid");
    }

    proptest! {
        #[test]
        fn grid_matches_brute_force(
            seed in any::<u64>(),
            radius in prop_oneof![Just(10.0), Just(50.0), Just(200.0), 0.5f64..300.0],
            width in 20.0f64..1000.0,
            height in 20.0f64..1000.0,
        ) {
            let domain = Domain::new(width, height).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let boids: Vec<Boid> = (0..50).map(|_| Boid::random(&mut rng, &domain, 1.0)).collect();
            let (brute, grid) = both(&boids, &domain, radius);
            prop_assert_eq!(grid, brute);
        }

        #[test]
        fn neighbourhoods_are_symmetric(seed in any::<u64>(), radius in 1.0f64..150.0) {
            let domain = Domain::new(400.0, 300.0).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let boids: Vec<Boid> = (0..40).map(|_| Boid::random(&mut rng, &domain, 1.0)).collect();
            let lists = BruteForce.neighbourhoods(&boids, &domain, radius);
            for (i, list) in lists.iter().enumerate() {
                for &j in list {
                    prop_assert!(lists[j].contains(&i));
                }
            }
        }
    }
}
