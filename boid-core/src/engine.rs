use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use boid_shared::{BoidSettings, Position, SettingsUpdate, Snapshot, UpdateRequest};

use crate::behavior;
use crate::boid::{Boid, BoidStore};
use crate::config::ConfigStore;
use crate::debug::DebugIntrospector;
use crate::error::{FlockError, Result};
use crate::geometry::Domain;
use crate::integrator;
use crate::neighbours::{NeighbourSearch, NeighbourStrategy};
use crate::vector::Vector2D;

/// Largest population `init` will allocate.
pub const MAX_POPULATION: usize = 100_000;

/// Owns the population, settings and randomness of one simulation.
///
/// Each frame reads a frozen copy of the previous state and writes the next
/// one into a separate buffer, so boid order never changes the outcome.
pub struct FlockEngine<R = StdRng> {
    config: ConfigStore,
    store: Option<BoidStore>,
    debug: DebugIntrospector,
    search: Box<dyn NeighbourSearch>,
    rng: R,
}

impl FlockEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for FlockEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FlockEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            config: ConfigStore::default(),
            store: None,
            debug: DebugIntrospector::default(),
            search: NeighbourStrategy::default().build(),
            rng,
        }
    }

    pub fn with_strategy(mut self, strategy: NeighbourStrategy) -> Self {
        self.search = strategy.build();
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    pub fn settings(&self) -> &BoidSettings {
        self.config.settings()
    }

    pub fn boids(&self) -> Option<&[Boid]> {
        self.store.as_ref().map(BoidStore::boids)
    }

    pub fn debug_indices(&self) -> &[usize] {
        self.debug.indices()
    }

    pub fn neighbour_search(&self) -> &'static str {
        self.search.name()
    }

    /// Replaces the population with `count` random boids in a `width`×`height` domain.
    pub fn init(&mut self, width: f64, height: f64, count: usize) -> Result<()> {
        let domain = Self::init_domain(width, height, count)?;
        let settings = self.resized_settings(width, height)?;
        let store = BoidStore::random(&mut self.rng, &domain, count, settings.velocity_max);
        self.install(settings, store);
        Ok(())
    }

    /// Replaces the population with the given boids. Positions are wrapped into the domain.
    pub fn init_with_boids(&mut self, width: f64, height: f64, boids: Vec<Boid>) -> Result<()> {
        let domain = Self::init_domain(width, height, boids.len())?;
        if let Some(bad) = boids
            .iter()
            .find(|b| !(b.position.is_finite() && b.velocity.is_finite()))
        {
            return Err(FlockError::config(format!("non-finite boid state: {:?}", bad)));
        }
        let settings = self.resized_settings(width, height)?;
        let mut store = BoidStore::from_boids(boids);
        store.rewrap(&domain);
        self.install(settings, store);
        Ok(())
    }

    fn init_domain(width: f64, height: f64, count: usize) -> Result<Domain> {
        let invalid = FlockError::InvalidDomain {
            width,
            height,
            count: count as f64,
        };
        if count == 0 || count > MAX_POPULATION {
            return Err(invalid);
        }
        Domain::new(width, height).map_err(|_| invalid)
    }

    fn resized_settings(&self, width: f64, height: f64) -> Result<BoidSettings> {
        self.config.preview(&SettingsUpdate {
            width: Some(width),
            height: Some(height),
            ..SettingsUpdate::default()
        })
    }

    fn install(&mut self, settings: BoidSettings, store: BoidStore) {
        log::debug!(
            "initialised {} boids in {}x{} domain",
            store.len(),
            settings.width,
            settings.height
        );
        self.config.commit(settings);
        self.debug.retain_within(store.len());
        self.store = Some(store);
    }

    /// Validates `indices` against the current population and makes them the debug set.
    pub fn set_debug_indices(&mut self, indices: Vec<usize>) -> Result<()> {
        let count = self.store.as_ref().ok_or(FlockError::NotInitialized)?.len();
        DebugIntrospector::validate(&indices, count)?;
        self.debug.replace(indices);
        Ok(())
    }

    /// Advances one frame of `dt` seconds after applying a partial settings update.
    pub fn step(&mut self, dt: f64, settings: &SettingsUpdate) -> Result<Snapshot> {
        self.update(&UpdateRequest::new(dt).with_settings(*settings))
    }

    /// Advances one frame as described by a host request.
    pub fn update(&mut self, request: &UpdateRequest) -> Result<Snapshot> {
        let store = self.store.as_mut().ok_or(FlockError::NotInitialized)?;

        let dt = request.time_step;
        if !dt.is_finite() || dt < 0.0 {
            return Err(FlockError::InvalidTimeStep(dt));
        }
        let settings = self.config.preview(&request.settings)?;
        if let Some(indices) = &request.debug_boids {
            DebugIntrospector::validate(indices, store.len())?;
        }
        if let Some(p) = request.pointer {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(FlockError::config(format!("non-finite pointer: {:?}", p)));
            }
        }

        // Everything validated; commit.
        let domain_changed = settings.width != self.config.settings().width
            || settings.height != self.config.settings().height;
        self.config.commit(settings);
        if let Some(indices) = &request.debug_boids {
            self.debug.replace(indices.clone());
        }
        let domain = self.config.domain();
        if domain_changed {
            log::debug!("domain resized to {}x{}", domain.width, domain.height);
            store.rewrap(&domain);
        }
        let pointer = request.pointer.map(|p| {
            let wrapped = domain.wrap(Vector2D::new(p.x, p.y));
            Position::new(wrapped.x, wrapped.y)
        });

        let neighbourhoods = {
            let (current, _) = store.split();
            self.search.neighbourhoods(current, &domain, settings.dist_max)
        };
        let debug_boids = self.debug.record(&neighbourhoods);

        let (current, next) = store.split();
        for (i, neighbours) in neighbourhoods.iter().enumerate() {
            let steering = behavior::steer(
                i,
                current,
                neighbours,
                &domain,
                &settings,
                pointer,
                &mut self.rng,
            );
            next[i] = integrator::integrate(
                &current[i],
                steering.acceleration(),
                dt,
                settings.velocity_max,
                &domain,
            );
        }
        store.commit();

        Ok(Snapshot {
            boids: store.boids().iter().map(Boid::to_array).collect(),
            debug_boids,
            settings,
        })
    }
}
