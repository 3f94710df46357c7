use std::cell::RefCell;

use boid_core::{json, FlockEngine, FlockError, MAX_POPULATION};
use wasm_bindgen::prelude::*;

mod logger;
pub mod timing;

use timing::FrameTimer;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn to_js(err: FlockError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// JS numbers arrive as f64; only whole counts in `1..=MAX_POPULATION` are
/// turned into a population size.
fn population(width: f64, height: f64, count: f64) -> Result<usize, FlockError> {
    if count.is_finite() && count >= 1.0 && count.fract() == 0.0 && count <= MAX_POPULATION as f64 {
        Ok(count as usize)
    } else {
        Err(FlockError::InvalidDomain {
            width,
            height,
            count,
        })
    }
}

/// Flocking engine handle for the browser host.
///
/// Requests and snapshots cross the boundary as plain JS objects with the
/// camelCase layout of `boid_shared::UpdateRequest` and `boid_shared::Snapshot`.
#[wasm_bindgen]
pub struct BoidsEngine {
    engine: FlockEngine,
    timer: FrameTimer,
}

#[wasm_bindgen]
impl BoidsEngine {
    /// Creates an engine, seeded for reproducible runs when `seed` is given.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> BoidsEngine {
        logger::init(log::LevelFilter::Info);
        let engine = match seed {
            Some(seed) => FlockEngine::with_seed(u64::from(seed)),
            None => FlockEngine::new(),
        };
        BoidsEngine {
            engine,
            timer: FrameTimer::default(),
        }
    }

    pub fn init(&mut self, width: f64, height: f64, count: f64) -> Result<(), JsValue> {
        let count = population(width, height, count).map_err(to_js)?;
        self.engine.init(width, height, count).map_err(to_js)?;
        console_log!(
            "Boids online: {} boids in {}x{}",
            count,
            width,
            height
        );
        Ok(())
    }

    /// Advances one frame. `request` is `{timeStep, settings?, pointer?, debugBoids?}`.
    pub fn update(&mut self, request: &JsValue) -> Result<JsValue, JsValue> {
        let started = js_sys::Date::now();

        let request = js_sys::JSON::stringify(request)?
            .as_string()
            .ok_or_else(|| JsValue::from(js_sys::Error::new("update request must be an object")))?;
        let snapshot = json::update_json(&mut self.engine, &request).map_err(to_js)?;

        if let Some(average) = self.timer.record(js_sys::Date::now() - started) {
            log::info!("average engine time: {:.2}ms", average);
        }
        js_sys::JSON::parse(&snapshot)
    }

    #[wasm_bindgen(js_name = setDebugBoids)]
    pub fn set_debug_boids(&mut self, indices: Vec<u32>) -> Result<(), JsValue> {
        let indices = indices.into_iter().map(|i| i as usize).collect();
        self.engine.set_debug_indices(indices).map_err(to_js)
    }

    #[wasm_bindgen(js_name = boidCount)]
    pub fn boid_count(&self) -> usize {
        self.engine.boids().map_or(0, |boids| boids.len())
    }

    /// Current full settings.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        let settings = serde_json::to_string(self.engine.settings())
            .map_err(|e| to_js(FlockError::from(e)))?;
        js_sys::JSON::parse(&settings)
    }
}

thread_local! {
    static ENGINE: RefCell<Option<BoidsEngine>> = const { RefCell::new(None) };
}

/// Runs `f` on the global engine. Re-entrant calls are rejected rather than
/// allowed to mutate the population concurrently.
fn with_engine<T>(
    f: impl FnOnce(&mut Option<BoidsEngine>) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    ENGINE.with(|cell| {
        let mut engine = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from(js_sys::Error::new("boids engine is busy")))?;
        f(&mut engine)
    })
}

/// `initBoids(width, height, count)`: (re)creates the global population.
/// Settings from earlier frames carry over.
#[wasm_bindgen(js_name = initBoids)]
pub fn init_boids(width: f64, height: f64, count: f64) -> Result<(), JsValue> {
    with_engine(|slot| {
        let engine = slot.get_or_insert_with(|| BoidsEngine::new(None));
        engine.init(width, height, count)
    })
}

/// `updateBoids(request)`: advances the global engine by one frame.
#[wasm_bindgen(js_name = updateBoids)]
pub fn update_boids(request: JsValue) -> Result<JsValue, JsValue> {
    with_engine(|slot| match slot.as_mut() {
        Some(engine) => engine.update(&request),
        None => Err(to_js(FlockError::NotInitialized)),
    })
}
