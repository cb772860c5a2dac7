//! Browser surface: a `Universe` the JS renderer and control panel drive.
//!
//! The renderer reads `cells_ptr()` straight out of WASM memory (one byte per
//! cell, row-major, `1` = alive) and calls `tick()` from its animation timer
//! every `interval_ms()`. Every control goes through [`Playback::apply`].

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::config::LifeConfig;
use crate::playback::{Command, Outcome, Playback};
use crate::GridEngine;

/// Install the panic hook and route `log` to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Map a pointer position on a `canvas_w × canvas_h` canvas to a cell of a
/// `width × height` grid. `None` outside the canvas.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn cell_at_point(
    px: f64,
    py: f64,
    canvas_w: f64,
    canvas_h: f64,
    width: usize,
    height: usize,
) -> Option<(i32, i32)> {
    let inside = px >= 0.0 && py >= 0.0 && px < canvas_w && py < canvas_h;
    if !inside || width == 0 || height == 0 {
        return None;
    }
    let x = ((px / canvas_w * width as f64).floor() as usize).min(width - 1);
    let y = ((py / canvas_h * height as f64).floor() as usize).min(height - 1);
    Some((x as i32, y as i32))
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    engine: GridEngine,
    playback: Playback,
    rng: StdRng,
    fill_probability: f64,
}

#[wasm_bindgen]
impl Universe {
    /// Empty universe with default playback speed and fill probability.
    ///
    /// # Errors
    /// Non-positive dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: i32, height: i32, wrap: bool, seed: u32) -> Result<Universe, JsError> {
        let config = LifeConfig {
            width,
            height,
            wrap,
            seed: Some(u64::from(seed)),
            ..LifeConfig::default()
        };
        Ok(Self::with_config(&config)?)
    }

    /// Universe from a JSON [`LifeConfig`], randomized at its fill probability.
    ///
    /// # Errors
    /// Malformed JSON or an invalid field.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<Universe, JsError> {
        let config = LifeConfig::from_json(json)?;
        let mut universe = Self::with_config(&config)?;
        universe.randomize_default()?;
        Ok(universe)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.engine.width() as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.engine.height() as u32
    }

    /// Pointer to `width * height` row-major cell bytes. Invalidated by the next mutation.
    #[must_use]
    pub fn cells_ptr(&self) -> *const u8 {
        self.engine.cells().as_ptr().cast::<u8>()
    }

    #[must_use]
    pub fn population(&self) -> u32 {
        self.engine.population() as u32
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        u32::try_from(self.playback.generation()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn running(&self) -> bool {
        self.playback.running()
    }

    #[wasm_bindgen(js_name = intervalMs)]
    #[must_use]
    pub fn interval_ms(&self) -> u32 {
        u32::try_from(self.playback.interval().as_millis()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = wrapMode)]
    #[must_use]
    pub fn wrap_mode(&self) -> bool {
        self.engine.wrap_mode()
    }

    /// Timer callback. Advances only while started; returns whether it did.
    pub fn tick(&mut self) -> bool {
        self.playback.tick(&mut self.engine).is_some()
    }

    pub fn start(&mut self) {
        self.dispatch(Command::Start);
    }

    pub fn stop(&mut self) {
        self.dispatch(Command::Stop);
    }

    /// Single step. Ignored while running.
    pub fn step(&mut self) -> bool {
        matches!(self.dispatch(Command::Step), Outcome::Advanced { .. })
    }

    pub fn clear(&mut self) {
        self.dispatch(Command::Clear);
    }

    /// # Errors
    /// Probability outside `[0, 1]`.
    pub fn randomize(&mut self, probability: f64) -> Result<(), JsError> {
        self.playback
            .apply(Command::Randomize(probability), &mut self.engine, &mut self.rng)?;
        Ok(())
    }

    /// Randomize at the configured fill probability.
    ///
    /// # Errors
    /// Never in practice; the probability was validated at construction.
    #[wasm_bindgen(js_name = randomizeDefault)]
    pub fn randomize_default(&mut self) -> Result<(), JsError> {
        self.randomize(self.fill_probability)
    }

    #[wasm_bindgen(js_name = setWrapMode)]
    pub fn set_wrap_mode(&mut self, enabled: bool) {
        self.dispatch(Command::SetWrapMode(enabled));
    }

    /// # Errors
    /// Zero interval.
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, ms: u32) -> Result<(), JsError> {
        self.playback
            .apply(Command::SetSpeed(u64::from(ms)), &mut self.engine, &mut self.rng)?;
        Ok(())
    }

    /// Flip one cell and return whether it is now alive.
    ///
    /// # Errors
    /// Coordinates outside the grid.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<bool, JsError> {
        self.playback
            .apply(Command::Toggle { x, y }, &mut self.engine, &mut self.rng)?;
        Ok(self.engine.cell(x, y)?.is_alive())
    }

    /// Toggle the cell under a pointer. Returns `false` when the pointer is off the canvas.
    #[wasm_bindgen(js_name = toggleAt)]
    pub fn toggle_at(&mut self, px: f64, py: f64, canvas_w: f64, canvas_h: f64) -> bool {
        let Some((x, y)) = cell_at_point(
            px,
            py,
            canvas_w,
            canvas_h,
            self.engine.width(),
            self.engine.height(),
        ) else {
            return false;
        };
        self.dispatch(Command::Toggle { x, y });
        true
    }
}

impl Universe {
    fn with_config(config: &LifeConfig) -> Result<Self, crate::LifeError> {
        let engine = GridEngine::from_config(config)?;
        Ok(Self {
            engine,
            playback: Playback::from_config(config),
            rng: config
                .seed
                .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            fill_probability: config.fill_probability,
        })
    }

    /// For commands whose arguments cannot be invalid.
    fn dispatch(&mut self, command: Command) -> Outcome {
        self.playback
            .apply(command, &mut self.engine, &mut self.rng)
            .unwrap_or_else(|e| {
                warn!("{command:?} rejected: {e}");
                Outcome::Ignored
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn universe(width: i32, height: i32) -> Universe {
        let Ok(universe) = Universe::new(width, height, false, 17) else {
            panic!("valid dimensions");
        };
        universe
    }

    #[test]
    fn cells_ptr_exposes_row_major_bytes() {
        let mut u = universe(4, 3);
        u.toggle_at(1.5, 2.5, 4.0, 3.0);
        let bytes = unsafe { std::slice::from_raw_parts(u.cells_ptr(), 12) };
        assert_eq!(bytes[2 * 4 + 1], 1);
        assert_eq!(bytes.iter().map(|&b| u32::from(b)).sum::<u32>(), 1);
        assert_eq!(u.population(), 1);
    }

    #[test]
    fn tick_waits_for_start() {
        let mut u = universe(5, 5);
        for x in 1..=3 {
            u.toggle_at(f64::from(x) + 0.5, 2.5, 5.0, 5.0);
        }
        assert!(!u.tick());
        assert!(u.step());
        assert_eq!(u.generation(), 1);

        u.start();
        assert!(u.running());
        assert!(!u.step());
        assert!(u.tick());
        assert!(u.tick());
        assert_eq!(u.generation(), 3);
        assert_eq!(u.population(), 3);

        u.stop();
        assert!(!u.tick());
        u.clear();
        assert_eq!((u.population(), u.generation()), (0, 0));
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut u = universe(4, 4);
        assert!(matches!(u.toggle(2, 3), Ok(true)));
        assert!(matches!(u.toggle(2, 3), Ok(false)));
        assert!(matches!(u.toggle(0, 0), Ok(true)));
        assert_eq!(u.population(), 1);
    }

    #[test]
    fn config_without_seed_is_randomized() {
        let Ok(u) = Universe::from_config(r#"{"width": 6, "height": 5, "fillProbability": 1.0}"#)
        else {
            panic!("valid config");
        };
        assert_eq!(u.population(), 30);
        assert!(u.wrap_mode());
    }

    #[test]
    fn wrap_mode_is_forwarded() {
        let mut u = universe(3, 3);
        assert!(!u.wrap_mode());
        u.set_wrap_mode(true);
        assert!(u.wrap_mode());
        assert_eq!(u.interval_ms(), 100);
    }

    #[test]
    fn pointer_outside_canvas_hits_nothing() {
        assert_eq!(cell_at_point(-0.1, 5.0, 100.0, 100.0, 10, 10), None);
        assert_eq!(cell_at_point(5.0, 100.0, 100.0, 100.0, 10, 10), None);
        assert_eq!(cell_at_point(f64::NAN, 5.0, 100.0, 100.0, 10, 10), None);
        assert_eq!(cell_at_point(0.0, 0.0, 100.0, 100.0, 10, 10), Some((0, 0)));
        assert_eq!(cell_at_point(99.9, 45.0, 100.0, 100.0, 10, 10), Some((9, 4)));

        let mut u = universe(10, 10);
        assert!(!u.toggle_at(150.0, 1.0, 100.0, 100.0));
        assert_eq!(u.population(), 0);
    }

    proptest! {
        #[test]
        fn prop_pointer_maps_inside_grid(
            fx in 0.0f64..0.999,
            fy in 0.0f64..0.999,
            canvas_w in 1.0f64..2000.0,
            canvas_h in 1.0f64..2000.0,
            width in 1usize..300,
            height in 1usize..300,
        ) {
            let (x, y) = cell_at_point(fx * canvas_w, fy * canvas_h, canvas_w, canvas_h, width, height)
                .expect("point lies on the canvas");
            prop_assert!((0..width as i32).contains(&x));
            prop_assert!((0..height as i32).contains(&y));
        }
    }
}
