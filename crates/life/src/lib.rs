//! Conway's Game of Life engine.

pub mod api;
pub mod cell;
pub mod config;
pub mod error;
pub mod playback;
#[cfg(not(target_arch = "wasm32"))]
pub mod player;
pub mod rules;
pub mod wasm;

use std::fmt;
use std::sync::Arc;

use api::NeighborApi;
use log::{debug, trace, warn};
use rand::Rng;

pub use cell::Cell;
pub use config::LifeConfig;
pub use error::LifeError;

/// Row-major 2D grid of cells. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid.
    ///
    /// # Errors
    /// `InvalidDimension` if either side is zero or does not fit in an `i32`,
    /// or if the cell buffer cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, LifeError> {
        let invalid = LifeError::InvalidDimension {
            width: width as i64,
            height: height as i64,
        };
        let max = i32::MAX as usize;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        if let Err(e) = cells.try_reserve_exact(len) {
            warn!("cannot allocate {width}x{height} grid: {e}");
            return Err(invalid);
        }
        cells.resize(len, Cell::Dead);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid with exactly the listed `(x, y)` cells alive.
    ///
    /// # Errors
    /// `InvalidDimension` as for [`Grid::new`], `OutOfBounds` for a listed cell outside the grid.
    pub fn from_alive(width: usize, height: usize, alive: &[(i32, i32)]) -> Result<Self, LifeError> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive)?;
        }
        Ok(grid)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> LifeError {
        LifeError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Toroidal read: coordinates are reduced modulo the grid size.
    #[must_use]
    pub fn get_wrapped(&self, x: i32, y: i32) -> Cell {
        let x = x.rem_euclid(self.width as i32) as usize;
        let y = y.rem_euclid(self.height as i32) as usize;
        self.cells[y * self.width + x]
    }

    /// # Errors
    /// `OutOfBounds` when `(x, y)` is outside the grid. The grid is left untouched.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), LifeError> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Number of alive cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// `(x, y)` of every alive cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| ((i % w) as i32, (i / w) as i32))
    }

    /// Alive cells among the eight neighbors of `(x, y)`.
    ///
    /// # Errors
    /// `OutOfBounds` when the center itself is outside the grid, even with `wrap` on.
    pub fn neighbor_count(&self, x: i32, y: i32, wrap: bool) -> Result<u8, LifeError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(NeighborApi::new(self, x, y, wrap).alive_neighbors())
    }

    /// Compute the next generation into a fresh grid.
    ///
    /// Every cell reads its neighbors from `self`, so the result does not depend on
    /// sweep order.
    #[must_use]
    pub fn step(&self, wrap: bool) -> Grid {
        let w = self.width as i32;
        let h = self.height as i32;
        let mut cells = Vec::with_capacity(self.cells.len());

        for y in 0..h {
            for x in 0..w {
                let api = NeighborApi::new(self, x, y, wrap);
                cells.push(rules::next_state(api.get(0, 0), api.alive_neighbors()));
            }
        }

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Owns the live grid and the wrap policy, and advances generations.
///
/// The grid is shared behind an `Arc`: snapshots handed out by [`GridEngine::grid`]
/// and [`GridEngine::advance_generation`] never observe later mutations.
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Arc<Grid>,
    wrap: bool,
    population: usize,
}

impl GridEngine {
    /// # Errors
    /// `InvalidDimension` when `width <= 0`, `height <= 0`, or the grid is too large to allocate.
    pub fn new(width: i32, height: i32, wrap: bool) -> Result<Self, LifeError> {
        if width <= 0 || height <= 0 {
            return Err(LifeError::InvalidDimension {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        let grid = Grid::new(width as usize, height as usize)?;
        debug!("created {width}x{height} engine, wrap={wrap}");
        Ok(Self {
            grid: Arc::new(grid),
            wrap,
            population: 0,
        })
    }

    /// Empty engine sized and wrapped as configured.
    ///
    /// # Errors
    /// Whatever [`LifeConfig::validate`] rejects.
    pub fn from_config(config: &LifeConfig) -> Result<Self, LifeError> {
        config.validate()?;
        Self::new(config.width, config.height, config.wrap)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    #[must_use]
    pub fn wrap_mode(&self) -> bool {
        self.wrap
    }

    /// Only affects future neighbor counts. Stored cells are untouched.
    pub fn set_wrap_mode(&mut self, enabled: bool) {
        self.wrap = enabled;
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    /// Snapshot of the current generation.
    #[must_use]
    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    /// Row-major view of the live cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.grid.cells
    }

    /// # Errors
    /// `OutOfBounds` when `(x, y)` is outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Result<Cell, LifeError> {
        self.grid
            .get(x, y)
            .ok_or_else(|| self.grid.out_of_bounds(x, y))
    }

    /// Independently set each cell alive with probability `probability`.
    /// Returns the new population.
    ///
    /// # Errors
    /// `InvalidProbability` for NaN or values outside `[0, 1]`; the grid is unchanged.
    pub fn randomize<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<usize, LifeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        let grid = Arc::make_mut(&mut self.grid);
        for cell in &mut grid.cells {
            *cell = Cell::from(rng.gen_bool(probability));
        }
        self.population = grid.population();
        debug!(
            "randomized with p={probability}, population={}",
            self.population
        );
        Ok(self.population)
    }

    pub fn clear(&mut self) {
        let grid = Arc::make_mut(&mut self.grid);
        grid.cells.fill(Cell::Dead);
        self.population = 0;
        debug!("cleared");
    }

    /// Flip one cell and return its new state.
    ///
    /// # Errors
    /// `OutOfBounds` when `(x, y)` is outside the grid; nothing is mutated.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<Cell, LifeError> {
        let i = self
            .grid
            .index(x, y)
            .ok_or_else(|| self.grid.out_of_bounds(x, y))?;
        let grid = Arc::make_mut(&mut self.grid);
        let next = grid.cells[i].toggled();
        grid.cells[i] = next;
        if next.is_alive() {
            self.population += 1;
        } else {
            self.population -= 1;
        }
        Ok(next)
    }

    /// # Errors
    /// `OutOfBounds` when `(x, y)` is outside the grid.
    pub fn neighbor_count(&self, x: i32, y: i32) -> Result<u8, LifeError> {
        self.grid.neighbor_count(x, y, self.wrap)
    }

    /// Replace the live grid with the next generation and return it with its population.
    pub fn advance_generation(&mut self) -> (Arc<Grid>, usize) {
        let next = self.grid.step(self.wrap);
        self.population = next.population();
        self.grid = Arc::new(next);
        trace!("advanced, population={}", self.population);
        (Arc::clone(&self.grid), self.population)
    }
}
