use rand::Rng;

use crate::config::SimulationConfig;
use crate::grid::{Cell, Grid, ALIVE, DEAD};
use crate::rules::patterns::{place_pattern, PatternCatalog, PatternDefinition, RANDOM};
use crate::rules::{apply_rules, count_neighbors};

/// Why random seeding was chosen over pattern placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomReason {
    /// No pattern was requested.
    NotRequested,
    /// The "random" sentinel was requested explicitly.
    Requested,
    /// The requested name is not in the catalog.
    UnknownPattern,
    /// The catalog entry has no cells.
    EmptyPattern,
}

/// How the initial grid is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedPolicy<'a> {
    Pattern(&'a str, &'a PatternDefinition),
    Random(RandomReason),
}

impl<'a> SeedPolicy<'a> {
    /// Resolves a requested pattern name against the catalog. Anything that
    /// does not name a non-empty, non-sentinel entry falls back to random.
    pub fn resolve(pattern: Option<&'a str>, catalog: &'a PatternCatalog) -> Self {
        let Some(name) = pattern else {
            return SeedPolicy::Random(RandomReason::NotRequested);
        };
        if name.eq_ignore_ascii_case(RANDOM) {
            return SeedPolicy::Random(RandomReason::Requested);
        }
        match catalog.get(name) {
            Some(cells) if cells.is_empty() => SeedPolicy::Random(RandomReason::EmptyPattern),
            Some(cells) => SeedPolicy::Pattern(name, cells),
            None => SeedPolicy::Random(RandomReason::UnknownPattern),
        }
    }
}

/// Fills the middle third of the grid (both axes) with coin-flip cells.
/// Every cell outside that block stays dead.
pub fn seed_random<R: Rng + ?Sized>(grid: &mut Grid<Cell>, rng: &mut R) {
    let (height, width) = grid.dimensions();
    for row in height / 3..2 * height / 3 {
        for col in width / 3..2 * width / 3 {
            let cell = if rng.gen_bool(0.5) { ALIVE } else { DEAD };
            grid.set(row, col, cell);
        }
    }
}

/// Owns the cell grid and advances it one generation at a time.
pub struct GridEngine {
    config: SimulationConfig,
    grid: Grid<Cell>,
    neighbors: Grid<u8>,
    generation: u64,
}

impl GridEngine {
    /// Creates and seeds an engine using the thread-local RNG.
    pub fn new(config: SimulationConfig, catalog: &PatternCatalog) -> Self {
        Self::with_rng(config, catalog, &mut rand::thread_rng())
    }

    /// Creates and seeds an engine from the given random source.
    pub fn with_rng<R: Rng + ?Sized>(
        config: SimulationConfig,
        catalog: &PatternCatalog,
        rng: &mut R,
    ) -> Self {
        let (width, height) = (config.width(), config.height());
        let mut engine = Self {
            grid: Grid::new(width, height),
            neighbors: Grid::new(width, height),
            generation: 0,
            config,
        };
        engine.seed(catalog, rng);
        engine
    }

    fn seed<R: Rng + ?Sized>(&mut self, catalog: &PatternCatalog, rng: &mut R) {
        match SeedPolicy::resolve(self.config.pattern(), catalog) {
            SeedPolicy::Pattern(name, cells) => {
                let rotation = self.config.rotation();
                // resolve() never hands out an empty definition
                let placed = place_pattern(&mut self.grid, cells, rotation).unwrap_or(0);
                log::info!(
                    "Seeded pattern {:?} rotated {} degrees ({} of {} cells in bounds)",
                    name,
                    rotation.degrees(),
                    placed,
                    cells.len()
                );
            }
            SeedPolicy::Random(reason) => {
                if reason == RandomReason::UnknownPattern {
                    log::warn!(
                        "Unknown pattern {:?}, falling back to random seeding",
                        self.config.pattern().unwrap_or_default()
                    );
                }
                seed_random(&mut self.grid, rng);
                log::info!("Seeded randomly ({:?}), {} cells alive", reason, self.grid.population());
            }
        }
        self.neighbors = count_neighbors(&self.grid);
    }

    /// Runs one generation: recount neighbors from the current grid, then
    /// replace the grid with the rule output. Returns the new population.
    pub fn advance(&mut self) -> usize {
        self.neighbors = count_neighbors(&self.grid);
        self.grid = apply_rules(&self.grid, &self.neighbors);
        self.generation += 1;

        let population = self.grid.population();
        log::debug!("Generation {}: {} alive", self.generation, population);
        population
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Neighbor counts of the grid the last generation was computed from.
    #[cfg(test)]
    pub fn neighbors(&self) -> &Grid<u8> {
        &self.neighbors
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }
}
