use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};

use crate::grid::{Cell, Grid, ALIVE};

/// Name of the catalog entry that requests random seeding.
pub const RANDOM: &str = "random";

/// Default pattern file, looked up in the working directory.
pub const DEFAULT_PATTERN_FILE: &str = "patterns.json";

/// Live-cell offsets `(x, y)` relative to a pattern-local origin.
pub type PatternDefinition = Vec<(i32, i32)>;

/// Quarter-turn rotation applied to a pattern before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rounds any angle to the nearest multiple of 90 (ties to even, as
    /// banker's rounding does) and reduces it into `[0, 360)`.
    pub fn from_degrees(degrees: i64) -> Self {
        let quarters = (degrees as f64 / 90.0).round_ties_even() as i64;
        match quarters.rem_euclid(4) {
            1 => Rotation::R90,
            2 => Rotation::R180,
            3 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    #[inline]
    pub fn apply(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (-y, x),
            Rotation::R180 => (-x, -y),
            Rotation::R270 => (y, -x),
        }
    }
}

/// Ordered mapping from lowercase pattern name to its definition.
///
/// Always contains the [`RANDOM`] sentinel with no coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCatalog {
    entries: Vec<(String, PatternDefinition)>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self {
            entries: vec![(RANDOM.to_string(), Vec::new())],
        }
    }
}

impl PatternCatalog {
    /// Loads the catalog from a JSON file. A missing or malformed file yields
    /// the default catalog holding only the random sentinel.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => match Self::from_json_str(&text) {
                Ok(catalog) => {
                    log::info!(
                        "Loaded {} patterns from {}",
                        catalog.len() - 1,
                        path.display()
                    );
                    catalog
                }
                Err(e) => {
                    log::warn!("Ignoring malformed pattern file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No pattern file at {}, only random seeding available", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read pattern file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses `{ "name": [[x, y], ...], ... }`, keeping file order.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(text)?;
        let mut catalog = Self { entries: Vec::with_capacity(raw.len() + 1) };

        for (name, value) in raw {
            match serde_json::from_value::<PatternDefinition>(value) {
                Ok(cells) => catalog.insert(name, cells),
                Err(e) => log::warn!("Skipping pattern {:?}: {}", name, e),
            }
        }
        // Sentinel keeps its file position if present, otherwise goes last
        catalog.insert(RANDOM.to_string(), Vec::new());

        Ok(catalog)
    }

    fn insert(&mut self, name: String, cells: PatternDefinition) {
        let name = name.to_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = cells,
            None => self.entries.push((name, cells)),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&PatternDefinition> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, cells)| cells)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Rotates every offset about the pattern origin.
pub fn rotate(cells: &[(i32, i32)], rotation: Rotation) -> PatternDefinition {
    cells.iter().map(|&c| rotation.apply(c)).collect()
}

/// Grid-space translation `(offset_x, offset_y)` that puts the bounding-box
/// center of `cells` on the grid center. `None` for an empty pattern.
pub fn centering_offset(cells: &[(i32, i32)], width: usize, height: usize) -> Option<(i64, i64)> {
    let min_x = cells.iter().map(|&(x, _)| x).min()? as i64;
    let max_x = cells.iter().map(|&(x, _)| x).max()? as i64;
    let min_y = cells.iter().map(|&(_, y)| y).min()? as i64;
    let max_y = cells.iter().map(|&(_, y)| y).max()? as i64;

    let center_x = (max_x + min_x).div_euclid(2);
    let center_y = (max_y + min_y).div_euclid(2);

    Some((
        (width / 2) as i64 - center_x,
        (height / 2) as i64 - center_y,
    ))
}

/// Rotates `cells`, centers them on `grid` and marks each in-bounds cell
/// alive. Cells falling outside the grid are dropped.
///
/// Returns the number of cells placed, or `None` if `cells` is empty.
pub fn place_pattern(grid: &mut Grid<Cell>, cells: &[(i32, i32)], rotation: Rotation) -> Option<usize> {
    let (height, width) = grid.dimensions();
    let rotated = rotate(cells, rotation);
    let (offset_x, offset_y) = centering_offset(&rotated, width, height)?;

    let mut placed = 0;
    for (x, y) in rotated {
        let col = x as i64 + offset_x;
        let row = y as i64 + offset_y;
        if (0..width as i64).contains(&col) && (0..height as i64).contains(&row) {
            grid.set(row as usize, col as usize, ALIVE);
            placed += 1;
        }
    }

    Some(placed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER_JSON: &str = r#"{"glider": [[0, 1], [1, 2], [2, 0], [2, 1], [2, 2]]}"#;

    fn glider() -> PatternDefinition {
        vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Rotation::R0);
        assert_eq!(Rotation::from_degrees(90), Rotation::R90);
        assert_eq!(Rotation::from_degrees(100), Rotation::R90);
        assert_eq!(Rotation::from_degrees(-90), Rotation::R270);
        assert_eq!(Rotation::from_degrees(450), Rotation::R90);
        assert_eq!(Rotation::from_degrees(360), Rotation::R0);
        // Ties round to the even quarter count
        assert_eq!(Rotation::from_degrees(45), Rotation::R0);
        assert_eq!(Rotation::from_degrees(135), Rotation::R180);
        assert_eq!(Rotation::from_degrees(-45), Rotation::R0);
    }

    #[test]
    fn test_rotation_from_extreme_degrees() {
        // 360 * 2^40 + 180 is exact in f64
        let big = 360 * (1i64 << 40) + 180;
        assert_eq!(Rotation::from_degrees(big), Rotation::R180);
        assert_eq!(Rotation::from_degrees(-big), Rotation::R180);
        for degrees in [i64::MAX, i64::MIN, i64::MAX - 45, i64::MIN + 1] {
            assert_eq!(Rotation::from_degrees(degrees).degrees() % 90, 0);
        }
    }

    #[test]
    fn test_rotation_transforms() {
        assert_eq!(Rotation::R0.apply((2, 1)), (2, 1));
        assert_eq!(Rotation::R90.apply((2, 1)), (-1, 2));
        assert_eq!(Rotation::R180.apply((2, 1)), (-2, -1));
        assert_eq!(Rotation::R270.apply((2, 1)), (1, -2));
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        let mut cells = glider();
        for _ in 0..4 {
            cells = rotate(&cells, Rotation::R90);
        }
        assert_eq!(cells, glider());
    }

    #[test]
    fn test_centering_uses_floor_division() {
        // x spans -3..=0 -> (0 + -3) floor 2 = -2
        let offset = centering_offset(&[(-3, 0), (0, 0)], 10, 10).unwrap();
        assert_eq!(offset, (5 - -2, 5));
        assert_eq!(centering_offset(&[], 10, 10), None);
    }

    #[test]
    fn test_place_glider_centered() {
        let mut grid = Grid::new(10, 10);
        let placed = place_pattern(&mut grid, &glider(), Rotation::R0);
        assert_eq!(placed, Some(5));
        // center (1, 1) lands on (5, 5), so (x, y) -> (row y + 4, col x + 4)
        assert!(grid.is_alive(5, 4));
        assert!(grid.is_alive(6, 5));
        assert!(grid.is_alive(4, 6));
        assert!(grid.is_alive(5, 6));
        assert!(grid.is_alive(6, 6));
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_rotation_changes_geometry() {
        let mut plain = Grid::new(20, 20);
        let mut turned = Grid::new(20, 20);
        place_pattern(&mut plain, &glider(), Rotation::R0);
        place_pattern(&mut turned, &glider(), Rotation::R90);
        assert_eq!(plain.population(), turned.population());
        assert_ne!(plain, turned);
    }

    #[test]
    fn test_out_of_bounds_cells_are_dropped() {
        // 30 wide line on a 10 wide grid
        let line: PatternDefinition = (0..30).map(|x| (x, 0)).collect();
        let mut grid = Grid::new(10, 10);
        let placed = place_pattern(&mut grid, &line, Rotation::R0).unwrap();
        assert_eq!(placed, 10);
        assert_eq!(grid.population(), 10);
        // Nothing wrapped onto another row
        assert!((0..10).all(|col| grid.is_alive(5, col)));
    }

    #[test]
    fn test_empty_pattern_is_not_placed() {
        let mut grid = Grid::new(10, 10);
        assert_eq!(place_pattern(&mut grid, &[], Rotation::R90), None);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_shipped_patterns_fit_their_bounding_box() {
        let catalog = PatternCatalog::from_json_str(include_str!("../../patterns.json")).unwrap();
        assert_eq!(catalog.get("spaceship").map(Vec::len), Some(9));

        for name in catalog.names().filter(|&n| n != RANDOM) {
            let cells = catalog.get(name).unwrap();
            for rotation in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
                let rotated = rotate(cells, rotation);
                let span = |axis: fn(&(i32, i32)) -> i32| {
                    let lo = rotated.iter().map(axis).min().unwrap();
                    let hi = rotated.iter().map(axis).max().unwrap();
                    (hi - lo + 1) as usize
                };
                let (w, h) = (span(|c| c.0), span(|c| c.1));

                let mut exact = Grid::new(w, h);
                assert!(place_pattern(&mut exact, cells, rotation).unwrap() > 0, "{name}");

                // One spare row and column always holds the whole pattern
                let mut roomy = Grid::new(w + 1, h + 1);
                assert_eq!(place_pattern(&mut roomy, cells, rotation), Some(cells.len()), "{name}");
            }
        }
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = PatternCatalog::from_json_str(GLIDER_JSON).unwrap();
        assert_eq!(catalog.get("glider"), Some(&glider()));
        assert_eq!(catalog.get("GLIDER"), Some(&glider()));
        assert_eq!(catalog.get(RANDOM), Some(&Vec::new()));
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["glider", "random"]);
    }

    #[test]
    fn test_catalog_keeps_file_order_and_lowercases() {
        let json = r#"{"Toad": [[0, 0]], "blinker": [[0, 0], [0, 1]], "RANDOM": [[4, 4]], "acorn": [[1, 1]]}"#;
        let catalog = PatternCatalog::from_json_str(json).unwrap();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            ["toad", "blinker", "random", "acorn"]
        );
        assert!(catalog.get("random").unwrap().is_empty());
    }

    #[test]
    fn test_catalog_skips_bad_entries() {
        let json = r#"{"glider": [[0, 1], [1, 2], [2, 0], [2, 1], [2, 2]], "bad": "nope"}"#;
        let catalog = PatternCatalog::from_json_str(json).unwrap();
        assert!(catalog.get("bad").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_catalog_malformed_json_is_error() {
        assert!(PatternCatalog::from_json_str("[1, 2, 3]").is_err());
        assert!(PatternCatalog::from_json_str("{").is_err());
    }

    #[test]
    fn test_catalog_load_missing_file() {
        let catalog = PatternCatalog::load("/nonexistent/dir/patterns.json");
        assert_eq!(catalog, PatternCatalog::default());
        assert_eq!(catalog.names().collect::<Vec<_>>(), [RANDOM]);
    }

    #[test]
    fn test_catalog_load_file() {
        let path = std::env::temp_dir().join(format!("torus_life_patterns_{}.json", std::process::id()));
        fs::write(&path, GLIDER_JSON).unwrap();
        let catalog = PatternCatalog::load(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(catalog.get("glider"), Some(&glider()));

        let bad = std::env::temp_dir().join(format!("torus_life_bad_{}.json", std::process::id()));
        fs::write(&bad, "not json").unwrap();
        let catalog = PatternCatalog::load(&bad);
        fs::remove_file(&bad).unwrap();
        assert_eq!(catalog, PatternCatalog::default());
    }
}
