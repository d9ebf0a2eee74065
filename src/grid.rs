/// Row-major 2D grid used for both cell states and neighbor counts.
///
/// Indexed `(row, col)` with `row < height` and `col < width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

/// Cell state: 0 is dead, 1 is alive.
pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::default(); width * height],
            width,
            height,
        }
    }

    /// Builds a grid from nested rows. All rows must have the same length.
    #[cfg(test)]
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(rows.iter().all(|r| r.len() == width), "ragged rows");
        Self {
            data: rows.iter().flatten().copied().collect(),
            width,
            height,
        }
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let i = self.idx(row, col);
        self.data[i] = value;
    }
}

impl<T> Grid<T> {
    /// `(height, width)`, i.e. rows by columns.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0
        self.data.chunks_exact(self.width.max(1))
    }
}

impl Grid<Cell> {
    #[cfg(test)]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == ALIVE
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.data.iter().filter(|&&c| c == ALIVE).count()
    }
}

/// Wraps a signed coordinate onto `[0, len)`.
#[inline]
pub fn wrap(v: isize, len: usize) -> usize {
    v.rem_euclid(len as isize) as usize
}
