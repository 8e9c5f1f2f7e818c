use crate::error::GridError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Solid,
}

/// Immutable occupancy map, indexed `(x, y)` with `y` growing downwards.
#[derive(Clone, PartialEq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of cells. Every row must have the same non-zero length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        if height == 0 {
            return Err(GridError::NoRows);
        }

        let width = rows[0].len();
        if width == 0 {
            return Err(GridError::NoColumns);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from 0/1 rows; any non-zero value is solid.
    pub fn from_bits<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        Self::new(
            rows.iter()
                .map(|row| {
                    row.as_ref()
                        .iter()
                        .map(|&bit| if bit > 0 { Cell::Solid } else { Cell::Empty })
                        .collect()
                })
                .collect(),
        )
    }

    /// Solid border, empty interior.
    pub fn bordered(width: usize, height: usize) -> Result<Self, GridError> {
        Self::new(
            (0..height)
                .map(|y| {
                    (0..width)
                        .map(|x| {
                            if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                                Cell::Solid
                            } else {
                                Cell::Empty
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Checked lookup.
    pub fn get(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Whether the cell is occupied.
    ///
    /// Callers must bounds-check first (see [`Grid::cell_at`]); an out-of-bounds
    /// index is a contract violation and panics.
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[y * self.width + x] == Cell::Solid
    }

    /// Floor a continuous position to the cell containing it, if that cell is on the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (x, y) = (x.floor(), y.floor());
        // NaN fails both comparisons
        if x >= 0. && y >= 0. && x < self.width as f64 && y < self.height as f64 {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Length of the grid's diagonal, the furthest any in-grid hit can be.
    pub fn diagonal(&self) -> f64 {
        (self.width as f64).hypot(self.height as f64)
    }

    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| ((idx % self.width, idx / self.width), *cell))
    }
}
