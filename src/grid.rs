/// State of a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Egg,
    Head,
    Body,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Point { row, col }
    }
}

/// Fixed-size board of cells, stored row-major.
///
/// The grid only caches occupancy: the snake and the egg spawner are the
/// only writers, and the non-empty cells always match the snake's points
/// plus at most one egg.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Grid { rows, cols, cells: vec![Cell::Empty; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Panics if `pos` lies outside the grid; callers wrap coordinates first.
    pub fn cell_at(&self, pos: Point) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Point, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Point) -> usize {
        assert!(
            pos.row < self.rows && pos.col < self.cols,
            "point {:?} outside {}x{} grid", pos, self.rows, self.cols
        );
        pos.row * self.cols + pos.col
    }
}
