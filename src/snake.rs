use crate::error::{Error, SnakeFull};
use crate::grid::{Cell, Grid, Point};
use crate::ring::RingBuffer;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Next coordinate one step in `direction`, wrapping around the edges.
pub fn step_point(pos: Point, direction: Direction, rows: usize, cols: usize) -> Point {
    let (d_row, d_col) = match direction {
        Up => (-1, 0),
        Down => (1, 0),
        Left => (0, -1),
        Right => (0, 1),
    };

    Point::new(wrap(pos.row, d_row, rows), wrap(pos.col, d_col, cols))
}

fn wrap(value: usize, delta: isize, dimension: usize) -> usize {
    (value as isize + delta).rem_euclid(dimension as isize) as usize
}

/// The snake's points, oldest (tail) first, layered on top of a [`Grid`].
///
/// Every point in `body` is a `Body` or `Head` cell in the grid it was
/// spawned on, and only the newest one is `Head`.
pub struct Snake {
    body: RingBuffer<Point>,
    direction: Direction,
    last_move: Direction,
}

impl Snake {
    /// Lays out `length` cells in a straight line starting at `start` and
    /// heading in `direction`, the last one being the head.
    pub fn spawn(grid: &mut Grid, start: Point, direction: Direction, length: usize) -> Result<Self, SnakeFull> {
        let mut snake = Snake { body: RingBuffer::with_capacity(grid.capacity()), direction, last_move: direction };
        let mut pos = start;

        for _ in 1..length {
            snake.grow(grid, pos)?;
            grid.set_cell(pos, Cell::Body);
            pos = step_point(pos, direction, grid.rows(), grid.cols());
        }

        snake.grow(grid, pos)?;
        Ok(snake)
    }

    /// Adds `pos` as the new head. The previous head must already have been
    /// demoted to `Body` by the caller.
    pub fn grow(&mut self, grid: &mut Grid, pos: Point) -> Result<(), SnakeFull> {
        self.body.push_back(pos)?;
        grid.set_cell(pos, Cell::Head);
        Ok(())
    }

    /// Drops the tail and frees its cell.
    pub fn shrink(&mut self, grid: &mut Grid) -> Result<Point, Error> {
        let tail = self.body.pop_front().ok_or(Error::SnakeUnderflow)?;
        grid.set_cell(tail, Cell::Empty);
        Ok(tail)
    }

    /// Changes heading unless it would reverse into the neck.
    /// Returns whether the heading was accepted.
    ///
    /// The check is against the last completed move, not the pending
    /// heading, so several turns between two moves cannot add up to a
    /// reversal.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if self.len() > 1 && new_direction == self.last_move.reverse() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Records that the head just moved one cell along the current heading.
    pub fn finish_move(&mut self) {
        self.last_move = self.direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Option<Point> {
        self.body.back()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_full(&self) -> bool {
        self.body.is_full()
    }

    #[cfg(test)]
    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter()
    }
}
