use crate::grid::{Cell, Grid, Point};

use log::debug;
use rand::Rng;

/// Places an egg on a random empty cell and returns where it landed, or
/// `None` if no cell is empty.
///
/// Positions are resampled until an empty one turns up, which stays cheap
/// while the snake covers a small part of the board.
pub fn spawn_egg<R: Rng>(grid: &mut Grid, rng: &mut R) -> Option<Point> {
    if grid.count(Cell::Empty) == 0 {
        return None;
    }

    loop {
        let pos = Point::new(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()));
        if grid.cell_at(pos) == Cell::Empty {
            grid.set_cell(pos, Cell::Egg);
            debug!("egg spawned at {:?}", pos);
            return Some(pos);
        }
    }
}
