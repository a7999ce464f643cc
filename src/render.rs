use crate::game::State;
use crate::grid::{Cell, Grid};

const EMPTY_CHAR: char = ' ';
const EGG_CHAR: char = 'O';
const HEAD_CHAR: char = '@';
const SNAKE_BODY_CHAR: char = '█';

pub fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_CHAR,
        Cell::Egg => EGG_CHAR,
        Cell::Head => HEAD_CHAR,
        Cell::Body => SNAKE_BODY_CHAR,
    }
}

pub fn intro() -> Vec<String> {
    [
        "h/j/k/l to move the snake",
        "p to pause or resume",
        "q to quit",
        "",
        "Press any key to start!",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

/// Full screen for one tick: the bordered board followed by the scores and
/// a status line. Each cell takes two columns so the board looks square.
pub fn frame(grid: &Grid, score: u32, high_score: u32, state: State) -> Vec<String> {
    let border = format!("+{}+", "-".repeat(grid.cols() * 2));
    let mut lines = Vec::with_capacity(grid.rows() + 5);

    lines.push(border.clone());
    for row in 0..grid.rows() {
        let cells: String = grid.row(row).iter().flat_map(|c| vec![glyph(*c), ' ']).collect();
        lines.push(format!("|{}|", cells));
    }
    lines.push(border);

    lines.push(format!("Score: {}", score));
    lines.push(format!("High Score: {}", high_score));
    lines.push(status_line(state).to_string());

    lines
}

fn status_line(state: State) -> &'static str {
    match state {
        State::Paused => "Paused, press p to resume",
        State::Lost => "You lost!",
        State::Won => "You won!",
        _ => "",
    }
}
