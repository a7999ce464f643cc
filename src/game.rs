use std::{thread::sleep, time::Duration};

use crate::egg::spawn_egg;
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, Point};
use crate::highscore::HighScoreStore;
use crate::render;
use crate::snake::{step_point, Direction::{self, *}, Snake};
use crate::term::Console;

use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

pub const ROWS: usize = 20;
pub const COLS: usize = 20;
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);

const INITIAL_SNAKE_LENGTH: usize = 1;
const INITIAL_DIRECTION: Direction = Left;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    AwaitingStart,
    Running,
    Paused,
    Lost,
    Won,
    QuitRequested,
}

impl State {
    pub fn is_over(self) -> bool {
        matches!(self, State::Lost | State::Won | State::QuitRequested)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
}

/// The whole game: board, snake, score and the state machine driving them.
pub struct Game<R = ThreadRng> {
    grid: Grid,
    snake: Snake,
    state: State,
    score: u32,
    high_score: u32,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(high_score: u32) -> Result<Self> {
        Game::with_rng(ROWS, COLS, high_score, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Board of `rows` x `cols` with the snake in the middle heading left and
    /// one egg placed, waiting for the first key.
    pub fn with_rng(rows: usize, cols: usize, high_score: u32, mut rng: R) -> Result<Self> {
        let mut grid = Grid::new(rows, cols);
        let center = Point::new(rows / 2, cols / 2);
        let snake = Snake::spawn(&mut grid, center, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH)?;
        spawn_egg(&mut grid, &mut rng);

        Ok(Game { grid, snake, state: State::AwaitingStart, score: 0, high_score, rng })
    }

    /// Leaves the start gate. A quit key ends the game before it begins,
    /// anything else starts it.
    pub fn start(&mut self, first_key: Option<Command>) {
        if self.state != State::AwaitingStart {
            return;
        }

        self.state = if first_key == Some(Command::Quit) {
            State::QuitRequested
        } else {
            State::Running
        };
        info!("game started: {:?}", self.state);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.state = State::QuitRequested,
            Command::TogglePause => {
                self.state = match self.state {
                    State::Running => State::Paused,
                    State::Paused => State::Running,
                    other => other,
                };
                debug!("pause toggled: {:?}", self.state);
            }
            Command::Turn(dir) => {
                if matches!(self.state, State::Running | State::Paused) && !self.snake.set_direction(dir) {
                    debug!("ignored reverse turn to {:?}", dir);
                }
            }
        }
    }

    /// Advances the snake one cell. Does nothing unless the game is running.
    pub fn tick(&mut self) -> Result<()> {
        if self.state != State::Running {
            return Ok(());
        }

        let head = self.snake.head().ok_or(Error::SnakeUnderflow)?;
        // Demote first so the new head sees the old body, tail included
        self.grid.set_cell(head, Cell::Body);
        let next = step_point(head, self.snake.direction(), self.grid.rows(), self.grid.cols());

        let ate = match self.grid.cell_at(next) {
            Cell::Body => {
                info!("snake ran into itself at {:?}, score {}", next, self.score);
                self.grid.set_cell(head, Cell::Head);
                self.state = State::Lost;
                return Ok(());
            }
            Cell::Egg => true,
            Cell::Empty | Cell::Head => {
                self.snake.shrink(&mut self.grid)?;
                false
            }
        };

        if ate {
            self.score += 1;
            debug!("ate egg at {:?}, score {}", next, self.score);
        }

        let grown = self.snake.grow(&mut self.grid, next);
        self.snake.finish_move();

        if grown.is_err() || self.snake.is_full() {
            info!("snake fills the board, score {}", self.score);
            self.state = State::Won;
            return Ok(());
        }

        if ate && spawn_egg(&mut self.grid, &mut self.rng).is_none() {
            self.state = State::Won;
        }

        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}

/// Runs the game until it is lost, won or quit.
///
/// Each round reads at most one pending command, applies it, ticks, redraws
/// and then sleeps for `interval`.
pub fn play<C: Console, R: Rng>(console: &mut C, game: &mut Game<R>, interval: Duration) -> Result<()> {
    console.present(&render::intro())?;
    let first_key = console.wait_command()?;
    game.start(first_key);

    if !game.state().is_over() {
        draw(console, game)?;
    }

    while !game.state().is_over() {
        if let Some(command) = console.poll_command()? {
            game.apply(command);
        }

        game.tick()?;
        draw(console, game)?;

        if !game.state().is_over() {
            sleep(interval);
        }
    }

    info!("game over: {:?} with score {}", game.state(), game.score());
    Ok(())
}

/// Plays one game, then saves the score and hands the terminal back
/// whatever way the game ended, errors included.
pub fn run_session<C: Console, R: Rng>(
    console: &mut C,
    game: &mut Game<R>,
    store: &mut HighScoreStore,
    interval: Duration,
) -> Result<()> {
    let played = play(console, game, interval);

    info!("final snake length {}", game.snake().len());
    let saved = store.record(game.score());
    let restored = console.restore();

    played?;
    saved?;
    restored?;
    Ok(())
}

fn draw<C: Console, R: Rng>(console: &mut C, game: &Game<R>) -> Result<()> {
    console.present(&render::frame(game.grid(), game.score(), game.high_score(), game.state()))
}
