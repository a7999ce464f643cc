mod egg;
mod error;
mod game;
mod grid;
mod highscore;
mod render;
mod ring;
mod snake;
mod term;

use std::{fs::File, process::exit};

use crate::error::Result;
use crate::game::{Game, State, TICK_INTERVAL};
use crate::highscore::{HighScoreStore, HIGH_SCORE_FILE};
use crate::term::{quit_on_signal, TermManager};

use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE: &str = "snek.log";
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn main() {
    init_logging();
    info!("starting snek");

    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            error!("fatal: {}", err);
            eprintln!("Error: {}", err);
            1
        }
    };

    exit(code);
}

// The screen belongs to the game, so logs go to a file. No file, no logs.
fn init_logging() {
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LOG_LEVEL, Config::default(), file);
    }
}

fn run() -> Result<()> {
    let mut store = HighScoreStore::open(HIGH_SCORE_FILE)?;
    info!("high score is {}", store.best());

    let mut game = Game::new(store.best())?;
    let quit_signal = quit_on_signal()?;
    let mut term = TermManager::setup(quit_signal)?;

    game::run_session(&mut term, &mut game, &mut store, TICK_INTERVAL)?;

    match game.state() {
        State::Lost => println!("You lost!"),
        State::Won => println!("You won!"),
        _ => {}
    }
    println!("Score: {}", game.score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_keeps_game_events() {
        // pause toggles, eggs and turns are logged at debug
        assert!(LOG_LEVEL >= LevelFilter::Debug);
    }
}
