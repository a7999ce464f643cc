use std::io::{stdin, stdout, Stdout, Write};
use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::game::Command;
use crate::snake::Direction::*;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::tty::IsTty;
use log::{error, info};

const SIGNAL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// What the game loop needs from the outside world.
pub trait Console {
    /// Blocks until a key is pressed; unmapped keys give `None`.
    fn wait_command(&mut self) -> Result<Option<Command>>;

    /// Takes at most one pending key without waiting.
    fn poll_command(&mut self) -> Result<Option<Command>>;

    /// Clears the screen and draws `lines` from the top.
    fn present(&mut self, lines: &[String]) -> Result<()>;

    /// Gives the terminal back to the shell.
    fn restore(&mut self) -> Result<()>;
}

/// Sets the returned flag when the process gets SIGINT, SIGTERM or SIGHUP,
/// so the game loop can wind down through the normal quit path.
pub fn quit_on_signal() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);

    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;
    Ok(flag)
}

/// Owns the terminal while the game runs: raw mode, alternate screen and a
/// hidden cursor are set up on creation and undone on `restore` or drop.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
    quit_signal: Arc<AtomicBool>,
}

impl TermManager {
    pub fn setup(quit_signal: Arc<AtomicBool>) -> Result<Self> {
        if !stdin().is_tty() {
            return Err(Error::NotATerminal);
        }

        // Marked active up front so a half-finished setup is still undone on drop
        let mut term = TermManager { stdout: stdout(), active: true, quit_signal };
        execute!(term.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(term.stdout, cursor::Hide)?;

        Ok(term)
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = terminal::disable_raw_mode();
        let screen = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        raw?;
        screen?;
        Ok(())
    }

    /// Waits for a key press. Gives up with `None` once a quit signal arrives.
    pub fn read_key_blocking(&self) -> Result<Option<KeyEvent>> {
        loop {
            if self.signalled() {
                return Ok(None);
            }
            if !poll(SIGNAL_CHECK_INTERVAL)? {
                continue;
            }
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(Some(ev));
                }
            }
        }
    }

    pub fn poll_key(&self) -> Result<Option<KeyEvent>> {
        if !poll(Duration::from_millis(0))? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) if ev.kind == KeyEventKind::Press => Ok(Some(ev)),
            _ => Ok(None),
        }
    }

    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn signalled(&self) -> bool {
        let raised = self.quit_signal.load(Ordering::SeqCst);
        if raised {
            info!("quit signal received");
        }
        raised
    }
}

impl Console for TermManager {
    fn wait_command(&mut self) -> Result<Option<Command>> {
        match self.read_key_blocking()? {
            Some(ev) => Ok(command_for(&ev)),
            None => Ok(Some(Command::Quit)),
        }
    }

    fn poll_command(&mut self) -> Result<Option<Command>> {
        if self.signalled() {
            return Ok(Some(Command::Quit));
        }
        Ok(self.poll_key()?.as_ref().and_then(command_for))
    }

    fn present(&mut self, lines: &[String]) -> Result<()> {
        self.draw(lines)
    }

    fn restore(&mut self) -> Result<()> {
        TermManager::restore(self)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            error!("failed to restore terminal: {}", err);
        }
    }
}

/// vi-style keys, with arrows as aliases. Raw mode swallows SIGINT, so
/// Ctrl+C is handled here as a quit key.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('h') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // Never set up, so nothing touches the real terminal
    fn detached(raised: bool) -> TermManager {
        TermManager { stdout: stdout(), active: false, quit_signal: Arc::new(AtomicBool::new(raised)) }
    }

    #[test]
    fn quit_signal_turns_into_quit_command() {
        let mut term = detached(true);
        assert_eq!(term.poll_command().unwrap(), Some(Command::Quit));
        assert_eq!(term.wait_command().unwrap(), Some(Command::Quit));
    }

    #[test]
    fn restore_without_setup_is_a_no_op() {
        let mut term = detached(false);
        assert!(Console::restore(&mut term).is_ok());
        assert!(!term.signalled());
    }

    #[test]
    fn vi_keys_map_to_turns() {
        assert_eq!(command_for(&key(KeyCode::Char('h'))), Some(Command::Turn(Left)));
        assert_eq!(command_for(&key(KeyCode::Char('j'))), Some(Command::Turn(Down)));
        assert_eq!(command_for(&key(KeyCode::Char('k'))), Some(Command::Turn(Up)));
        assert_eq!(command_for(&key(KeyCode::Char('l'))), Some(Command::Turn(Right)));
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Turn(Up)));
    }

    #[test]
    fn pause_and_quit_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('p'))), Some(Command::TogglePause));
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Esc)), None);
        assert_eq!(command_for(&key(KeyCode::Enter)), None);
    }
}
