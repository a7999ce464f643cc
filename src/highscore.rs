use std::{fs, io::ErrorKind, path::PathBuf};

use crate::error::{Error, Result};

use log::{info, warn};

pub const HIGH_SCORE_FILE: &str = "highscore";

/// Best score so far, kept as a decimal number in a small text file.
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Loads the stored score, creating the file with `0` if it is missing.
    /// Content that does not start with a number counts as `0`.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let best = match fs::read_to_string(&path) {
            Ok(text) => parse_score(&text).unwrap_or_else(|| {
                warn!("malformed high score file {}, treating it as 0", path.display());
                0
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                fs::write(&path, "0").map_err(|source| Error::HighScore { path: path.clone(), source })?;
                info!("created high score file {}", path.display());
                0
            }
            Err(source) => return Err(Error::HighScore { path, source }),
        };

        Ok(HighScoreStore { path, best })
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Overwrites the file if `score` beats the stored one. Returns whether
    /// anything was written.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }

        fs::write(&self.path, score.to_string())
            .map_err(|source| Error::HighScore { path: self.path.clone(), source })?;
        info!("new high score {} (was {})", score, self.best);
        self.best = score;
        Ok(true)
    }
}

// Leading digits after optional whitespace, so "42\n" and "42 points" both read as 42.
fn parse_score(text: &str) -> Option<u32> {
    let digits: String = text.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HIGH_SCORE_FILE);

        let store = HighScoreStore::open(&path).unwrap();

        assert_eq!(store.best(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn higher_score_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HIGH_SCORE_FILE);
        fs::write(&path, "10").unwrap();

        let mut store = HighScoreStore::open(&path).unwrap();
        assert_eq!(store.best(), 10);
        assert!(store.record(42).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "42");
        assert_eq!(HighScoreStore::open(&path).unwrap().best(), 42);
    }

    #[test]
    fn lower_or_equal_score_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HIGH_SCORE_FILE);
        fs::write(&path, "10").unwrap();

        let mut store = HighScoreStore::open(&path).unwrap();
        assert!(!store.record(5).unwrap());
        assert!(!store.record(10).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "10");
    }

    #[test]
    fn malformed_content_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HIGH_SCORE_FILE);

        for junk in &["", "abc", "-3", "\n"] {
            fs::write(&path, junk).unwrap();
            assert_eq!(HighScoreStore::open(&path).unwrap().best(), 0, "content {:?}", junk);
        }

        fs::write(&path, " 17\n").unwrap();
        assert_eq!(HighScoreStore::open(&path).unwrap().best(), 17);
    }
}
