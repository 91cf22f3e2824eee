//! Persisted widget placement.
//!
//! A small JSON file holding the widget's last screen position. The store
//! subscribes to [`WidgetEvent`]s and writes on drag release.

pub mod errors;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use errors::PositionError;

use crate::config::data_dir;
use crate::events::{EventSubscriber, WidgetEvent};

pub const POSITION_FILE_NAME: &str = "position.json";

/// Top-left corner of the widget in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

#[derive(Debug, Clone)]
pub struct PositionStore {
    path: PathBuf,
    /// Position whose write failed; retried on quit.
    unsaved: Option<Position>,
}

impl PositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unsaved: None,
        }
    }

    /// `~/.yeardots/position.json`.
    pub fn default_path() -> PathBuf {
        data_dir().join(POSITION_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored position.
    ///
    /// Returns the default position if the file doesn't exist, or if it
    /// can't be read or parsed (with error logged).
    pub fn load(&self) -> Position {
        if !self.path.exists() {
            return Position::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(position) => {
                    tracing::debug!(
                        event = "core.position.loaded",
                        path = %self.path.display(),
                        position = ?position
                    );
                    position
                }
                Err(e) => {
                    tracing::error!(
                        event = "core.position.json_parse_failed",
                        path = %self.path.display(),
                        error = %e,
                        "Position file contains invalid JSON - using default placement"
                    );
                    Position::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    event = "core.position.load_failed",
                    path = %self.path.display(),
                    error = %e
                );
                Position::default()
            }
        }
    }

    pub fn save(&mut self, position: Position) -> Result<(), PositionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PositionError::SaveFailed {
                message: format!("Failed to create directory ({}): {}", parent.display(), e),
            })?;
        }

        let json = serde_json::to_string(&position).map_err(|e| PositionError::SaveFailed {
            message: format!("Failed to serialize position: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| PositionError::SaveFailed {
            message: format!("Failed to write position file ({}): {}", self.path.display(), e),
        })?;

        self.unsaved = None;
        tracing::info!(
            event = "core.position.saved",
            path = %self.path.display(),
            x = position.x,
            y = position.y
        );
        Ok(())
    }

    /// Delete the stored position so the next start uses the default.
    pub fn reset(&mut self) -> Result<(), PositionError> {
        self.unsaved = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(event = "core.position.reset", path = %self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PositionError::ResetFailed {
                message: format!("{} ({})", e, self.path.display()),
            }),
        }
    }

    fn save_logged(&mut self, position: Position) {
        if let Err(e) = self.save(position) {
            tracing::error!(
                event = "core.position.save_failed",
                error = %e,
                x = position.x,
                y = position.y
            );
            self.unsaved = Some(position);
        }
    }
}

impl EventSubscriber for PositionStore {
    fn on_event(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::Moved(position) => self.save_logged(*position),
            WidgetEvent::Quitting => {
                if let Some(position) = self.unsaved {
                    self.save_logged(position);
                }
            }
            WidgetEvent::Refreshed { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PositionStore {
        PositionStore::new(dir.path().join("nested").join(POSITION_FILE_NAME))
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), Position { x: 100, y: 100 });
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Position { x: -40, y: 812 }).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.load(), Position { x: -40, y: 812 });
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Position { x: 5, y: 6 }).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({"x": 5, "y": 6}));
    }

    #[test]
    fn test_corrupt_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let store = PositionStore::new(dir.path().join(POSITION_FILE_NAME));
        std::fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), Position::default());
    }

    #[test]
    fn test_moved_event_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.on_event(&WidgetEvent::Moved(Position { x: 7, y: 9 }));
        store.on_event(&WidgetEvent::Refreshed {
            days_done: 1,
            days_total: 365,
        });
        assert_eq!(store.load(), Position { x: 7, y: 9 });
    }

    #[test]
    fn test_failed_save_retried_on_quit() {
        let dir = TempDir::new().unwrap();
        // Parent path is a file, so directory creation fails.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut store = PositionStore::new(blocker.join(POSITION_FILE_NAME));

        store.on_event(&WidgetEvent::Moved(Position { x: 1, y: 2 }));
        assert_eq!(store.unsaved, Some(Position { x: 1, y: 2 }));

        std::fs::remove_file(&blocker).unwrap();
        store.on_event(&WidgetEvent::Quitting);
        assert_eq!(store.unsaved, None);
        assert_eq!(store.load(), Position { x: 1, y: 2 });
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Position { x: 300, y: 300 }).unwrap();

        store.reset().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load(), Position::default());
        // Resetting again is fine.
        store.reset().unwrap();
    }
}
