// game/progression.rs

use crate::level::{Level, LevelRepository};
use bevy::prelude::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Requested index is past the last level
    NoMoreLevels { requested: usize, available: usize },
    EmptyRepository,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoMoreLevels {
                requested,
                available,
            } => write!(
                f,
                "Level {} requested but only {} available",
                requested + 1,
                available
            ),
            SelectionError::EmptyRepository => write!(f, "No levels to select"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Resource tracking which level of the repository is selected
#[derive(Resource, Debug, Default)]
pub struct LevelSelection {
    /// Index into the repository, `None` before the first selection
    current: Option<usize>,
}

impl LevelSelection {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Select `index`; on error the selection is left unchanged
    pub fn select<'a>(
        &mut self,
        repository: &'a LevelRepository,
        index: usize,
    ) -> Result<&'a Level, SelectionError> {
        if repository.is_empty() {
            return Err(SelectionError::EmptyRepository);
        }
        let level = repository
            .get(index)
            .ok_or(SelectionError::NoMoreLevels {
                requested: index,
                available: repository.len(),
            })?;
        self.current = Some(index);
        Ok(level)
    }

    /// Select the level after the current one (the first if none yet)
    pub fn advance<'a>(
        &mut self,
        repository: &'a LevelRepository,
    ) -> Result<&'a Level, SelectionError> {
        let next = self.current.map_or(0, |current| current + 1);
        self.select(repository, next)
    }
}
