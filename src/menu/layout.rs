//! Pattern layouts
//!
//! Builds a definition from rows of characters, one character per cell:
//!
//! ```text
//! "KKKKKKKKK"
//! "KXX   XXK"
//! "KKKKKKKKK"
//! ```
//!
//! Each bound character places a copy of its slot template. Unbound
//! characters (spaces included) leave the cell empty.

use crate::error::{MenuError, MenuResult};
use crate::menu::{MenuDefinition, MAX_HEIGHT, MAX_WIDTH};
use crate::slot::Slot;
use crate::text::StyledText;
use std::collections::HashMap;

/// Character-grid menu builder
#[derive(Debug, Clone, Default)]
pub struct MenuLayout {
    bindings: HashMap<char, Slot>,
    rows: Vec<Vec<char>>,
}

impl MenuLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a character to a slot template
    pub fn bind(mut self, key: char, slot: Slot) -> Self {
        self.bindings.insert(key, slot);
        self
    }

    /// Set the pattern rows
    pub fn pattern<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.rows = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        self
    }

    fn dimensions(&self) -> MenuResult<(usize, usize)> {
        let height = self.rows.len();
        if height == 0 {
            return Err(MenuError::InvalidLayout("no pattern rows".to_string()));
        }
        if height > MAX_HEIGHT {
            return Err(MenuError::InvalidLayout(format!(
                "pattern has {} rows, at most {} allowed",
                height, MAX_HEIGHT
            )));
        }

        let width = self.rows[0].len();
        if width == 0 || width > MAX_WIDTH {
            return Err(MenuError::InvalidLayout(format!("row width {} is not supported", width)));
        }
        if let Some(row) = self.rows.iter().position(|r| r.len() != width) {
            return Err(MenuError::InvalidLayout(format!(
                "row {} has {} cells, expected {}",
                row,
                self.rows[row].len(),
                width
            )));
        }
        Ok((width, height))
    }

    /// Every cell index showing `key`, ascending
    pub fn indices_of(&self, key: char) -> Vec<usize> {
        let width = self.rows.first().map(|r| r.len()).unwrap_or(0);
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(move |&(_, &c)| c == key)
                    .map(move |(col, _)| row * width + col)
            })
            .collect()
    }

    /// Build the definition
    pub fn build(&self, title: impl Into<StyledText>) -> MenuResult<MenuDefinition> {
        let (width, height) = self.dimensions()?;
        let mut menu = MenuDefinition::new(title, width, height)?;

        for (&key, slot) in &self.bindings {
            let cells = self.indices_of(key);
            if !cells.is_empty() {
                menu.fill_indices(cells, slot)?;
            }
        }
        Ok(menu)
    }
}
