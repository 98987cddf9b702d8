use crate::constants::{CellState, DIRECTIONS};
use nalgebra::Vector2;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
}

/// Fixed-size cell array, stored as `cells[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<CellState>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![vec![CellState::Blank; width as usize]; height as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn get(&self, x: i32, y: i32) -> Result<CellState, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        Ok(self.cells[y as usize][x as usize])
    }

    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> Result<(), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        self.cells[y as usize][x as usize] = state;
        Ok(())
    }

    /// In-bounds 4-neighbours of `(x, y)`: left, down, up, right.
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        let point = Vector2::new(x, y);
        DIRECTIONS
            .iter()
            .map(|dir| point + dir.to_vec2())
            .filter(|p| self.contains(p.x, p.y))
            .map(|p| (p.x, p.y))
            .collect()
    }

    /// True if every cell of the `width × height` rectangle at `(x, y)` exists and is blank.
    pub fn is_blank_area(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        if width <= 0 || height <= 0 || !self.contains(x, y) {
            return false;
        }
        if width > self.width() as i32 - x || height > self.height() as i32 - y {
            return false;
        }
        (y..y + height).all(|yy| {
            (x..x + width).all(|xx| self.cells[yy as usize][xx as usize] == CellState::Blank)
        })
    }

    /// `(x, y, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, state)| (x as i32, y as i32, *state))
        })
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn count(&self, state: CellState) -> usize {
        self.iter().filter(|(_, _, s)| *s == state).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line = row.iter().map(|s| s.glyph()).collect::<String>();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
