//! Growing-tree corridor carving.
//!
//! Corridors grow one cell at a time from a frontier of active cells. A step is only taken
//! when the block ahead of it is blank. Corridors stay off the border and never touch rooms
//! or other branches, so every network is a tree.

use crate::constants::{CellState, Direction4, DIRECTIONS};
use crate::generator::{DungeonGenerator, DungeonGeneratorError};
use crate::room::RegionId;
use nalgebra::Vector2;
use rand::prelude::SliceRandom;
use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

/// Which frontier cell grows next.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Oldest cell; short, radial corridors.
    First,
    /// Newest cell; long winding corridors.
    #[default]
    Last,
    Middle,
    /// Any cell; heavily branching corridors.
    Random,
}

impl SelectionPolicy {
    fn select<R: Rng>(self, len: usize, rng: &mut R) -> usize {
        match self {
            SelectionPolicy::First => 0,
            SelectionPolicy::Last => len - 1,
            SelectionPolicy::Middle => len / 2,
            SelectionPolicy::Random => rng.gen_range(0..len),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown selection policy '{0}'")]
pub struct UnknownSelectionPolicy(pub String);

impl FromStr for SelectionPolicy {
    type Err = UnknownSelectionPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "first" => Ok(SelectionPolicy::First),
            "l" | "last" => Ok(SelectionPolicy::Last),
            "m" | "middle" => Ok(SelectionPolicy::Middle),
            "r" | "random" => Ok(SelectionPolicy::Random),
            _ => Err(UnknownSelectionPolicy(s.to_owned())),
        }
    }
}

impl<R: Rng> DungeonGenerator<R> {
    /// True if `(x, y)` and its whole 3×3 neighbourhood are blank.
    pub fn is_carvable(&self, x: i32, y: i32) -> bool {
        self.grid.is_blank_area(x - 1, y - 1, 3, 3)
    }

    // The destination, the cell past it, and the cells beside both must be blank.
    fn can_carve(&self, from: Vector2<i32>, dir: Direction4) -> bool {
        let forward = dir.to_vec2();
        let side = dir.side();
        (1..=2i32).all(|step| {
            (-1..=1i32).all(|offset| {
                let p = from + forward * step + side * offset;
                self.grid.get(p.x, p.y) == Ok(CellState::Blank)
            })
        })
    }

    fn find_moves(&self, from: Vector2<i32>) -> Vec<Vector2<i32>> {
        let (max_x, max_y) = (self.width() as i32 - 2, self.height() as i32 - 2);
        DIRECTIONS
            .iter()
            .filter(|dir| {
                let p = from + dir.to_vec2();
                p.x >= 1 && p.y >= 1 && p.x <= max_x && p.y <= max_y && self.can_carve(from, **dir)
            })
            .map(|dir| from + dir.to_vec2())
            .collect()
    }

    fn random_carvable(&mut self) -> Option<Vector2<i32>> {
        if !self.grid.iter().any(|(x, y, _)| self.is_carvable(x, y)) {
            return None;
        }
        let (width, height) = (self.width() as i32, self.height() as i32);
        loop {
            let x = self.rng.gen_range(1..width - 1);
            let y = self.rng.gen_range(1..height - 1);
            if self.is_carvable(x, y) {
                return Some(Vector2::new(x, y));
            }
        }
    }

    /// Grows one corridor tree from `start`, or from a random carvable cell when `None`.
    /// An explicit start must be off the border and carvable. Returns the number of cells carved.
    pub fn place_corridors(
        &mut self,
        start: Option<(i32, i32)>,
        selection_policy: SelectionPolicy,
    ) -> Result<usize, DungeonGeneratorError> {
        let start = match start {
            Some((x, y)) => {
                let interior = x >= 1
                    && y >= 1
                    && x <= self.width() as i32 - 2
                    && y <= self.height() as i32 - 2;
                if !interior || !self.is_carvable(x, y) {
                    return Err(DungeonGeneratorError::NotCarvable { x, y });
                }
                Vector2::new(x, y)
            }
            None => self
                .random_carvable()
                .ok_or(DungeonGeneratorError::NoCarvableCell)?,
        };

        // Starts are carvable, so every tree after the first is disjoint from the others.
        let region = if self.corridors.is_empty() {
            RegionId::CORRIDOR
        } else {
            self.region_id.gen_id()
        };
        self.carve(start, region)?;
        let mut carved = 1;
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let index = selection_policy.select(frontier.len(), &mut self.rng);
            let moves = self.find_moves(frontier[index]);
            match moves.choose(&mut self.rng) {
                Some(next) => {
                    self.carve(*next, region)?;
                    frontier.push(*next);
                    carved += 1;
                }
                None => {
                    frontier.remove(index);
                }
            }
        }
        log::trace!(
            "corridor region {} from ({}, {}) carved {} cells",
            region.inner(),
            start.x,
            start.y,
            carved
        );
        Ok(carved)
    }

    /// Grows corridors from every carvable pocket until none is left.
    pub fn fill_corridors(
        &mut self,
        selection_policy: SelectionPolicy,
    ) -> Result<usize, DungeonGeneratorError> {
        let mut carved = 0;
        let mut seeds = 0;
        loop {
            let Some((x, y, _)) = self.grid.iter().find(|(x, y, _)| self.is_carvable(*x, *y))
            else {
                break;
            };
            carved += self.place_corridors(Some((x, y)), selection_policy)?;
            seeds += 1;
        }
        log::debug!("filled {} corridor cells from {} seeds", carved, seeds);
        Ok(carved)
    }

    fn carve(&mut self, p: Vector2<i32>, region: RegionId) -> Result<(), DungeonGeneratorError> {
        self.mark(p.x, p.y, CellState::Corridor, Some(region))?;
        self.corridors.push((p.x, p.y));
        Ok(())
    }
}
