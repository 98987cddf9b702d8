use crate::constants::CellState;
use crate::grid::{Grid, GridError};
use crate::maze::SelectionPolicy;
use crate::region::RegionMap;
use crate::room::{RegionId, Room};
use pathfinding::prelude::bfs_reach;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use thiserror::Error;

pub struct DungeonGeneratorConfig {
    pub width: u32,        // Width of entire dungeon (x-axis)
    pub height: u32,       // Height of entire dungeon (y-axis)
    pub seed: Option<u64>, // Seed value for random dungeon generation
    pub room_min_size: u32,
    pub room_max_size: u32, // Exclusive
    pub room_size_step: u32,
    pub room_attempts: u32,
    pub room_margin: u32, // Blank cells required around each room
    pub selection_policy: SelectionPolicy,
    pub redundancy_chance: u32, // 1-in-N chance of keeping a redundant connector, 0 disables
}

impl Default for DungeonGeneratorConfig {
    fn default() -> Self {
        DungeonGeneratorConfig {
            width: 50,
            height: 50,
            seed: None,
            room_min_size: 3,
            room_max_size: 15,
            room_size_step: 2,
            room_attempts: 100,
            room_margin: 1,
            selection_policy: SelectionPolicy::Last,
            redundancy_chance: 0,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct DungeonGeneratorResult {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<(i32, i32)>,
    pub doors: Vec<(i32, i32)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DungeonGeneratorError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("room size range {min}..{max} is empty")]
    InvalidRoomSize { min: u32, max: u32 },
    #[error("a {width}x{height} room has no cells")]
    EmptyRoom { width: u32, height: u32 },
    #[error("room size step must be positive")]
    InvalidSizeStep,
    #[error("a {size}x{size} room with margin {margin} cannot fit in a {width}x{height} grid")]
    RoomCannotFit {
        size: u32,
        margin: u32,
        width: u32,
        height: u32,
    },
    #[error("cell ({x}, {y}) cannot start a corridor")]
    NotCarvable { x: i32, y: i32 },
    #[error("no blank area is left to start a corridor")]
    NoCarvableCell,
    #[error("connectors ran out with {remaining} regions still disconnected")]
    Disconnected { remaining: usize },
}

/// Stateful generation engine. Phases are run in order: rooms, corridors, doorways.
#[derive(Debug)]
pub struct DungeonGenerator<R> {
    pub(crate) grid: Grid,
    pub(crate) regions: RegionMap,
    pub(crate) rooms: Vec<Room>,
    pub(crate) corridors: Vec<(i32, i32)>,
    pub(crate) doors: Vec<(i32, i32)>,
    pub(crate) region_id: RegionId,
    pub(crate) rng: R,
}

impl<R: Rng> DungeonGenerator<R> {
    pub fn new(width: u32, height: u32, rng: R) -> Result<Self, DungeonGeneratorError> {
        Ok(DungeonGenerator {
            grid: Grid::new(width, height)?,
            regions: RegionMap::default(),
            rooms: Vec::new(),
            corridors: Vec::new(),
            doors: Vec::new(),
            region_id: RegionId::first(),
            rng,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[(i32, i32)] {
        &self.corridors
    }

    pub fn doors(&self) -> &[(i32, i32)] {
        &self.doors
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        self.grid.iter()
    }

    /// Writes `state` at `(x, y)` and records it under `region`.
    pub(crate) fn mark(
        &mut self,
        x: i32,
        y: i32,
        state: CellState,
        region: Option<RegionId>,
    ) -> Result<(), GridError> {
        self.grid.set(x, y, state)?;
        match region {
            Some(id) => self.regions.insert(x, y, id),
            None => self.regions.remove(x, y),
        };
        Ok(())
    }

    /// True if every floor, corridor and door cell is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let passable = self
            .grid
            .iter()
            .filter(|(_, _, state)| state.is_passable())
            .map(|(x, y, _)| (x, y))
            .collect::<HashSet<_>>();
        let Some(start) = passable.iter().min().copied() else {
            return true;
        };
        let reached = bfs_reach(start, |&(x, y)| {
            self.grid
                .neighbors(x, y)
                .into_iter()
                .filter(|p| passable.contains(p))
                .collect::<Vec<_>>()
        })
        .count();
        reached == passable.len()
    }

    pub fn into_parts(self) -> DungeonGeneratorResult {
        DungeonGeneratorResult {
            grid: self.grid,
            rooms: self.rooms,
            corridors: self.corridors,
            doors: self.doors,
        }
    }
}

pub fn generate_dungeon(
    config: DungeonGeneratorConfig,
) -> Result<DungeonGeneratorResult, DungeonGeneratorError> {
    let rng: rand::rngs::StdRng = config
        .seed
        .map(SeedableRng::seed_from_u64)
        .unwrap_or_else(rand::rngs::StdRng::from_entropy);

    let mut generator = DungeonGenerator::new(config.width, config.height, rng)?;
    let rooms = generator.place_rooms(
        config.room_min_size,
        config.room_max_size,
        config.room_attempts,
        config.room_size_step,
        config.room_margin,
    )?;
    let carved = generator.fill_corridors(config.selection_policy)?;
    let connectors = generator.find_connectors();
    log::debug!(
        "placed {} rooms, carved {} corridor cells, found {} connectors",
        rooms,
        carved,
        connectors.len()
    );
    generator.make_doorways(connectors, config.redundancy_chance)?;

    Ok(generator.into_parts())
}
