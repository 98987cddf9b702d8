//! Tile-based 2D dungeon generation.
//!
//! A [`DungeonGenerator`] owns a grid and runs three phases over it: random room placement,
//! growing-tree corridor carving through the remaining space, and doorway placement that joins
//! every room and corridor network into one connected layout. [`generate_dungeon`] runs the
//! whole pipeline from a [`DungeonGeneratorConfig`].

pub mod constants;
pub mod doorways;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod region;
pub mod room;
pub mod room_placement;
pub mod union_find;

pub use constants::CellState;
pub use generator::{
    generate_dungeon, DungeonGenerator, DungeonGeneratorConfig, DungeonGeneratorError,
    DungeonGeneratorResult,
};
pub use grid::{Grid, GridError};
pub use maze::SelectionPolicy;
pub use room::{RegionId, Room};
