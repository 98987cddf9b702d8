use crate::constants::CellState;
use crate::generator::{DungeonGenerator, DungeonGeneratorError};
use crate::room::{RegionId, Room};
use rand::Rng;

impl<R: Rng> DungeonGenerator<R> {
    /// Brute-force room placement: `attempts` random rectangles with sides drawn from
    /// `min_size, min_size + size_step, ..` below `max_size`. Returns how many were placed.
    pub fn place_rooms(
        &mut self,
        min_size: u32,
        max_size: u32,
        attempts: u32,
        size_step: u32,
        margin: u32,
    ) -> Result<usize, DungeonGeneratorError> {
        // validate
        if min_size == 0 || min_size >= max_size {
            return Err(DungeonGeneratorError::InvalidRoomSize {
                min: min_size,
                max: max_size,
            });
        }
        if size_step == 0 {
            return Err(DungeonGeneratorError::InvalidSizeStep);
        }
        let footprint = margin
            .checked_mul(2)
            .and_then(|border| border.checked_add(min_size));
        if footprint.map_or(true, |size| size > self.width() || size > self.height()) {
            return Err(DungeonGeneratorError::RoomCannotFit {
                size: min_size,
                margin,
                width: self.width(),
                height: self.height(),
            });
        }

        let size_choices = (max_size - min_size).div_ceil(size_step);
        let (grid_width, grid_height) = (self.width(), self.height());
        let mut placed = 0;
        for _ in 0..attempts {
            let x = self.rng.gen_range(0..grid_width);
            let y = self.rng.gen_range(0..grid_height);
            let width = min_size + self.rng.gen_range(0..size_choices) * size_step;
            let height = min_size + self.rng.gen_range(0..size_choices) * size_step;
            if self.place_room(x, y, width, height, margin)?.is_some() {
                placed += 1;
            }
        }
        log::debug!(
            "placed {} of {} attempted rooms (sizes {}..{} step {}, margin {})",
            placed,
            attempts,
            min_size,
            max_size,
            size_step,
            margin
        );
        Ok(placed)
    }

    /// Places one room if the rectangle, grown by `margin`, is inside the grid and blank.
    pub fn place_room(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        margin: u32,
    ) -> Result<Option<RegionId>, DungeonGeneratorError> {
        if width == 0 || height == 0 {
            return Err(DungeonGeneratorError::EmptyRoom { width, height });
        }
        let Some((left, bottom, outer_width, outer_height)) =
            expand_by_margin(x, y, width, height, margin)
        else {
            return Ok(None);
        };
        if !self.grid.is_blank_area(left, bottom, outer_width, outer_height) {
            return Ok(None);
        }

        let id = self.region_id.gen_id();
        let room = Room::new(id, x, y, width, height);
        for (cx, cy) in room.cells() {
            self.mark(cx, cy, CellState::Floor, Some(id))?;
        }
        log::trace!("room {} at ({}, {}) size {}x{}", id.inner(), x, y, width, height);
        self.rooms.push(room);
        Ok(Some(id))
    }
}

// None when the grown rectangle leaves the i32 coordinate space; it cannot fit any grid.
fn expand_by_margin(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    margin: u32,
) -> Option<(i32, i32, i32, i32)> {
    let margin = i32::try_from(margin).ok()?;
    let border = margin.checked_mul(2)?;
    Some((
        i32::try_from(x).ok()?.checked_sub(margin)?,
        i32::try_from(y).ok()?.checked_sub(margin)?,
        i32::try_from(width).ok()?.checked_add(border)?,
        i32::try_from(height).ok()?.checked_add(border)?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::constants::CellState;
    use crate::generator::{DungeonGenerator, DungeonGeneratorError};
    use crate::room::RegionId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(width: u32, height: u32, seed: u64) -> DungeonGenerator<StdRng> {
        DungeonGenerator::new(width, height, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_single_room() {
        let mut dungeon = generator(10, 10, 0);
        assert_eq!(dungeon.place_room(2, 2, 3, 3, 1), Ok(Some(RegionId::from(1))));
        for (x, y, state) in dungeon.iter() {
            let inside = (2..5).contains(&x) && (2..5).contains(&y);
            if inside {
                assert_eq!(state, CellState::Floor);
                assert_eq!(dungeon.regions().get(x, y), Some(RegionId::from(1)));
            } else {
                assert_eq!(state, CellState::Blank);
                assert_eq!(dungeon.regions().get(x, y), None);
            }
        }
        assert_eq!(
            dungeon.grid().to_string(),
            "\n\n  ...\n  ...\n  ...\n\n\n\n\n\n"
        );
    }

    #[test]
    fn test_margin_rejects_neighbors_and_border() {
        let mut dungeon = generator(10, 10, 0);
        assert!(dungeon.place_room(2, 2, 3, 3, 1).unwrap().is_some());
        // Touching the first room's margin
        assert_eq!(dungeon.place_room(5, 2, 2, 2, 1), Ok(None));
        // Expanded rectangle leaves the grid
        assert_eq!(dungeon.place_room(0, 7, 2, 2, 1), Ok(None));
        assert_eq!(dungeon.place_room(7, 7, 2, 2, 1), Ok(Some(RegionId::from(2))));
        assert_eq!(dungeon.place_room(6, 2, 2, 2, 1), Ok(Some(RegionId::from(3))));
        assert_eq!(dungeon.rooms().len(), 3);
    }

    #[test]
    fn test_invalid_configuration() {
        let mut dungeon = generator(10, 10, 0);
        assert_eq!(
            dungeon.place_rooms(5, 3, 10, 1, 1),
            Err(DungeonGeneratorError::InvalidRoomSize { min: 5, max: 3 })
        );
        assert_eq!(
            dungeon.place_rooms(3, 3, 10, 1, 1),
            Err(DungeonGeneratorError::InvalidRoomSize { min: 3, max: 3 })
        );
        assert_eq!(
            dungeon.place_rooms(3, 5, 10, 0, 1),
            Err(DungeonGeneratorError::InvalidSizeStep)
        );
        assert_eq!(
            dungeon.place_rooms(7, 9, 10, 1, 2),
            Err(DungeonGeneratorError::RoomCannotFit {
                size: 7,
                margin: 2,
                width: 10,
                height: 10
            })
        );
    }

    #[test]
    fn test_huge_margin_cannot_fit() {
        let mut dungeon = generator(10, 10, 0);
        assert_eq!(
            dungeon.place_rooms(3, 5, 10, 1, u32::MAX),
            Err(DungeonGeneratorError::RoomCannotFit {
                size: 3,
                margin: u32::MAX,
                width: 10,
                height: 10
            })
        );
        assert_eq!(dungeon.place_room(2, 2, 3, 3, u32::MAX), Ok(None));
        assert_eq!(dungeon.place_room(2, 2, 3, 3, u32::MAX / 2), Ok(None));
        assert_eq!(dungeon.place_room(u32::MAX, 2, 3, 3, 1), Ok(None));
        assert!(dungeon.rooms().is_empty());
    }

    #[test]
    fn test_zero_sized_room_is_rejected() {
        let mut dungeon = generator(10, 10, 0);
        let error = dungeon.place_room(2, 2, 0, 3, 1).unwrap_err();
        assert_eq!(
            error,
            DungeonGeneratorError::EmptyRoom {
                width: 0,
                height: 3
            }
        );
        assert_eq!(error.to_string(), "a 0x3 room has no cells");
    }

    #[test]
    fn test_sizes_follow_step() {
        let mut dungeon = generator(60, 60, 3);
        let placed = dungeon.place_rooms(3, 12, 200, 4, 1).unwrap();
        assert_eq!(placed, dungeon.rooms().len());
        assert!(placed > 0);
        for room in dungeon.rooms() {
            assert!([3, 7, 11].contains(&room.width));
            assert!([3, 7, 11].contains(&room.height));
        }
    }

    #[test]
    fn test_rooms_keep_their_margin() {
        let mut dungeon = generator(40, 30, 11);
        dungeon.place_rooms(3, 9, 150, 2, 2).unwrap();
        let rooms = dungeon.rooms();
        for (index, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, RegionId::from(index as u32 + 1));
            assert!(room.x >= 2 && room.y >= 2);
            assert!(room.end().0 + 2 <= 40 && room.end().1 + 2 <= 30);
            for other in rooms[index + 1..].iter() {
                assert!(!room.is_contract(other, 2));
            }
        }
    }

    #[test]
    fn test_no_attempts_is_not_an_error() {
        let mut dungeon = generator(10, 10, 0);
        assert_eq!(dungeon.place_rooms(3, 5, 0, 1, 1), Ok(0));
        assert!(dungeon.rooms().is_empty());
    }
}
