use crate::constants::CellState;
use crate::generator::{DungeonGenerator, DungeonGeneratorError};
use crate::region::{Connector, ConnectorMap};
use crate::union_find::RegionMerge;
use rand::Rng;

impl<R: Rng> DungeonGenerator<R> {
    /// Blank cells whose 4-neighbours belong to exactly two regions.
    pub fn find_connectors(&self) -> ConnectorMap {
        self.grid
            .iter()
            .filter(|(_, _, state)| *state == CellState::Blank)
            .filter_map(|(x, y, _)| {
                let ids = self
                    .grid
                    .neighbors(x, y)
                    .into_iter()
                    .filter_map(|(nx, ny)| self.regions.get(nx, ny));
                Connector::from_neighbors(ids).map(|connector| ((x, y), connector))
            })
            .collect()
    }

    /// Opens random connectors as doors until every region is joined. Connectors made
    /// redundant by a merge are opened anyway with a 1-in-`redundancy_chance` chance.
    /// Returns the number of doors added.
    pub fn make_doorways(
        &mut self,
        mut connectors: ConnectorMap,
        redundancy_chance: u32,
    ) -> Result<usize, DungeonGeneratorError> {
        let mut merge = RegionMerge::new(self.regions.ids());
        let mut added = 0;

        while merge.remaining() > 1 {
            let index = match connectors.len() {
                0 => {
                    return Err(DungeonGeneratorError::Disconnected {
                        remaining: merge.remaining(),
                    })
                }
                len => self.rng.gen_range(0..len),
            };
            let Some((&position, &connector)) = connectors.iter().nth(index) else {
                break;
            };
            connectors.remove(&position);
            self.open_door(position)?;
            added += 1;

            let (destination, other) = connector.regions;
            let destination = merge.find(destination);
            merge.union(destination, other);

            let redundant = connectors
                .iter()
                .filter(|(_, c)| merge.same(c.regions.0, c.regions.1))
                .map(|(p, _)| *p)
                .collect::<Vec<_>>();
            for position in redundant {
                connectors.remove(&position);
                if redundancy_chance > 0 && self.rng.gen_range(0..redundancy_chance) == 0 {
                    self.open_door(position)?;
                    added += 1;
                }
            }
        }

        log::debug!(
            "opened {} doors, {} connectors left unused",
            added,
            connectors.len()
        );
        Ok(added)
    }

    fn open_door(&mut self, (x, y): (i32, i32)) -> Result<(), DungeonGeneratorError> {
        self.mark(x, y, CellState::Door, None)?;
        self.doors.push((x, y));
        log::trace!("door at ({}, {})", x, y);
        Ok(())
    }
}
