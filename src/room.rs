#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RegionId,
    pub x: u32, // Lower-left corner (x-axis)
    pub y: u32, // Lower-left corner (y-axis)
    pub width: u32,
    pub height: u32,
}

impl Room {
    pub fn new(id: RegionId, x: u32, y: u32, width: u32, height: u32) -> Self {
        Room {
            id,
            x,
            y,
            width,
            height,
        }
    }

    pub fn end(&self) -> (u32, u32) {
        (self.x + self.width, self.y + self.height)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x as i32, y as i32)))
    }
}

// Placement guarantees this never holds for two placed rooms; tests check it.
#[cfg(test)]
impl Room {
    pub(crate) fn is_contract(&self, other: &Room, margin: u32) -> bool {
        let self_end = self.end();
        let other_end = other.end();
        self.x < other_end.0 + margin
            && other.x < self_end.0 + margin
            && self.y < other_end.1 + margin
            && other.y < self_end.1 + margin
    }
}

/// Region identifier. The first corridor tree is [`RegionId::CORRIDOR`]; rooms and later
/// corridor trees count up from 1.
#[derive(Ord, PartialOrd, PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct RegionId(u32);

impl RegionId {
    pub const CORRIDOR: RegionId = RegionId(0);

    pub fn first() -> Self {
        RegionId(1)
    }

    pub fn gen_id(&mut self) -> Self {
        let ret = *self;
        self.0 += 1;
        ret
    }

    pub fn inner(&self) -> u32 {
        self.0
    }
}

impl From<u32> for RegionId {
    fn from(value: u32) -> Self {
        RegionId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_id_is_monotonic() {
        let mut id = RegionId::first();
        assert_eq!(id.gen_id().inner(), 1);
        assert_eq!(id.gen_id().inner(), 2);
        assert_eq!(id.inner(), 3);
        assert!(RegionId::CORRIDOR < RegionId::first());
    }

    #[test]
    fn test_cells_cover_rectangle() {
        let room = Room::new(RegionId::first(), 2, 3, 3, 2);
        let cells = room.cells().collect::<Vec<_>>();
        assert_eq!(
            cells,
            vec![(2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (4, 4)]
        );
        assert_eq!(room.end(), (5, 5));
    }

    #[test]
    fn test_is_contract_respects_margin() {
        let a = Room::new(RegionId::from(1), 0, 0, 3, 3);
        let b = Room::new(RegionId::from(2), 4, 0, 3, 3);
        assert!(!a.is_contract(&b, 0));
        assert!(!a.is_contract(&b, 1));
        assert!(a.is_contract(&b, 2));
        assert!(b.is_contract(&a, 2));
    }
}
