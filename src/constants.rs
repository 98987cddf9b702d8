use nalgebra::Vector2;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Direction4 {
    Left,
    Down,
    Up,
    Right,
}

pub const DIRECTIONS: &[Direction4; 4] = &[
    Direction4::Left,
    Direction4::Down,
    Direction4::Up,
    Direction4::Right,
];

impl Direction4 {
    pub fn to_vec2(self) -> Vector2<i32> {
        match self {
            Direction4::Left => Vector2::new(-1, 0),
            Direction4::Down => Vector2::new(0, -1),
            Direction4::Up => Vector2::new(0, 1),
            Direction4::Right => Vector2::new(1, 0),
        }
    }

    // Unit vector perpendicular to this direction
    pub fn side(self) -> Vector2<i32> {
        let v = self.to_vec2();
        Vector2::new(v.y, v.x)
    }
}

/// State of a single grid cell.
///
/// Discriminants are stable: renderers and saved layouts may rely on them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Blank = 0,
    Floor = 1,
    Corridor = 2,
    PathEnd = 3,
    Wall = 4,
    Door = 5,
    Cave = 6,
}

impl CellState {
    /// RGB triple used when rasterising a grid.
    pub fn color(self) -> [u8; 3] {
        match self {
            CellState::Blank => [0, 0, 0],
            CellState::Floor => [0, 150, 0],
            CellState::Corridor => [50, 150, 255],
            CellState::PathEnd => [255, 0, 0],
            CellState::Wall => [255, 255, 0],
            CellState::Door => [175, 80, 200],
            CellState::Cave => [150, 75, 20],
        }
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Blank => ' ',
            CellState::Floor => '.',
            CellState::Corridor => '#',
            CellState::PathEnd => '!',
            CellState::Wall => 'W',
            CellState::Door => '+',
            CellState::Cave => '~',
        }
    }

    /// Whether the cell can be walked through once generation finishes.
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            CellState::Floor | CellState::Corridor | CellState::Door
        )
    }
}
