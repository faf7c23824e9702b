//! Compass directions between orthogonally adjacent cells

/// One of the four compass neighbors of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous row
    Up,
    /// Next column
    Right,
    /// Next row
    Down,
    /// Previous column
    Left,
}

impl Direction {
    /// All directions in rule-slot order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Slot of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Row and column delta for a step in this direction
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Up => [-1, 0],
            Self::Right => [0, 1],
            Self::Down => [1, 0],
            Self::Left => [0, -1],
        }
    }

    /// Direction pointing back the way this one came
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Step from `position` in this direction, staying inside `rows` x `cols`
    pub const fn step(self, position: [usize; 2], rows: usize, cols: usize) -> Option<[usize; 2]> {
        let [row, col] = position;
        let [dr, dc] = self.offset();
        let (Some(next_row), Some(next_col)) =
            (row.checked_add_signed(dr), col.checked_add_signed(dc))
        else {
            return None;
        };
        if next_row < rows && next_col < cols {
            Some([next_row, next_col])
        } else {
            None
        }
    }
}

/// In-bounds compass neighbors of `position`, paired with the direction taken
pub fn neighbors(
    position: [usize; 2],
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (Direction, [usize; 2])> {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| direction.step(position, rows, cols).map(|n| (direction, n)))
}
