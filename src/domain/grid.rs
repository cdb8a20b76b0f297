/// Grid geometry: cells, directions and board bounds.
/// Coordinates are signed so a candidate head can sit just outside the
/// board before the wall check rejects it.

/// A single board cell. `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell one step in `dir`. No clamping.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

/// Movement direction of the snake.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// W/A/S/D in either case.
    pub fn from_char(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Board dimensions. Valid cells are `0 <= x < width`, `0 <= y < height`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub const fn new(width: usize, height: usize) -> Self {
        Grid { width, height }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(16, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_unclamped() {
        let c = Cell::new(15, 0);
        assert_eq!(c.step(Direction::Right), Cell::new(16, 0));
        assert_eq!(c.step(Direction::Up), Cell::new(15, -1));
    }

    #[test]
    fn grid_bounds() {
        let g = Grid::default();
        assert!(g.contains(Cell::new(0, 0)));
        assert!(g.contains(Cell::new(15, 7)));
        assert!(!g.contains(Cell::new(16, 7)));
        assert!(!g.contains(Cell::new(15, 8)));
        assert!(!g.contains(Cell::new(-1, 3)));
        assert_eq!(g.area(), 128);
    }

    #[test]
    fn wasd_mapping_ignores_case() {
        assert_eq!(Direction::from_char('W'), Some(Direction::Up));
        assert_eq!(Direction::from_char('a'), Some(Direction::Left));
        assert_eq!(Direction::from_char('x'), None);
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(d.opposite().opposite(), d);
        }
    }
}
