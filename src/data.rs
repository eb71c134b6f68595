use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Wall,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// Signed so that neighbors of border cells can be represented,
/// everything outside the grid is treated as a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub(crate) fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    pub(crate) fn dist_manhattan(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub(crate) fn dist_euclidean(self, other: Pos) -> f64 {
        let dr = f64::from(self.r - other.r);
        let dc = f64::from(self.c - other.c);
        (dr * dr + dc * dc).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    pub(crate) fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos::new(self.r + dr, self.c + dc)
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping() {
        let pos = Pos::new(3, 5);
        assert_eq!(pos + Dir::Up, Pos::new(2, 5));
        assert_eq!(pos + Dir::Right, Pos::new(3, 6));
        assert_eq!(pos - Dir::Right, Pos::new(3, 4));
        for &dir in &DIRECTIONS {
            assert_eq!(pos + dir - dir, pos);
            assert_eq!(pos + dir.inverse(), pos - dir);
        }
    }

    #[test]
    fn distances() {
        let a = Pos::new(1, 1);
        let b = Pos::new(4, 5);
        assert_eq!(a.dist_manhattan(b), 7);
        assert_eq!(b.dist_manhattan(a), 7);
        assert!((a.dist_euclidean(b) - 5.0).abs() < 1e-9);
        assert_eq!(a.dist_manhattan(a), 0);
    }
}
