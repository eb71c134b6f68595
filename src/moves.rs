use std::fmt::{self, Debug, Display, Formatter};
use std::slice;
use std::vec;

use crate::data::Dir;

/// One robot step, `is_push` is set when it moves a box along.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub is_push: bool,
}

impl Move {
    pub fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push {
            write!(f, "{}", self.dir.to_string().to_uppercase())
        } else {
            write!(f, "{}", self.dir)
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_moves() {
        let moves = Moves::new(vec![
            Move::new(Dir::Up, false),
            Move::new(Dir::Right, false),
            Move::new(Dir::Down, false),
            Move::new(Dir::Left, false),
            Move::new(Dir::Up, true),
            Move::new(Dir::Right, true),
            Move::new(Dir::Down, true),
            Move::new(Dir::Left, true),
        ]);
        assert_eq!(moves.to_string(), "urdlURDL");
        assert_eq!(format!("{:?}", moves), "urdlURDL");
        assert_eq!(Moves::default().to_string(), "");
    }

    #[test]
    fn adding_and_counting() {
        let mut moves1 = Moves::new(vec![
            Move::new(Dir::Up, true),
            Move::new(Dir::Right, true),
            Move::new(Dir::Down, true),
        ]);
        let mut moves2 = Moves::default();
        assert!(moves2.is_empty());
        moves2.add(Move::new(Dir::Left, false));
        moves2.add(Move::new(Dir::Left, false));

        assert_eq!(moves1.move_cnt(), 3);
        assert_eq!(moves1.push_cnt(), 3);
        assert_eq!(moves2.move_cnt(), 2);
        assert_eq!(moves2.push_cnt(), 0);

        for &mov in &moves2 {
            moves1.add(mov);
        }

        assert_eq!(moves1.move_cnt(), 5);
        assert_eq!(moves1.push_cnt(), 3);
        assert_eq!(moves1.to_string(), "URDll");
    }

    #[test]
    fn iterating() {
        let v = vec![
            Move::new(Dir::Up, false),
            Move::new(Dir::Left, true),
        ];
        let moves = Moves::new(v.clone());

        let mut v2 = Vec::new();
        for &m in &moves {
            v2.push(m);
        }
        for &m in moves.iter() {
            v2.push(m);
        }
        for m in moves {
            v2.push(m);
        }

        assert_eq!(v2.len(), 6);
        for chunk in v2.chunks(2) {
            assert_eq!(chunk, &v[..]);
        }
    }
}
