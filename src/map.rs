use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a puzzle: obstacles, storage and size.
/// Built once when loading and never modified afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Geometry {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl Geometry {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        Geometry { grid, goals }
    }

    /// `(width, height)`
    pub fn size(&self) -> (i32, i32) {
        (self.grid.cols(), self.grid.rows())
    }

    pub fn storage(&self) -> &[Pos] {
        &self.goals
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(false, |&cell| cell == MapCell::Goal)
    }

    pub(crate) fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state))
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MapFormatter::new(&self.grid, None))
    }
}

impl Debug for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
