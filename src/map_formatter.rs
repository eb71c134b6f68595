use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

/// Renders a grid, optionally with a robot and boxes on it.
///
/// One row per line, `@` robot, `#` obstacle, `$` box, `.` storage, space floor.
/// A box or the robot standing on storage hides the storage glyph.
pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, state: Option<&'a State>) -> Self {
        Self { grid, state }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid: Vec2d<Contents> = self.grid.scratchpad();
        if let Some(state) = self.state {
            for &b in &state.boxes {
                state_grid[b] = Contents::Box;
            }
            state_grid[state.player_pos] = Contents::Player;
        }

        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                Self::write_cell(self.grid[pos], state_grid[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!("Wall with non-empty contents"),
            (_, Contents::Player) => write!(f, "@"),
            (_, Contents::Box) => write!(f, "$"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
