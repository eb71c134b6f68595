use std::fmt::{self, Debug, Display, Formatter};

use crate::map::Geometry;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

/// A loaded puzzle: its geometry and the initial robot and box placement.
#[derive(Clone)]
pub struct Level {
    pub map: Geometry,
    pub state: State,
}

impl Level {
    pub(crate) fn new(map: Geometry, state: State) -> Self {
        Level { map, state }
    }

    pub fn render(&self) -> MapFormatter<'_> {
        self.map.format_with_state(&self.state)
    }

    /// Replays `moves` from the initial state, one frame per move.
    pub fn playback<'a>(&'a self, moves: &'a Moves) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.render())
    }
}
