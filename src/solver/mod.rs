mod best_first;
mod deadlock;
mod depth_first;
mod iterative_deepening;
mod puzzle;
mod stats;

use std::fmt::{self, Debug, Formatter};

use crate::config::{Heuristic, Strategy};
use crate::level::Level;
use crate::moves::Moves;
use crate::Solve;

pub use self::puzzle::{PuzzleState, StaticData};
pub use self::stats::Stats;

pub struct SolverOk {
    /// `None` if the level has no solution
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub strategy: Strategy,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, strategy: Strategy) -> Self {
        Self {
            moves,
            stats,
            strategy,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "{}: no solution", self.strategy)?,
            Some(ref moves) => writeln!(f, "{}: {}", self.strategy, moves)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, strategy: Strategy, heuristic: Heuristic, print_status: bool) -> SolverOk {
        debug!("Processing level...");
        let sd = StaticData::new(&self.map, heuristic);
        debug!("Processed level");

        let initial = PuzzleState::new(&sd, &self.state);
        match strategy {
            Strategy::DepthFirst => depth_first::search(initial, print_status),
            Strategy::BestFirst => best_first::search(initial, print_status),
            Strategy::IterativeDeepening => iterative_deepening::search(initial, print_status),
        }
    }
}
