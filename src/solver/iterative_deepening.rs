use fnv::FnvHashSet;

use crate::config::Strategy;
use crate::moves::{Move, Moves};
use crate::state::State;

use super::puzzle::PuzzleState;
use super::stats::Stats;
use super::SolverOk;

/// Outcome of one bounded pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchResult {
    Found(Moves),
    /// Nothing found, the smallest cost that didn't fit under the bound.
    Bound(f64),
    /// Nothing found and nothing was cut off by the bound - raising it won't help.
    NotFound,
}

/// IDA* - repeated depth-first passes limited by `depth + heuristic`,
/// each pass raises the limit to the cheapest state the previous one cut off.
pub(crate) fn search(initial: PuzzleState<'_>, print_status: bool) -> SolverOk {
    debug!("Iterative deepening search called");

    let mut stats = Stats::new();
    let mut bound = initial.cost();
    loop {
        // every pass starts over from the root
        stats.add_created(initial.depth());
        stats.add_iteration();
        debug!("Iteration {}, bound {}", stats.iterations(), bound);

        match bounded_search(&initial, bound, &mut stats, print_status) {
            SearchResult::Found(moves) => {
                debug!("Solved with {} moves", moves.move_cnt());
                return SolverOk::new(Some(moves), stats, Strategy::IterativeDeepening);
            }
            SearchResult::Bound(next_bound) => bound = next_bound,
            SearchResult::NotFound => {
                return SolverOk::new(None, stats, Strategy::IterativeDeepening);
            }
        }
    }
}

/// One step of the current path with the moves not tried yet.
struct Frame<'a> {
    puzzle: PuzzleState<'a>,
    untried: Vec<Move>,
}

/// Depth-first pass with an explicit path stack.
///
/// Duplicates are only detected within this pass - a state cut off now
/// may be reachable under the next bound.
pub(crate) fn bounded_search(
    initial: &PuzzleState<'_>,
    bound: f64,
    stats: &mut Stats,
    print_status: bool,
) -> SearchResult {
    let mut visited: FnvHashSet<State> = FnvHashSet::default();
    let mut minimum = f64::INFINITY;
    let mut path: Vec<Frame<'_>> = Vec::new();

    let mut candidate = Some(initial.clone());
    loop {
        if let Some(cur) = candidate.take() {
            let cost = cur.cost();
            if cost > bound {
                minimum = minimum.min(cost);
            } else if visited.contains(cur.key()) {
                stats.add_reached_duplicate(cur.depth());
            } else {
                visited.insert(cur.key().clone());
                if stats.add_unique_visited(cur.depth()) && print_status {
                    println!("Visited new depth: {}", cur.depth());
                    println!("{:?}", stats);
                }

                if cur.is_goal() {
                    return SearchResult::Found(cur.into_moves());
                }
                if !cur.is_deadlock() {
                    let mut untried = cur.available_moves();
                    // popped from the back, keep the same order as the other strategies
                    untried.reverse();
                    path.push(Frame {
                        puzzle: cur,
                        untried,
                    });
                }
            }
        }

        let frame = match path.last_mut() {
            Some(frame) => frame,
            None => break,
        };
        match frame.untried.pop() {
            Some(mov) => {
                if let Some(next) = frame.puzzle.go(mov) {
                    stats.add_created(next.depth());
                    candidate = Some(next);
                }
            }
            // dead end or all moves tried - backtrack
            None => {
                path.pop();
            }
        }
    }

    if minimum.is_finite() {
        SearchResult::Bound(minimum)
    } else {
        SearchResult::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Heuristic;
    use crate::level::Level;
    use crate::solver::StaticData;

    #[test]
    fn bound_reports() {
        let level: Level = r"
#######
#@ $ .#
#######"
            .parse()
            .unwrap();
        let sd = StaticData::new(&level.map, Heuristic::Manhattan);
        let initial = PuzzleState::new(&sd, &level.state);
        assert_eq!(initial.cost(), 2.0);

        // the only move is a step which doesn't lower the heuristic
        let mut stats = Stats::new();
        assert_eq!(
            bounded_search(&initial, 2.0, &mut stats, false),
            SearchResult::Bound(3.0)
        );
        let mut stats = Stats::new();
        assert_eq!(
            bounded_search(&initial, 1.0, &mut stats, false),
            SearchResult::Bound(2.0)
        );

        let mut stats = Stats::new();
        match bounded_search(&initial, 4.0, &mut stats, false) {
            SearchResult::Found(moves) => assert_eq!(moves.to_string(), "rRR"),
            other => panic!("Expected a solution, got {:?}", other),
        }
    }

    #[test]
    fn not_found_when_nothing_is_cut_off() {
        let level: Level = r"
#####
#$  #
# @.#
#####"
            .parse()
            .unwrap();
        let sd = StaticData::new(&level.map, Heuristic::Manhattan);
        let initial = PuzzleState::new(&sd, &level.state);

        let mut stats = Stats::new();
        assert_eq!(
            bounded_search(&initial, 1000.0, &mut stats, false),
            SearchResult::NotFound
        );
    }
}
