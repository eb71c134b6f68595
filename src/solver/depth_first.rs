use fnv::FnvHashSet;

use crate::config::Strategy;

use super::puzzle::PuzzleState;
use super::stats::Stats;
use super::SolverOk;

/// Plain DFS over the state graph, no guarantee about solution length.
pub(crate) fn search(initial: PuzzleState<'_>, print_status: bool) -> SolverOk {
    debug!("Depth-first search called");

    let mut stats = Stats::new();
    let mut visited = FnvHashSet::default();

    stats.add_created(initial.depth());
    let mut to_visit = vec![initial];

    while let Some(cur) = to_visit.pop() {
        if visited.contains(cur.key()) {
            stats.add_reached_duplicate(cur.depth());
            continue;
        }
        visited.insert(cur.key().clone());
        if stats.add_unique_visited(cur.depth()) && print_status {
            println!("Visited new depth: {}", cur.depth());
            println!("{:?}", stats);
        }

        if cur.is_goal() {
            debug!("Solved at depth {}", cur.depth());
            return SolverOk::new(Some(cur.into_moves()), stats, Strategy::DepthFirst);
        }
        if cur.is_deadlock() {
            continue;
        }

        // pushed in reverse so the stack pops them in the usual order
        for mov in cur.available_moves().into_iter().rev() {
            if let Some(next) = cur.go(mov) {
                stats.add_created(next.depth());
                to_visit.push(next);
            }
        }
    }

    SolverOk::new(None, stats, Strategy::DepthFirst)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Heuristic;
    use crate::level::Level;
    use crate::solver::StaticData;

    #[test]
    fn tries_up_first() {
        let level: Level = r"
#####
# . #
# $ #
# @ #
#####"
            .parse()
            .unwrap();
        let sd = StaticData::new(&level.map, Heuristic::Manhattan);
        let solution = search(PuzzleState::new(&sd, &level.state), false);
        assert_eq!(solution.moves.unwrap().to_string(), "U");
        assert_eq!(solution.stats.total_unique_visited(), 2);
    }
}
