use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fnv::FnvHashSet;

use crate::config::Strategy;

use super::puzzle::PuzzleState;
use super::stats::Stats;
use super::SolverOk;

/// A* - expands states in order of moves so far plus the heuristic estimate.
pub(crate) fn search(initial: PuzzleState<'_>, print_status: bool) -> SolverOk {
    debug!("Best-first search called");

    let mut stats = Stats::new();
    let mut visited = FnvHashSet::default();
    let mut to_visit = BinaryHeap::new();
    let mut created = 0;

    stats.add_created(initial.depth());
    to_visit.push(SearchNode::new(initial, created));

    while let Some(SearchNode { puzzle: cur, .. }) = to_visit.pop() {
        // a state can be queued multiple times, only the first (cheapest) one counts
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
            return SolverOk::new(Some(cur.into_moves()), stats, Strategy::BestFirst);
        }
        if cur.is_deadlock() {
            continue;
        }

        for mov in cur.available_moves() {
            if let Some(next) = cur.go(mov) {
                created += 1;
                stats.add_created(next.depth());
                to_visit.push(SearchNode::new(next, created));
            }
        }
    }

    SolverOk::new(None, stats, Strategy::BestFirst)
}

/// Ordered by cost, ties go to the state that was created first.
#[derive(Debug)]
struct SearchNode<'a> {
    puzzle: PuzzleState<'a>,
    cost: f64,
    seq: u64,
}

impl<'a> SearchNode<'a> {
    fn new(puzzle: PuzzleState<'a>, seq: u64) -> Self {
        let cost = puzzle.cost();
        Self { puzzle, cost, seq }
    }
}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}
