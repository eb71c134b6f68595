use std::fmt::{self, Debug, Formatter};

use fnv::FnvHashMap;

use crate::config::Heuristic;
use crate::data::{Pos, DIRECTIONS};
use crate::map::Geometry;
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::vec2d::Vec2d;

use super::deadlock::{check_frozen, find_dead_ends};

/// Everything that stays the same for the whole search.
/// Computed once per level and borrowed by every `PuzzleState`.
pub struct StaticData<'a> {
    pub(crate) map: &'a Geometry,
    pub(crate) dead_ends: Vec2d<bool>,
    pub(crate) heuristic: Heuristic,
}

impl<'a> StaticData<'a> {
    pub fn new(map: &'a Geometry, heuristic: Heuristic) -> Self {
        debug!("Finding dead ends");
        let dead_ends = find_dead_ends(map);
        debug!("Dead ends:\n{}", dead_ends);
        StaticData {
            map,
            dead_ends,
            heuristic,
        }
    }

    pub fn is_dead_end(&self, pos: Pos) -> bool {
        self.dead_ends.get(pos).cloned().unwrap_or(false)
    }
}

impl Debug for StaticData<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "heuristic: {}", self.heuristic)?;
        writeln!(f, "{:?}", self.map)?;
        write!(f, "{}", self.dead_ends)
    }
}

/// A node of the search graph.
///
/// Never modified after creation - `go` builds a new one. Boxes, frozen flags and the
/// moves so far are owned, the map and dead ends are shared through `sd`.
#[derive(Clone)]
pub struct PuzzleState<'a> {
    sd: &'a StaticData<'a>,
    state: State,
    frozen: FnvHashMap<Pos, bool>,
    moves: Moves,
    depth: u32,
}

impl<'a> PuzzleState<'a> {
    pub fn new(sd: &'a StaticData<'a>, state: &State) -> Self {
        let frozen = state.boxes.iter().map(|&b| (b, false)).collect();
        PuzzleState {
            sd,
            state: State::new(state.player_pos, state.boxes.clone()),
            frozen,
            moves: Moves::default(),
            depth: 0,
        }
    }

    /// Canonical key for duplicate detection - independent of the path that led here.
    pub fn key(&self) -> &State {
        &self.state
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn moves(&self) -> &Moves {
        &self.moves
    }

    pub fn into_moves(self) -> Moves {
        self.moves
    }

    pub fn available_moves(&self) -> Vec<Move> {
        let map = self.sd.map;
        let mut moves = Vec::new();

        for &dir in &DIRECTIONS {
            let new_player_pos = self.state.player_pos + dir;
            if map.is_wall(new_player_pos) {
                continue;
            }

            if self.state.has_box(new_player_pos) {
                let push_dest = new_player_pos + dir;
                if !map.is_wall(push_dest) && !self.state.has_box(push_dest) {
                    moves.push(Move::new(dir, true));
                }
            } else {
                moves.push(Move::new(dir, false));
            }
        }

        moves
    }

    /// Returns `None` if the move freezes a box outside of a goal.
    ///
    /// `mov` must come from `available_moves` of this state.
    pub fn go(&self, mov: Move) -> Option<PuzzleState<'a>> {
        let new_player_pos = self.state.player_pos + mov.dir;
        debug_assert_eq!(mov.is_push, self.state.has_box(new_player_pos));

        let mut frozen = self.frozen.clone();
        let state = if mov.is_push {
            let push_dest = new_player_pos + mov.dir;

            let was_frozen = frozen.remove(&new_player_pos).unwrap_or(false);
            frozen.insert(push_dest, was_frozen);
            if check_frozen(self.sd.map, &self.sd.dead_ends, push_dest, &mut frozen) {
                trace!("Frozen box at {:?} after {}{}", push_dest, self.moves, mov);
                return None;
            }

            self.state.with_push(new_player_pos, new_player_pos, push_dest)
        } else {
            State {
                player_pos: new_player_pos,
                boxes: self.state.boxes.clone(),
            }
        };

        let mut moves = self.moves.clone();
        moves.add(mov);

        Some(PuzzleState {
            sd: self.sd,
            state,
            frozen,
            moves,
            depth: self.depth + 1,
        })
    }

    pub fn is_goal(&self) -> bool {
        // all boxes on goals, there may be more goals than boxes
        self.state.boxes.iter().all(|&b| self.sd.map.is_goal(b))
    }

    pub fn is_deadlock(&self) -> bool {
        self.state.boxes.iter().any(|&b| self.sd.is_dead_end(b))
    }

    pub fn is_frozen(&self, box_pos: Pos) -> bool {
        self.frozen.get(&box_pos).cloned().unwrap_or(false)
    }

    /// Sum of distances from each box to its closest goal.
    ///
    /// Boxes can share the same closest goal so with more than one box
    /// this can overestimate.
    pub fn heuristic(&self) -> f64 {
        let goals = &self.sd.map.goals;
        let closest = |box_pos: Pos| -> f64 {
            match self.sd.heuristic {
                Heuristic::Manhattan => goals
                    .iter()
                    .map(|&goal| box_pos.dist_manhattan(goal))
                    .min()
                    .map_or(0.0, f64::from),
                Heuristic::Euclidean => goals
                    .iter()
                    .map(|&goal| box_pos.dist_euclidean(goal))
                    .fold(None, |min: Option<f64>, dist| {
                        Some(min.map_or(dist, |min| min.min(dist)))
                    })
                    .unwrap_or(0.0),
            }
        };
        self.state.boxes.iter().map(|&b| closest(b)).sum()
    }

    /// Moves taken plus the estimate of moves left.
    pub fn cost(&self) -> f64 {
        f64::from(self.depth) + self.heuristic()
    }
}

impl Debug for PuzzleState<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "depth: {}, moves: {}", self.depth, self.moves)?;
        write!(f, "{}", self.sd.map.format_with_state(&self.state))
    }
}
