use std::fmt::{self, Debug, Display, Formatter};

use crate::map::Geometry;
use crate::moves::Moves;
use crate::state::State;

/// Replays a solution from the initial state.
///
/// The first frame is the initial state, every other frame is prefixed
/// with the step number and the move that produced it.
pub struct SolutionFormatter<'a> {
    map: &'a Geometry,
    initial_state: &'a State,
    moves: &'a Moves,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(map: &'a Geometry, initial_state: &'a State, moves: &'a Moves) -> Self {
        Self {
            map,
            initial_state,
            moves,
        }
    }

    pub fn frames(&self) -> Vec<String> {
        let mut frames = vec![self.map.format_with_state(self.initial_state).to_string()];

        let mut last_state = self.initial_state.clone();
        for (step, &mov) in self.moves.iter().enumerate() {
            let new_player_pos = last_state.player_pos + mov.dir;
            // the moves come from the solver so they are not validated again
            let new_state = if last_state.has_box(new_player_pos) {
                last_state.with_push(new_player_pos, new_player_pos, new_player_pos + mov.dir)
            } else {
                State::new(new_player_pos, last_state.boxes.clone())
            };
            frames.push(format!(
                "STEP:{}  /  MOVE:{}\n{}",
                step + 1,
                mov,
                self.map.format_with_state(&new_state)
            ));
            last_state = new_state;
        }
        frames
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for frame in self.frames() {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
