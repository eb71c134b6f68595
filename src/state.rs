use crate::data::Pos;

/// Identifies a search node regardless of how it was reached.
///
/// Boxes are kept sorted so that two placements which only differ in box order
/// compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { player_pos, boxes }
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Returns a new state with the box at `from` moved to `to` and the player at `player_pos`.
    pub(crate) fn with_push(&self, player_pos: Pos, from: Pos, to: Pos) -> State {
        let mut boxes = self.boxes.clone();
        if let Ok(index) = boxes.binary_search(&from) {
            boxes.remove(index);
        }
        let index = boxes.binary_search(&to).unwrap_or_else(|index| index);
        boxes.insert(index, to);
        State { player_pos, boxes }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn box_order_is_irrelevant() {
        let a = State::new(Pos::new(1, 1), vec![Pos::new(2, 2), Pos::new(1, 3)]);
        let b = State::new(Pos::new(1, 1), vec![Pos::new(1, 3), Pos::new(2, 2)]);
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));

        let c = State::new(Pos::new(1, 2), vec![Pos::new(1, 3), Pos::new(2, 2)]);
        assert_ne!(a, c);
    }

    #[test]
    fn pushing_keeps_sorted() {
        let state = State::new(Pos::new(1, 1), vec![Pos::new(1, 2), Pos::new(3, 3)]);
        let pushed = state.with_push(Pos::new(1, 2), Pos::new(1, 2), Pos::new(4, 0));
        assert_eq!(pushed.boxes, vec![Pos::new(3, 3), Pos::new(4, 0)]);
        assert!(pushed.has_box(Pos::new(4, 0)));
        assert!(!pushed.has_box(Pos::new(1, 2)));
    }
}
