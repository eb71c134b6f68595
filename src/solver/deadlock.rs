use fnv::FnvHashMap;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Geometry;
use crate::vec2d::Vec2d;

#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn find_dead_ends(map: &Geometry) -> Vec2d<bool> {
    let safe = find_safe_space(map);

    let mut dead_ends = map.grid.scratchpad();
    for pos in map.grid.positions() {
        if !map.is_wall(pos) && !safe[pos] {
            dead_ends[pos] = true;
        }
    }
    dead_ends
}

/// Marks every cell from which a lone box can be pushed onto some goal.
///
/// Works backwards from the goals: a box can get from `next_pos` to `box_pos`
/// if neither `next` nor the cell behind it (where the player has to stand) is a wall.
fn find_safe_space(map: &Geometry) -> Vec2d<bool> {
    let mut safe = map.grid.scratchpad();

    // one shared visited grid is enough - once a cell is safe for one goal,
    // everything that leads to it has been or will be explored from it
    let mut to_visit = map.goals.clone();
    while let Some(box_pos) = to_visit.pop() {
        if safe[box_pos] {
            continue;
        }
        safe[box_pos] = true;

        for &dir in &DIRECTIONS {
            let next_pos = box_pos + dir;
            let player_pos = next_pos + dir;
            if map.is_wall(next_pos) || map.is_wall(player_pos) || safe[next_pos] {
                continue;
            }
            to_visit.push(next_pos);
        }
    }

    safe
}

/// Recomputes the frozen flag of the box at `box_pos`.
///
/// Returns true if the box can never move again and is not on a goal - the state is unsolvable.
/// Boxes missing from `frozen` count as movable.
pub(crate) fn check_frozen(
    map: &Geometry,
    dead_ends: &Vec2d<bool>,
    box_pos: Pos,
    frozen: &mut FnvHashMap<Pos, bool>,
) -> bool {
    let is_dead = |pos: Pos| dead_ends.get(pos).cloned().unwrap_or(false);
    let is_frozen = |pos: Pos| frozen.get(&pos).cloned().unwrap_or(false);
    let blocked_along = |dir: Dir| {
        let before = box_pos - dir;
        let after = box_pos + dir;
        map.is_wall(before)
            || map.is_wall(after)
            || (is_dead(before) && is_dead(after))
            || is_frozen(before)
            || is_frozen(after)
    };

    let horizontal_lock = blocked_along(Dir::Right);
    let vertical_lock = blocked_along(Dir::Down);

    let is_locked = horizontal_lock && vertical_lock;
    frozen.insert(box_pos, is_locked);
    is_locked && !map.is_goal(box_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    fn dead_ends_of(level: &str) -> String {
        let level: Level = level.parse().unwrap();
        find_dead_ends(&level.map).to_string()
    }

    #[test]
    fn dead_ends_corridor() {
        let level = r"
#####
##@##
##$##
#  .#
#####";
        let expected = r"
00000
00100
00000
01000
00000
"
        .trim_start_matches('\n');
        assert_eq!(dead_ends_of(level), expected);
    }

    #[test]
    fn dead_ends_room() {
        let level = r"
######
#@   #
# $  #
#   .#
######";
        // the top row and the left column can't be left once a box is there
        let expected = r"
000000
011110
010000
010000
000000
"
        .trim_start_matches('\n');
        assert_eq!(dead_ends_of(level), expected);
    }

    #[test]
    fn goals_are_never_dead() {
        let level = r"
#####
#.#@#
#.$ #
#####";
        let level: Level = level.parse().unwrap();
        let dead_ends = find_dead_ends(&level.map);
        for &goal in level.map.storage() {
            assert!(!dead_ends[goal]);
        }
        assert!(dead_ends[Pos::new(2, 3)]);
    }

    #[test]
    fn dead_ends_deterministic() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        let level: Level = level.parse().unwrap();
        let first = find_dead_ends(&level.map);
        let second = find_dead_ends(&level.map);
        assert_eq!(first, second);
        for pos in first.positions() {
            if level.map.is_wall(pos) {
                assert!(!first[pos]);
            }
        }
    }

    #[test]
    fn frozen_in_corner() {
        let level = r"
#####
#@  #
#  .#
#####";
        let level: Level = level.parse().unwrap();
        let dead_ends = find_dead_ends(&level.map);
        let mut frozen = FnvHashMap::default();

        // top right corner, not a goal
        let corner = Pos::new(1, 3);
        assert!(check_frozen(&level.map, &dead_ends, corner, &mut frozen));
        assert_eq!(frozen[&corner], true);

        // bottom right corner is a goal - frozen but fine
        let goal = Pos::new(2, 3);
        frozen.clear();
        assert!(!check_frozen(&level.map, &dead_ends, goal, &mut frozen));
        assert_eq!(frozen[&goal], true);
    }

    #[test]
    fn frozen_next_to_frozen_box() {
        let level = r"
######
#@   #
#    #
#  ..#
######";
        let level: Level = level.parse().unwrap();
        let dead_ends = find_dead_ends(&level.map);
        let mut frozen = FnvHashMap::default();

        // box on the goal in the corner is frozen
        let parked = Pos::new(3, 4);
        assert!(!check_frozen(&level.map, &dead_ends, parked, &mut frozen));
        // its left neighbor is locked horizontally by it and vertically by the wall
        let neighbor = Pos::new(3, 3);
        assert!(!check_frozen(&level.map, &dead_ends, neighbor, &mut frozen));
        assert_eq!(frozen[&neighbor], true);

        // a box in the middle of the room can still move
        let free = Pos::new(2, 2);
        assert!(!check_frozen(&level.map, &dead_ends, free, &mut frozen));
        assert_eq!(frozen[&free], false);
    }

    #[test]
    fn frozen_between_dead_squares() {
        let level = r"
#######
## . ##
#     #
#@    #
#######";
        let level: Level = level.parse().unwrap();
        let dead_ends = find_dead_ends(&level.map);
        assert!(dead_ends[Pos::new(1, 2)]);
        assert!(dead_ends[Pos::new(1, 4)]);
        let mut frozen = FnvHashMap::default();

        // neither side is a wall but the box could only be pushed onto a dead square
        let goal = Pos::new(1, 3);
        assert!(!check_frozen(&level.map, &dead_ends, goal, &mut frozen));
        assert_eq!(frozen[&goal], true);

        // one level lower the sides are live so it can still move
        let below = Pos::new(2, 3);
        assert!(!check_frozen(&level.map, &dead_ends, below, &mut frozen));
        assert_eq!(frozen[&below], false);
    }

    #[test]
    fn unknown_neighbors_are_movable() {
        let level = r"
######
#@   #
#    #
#  . #
######";
        let level: Level = level.parse().unwrap();
        let dead_ends = find_dead_ends(&level.map);
        let mut frozen = FnvHashMap::default();
        frozen.insert(Pos::new(3, 4), false);

        // wall below, right neighbor is a box but not frozen, left is free floor
        let pos = Pos::new(3, 3);
        assert!(!check_frozen(&level.map, &dead_ends, pos, &mut frozen));
        assert_eq!(frozen[&pos], false);
    }
}
