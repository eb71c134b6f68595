use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::map::Geometry;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    InvalidChar(char, usize, usize),
    MultipleRobots,
    NoRobot,
    TooManyBoxes { boxes: usize, storage: usize },
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::InvalidChar(ch, r, c) => {
                write!(f, "Invalid char `{}` found at pos: [{}, {}]", ch, r, c)
            }
            ParserErr::MultipleRobots => write!(f, "Only one robot can exist"),
            ParserErr::NoRobot => write!(f, "Robot does not exist"),
            ParserErr::TooManyBoxes { boxes, storage } => write!(
                f,
                "Too many boxes for the storage: {} boxes, {} storage cells",
                boxes, storage
            ),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the grid format: `#` obstacle, `@` robot, `$` box, `.` storage, space floor.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches(|c| c == '\n' || c == '\r');

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        let mut line_cells = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);

            let cell = match cur_char {
                '#' => MapCell::Wall,
                '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultipleRobots);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' => MapCell::Empty,
                _ => return Err(ParserErr::InvalidChar(cur_char, r, c)),
            };
            line_cells.push(cell);
        }
        grid.push(line_cells);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoRobot)?;
    if boxes.len() > goals.len() {
        return Err(ParserErr::TooManyBoxes {
            boxes: boxes.len(),
            storage: goals.len(),
        });
    }

    Ok(Level::new(
        Geometry::new(Vec2d::new(&grid), goals),
        State::new(player_pos, boxes),
    ))
}
