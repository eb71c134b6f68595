// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;
pub mod state;

mod fs;
mod parser;
mod vec2d;

use std::error::Error;

use crate::config::{Heuristic, Strategy};
use crate::level::Level;
use crate::solver::SolverOk;

pub use crate::parser::ParserErr;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    /// Never fails - an unsolvable level is reported as `SolverOk` with no moves.
    fn solve(&self, strategy: Strategy, heuristic: Heuristic, print_status: bool) -> SolverOk;
}
