use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    DepthFirst,
    BestFirst,
    IterativeDeepening,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::DepthFirst => write!(f, "depth-first"),
            Strategy::BestFirst => write!(f, "best-first"),
            Strategy::IterativeDeepening => write!(f, "iterative-deepening"),
        }
    }
}

/// Distance used to estimate how far each box is from the nearest storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Manhattan,
    Euclidean,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Manhattan
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(ConfigErr::UnknownHeuristic(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErr {
    UnknownHeuristic(String),
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigErr::UnknownHeuristic(ref name) => {
                write!(f, "Undefined heuristic function `{}`", name)
            }
        }
    }
}

impl Error for ConfigErr {}
