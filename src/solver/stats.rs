use std::fmt::{self, Debug, Display, Formatter};

use prettytable::{format, Cell, Row, Table};
use separator::Separatable;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    visited_states: Vec<i32>,
    duplicate_states: Vec<i32>,
    iterations: i32,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum::<i32>()
    }

    pub fn total_unique_visited(&self) -> i32 {
        self.visited_states.iter().sum::<i32>()
    }

    pub fn total_reached_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum::<i32>()
    }

    /// Number of bounded passes, only counted by iterative deepening. Zero for the other strategies.
    pub fn iterations(&self) -> i32 {
        self.iterations
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique_visited(&mut self, depth: u32) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Returns true if this is the first state at that depth.
    fn add(counts: &mut Vec<i32>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because some depths might be skipped (e.g. only duplicates reached)
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates", "Unknown (not reached)"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));

        // created_states should be the longest vec
        for (depth, &created) in self.created_states.iter().enumerate() {
            let visited = self.visited_states.get(depth).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(depth).cloned().unwrap_or(0);
            let left = created - visited - duplicates;
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&created.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        let left = created - visited - duplicates;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        if self.iterations > 1 {
            writeln!(f, "Iterations: {}", self.iterations)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_by_depth() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(stats.add_created(2));
        assert!(!stats.add_created(1));
        assert!(!stats.add_created(2));
        assert!(stats.add_unique_visited(0));
        assert!(stats.add_reached_duplicate(2));

        assert_eq!(stats.total_created(), 4);
        assert_eq!(stats.total_unique_visited(), 1);
        assert_eq!(stats.total_reached_duplicates(), 1);
        assert_eq!(stats.iterations(), 0);
    }

    #[test]
    fn formatting() {
        let mut stats = Stats::new();
        for _ in 0..1500 {
            stats.add_created(1);
        }
        stats.add_created(0);
        stats.add_unique_visited(0);
        stats.add_unique_visited(1);

        let debug = format!("{:?}", stats);
        assert!(debug.contains("1,501"));

        let display = stats.to_string();
        assert!(display.contains("States created total: 1,501"));
        assert!(display.contains("Unique visited total: 2"));
        assert!(display.contains("Created but not reached total: 1,499"));
        assert!(display.contains("Unknown (not reached)"));
        assert!(!display.contains("Iterations"));
    }
}
