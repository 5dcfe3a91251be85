//! Keyboard adjacency graphs used by the spatial matcher.
//!
//! Graphs are derived from textual layouts once per process. Every key maps
//! to its neighbouring keys in a fixed direction order, so a path through the
//! graph can count how often it changes direction.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use serde::Serialize;

const QWERTY: &[&str] = &[
    r#"`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+"#,
    r#"    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|"#,
    r#"     aA sS dD fF gG hH jJ kK lL ;: '""#,
    r#"      zZ xX cC vV bB nN mM ,< .> /?"#,
];

const DVORAK: &[&str] = &[
    r#"`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}"#,
    r#"    '" ,< .> pP yY fF gG cC rR lL /? =+ \|"#,
    r#"     aA oO eE uU iI dD hH tT nN sS -_"#,
    r#"      ;: qQ jJ kK xX bB mM wW vV zZ"#,
];

const KEYPAD: &[&str] = &[
    "  / * -",
    "7 8 9 +",
    "4 5 6",
    "1 2 3",
    "  0 .",
];

static GRAPHS: LazyLock<Vec<AdjacencyGraph>> = LazyLock::new(|| {
    vec![
        AdjacencyGraph::build(KeyboardLayout::Qwerty, QWERTY, true),
        AdjacencyGraph::build(KeyboardLayout::Dvorak, DVORAK, true),
        AdjacencyGraph::build(KeyboardLayout::Keypad, KEYPAD, false),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardLayout {
    Qwerty,
    Dvorak,
    Keypad,
}

#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    layout: KeyboardLayout,
    neighbors: HashMap<char, Vec<Option<String>>>,
    shifted: HashSet<char>,
    average_degree: f64,
}

impl AdjacencyGraph {
    /// Builds a graph from layout rows. Each key is a token of one or two
    /// characters (unshifted, shifted). Slanted layouts shift each row one
    /// key-width further right, like a typewriter keyboard; aligned layouts
    /// are a plain grid with diagonal neighbours.
    fn build(layout: KeyboardLayout, rows: &[&str], slanted: bool) -> Self {
        let mut positions: HashMap<(i32, i32), String> = HashMap::new();
        let mut shifted = HashSet::new();

        for (y, row) in rows.iter().enumerate() {
            let slant = if slanted { y } else { 0 };
            let mut column = 0;
            for token in row.split_whitespace() {
                let offset = row[column..].find(token).map(|o| o + column).unwrap_or(column);
                column = offset + token.len();
                let x_unit = token.chars().count() + 1;
                let x = (offset - slant) / x_unit;
                if let Some(shift) = token.chars().nth(1) {
                    shifted.insert(shift);
                }
                positions.insert((x as i32, y as i32), token.to_string());
            }
        }

        let mut neighbors = HashMap::new();
        let mut degree_sum = 0usize;
        for (&(x, y), token) in &positions {
            let adjacent: Vec<Option<String>> = adjacent_coords(x, y, slanted)
                .into_iter()
                .map(|coord| positions.get(&coord).cloned())
                .collect();
            for key in token.chars() {
                degree_sum += adjacent.iter().filter(|n| n.is_some()).count();
                neighbors.insert(key, adjacent.clone());
            }
        }

        let average_degree = if neighbors.is_empty() {
            0.0
        } else {
            degree_sum as f64 / neighbors.len() as f64
        };

        Self { layout, neighbors, shifted, average_degree }
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    /// Neighbouring key tokens of `key` in direction order, `None` where the
    /// layout has no key.
    pub fn neighbors(&self, key: char) -> Option<&[Option<String>]> {
        self.neighbors.get(&key).map(Vec::as_slice)
    }

    /// True if typing `key` needs the shift modifier on this layout.
    pub fn is_shifted(&self, key: char) -> bool {
        self.shifted.contains(&key)
    }

    /// Number of distinct characters a path may start from.
    pub fn starting_positions(&self) -> usize {
        self.neighbors.len()
    }

    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }
}

fn adjacent_coords(x: i32, y: i32, slanted: bool) -> Vec<(i32, i32)> {
    if slanted {
        vec![(x - 1, y), (x, y - 1), (x + 1, y - 1), (x + 1, y), (x, y + 1), (x - 1, y + 1)]
    } else {
        vec![
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    }
}

/// All keyboard graphs known to the spatial matcher.
pub fn adjacency_graphs() -> &'static [AdjacencyGraph] {
    &GRAPHS
}
