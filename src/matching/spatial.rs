//! Keyboard adjacency matcher - paths like `qwerty`, `zxcvfr` or `7896`.

use super::{Match, Pattern, SpatialPattern};
use crate::keyboard::{AdjacencyGraph, adjacency_graphs};

const MIN_PATH_LEN: usize = 3;

/// Finds substrings of three or more characters where each character sits
/// next to the previous one on a known keyboard layout. Every sub-path of a
/// walk is reported with its own turn and shift counts.
pub fn spatial_match(chars: &[char]) -> Vec<Match> {
    adjacency_graphs()
        .iter()
        .flat_map(|graph| spatial_match_graph(chars, graph))
        .collect()
}

/// `(direction, shifted)` for the move from `from` to `to`, if they are adjacent.
fn step(graph: &AdjacencyGraph, from: char, to: char) -> Option<(usize, bool)> {
    graph.neighbors(from)?.iter().enumerate().find_map(|(direction, key)| {
        let position = key.as_ref()?.chars().position(|k| k == to)?;
        Some((direction, position == 1))
    })
}

fn spatial_match_graph(chars: &[char], graph: &AdjacencyGraph) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut i = 0;

    while i + 1 < chars.len() {
        // steps[t] moves from chars[i + t] to chars[i + t + 1]
        let mut steps: Vec<(usize, bool)> = Vec::new();
        while let Some(next) = chars
            .get(i + steps.len() + 1)
            .and_then(|&to| step(graph, chars[i + steps.len()], to))
        {
            steps.push(next);
        }
        let end = i + steps.len() + 1;

        for from in i..end {
            let mut turns = 0;
            let mut shifted_count = usize::from(graph.is_shifted(chars[from]));
            let mut last_direction = None;
            for (to, &(direction, shifted)) in (from + 2..=end).zip(&steps[from - i..]) {
                if last_direction != Some(direction) {
                    turns += 1;
                    last_direction = Some(direction);
                }
                shifted_count += usize::from(shifted);
                if to - from >= MIN_PATH_LEN {
                    matches.push(Match::new(
                        from,
                        to,
                        chars[from..to].iter().collect(),
                        Pattern::Spatial(SpatialPattern {
                            graph: graph.layout(),
                            turns,
                            shifted_count,
                        }),
                    ));
                }
            }
        }
        i = end;
    }

    matches
}
