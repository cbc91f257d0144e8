// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-runtime chart colours.
//!
//! Known runtimes get a fixed colour. Every other label takes the next
//! entry of a qualitative cycle in the order labels are first seen, so a
//! label keeps one colour across all charts of a run.

use plotters::style::{Palette, Palette99, RGBColor};

/// Fixed colours for the runtimes the benchmark suite ships with.
const KNOWN: &[(&str, RGBColor)] = &[
    ("rust", RGBColor(222, 165, 132)),
    ("go", RGBColor(0, 173, 216)),
    ("node", RGBColor(104, 160, 99)),
    ("dotnet-jit", RGBColor(81, 43, 212)),
    ("dotnet-aot", RGBColor(148, 103, 189)),
];

fn known_color(label: &str) -> Option<RGBColor> {
    KNOWN
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, color)| *color)
}

fn cycle_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// Label to colour assignment for one run, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: Vec<(String, RGBColor)>,
    unknown_seen: usize,
}

impl ColorMap {
    /// Build a map from labels in the order they are first encountered.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for label in labels {
            map.insert(label.as_ref());
        }
        map
    }

    fn insert(&mut self, label: &str) {
        if self.entries.iter().any(|(l, _)| l == label) {
            return;
        }
        let color = known_color(label).unwrap_or_else(|| {
            let color = cycle_color(self.unknown_seen);
            self.unknown_seen += 1;
            color
        });
        self.entries.push((label.to_string(), color));
    }

    /// Colour for `label`. Labels not in the map get the cycle colour they
    /// would receive if appended now.
    pub fn color(&self, label: &str) -> RGBColor {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, color)| *color)
            .or_else(|| known_color(label))
            .unwrap_or_else(|| cycle_color(self.unknown_seen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_fixed() {
        let map = ColorMap::from_labels(["go", "Rust"]);
        assert_eq!(map.color("go"), RGBColor(0, 173, 216));
        assert_eq!(map.color("Rust"), RGBColor(222, 165, 132));
    }

    #[test]
    fn test_unknown_labels_cycle_in_first_seen_order() {
        let map = ColorMap::from_labels(["zig", "go", "java", "zig"]);
        assert_eq!(map.entries.len(), 3);
        assert_eq!(map.color("zig"), cycle_color(0));
        assert_eq!(map.color("java"), cycle_color(1));
    }

    #[test]
    fn test_same_label_same_color_across_calls() {
        let map = ColorMap::from_labels(["a", "b", "c"]);
        assert_eq!(map.color("b"), map.color("b"));
        assert_ne!(map.color("a"), map.color("b"));
    }

    #[test]
    fn test_cycle_wraps() {
        let n = Palette99::COLORS.len();
        assert_eq!(cycle_color(n + 2), cycle_color(2));
    }
}
