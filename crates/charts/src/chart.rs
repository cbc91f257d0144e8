// Copyright 2025 WebAPI Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart rendering.
//!
//! Bar charts compare one report metric across runtimes, ordered so the
//! better result is leftmost. Line charts plot resource samples over
//! elapsed time, one line per runtime. Every chart is written as a single
//! SVG file, replacing any previous file of the same name.

use crate::error::{ChartError, Result};
use crate::palette::ColorMap;
use crate::result::{Metrics, ResourceSeries, ResultEntry};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

const TITLE_FONT_SIZE: u32 = 32;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;
const DATA_LABEL_FONT_SIZE: u32 = 14;

/// Bar width as a fraction of one category slot.
const BAR_WIDTH: f64 = 0.7;

/// Headroom above the tallest bar or line for annotations.
const Y_HEADROOM: f64 = 1.15;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// The report metrics charted as bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarChart {
    /// Requests per second, higher is better.
    Throughput,
    /// Mean latency, lower is better.
    MeanLatency,
    /// p99 latency, lower is better.
    P99Latency,
}

impl BarChart {
    /// All bar charts, in the order a run writes them.
    pub const ALL: [BarChart; 3] = [Self::Throughput, Self::MeanLatency, Self::P99Latency];

    /// Output filename.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Throughput => "webapi_rps.svg",
            Self::MeanLatency => "webapi_latency_mean.svg",
            Self::P99Latency => "webapi_latency_p99.svg",
        }
    }

    /// Chart caption.
    pub fn title(self) -> &'static str {
        match self {
            Self::Throughput => "Web API Throughput",
            Self::MeanLatency => "Web API Latency - Mean",
            Self::P99Latency => "Web API Latency - p99",
        }
    }

    /// Y axis description.
    pub fn y_desc(self) -> &'static str {
        match self {
            Self::Throughput => "Requests/sec (higher is better)",
            Self::MeanLatency => "Mean latency (ms, lower is better)",
            Self::P99Latency => "p99 latency (ms, lower is better)",
        }
    }

    fn value(self, metrics: &Metrics) -> f64 {
        match self {
            Self::Throughput => metrics.rps,
            Self::MeanLatency => metrics.mean_latency_ms,
            Self::P99Latency => metrics.p99_latency_ms,
        }
    }

    fn higher_is_better(self) -> bool {
        matches!(self, Self::Throughput)
    }

    /// (label, value) bars in display order, best first.
    ///
    /// The sort is stable, so ties keep discovery order.
    pub fn bars(self, entries: &[ResultEntry]) -> Vec<(String, f64)> {
        let mut bars: Vec<(String, f64)> = entries
            .iter()
            .map(|e| (e.label.clone(), self.value(&e.metrics)))
            .collect();
        if self.higher_is_better() {
            bars.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        } else {
            bars.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        }
        bars
    }
}

/// The resource samples charted as lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChart {
    /// CPU percent over time.
    Cpu,
    /// Memory megabytes over time.
    Memory,
}

impl LineChart {
    /// All line charts, in the order a run writes them.
    pub const ALL: [LineChart; 2] = [Self::Cpu, Self::Memory];

    /// Output filename.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Cpu => "webapi_cpu.svg",
            Self::Memory => "webapi_memory.svg",
        }
    }

    /// Chart caption.
    pub fn title(self) -> &'static str {
        match self {
            Self::Cpu => "Web API CPU Usage",
            Self::Memory => "Web API Memory Usage",
        }
    }

    /// Y axis description.
    pub fn y_desc(self) -> &'static str {
        match self {
            Self::Cpu => "CPU (%)",
            Self::Memory => "Memory (MB)",
        }
    }

    /// (label, values by elapsed second) per series, in discovery order.
    pub fn series(self, resources: &[ResourceSeries]) -> Vec<(String, Vec<f64>)> {
        resources
            .iter()
            .map(|r| {
                let values = match self {
                    Self::Cpu => r.cpu(),
                    Self::Memory => r.memory(),
                };
                (r.label.clone(), values)
            })
            .collect()
    }
}

/// Format a bar annotation.
pub fn format_value(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_error(path: &Path) -> impl FnOnce(Box<dyn Error>) -> ChartError + '_ {
    move |e| ChartError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn y_range_max(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * Y_HEADROOM
    } else {
        1.0
    }
}

/// Label of the bar whose slot is centred on `x`, or empty between slots.
fn slot_label(bars: &[(String, f64)], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    bars.get(idx as usize)
        .map(|(label, _)| label.clone())
        .unwrap_or_default()
}

/// Draw one bar chart to `path`.
pub fn draw_bar_chart(
    path: &Path,
    kind: BarChart,
    bars: &[(String, f64)],
    colors: &ColorMap,
    size: (u32, u32),
) -> Result<()> {
    render_bars(path, kind, bars, colors, size).map_err(render_error(path))
}

fn render_bars(
    path: &Path,
    kind: BarChart,
    bars: &[(String, f64)],
    colors: &ColorMap,
    size: (u32, u32),
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let slots = bars.len().max(1);
    let max_value = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let y_max = y_range_max(max_value);

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5..(slots as f64 - 0.5), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|x| slot_label(bars, *x))
        .y_desc(kind.y_desc())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (idx, (label, value)) in bars.iter().enumerate() {
        let x = idx as f64;
        let color = colors.color(label);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, *value)],
            color.filled(),
        )))?;

        chart.draw_series(std::iter::once(Text::new(
            format_value(*value),
            (x, *value + y_max * 0.01),
            ("sans-serif", DATA_LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Draw one line chart to `path`.
pub fn draw_line_chart(
    path: &Path,
    kind: LineChart,
    series: &[(String, Vec<f64>)],
    colors: &ColorMap,
    size: (u32, u32),
) -> Result<()> {
    render_lines(path, kind, series, colors, size).map_err(render_error(path))
}

fn render_lines(
    path: &Path,
    kind: LineChart,
    series: &[(String, Vec<f64>)],
    colors: &ColorMap,
    size: (u32, u32),
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let longest = series.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let x_max = longest.saturating_sub(1).max(1) as f64;
    let max_value = series
        .iter()
        .flat_map(|(_, v)| v.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = y_range_max(max_value);

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Elapsed (s)")
        .y_desc(kind.y_desc())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (label, values) in series {
        if values.is_empty() {
            continue;
        }
        let color = colors.color(label);
        let points = values.iter().enumerate().map(|(i, v)| (i as f64, *v));

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ResourceSample;

    fn entry(label: &str, rps: f64, mean: f64, p99: f64) -> ResultEntry {
        ResultEntry::new(
            label,
            Metrics {
                rps,
                mean_latency_ms: mean,
                p99_latency_ms: p99,
            },
        )
    }

    fn labels(bars: &[(String, f64)]) -> Vec<&str> {
        bars.iter().map(|(l, _)| l.as_str()).collect()
    }

    #[test]
    fn test_throughput_descending() {
        let entries = vec![
            entry("a", 10.0, 5.0, 0.0),
            entry("b", 30.0, 1.0, 0.0),
            entry("c", 20.0, 3.0, 0.0),
        ];
        let bars = BarChart::Throughput.bars(&entries);
        assert_eq!(labels(&bars), vec!["b", "c", "a"]);
        assert_eq!(bars[0].1, 30.0);
    }

    #[test]
    fn test_latency_ascending() {
        let entries = vec![
            entry("a", 10.0, 5.0, 50.0),
            entry("b", 30.0, 1.0, 10.0),
            entry("c", 20.0, 3.0, 30.0),
        ];
        assert_eq!(labels(&BarChart::MeanLatency.bars(&entries)), vec!["b", "c", "a"]);
        assert_eq!(labels(&BarChart::P99Latency.bars(&entries)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let entries = vec![entry("x", 0.0, 0.0, 0.0), entry("y", 0.0, 0.0, 0.0)];
        assert_eq!(labels(&BarChart::Throughput.bars(&entries)), vec!["x", "y"]);
        assert_eq!(labels(&BarChart::MeanLatency.bars(&entries)), vec!["x", "y"]);
    }

    #[test]
    fn test_line_series_values() {
        let resources = vec![ResourceSeries::new(
            "go",
            vec![
                ResourceSample { cpu_percent: 1.0, memory_mb: 10.0 },
                ResourceSample { cpu_percent: 2.0, memory_mb: 20.0 },
            ],
        )];
        assert_eq!(
            LineChart::Cpu.series(&resources),
            vec![("go".to_string(), vec![1.0, 2.0])]
        );
        assert_eq!(LineChart::Memory.series(&resources)[0].1, vec![10.0, 20.0]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(15234.7), "15235");
        assert_eq!(format_value(3.256), "3.26");
        assert_eq!(format_value(0.0), "0.00");
    }

    #[test]
    fn test_slot_label() {
        let bars = vec![("a".to_string(), 1.0), ("b".to_string(), 2.0)];
        assert_eq!(slot_label(&bars, 0.0), "a");
        assert_eq!(slot_label(&bars, 1.05), "b");
        assert_eq!(slot_label(&bars, 0.5), "");
        assert_eq!(slot_label(&bars, -0.5), "");
        assert_eq!(slot_label(&bars, 2.0), "");
    }

    #[test]
    fn test_draw_bar_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BarChart::Throughput.file_name());
        let bars = vec![("rust".to_string(), 1200.0), ("go".to_string(), 900.0)];
        let colors = ColorMap::from_labels(["rust", "go"]);

        draw_bar_chart(&path, BarChart::Throughput, &bars, &colors, (800, 600)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Web API Throughput"));
        assert!(svg.contains("1200"));
    }

    #[test]
    fn test_draw_empty_charts() {
        let dir = tempfile::tempdir().unwrap();
        let colors = ColorMap::default();

        let bar_path = dir.path().join("empty_bar.svg");
        draw_bar_chart(&bar_path, BarChart::MeanLatency, &[], &colors, (640, 480)).unwrap();
        assert!(bar_path.exists());

        let line_path = dir.path().join("empty_line.svg");
        draw_line_chart(&line_path, LineChart::Cpu, &[], &colors, (640, 480)).unwrap();
        assert!(line_path.exists());
    }
}
