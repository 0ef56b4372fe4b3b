//! Renderer-agnostic chart descriptions.
//!
//! A [`ChartSpec`] is built once from loaded samples by one of the builders
//! below, handed to a [`Renderer`](crate::render::Renderer) and dropped. The
//! builders perform no I/O.

mod cold_hot;
mod size;
mod throughput;

pub use cold_hot::{COLD_HOT_FILE, COLD_HOT_TITLE, cold_vs_hot};
pub use size::{SIZE_FILE, SIZE_TITLE, latency_vs_size};
pub use throughput::{
    THROUGHPUT_FILE, THROUGHPUT_TITLE, annotation_offset, client_annotations, latency_vs_throughput,
};

use crate::record::BenchmarkSample;

/// Formats a raw axis value into a tick label.
pub type TickFormatter = fn(f64) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Lines through every point of a series, with point markers.
    Line,
    /// One bar per series, placed at the series' single point.
    Bar,
    /// Unconnected markers.
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
}

/// One chart axis. Unset bounds are derived from the data by the renderer.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    pub label: String,
    pub scale: AxisScale,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_formatter: Option<TickFormatter>,
}

impl Axis {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }
}

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
    Cross,
    Square,
}

/// A labelled group of points drawn with a single style.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub marker: Marker,
}

/// Where annotation text sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Horizontally centered, bottom edge on the point.
    Above,
    /// Left edge on the point, vertically centered.
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
}

/// Declarative description of one chart.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    /// Legend heading; no legend is drawn when unset.
    pub legend_title: Option<String>,
    /// Draw grid lines for minor ticks as well as major ones.
    pub minor_grid: bool,
    /// Figure size in inches (width, height).
    pub size_inches: (f64, f64),
    /// Fixed output file name for this chart type.
    pub file_name: &'static str,
}

const PALETTE: [Rgb; 10] = [
    Rgb(0x4c, 0x72, 0xb0),
    Rgb(0xdd, 0x84, 0x52),
    Rgb(0x55, 0xa8, 0x68),
    Rgb(0xc4, 0x4e, 0x52),
    Rgb(0x81, 0x72, 0xb3),
    Rgb(0x93, 0x78, 0x60),
    Rgb(0xda, 0x8b, 0xc3),
    Rgb(0x8c, 0x8c, 0x8c),
    Rgb(0xcc, 0xb9, 0x74),
    Rgb(0x64, 0xb5, 0xcd),
];

const MARKERS: [Marker; 4] = [Marker::Circle, Marker::Triangle, Marker::Cross, Marker::Square];

/// Visual style for the `idx`-th workload group.
pub fn group_style(idx: usize) -> (Rgb, Marker) {
    (PALETTE[idx % PALETTE.len()], MARKERS[idx % MARKERS.len()])
}

/// Group samples by workload, keeping groups in first-seen order and
/// samples within a group in input order.
pub fn group_by_workload(samples: &[BenchmarkSample]) -> Vec<(&str, Vec<&BenchmarkSample>)> {
    let mut groups: Vec<(&str, Vec<&BenchmarkSample>)> = Vec::new();
    for sample in samples {
        match groups.iter().position(|(label, _)| *label == sample.workload) {
            Some(idx) => groups[idx].1.push(sample),
            None => groups.push((sample.workload.as_str(), vec![sample])),
        }
    }
    groups
}

#[cfg(test)]
pub(crate) fn sample(workload: &str, size: u64, latency: f64, throughput: f64, clients: u32) -> BenchmarkSample {
    BenchmarkSample {
        workload: workload.to_string(),
        value_size_bytes: size,
        avg_latency_ms: latency,
        throughput_ops_s: throughput,
        num_clients: clients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_workload_first_seen_order() {
        let samples = vec![
            sample("SET", 1, 1.0, 0.0, 0),
            sample("GET", 2, 1.0, 0.0, 0),
            sample("SET", 3, 1.0, 0.0, 0),
            sample("MIXED", 4, 1.0, 0.0, 0),
        ];
        let groups = group_by_workload(&samples);
        let labels: Vec<&str> = groups.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["SET", "GET", "MIXED"]);
        let sizes: Vec<u64> = groups[0].1.iter().map(|s| s.value_size_bytes).collect();
        assert_eq!(sizes, vec![1, 3]);
    }

    #[test]
    fn test_group_style_cycles() {
        assert_eq!(group_style(0), group_style(20));
        assert_ne!(group_style(0).0, group_style(1).0);
        assert_ne!(group_style(0).1, group_style(1).1);
    }
}
