//! Latency vs. throughput scatter chart.

use super::{Anchor, Annotation, Axis, ChartKind, ChartSpec, Series, group_by_workload, group_style};
use crate::format::format_clients;
use crate::record::BenchmarkSample;

/// Output file name for the latency vs. throughput chart.
pub const THROUGHPUT_FILE: &str = "grafica_exp3_latencia_vs_throughput.png";

/// Title of the latency vs. throughput chart.
pub const THROUGHPUT_TITLE: &str = "System Performance: Latency vs. Throughput";

/// Fraction of the peak throughput used to shift labels off their marker.
const LABEL_OFFSET_FRACTION: f64 = 0.01;

/// Horizontal label offset: 1% of the highest throughput in `samples`.
pub fn annotation_offset(samples: &[BenchmarkSample]) -> f64 {
    let max = samples
        .iter()
        .map(|s| s.throughput_ops_s)
        .fold(0.0_f64, f64::max);
    max * LABEL_OFFSET_FRACTION
}

/// One "<clients>c" label per sample, in input order, to the right of its point.
pub fn client_annotations(samples: &[BenchmarkSample]) -> Vec<Annotation> {
    let offset = annotation_offset(samples);
    samples
        .iter()
        .map(|s| Annotation {
            x: s.throughput_ops_s + offset,
            y: s.avg_latency_ms,
            text: format_clients(s.num_clients),
            anchor: Anchor::Right,
        })
        .collect()
}

/// One point per sample, grouped by workload, with both axes starting at zero.
pub fn latency_vs_throughput(samples: &[BenchmarkSample]) -> ChartSpec {
    let series = group_by_workload(samples)
        .into_iter()
        .enumerate()
        .map(|(idx, (label, members))| {
            let (color, marker) = group_style(idx);
            Series {
                label: label.to_string(),
                points: members
                    .iter()
                    .map(|s| (s.throughput_ops_s, s.avg_latency_ms))
                    .collect(),
                color,
                marker,
            }
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Scatter,
        title: THROUGHPUT_TITLE.to_string(),
        x_axis: Axis {
            min: Some(0.0),
            ..Axis::new("Throughput (ops/s)")
        },
        y_axis: Axis {
            min: Some(0.0),
            ..Axis::new("Average Latency (ms)")
        },
        series,
        annotations: client_annotations(samples),
        legend_title: Some("Workload".to_string()),
        minor_grid: false,
        size_inches: (12.0, 8.0),
        file_name: THROUGHPUT_FILE,
    }
}
