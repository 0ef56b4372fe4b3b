//! Latency vs. value size line chart.

use super::{Axis, AxisScale, ChartKind, ChartSpec, Series, group_by_workload, group_style};
use crate::format::format_bytes;
use crate::record::BenchmarkSample;

/// Output file name for the latency vs. value size chart.
pub const SIZE_FILE: &str = "grafica_exp1_latencia_vs_tamano.png";

/// Title of the latency vs. value size chart.
pub const SIZE_TITLE: &str = "Operation Latency vs. Value Size";

/// One line per workload, points ordered by value size, on a log-scale
/// x axis labelled in byte units.
pub fn latency_vs_size(samples: &[BenchmarkSample]) -> ChartSpec {
    let series = group_by_workload(samples)
        .into_iter()
        .enumerate()
        .map(|(idx, (label, members))| {
            let mut points: Vec<(f64, f64)> = members
                .iter()
                .map(|s| (s.value_size_bytes as f64, s.avg_latency_ms))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (color, marker) = group_style(idx);
            Series {
                label: label.to_string(),
                points,
                color,
                marker,
            }
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        title: SIZE_TITLE.to_string(),
        x_axis: Axis {
            scale: AxisScale::Logarithmic,
            tick_formatter: Some(format_bytes),
            ..Axis::new("Value Size (log scale)")
        },
        y_axis: Axis::new("Average Latency (ms)"),
        series,
        annotations: Vec::new(),
        legend_title: Some("Workload".to_string()),
        minor_grid: true,
        size_inches: (10.0, 7.0),
        file_name: SIZE_FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::sample;

    #[test]
    fn test_series_sorted_by_size() {
        let samples = vec![
            sample("GET", 4096, 0.4, 0.0, 0),
            sample("SET", 2048, 0.3, 0.0, 0),
            sample("GET", 1024, 0.2, 0.0, 0),
            sample("SET", 8192, 0.5, 0.0, 0),
        ];
        let spec = latency_vs_size(&samples);

        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].label, "GET");
        assert_eq!(spec.series[0].points, vec![(1024.0, 0.2), (4096.0, 0.4)]);
        assert_eq!(spec.series[1].label, "SET");
        assert_eq!(spec.series[1].points, vec![(2048.0, 0.3), (8192.0, 0.5)]);
    }

    #[test]
    fn test_log_axis_with_byte_ticks() {
        let spec = latency_vs_size(&[sample("GET", 1024, 0.2, 0.0, 0)]);
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.x_axis.scale, AxisScale::Logarithmic);
        assert_eq!(spec.y_axis.scale, AxisScale::Linear);
        let formatter = spec.x_axis.tick_formatter.unwrap();
        assert_eq!(formatter(1024.0 * 1024.0), "1 MB");
        assert_eq!(spec.file_name, SIZE_FILE);
    }

    #[test]
    fn test_distinct_styles_per_workload() {
        let samples = vec![sample("GET", 1, 0.1, 0.0, 0), sample("SET", 1, 0.1, 0.0, 0)];
        let spec = latency_vs_size(&samples);
        assert_ne!(spec.series[0].color, spec.series[1].color);
        assert_ne!(spec.series[0].marker, spec.series[1].marker);
    }
}
