//! Cold vs. hot read latency bar chart.

use super::{Anchor, Annotation, Axis, ChartKind, ChartSpec, Marker, Rgb, Series};
use crate::format::format_latency_ms;

/// Output file name for the cold vs. hot read chart.
pub const COLD_HOT_FILE: &str = "grafica_exp2_frio_vs_caliente.png";

/// Title of the cold vs. hot read chart.
pub const COLD_HOT_TITLE: &str = "Latency Comparison: Cold vs. Hot Reads";

const COLD_COLOR: Rgb = Rgb(0x4c, 0x72, 0xb0);
const HOT_COLOR: Rgb = Rgb(0x55, 0xa8, 0x68);

/// Headroom above the tallest bar so its label is not clipped.
const Y_HEADROOM: f64 = 1.2;

/// Two bars, "cold" then "hot", each labelled with its mean latency.
pub fn cold_vs_hot(cold_mean_ms: f64, hot_mean_ms: f64) -> ChartSpec {
    let bars = [("cold", cold_mean_ms, COLD_COLOR), ("hot", hot_mean_ms, HOT_COLOR)];

    let series = bars
        .iter()
        .enumerate()
        .map(|(idx, (label, mean, color))| Series {
            label: label.to_string(),
            points: vec![(idx as f64, *mean)],
            color: *color,
            marker: Marker::Square,
        })
        .collect();

    let annotations = bars
        .iter()
        .enumerate()
        .map(|(idx, (_, mean, _))| Annotation {
            x: idx as f64,
            y: *mean,
            text: format_latency_ms(*mean),
            anchor: Anchor::Above,
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Bar,
        title: COLD_HOT_TITLE.to_string(),
        x_axis: Axis::new("Read"),
        y_axis: Axis {
            min: Some(0.0),
            max: Some(cold_mean_ms.max(hot_mean_ms) * Y_HEADROOM),
            ..Axis::new("Average Latency (ms)")
        },
        series,
        annotations,
        legend_title: None,
        minor_grid: false,
        size_inches: (8.0, 6.0),
        file_name: COLD_HOT_FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_hot_bars() {
        let spec = cold_vs_hot(11.0, 1.0);

        assert_eq!(spec.kind, ChartKind::Bar);
        let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["cold", "hot"]);
        assert_eq!(spec.series[0].points, vec![(0.0, 11.0)]);
        assert_eq!(spec.series[1].points, vec![(1.0, 1.0)]);

        let texts: Vec<&str> = spec.annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["11.000 ms", "1.000 ms"]);
        assert!(spec.annotations.iter().all(|a| a.anchor == Anchor::Above));
        assert_eq!(spec.annotations[0].y, 11.0);
    }

    #[test]
    fn test_y_axis_headroom() {
        let spec = cold_vs_hot(11.0, 1.0);
        assert_eq!(spec.y_axis.min, Some(0.0));
        let max = spec.y_axis.max.unwrap();
        assert!((max - 13.2).abs() < 1e-9, "{}", max);

        // headroom follows the larger bar even when hot is slower
        let spec = cold_vs_hot(2.0, 5.0);
        assert!((spec.y_axis.max.unwrap() - 6.0).abs() < 1e-9);
    }
}
