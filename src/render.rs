//! Rendering of chart descriptions into raster images.
//!
//! The pipelines only depend on the [`Renderer`] trait. [`BitmapRenderer`]
//! implements it on top of plotters' bitmap backend.

use crate::chart::{Anchor, Axis, AxisScale, ChartKind, ChartSpec, Marker, Rgb, Series, TickFormatter};
use crate::error::RenderError;
use plotters::coord::Shift;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Draws a [`ChartSpec`] into an image file.
pub trait Renderer {
    /// Render `spec` to `path`, replacing any existing file.
    fn render(&self, spec: &ChartSpec, path: &Path) -> Result<(), RenderError>;
}

/// PNG renderer sized by figure inches and dots per inch.
#[derive(Debug, Clone, Copy)]
pub struct BitmapRenderer {
    dpi: u32,
}

impl Default for BitmapRenderer {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

// point sizes, scaled to pixels by dpi / 72
const TITLE_PT: f64 = 16.0;
const AXIS_DESC_PT: f64 = 12.0;
const TICK_PT: f64 = 10.0;
const ANNOTATION_PT: f64 = 10.0;
const MARKER_PT: f64 = 4.0;
const LINE_PT: f64 = 1.5;
const MARGIN_PT: f64 = 12.0;

impl BitmapRenderer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Image size in pixels for a figure of `inches`.
    pub fn pixel_size(&self, inches: (f64, f64)) -> (u32, u32) {
        let dpi = self.dpi as f64;
        ((inches.0 * dpi).round() as u32, (inches.1 * dpi).round() as u32)
    }

    fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }

    fn px_i32(&self, points: f64) -> i32 {
        self.px(points).round().max(1.0) as i32
    }

    fn font(&self, points: f64) -> FontDesc<'static> {
        ("sans-serif", self.px(points)).into_font()
    }

    /// Line and scatter charts: markers per series, lines for [`ChartKind::Line`].
    fn draw_xy<'a, X>(
        &self,
        spec: &ChartSpec,
        series: &[Series],
        mut chart: ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    ) -> Result<(), RenderError>
    where
        X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        let x_formatter = tick_formatter(spec.x_axis.tick_formatter);
        let y_formatter = tick_formatter(spec.y_axis.tick_formatter);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(&spec.x_axis.label)
            .y_desc(&spec.y_axis.label)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .axis_desc_style(self.font(AXIS_DESC_PT))
            .label_style(self.font(TICK_PT))
            .bold_line_style(BLACK.mix(0.2));
        if !spec.minor_grid {
            mesh.light_line_style(WHITE);
        }
        mesh.draw().map_err(drawing)?;

        let line_width = self.px_u32(LINE_PT);
        let marker_size = match spec.kind {
            ChartKind::Scatter => self.px_i32(1.5 * MARKER_PT),
            _ => self.px_i32(MARKER_PT),
        };
        let legend_width = self.px_i32(2.0 * AXIS_DESC_PT);

        if let Some(title) = &spec.legend_title {
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(drawing)?
                .label(title.as_str())
                .legend(|(x, y)| EmptyElement::at((x, y)));
        }

        for s in series {
            let color = rgb(s.color);
            let style = color.filled();
            let stroke = color.stroke_width(line_width);

            if spec.kind == ChartKind::Line {
                chart
                    .draw_series(LineSeries::new(s.points.iter().copied(), stroke))
                    .map_err(drawing)?;
            }

            let anno = match s.marker {
                Marker::Circle => {
                    chart.draw_series(s.points.iter().map(|p| Circle::new(*p, marker_size, style)))
                }
                Marker::Triangle => chart
                    .draw_series(s.points.iter().map(|p| TriangleMarker::new(*p, marker_size, style))),
                Marker::Cross => {
                    chart.draw_series(s.points.iter().map(|p| Cross::new(*p, marker_size, stroke)))
                }
                Marker::Square => chart.draw_series(s.points.iter().map(|p| {
                    EmptyElement::at(*p)
                        + Rectangle::new([(-marker_size, -marker_size), (marker_size, marker_size)], style)
                })),
            }
            .map_err(drawing)?
            .label(s.label.as_str());

            if spec.kind == ChartKind::Line {
                anno.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_width, y)], stroke));
                continue;
            }
            match s.marker {
                Marker::Circle => anno.legend(move |(x, y)| Circle::new((x, y), marker_size, style)),
                Marker::Triangle => anno.legend(move |(x, y)| TriangleMarker::new((x, y), marker_size, style)),
                Marker::Cross => anno.legend(move |(x, y)| Cross::new((x, y), marker_size, stroke)),
                Marker::Square => anno.legend(move |(x, y)| {
                    Rectangle::new([(x - marker_size, y - marker_size), (x + marker_size, y + marker_size)], style)
                }),
            };
        }

        let text_style = self.annotation_style();
        chart
            .draw_series(
                spec.annotations
                    .iter()
                    .map(|a| Text::new(a.text.clone(), (a.x, a.y), text_style.pos(anchor_pos(a.anchor)))),
            )
            .map_err(drawing)?;

        if spec.legend_title.is_some() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font(self.font(TICK_PT))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing)?;
        }

        Ok(())
    }

    fn draw_bar(
        &self,
        spec: &ChartSpec,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<(), RenderError> {
        let bars: Vec<(&str, f64, Rgb)> = spec
            .series
            .iter()
            .filter_map(|s| s.points.first().map(|p| (s.label.as_str(), p.1, s.color)))
            .collect();
        if bars.is_empty() {
            return Err(RenderError::NoData(spec.title.clone()));
        }

        let (y_lo, y_hi) = axis_bounds(&spec.y_axis, bars.iter().map(|b| b.1));
        // one segment per bar; a 0..count range would add an empty trailing slot
        let last = bars.len() as i32 - 1;

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, self.font(TITLE_PT))
            .margin(self.px_u32(MARGIN_PT))
            .x_label_area_size(self.px_u32(3.5 * AXIS_DESC_PT))
            .y_label_area_size(self.px_u32(4.5 * AXIS_DESC_PT))
            .build_cartesian_2d((0..last).into_segmented(), y_lo..y_hi)
            .map_err(drawing)?;

        let labels: Vec<&str> = bars.iter().map(|b| b.0).collect();
        let x_formatter = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(idx) => labels.get(*idx as usize).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        };
        let y_formatter = tick_formatter(spec.y_axis.tick_formatter);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .y_desc(&spec.y_axis.label)
            .axis_desc_style(self.font(AXIS_DESC_PT))
            .label_style(self.font(TICK_PT))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(WHITE)
            .draw()
            .map_err(drawing)?;

        let gap = self.px_u32(3.0 * AXIS_DESC_PT);
        chart
            .draw_series(bars.iter().enumerate().map(|(idx, (_, height, color))| {
                let idx = idx as i32;
                let end = if idx < last { SegmentValue::Exact(idx + 1) } else { SegmentValue::Last };
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(idx), 0.0), (end, *height)],
                    rgb(*color).filled(),
                );
                bar.set_margin(0, 0, gap, gap);
                bar
            }))
            .map_err(drawing)?;

        let text_style = self.annotation_style();
        chart
            .draw_series(spec.annotations.iter().map(|a| {
                Text::new(
                    a.text.clone(),
                    (SegmentValue::CenterOf(a.x.round() as i32), a.y),
                    text_style.pos(anchor_pos(a.anchor)),
                )
            }))
            .map_err(drawing)?;

        Ok(())
    }

    fn annotation_style(&self) -> TextStyle<'static> {
        TextStyle::from(self.font(ANNOTATION_PT)).color(&BLACK)
    }
}

impl Renderer for BitmapRenderer {
    fn render(&self, spec: &ChartSpec, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, self.pixel_size(spec.size_inches)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        if spec.kind == ChartKind::Bar {
            self.draw_bar(spec, &root)?;
        } else {
            let series = visible_series(spec);
            if series.iter().all(|s| s.points.is_empty()) {
                return Err(RenderError::NoData(spec.title.clone()));
            }

            // annotations sit to the right of their points, keep them in view
            let xs = series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.0))
                .chain(spec.annotations.iter().map(|a| a.x));
            let (x_lo, x_hi) = axis_bounds(&spec.x_axis, xs);
            let ys = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
            let (y_lo, y_hi) = axis_bounds(&spec.y_axis, ys);

            let mut builder = ChartBuilder::on(&root);
            builder
                .caption(&spec.title, self.font(TITLE_PT))
                .margin(self.px_u32(MARGIN_PT))
                .x_label_area_size(self.px_u32(3.5 * AXIS_DESC_PT))
                .y_label_area_size(self.px_u32(4.5 * AXIS_DESC_PT));

            match spec.x_axis.scale {
                AxisScale::Logarithmic => {
                    let chart = builder
                        .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)
                        .map_err(drawing)?;
                    self.draw_xy(spec, &series, chart)?;
                }
                AxisScale::Linear => {
                    let chart = builder
                        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                        .map_err(drawing)?;
                    self.draw_xy(spec, &series, chart)?;
                }
            }
        }

        root.present().map_err(drawing)?;
        Ok(())
    }
}

fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn anchor_pos(anchor: Anchor) -> Pos {
    match anchor {
        Anchor::Above => Pos::new(HPos::Center, VPos::Bottom),
        Anchor::Right => Pos::new(HPos::Left, VPos::Center),
    }
}

fn tick_formatter(formatter: Option<TickFormatter>) -> impl Fn(&f64) -> String {
    move |v: &f64| match formatter {
        Some(f) => f(*v),
        None => format_tick(*v),
    }
}

/// Plain numeric tick label without trailing zeros.
fn format_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Series with points that cannot be placed on a logarithmic x axis removed.
fn visible_series(spec: &ChartSpec) -> Vec<Series> {
    let log_x = spec.x_axis.scale == AxisScale::Logarithmic;
    spec.series
        .iter()
        .map(|s| {
            let points: Vec<(f64, f64)> = s
                .points
                .iter()
                .copied()
                .filter(|(x, _)| !log_x || *x > 0.0)
                .collect();
            if points.len() != s.points.len() {
                tracing::warn!(
                    series = %s.label,
                    dropped = s.points.len() - points.len(),
                    "dropping non-positive points on logarithmic axis"
                );
            }
            Series { points, ..s.clone() }
        })
        .collect()
}

/// Resolve the drawn range of `axis` from its fixed bounds and the data.
fn axis_bounds(axis: &Axis, values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (data_lo, data_hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let has_data = data_lo <= data_hi;

    let (lo, hi) = match axis.scale {
        AxisScale::Logarithmic => {
            let (lo, hi) = if has_data { (data_lo / 1.5, data_hi * 1.5) } else { (1.0, 10.0) };
            (axis.min.filter(|m| *m > 0.0).unwrap_or(lo), axis.max.unwrap_or(hi))
        }
        AxisScale::Linear => {
            let (lo, hi) = if has_data {
                let pad = ((data_hi - data_lo) * 0.05).max(data_hi.abs() * 0.05);
                let lo = if data_lo >= 0.0 { (data_lo - pad).max(0.0) } else { data_lo - pad };
                (lo, data_hi + pad)
            } else {
                (0.0, 1.0)
            };
            (axis.min.unwrap_or(lo), axis.max.unwrap_or(hi))
        }
    };

    if hi > lo {
        (lo, hi)
    } else if axis.scale == AxisScale::Logarithmic {
        (lo, lo * 10.0)
    } else {
        (lo, lo + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{cold_vs_hot, latency_vs_size, latency_vs_throughput, sample};

    fn axis(scale: AxisScale, min: Option<f64>, max: Option<f64>) -> Axis {
        Axis {
            scale,
            min,
            max,
            ..Axis::new("test")
        }
    }

    fn assert_png(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a png", path.display());
    }

    #[test]
    fn test_render_all_chart_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = BitmapRenderer::new(72);
        let samples = vec![
            sample("GET", 1024, 0.5, 1000.0, 1),
            sample("SET", 2048, 1.2, 1800.0, 8),
            sample("GET", 4096, 0.9, 2500.0, 8),
        ];

        for spec in [latency_vs_size(&samples), cold_vs_hot(11.0, 1.0), latency_vs_throughput(&samples)] {
            let path = dir.path().join(spec.file_name);
            renderer.render(&spec, &path).unwrap();
            assert_png(&path);
        }
    }

    #[test]
    fn test_zero_sizes_on_log_axis_are_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let spec = latency_vs_size(&[sample("GET", 0, 0.5, 0.0, 0), sample("SET", 0, 0.7, 0.0, 0)]);

        let err = BitmapRenderer::new(72)
            .render(&spec, &dir.path().join(spec.file_name))
            .unwrap_err();
        assert!(matches!(err, RenderError::NoData(_)), "{:?}", err);
    }

    #[test]
    fn test_fixed_bounds_win() {
        let bounds = axis_bounds(&axis(AxisScale::Linear, Some(0.0), Some(13.2)), [11.0, 1.0].into_iter());
        assert_eq!(bounds, (0.0, 13.2));
    }

    #[test]
    fn test_zero_anchored_axis_extends_over_data() {
        let (lo, hi) = axis_bounds(&axis(AxisScale::Linear, Some(0.0), None), [100.0, 200.0].into_iter());
        assert_eq!(lo, 0.0);
        assert!(hi > 200.0);
    }

    #[test]
    fn test_degenerate_ranges_widen() {
        assert_eq!(axis_bounds(&axis(AxisScale::Linear, Some(0.0), Some(0.0)), std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = axis_bounds(&axis(AxisScale::Logarithmic, None, None), [1024.0].into_iter());
        assert!(lo > 0.0 && lo < 1024.0 && hi > 1024.0);
    }

    #[test]
    fn test_pixel_size() {
        let renderer = BitmapRenderer::default();
        assert_eq!(renderer.pixel_size((10.0, 7.0)), (3000, 2100));
        assert_eq!(BitmapRenderer::new(100).pixel_size((8.0, 6.0)), (800, 600));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(1.5000001), "1.5");
    }
}
