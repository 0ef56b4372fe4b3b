//! The three chart pipelines: load, aggregate, describe, write.
//!
//! Each pipeline is independent. A failure aborts only the chart it belongs
//! to; [`run_all`] reports it and moves on to the next one.

use crate::chart::{
    COLD_HOT_TITLE, SIZE_TITLE, THROUGHPUT_TITLE, cold_vs_hot, latency_vs_size,
    latency_vs_throughput,
};
use crate::config::Config;
use crate::error::ChartError;
use crate::loader::{load_latency_samples, load_size_samples, load_throughput_samples};
use crate::output::OutputWriter;
use crate::render::Renderer;
use crate::stats::mean;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Number of charts produced by [`run_all`].
pub const CHART_COUNT: usize = 3;

/// Mean cold and hot read latencies, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadMeans {
    pub cold_ms: f64,
    pub hot_ms: f64,
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ChartError>,
}

impl Summary {
    fn record(&mut self, result: Result<PathBuf, ChartError>) {
        match result {
            Ok(path) => self.written.push(path),
            Err(e) => self.failed.push(e),
        }
    }
}

/// Latency vs. value size chart from the size summary at `input`.
pub fn size_chart(
    input: &Path,
    writer: &OutputWriter,
    renderer: &dyn Renderer,
) -> Result<PathBuf, ChartError> {
    let samples = load_size_samples(input)?;
    if samples.is_empty() {
        return Err(ChartError::EmptyInput {
            path: input.to_path_buf(),
        });
    }
    writer.write(&latency_vs_size(&samples), renderer)
}

/// Mean latency of the raw cold and hot read files.
pub fn read_means(cold: &Path, hot: &Path) -> Result<ReadMeans, ChartError> {
    Ok(ReadMeans {
        cold_ms: mean_latency(cold)?,
        hot_ms: mean_latency(hot)?,
    })
}

fn mean_latency(path: &Path) -> Result<f64, ChartError> {
    let samples = load_latency_samples(path)?;
    mean(&samples, |s| s.latency_ms).map_err(|_| ChartError::EmptyInput {
        path: path.to_path_buf(),
    })
}

/// Cold vs. hot bar chart from already aggregated means.
pub fn cold_hot_chart(
    means: ReadMeans,
    writer: &OutputWriter,
    renderer: &dyn Renderer,
) -> Result<PathBuf, ChartError> {
    writer.write(&cold_vs_hot(means.cold_ms, means.hot_ms), renderer)
}

/// Latency vs. throughput scatter chart from the throughput summary at `input`.
pub fn throughput_chart(
    input: &Path,
    writer: &OutputWriter,
    renderer: &dyn Renderer,
) -> Result<PathBuf, ChartError> {
    let samples = load_throughput_samples(input)?;
    if samples.is_empty() {
        return Err(ChartError::EmptyInput {
            path: input.to_path_buf(),
        });
    }
    writer.write(&latency_vs_throughput(&samples), renderer)
}

/// Run every pipeline in order, writing status lines to `out`.
///
/// Per-chart failures are reported and collected, never propagated. The
/// only error returned is a failure to write to `out` itself.
pub fn run_all(config: &Config, renderer: &dyn Renderer, out: &mut dyn Write) -> io::Result<Summary> {
    let writer = OutputWriter::new(&config.output.dir);
    let mut summary = Summary::default();

    writeln!(out, "--- {} ---", SIZE_TITLE)?;
    let result = size_chart(&config.input.size_summary_path(), &writer, renderer);
    report(out, SIZE_TITLE, &result)?;
    summary.record(result);

    writeln!(out, "--- {} ---", COLD_HOT_TITLE)?;
    let result = match read_means(&config.input.cold_reads_path(), &config.input.hot_reads_path()) {
        Ok(means) => {
            writeln!(out, "cold reads: mean latency {:.4} ms", means.cold_ms)?;
            writeln!(out, "hot reads: mean latency {:.4} ms", means.hot_ms)?;
            cold_hot_chart(means, &writer, renderer)
        }
        Err(e) => Err(e),
    };
    report(out, COLD_HOT_TITLE, &result)?;
    summary.record(result);

    writeln!(out, "--- {} ---", THROUGHPUT_TITLE)?;
    let result = throughput_chart(&config.input.throughput_summary_path(), &writer, renderer);
    report(out, THROUGHPUT_TITLE, &result)?;
    summary.record(result);

    writeln!(out, "{} of {} charts written", summary.written.len(), CHART_COUNT)?;
    Ok(summary)
}

fn report(out: &mut dyn Write, chart: &str, result: &Result<PathBuf, ChartError>) -> io::Result<()> {
    match result {
        Ok(path) => {
            tracing::info!(chart, path = %path.display(), "chart saved");
            writeln!(out, "saved '{}'", path.display())
        }
        Err(e) => {
            tracing::warn!(chart, error = %e, "chart not produced");
            writeln!(out, "error: {} not produced: {}", chart, e)
        }
    }
}
