//! Kvbench Charts - comparison charts from key-value store benchmark results.
//!
//! Reads the CSV summaries a benchmark run leaves behind and renders three
//! fixed PNG charts: latency vs. value size, cold vs. hot read latency, and
//! latency vs. throughput.

pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod stats;

pub mod logging;

pub use config::Config;
pub use error::{ChartError, RenderError};
pub use pipeline::run_all;
