//! Typed benchmark records and the CSV row schemas they are parsed from.

use serde::Deserialize;

/// One summarized benchmark run.
///
/// The size experiment does not report throughput or client counts; those
/// fields are zero for samples loaded from that file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSample {
    pub workload: String,
    pub value_size_bytes: u64,
    pub avg_latency_ms: f64,
    pub throughput_ops_s: f64,
    pub num_clients: u32,
}

/// One raw read latency from the cold or hot read experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySample {
    pub latency_ms: f64,
}

/// A CSV row schema: the columns it needs and how it becomes a record.
pub trait Row: for<'de> Deserialize<'de> {
    type Record;

    /// Column names that must be present in the header.
    const COLUMNS: &'static [&'static str];

    /// Convert a parsed row, rejecting values outside the record invariants.
    fn into_record(self) -> Result<Self::Record, String>;
}

/// Row of `results_exp1_summary.csv`.
#[derive(Debug, Deserialize)]
pub struct SizeRow {
    #[serde(rename = "Workload")]
    workload: String,
    #[serde(rename = "ValueSize_bytes")]
    value_size_bytes: u64,
    #[serde(rename = "AvgLatency_ms")]
    avg_latency_ms: f64,
}

impl Row for SizeRow {
    type Record = BenchmarkSample;

    const COLUMNS: &'static [&'static str] = &["Workload", "ValueSize_bytes", "AvgLatency_ms"];

    fn into_record(self) -> Result<BenchmarkSample, String> {
        check_non_negative("AvgLatency_ms", self.avg_latency_ms)?;
        Ok(BenchmarkSample {
            workload: self.workload,
            value_size_bytes: self.value_size_bytes,
            avg_latency_ms: self.avg_latency_ms,
            throughput_ops_s: 0.0,
            num_clients: 0,
        })
    }
}

/// Row of `results_exp3_summary.csv`.
#[derive(Debug, Deserialize)]
pub struct ThroughputRow {
    #[serde(rename = "Workload")]
    workload: String,
    #[serde(rename = "Throughput_ops_s")]
    throughput_ops_s: f64,
    #[serde(rename = "AvgLatency_ms")]
    avg_latency_ms: f64,
    #[serde(rename = "NumClients")]
    num_clients: u32,
}

impl Row for ThroughputRow {
    type Record = BenchmarkSample;

    const COLUMNS: &'static [&'static str] =
        &["Workload", "Throughput_ops_s", "AvgLatency_ms", "NumClients"];

    fn into_record(self) -> Result<BenchmarkSample, String> {
        check_non_negative("Throughput_ops_s", self.throughput_ops_s)?;
        check_non_negative("AvgLatency_ms", self.avg_latency_ms)?;
        Ok(BenchmarkSample {
            workload: self.workload,
            value_size_bytes: 0,
            avg_latency_ms: self.avg_latency_ms,
            throughput_ops_s: self.throughput_ops_s,
            num_clients: self.num_clients,
        })
    }
}

/// Row of `cold_read_results.csv` / `hot_read_results.csv`.
#[derive(Debug, Deserialize)]
pub struct LatencyRow {
    latency_ms: f64,
}

impl Row for LatencyRow {
    type Record = LatencySample;

    const COLUMNS: &'static [&'static str] = &["latency_ms"];

    fn into_record(self) -> Result<LatencySample, String> {
        check_non_negative("latency_ms", self.latency_ms)?;
        Ok(LatencySample {
            latency_ms: self.latency_ms,
        })
    }
}

fn check_non_negative(column: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a finite non-negative number (got {})", column, value))
    }
}
