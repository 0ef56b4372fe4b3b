//! CSV loading for benchmark result files.
//!
//! Each loader returns records in file row order. The throughput chart
//! relies on that order to pair annotations with points.

use crate::error::ChartError;
use crate::record::{BenchmarkSample, LatencyRow, LatencySample, Row, SizeRow, ThroughputRow};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Load the latency-vs-size summary (`Workload, ValueSize_bytes, AvgLatency_ms`).
pub fn load_size_samples(path: &Path) -> Result<Vec<BenchmarkSample>, ChartError> {
    load::<SizeRow>(path)
}

/// Load the latency-vs-throughput summary
/// (`Workload, Throughput_ops_s, AvgLatency_ms, NumClients`).
pub fn load_throughput_samples(path: &Path) -> Result<Vec<BenchmarkSample>, ChartError> {
    load::<ThroughputRow>(path)
}

/// Load a raw cold or hot read file (`latency_ms`).
pub fn load_latency_samples(path: &Path) -> Result<Vec<LatencySample>, ChartError> {
    load::<LatencyRow>(path)
}

/// Read every row of `path` as `R`, validating the header first.
pub fn load<R: Row>(path: &Path) -> Result<Vec<R::Record>, ChartError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ChartError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ChartError::malformed(path, format!("cannot open file: {}", e)),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| ChartError::malformed(path, format!("unreadable header: {}", e)))?;

    let missing: Vec<&str> = R::COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(ChartError::malformed(
            path,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<R>().enumerate() {
        let row = result.map_err(|e| ChartError::malformed(path, format!("row {}: {}", idx + 1, e)))?;
        let record = row
            .into_record()
            .map_err(|reason| ChartError::malformed(path, format!("row {}: {}", idx + 1, reason)))?;
        records.push(record);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded benchmark results");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_latency_samples(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ChartError::NotFound { .. }));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "size.csv", "Workload,AvgLatency_ms\nGET,1.0\n");
        match load_size_samples(&path).unwrap_err() {
            ChartError::MalformedInput { reason, .. } => {
                assert!(reason.contains("ValueSize_bytes"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_value_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "cold.csv", "latency_ms\n1.5\nfast\n");
        match load_latency_samples(&path).unwrap_err() {
            ChartError::MalformedInput { reason, .. } => assert!(reason.starts_with("row 2")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_preserves_row_order_and_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "tput.csv",
            "Workload, Throughput_ops_s, AvgLatency_ms, NumClients, Notes\n\
             SET, 900.5, 2.5, 8, x\n\
             GET, 1500, 1.25, 1, y\n",
        );
        let samples = load_throughput_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].workload, "SET");
        assert_eq!(samples[0].num_clients, 8);
        assert_eq!(samples[1].workload, "GET");
        assert_eq!(samples[1].throughput_ops_s, 1500.0);
    }

    #[test]
    fn test_header_only_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "hot.csv", "latency_ms\n");
        assert!(load_latency_samples(&path).unwrap().is_empty());
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "hot.csv", "");
        assert!(matches!(
            load_latency_samples(&path).unwrap_err(),
            ChartError::MalformedInput { .. }
        ));
    }
}
