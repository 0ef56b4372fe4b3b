//! Chart generation configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Benchmark result files.
    #[serde(default)]
    pub input: InputConfig,

    /// Where charts are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dpi == 0 {
            return Err(ConfigError::Invalid("output.dpi must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Input file configuration. Relative file names resolve against `dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_dir")]
    pub dir: PathBuf,

    /// `Workload, ValueSize_bytes, AvgLatency_ms`
    #[serde(default = "InputConfig::default_size_summary")]
    pub size_summary: PathBuf,

    /// `latency_ms`, measured right after a restart
    #[serde(default = "InputConfig::default_cold_reads")]
    pub cold_reads: PathBuf,

    /// `latency_ms`, measured against a populated cache
    #[serde(default = "InputConfig::default_hot_reads")]
    pub hot_reads: PathBuf,

    /// `Workload, Throughput_ops_s, AvgLatency_ms, NumClients`
    #[serde(default = "InputConfig::default_throughput_summary")]
    pub throughput_summary: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            size_summary: Self::default_size_summary(),
            cold_reads: Self::default_cold_reads(),
            hot_reads: Self::default_hot_reads(),
            throughput_summary: Self::default_throughput_summary(),
        }
    }
}

impl InputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_size_summary() -> PathBuf {
        PathBuf::from("results_exp1_summary.csv")
    }

    fn default_cold_reads() -> PathBuf {
        PathBuf::from("cold_read_results.csv")
    }

    fn default_hot_reads() -> PathBuf {
        PathBuf::from("hot_read_results.csv")
    }

    fn default_throughput_summary() -> PathBuf {
        PathBuf::from("results_exp3_summary.csv")
    }

    pub fn size_summary_path(&self) -> PathBuf {
        self.dir.join(&self.size_summary)
    }

    pub fn cold_reads_path(&self) -> PathBuf {
        self.dir.join(&self.cold_reads)
    }

    pub fn hot_reads_path(&self) -> PathBuf {
        self.dir.join(&self.hot_reads)
    }

    pub fn throughput_summary_path(&self) -> PathBuf {
        self.dir.join(&self.throughput_summary)
    }
}

/// Output configuration. File names are fixed per chart type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: PathBuf,

    /// Raster resolution in dots per inch.
    #[serde(default = "OutputConfig::default_dpi")]
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            dpi: Self::default_dpi(),
        }
    }
}

impl OutputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_dpi() -> u32 {
        300
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Log format: "pretty", "json", or "compact".
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Annotated default configuration, printed by `--print-config`.
pub const DEFAULT_CONFIG: &str = r#"# kvbench-charts configuration

[input]
# Directory holding the benchmark result files
dir = "."

# Latency vs. value size summary: Workload, ValueSize_bytes, AvgLatency_ms
size_summary = "results_exp1_summary.csv"

# Raw read latencies (latency_ms) after a restart and with a populated cache
cold_reads = "cold_read_results.csv"
hot_reads = "hot_read_results.csv"

# Latency vs. throughput summary: Workload, Throughput_ops_s, AvgLatency_ms, NumClients
throughput_summary = "results_exp3_summary.csv"

[output]
# Directory charts are written to (file names are fixed per chart)
dir = "."

# Raster resolution in dots per inch
dpi = 300

[logging]
# Log level: "error", "warn", "info", "debug", "trace"
level = "info"

# Log format: "pretty", "json", or "compact"
format = "pretty"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.output.dpi, 300);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(
            config.input.cold_reads_path(),
            PathBuf::from("./cold_read_results.csv")
        );
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [input]
            dir = "/data/run-7"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.input.throughput_summary_path(),
            PathBuf::from("/data/run-7/results_exp3_summary.csv")
        );
        assert_eq!(config.output.dpi, 300);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_absolute_input_overrides_dir() {
        let config: Config = toml::from_str(
            r#"
            [input]
            dir = "/data"
            hot_reads = "/elsewhere/hot.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.input.hot_reads_path(), PathBuf::from("/elsewhere/hot.csv"));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.toml");
        std::fs::write(&path, "[output]\ndpi = 0\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"svg\"\n");
        assert!(result.is_err());
    }
}
