//! Summary statistics over loaded samples.

/// The input to an aggregation had no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot aggregate an empty sample set")]
pub struct EmptyInput;

/// Arithmetic mean of `field` over `samples`.
///
/// No trimming or outlier removal is applied.
pub fn mean<T, F>(samples: &[T], field: F) -> Result<f64, EmptyInput>
where
    F: Fn(&T) -> f64,
{
    if samples.is_empty() {
        return Err(EmptyInput);
    }

    let sum: f64 = samples.iter().map(field).sum();
    Ok(sum / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LatencySample;

    fn latencies(values: &[f64]) -> Vec<LatencySample> {
        values
            .iter()
            .map(|&latency_ms| LatencySample { latency_ms })
            .collect()
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&latencies(&[]), |s| s.latency_ms), Err(EmptyInput));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&latencies(&[2.0, 4.0]), |s| s.latency_ms), Ok(3.0));
        assert_eq!(mean(&latencies(&[10.0, 12.0]), |s| s.latency_ms), Ok(11.0));
        assert_eq!(mean(&latencies(&[1.0, 1.0, 1.0]), |s| s.latency_ms), Ok(1.0));
    }
}
