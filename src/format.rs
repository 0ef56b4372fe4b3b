//! Label formatting for chart ticks and annotations.

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count for an axis tick, flooring to a whole unit.
/// - < 1KB: "X B" (e.g., "512 B")
/// - 1KB - <1MB: "X KB" (e.g., "4 KB")
/// - 1MB - <1GB: "X MB"
/// - >= 1GB: "X GB"
pub fn format_bytes(x: f64) -> String {
    if x < KB {
        format!("{} B", x.floor() as u64)
    } else if x < MB {
        format!("{} KB", (x / KB).floor() as u64)
    } else if x < GB {
        format!("{} MB", (x / MB).floor() as u64)
    } else {
        format!("{} GB", (x / GB).floor() as u64)
    }
}

/// Format a latency in milliseconds with three decimals (e.g., "11.000 ms").
pub fn format_latency_ms(ms: f64) -> String {
    format!("{:.3} ms", ms)
}

/// Label a point with its client count (e.g., "8c").
pub fn format_clients(num_clients: u32) -> String {
    format!("{}c", num_clients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_boundaries() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(1023.0), "1023 B");
        assert_eq!(format_bytes(1024.0), "1 KB");
        assert_eq!(format_bytes(1_048_575.0), "1023 KB");
        assert_eq!(format_bytes(1_048_576.0), "1 MB");
        assert_eq!(format_bytes(1_073_741_823.0), "1023 MB");
        assert_eq!(format_bytes(1_073_741_824.0), "1 GB");
    }

    #[test]
    fn test_format_bytes_floors() {
        assert_eq!(format_bytes(999.9), "999 B");
        assert_eq!(format_bytes(1536.0), "1 KB");
        assert_eq!(format_bytes(4096.0), "4 KB");
        assert_eq!(format_bytes(3.5 * GB), "3 GB");
    }

    #[test]
    fn test_format_bytes_range() {
        for x in [0u64, 1, 17, 512, 1000, 1023] {
            assert_eq!(format_bytes(x as f64), format!("{} B", x));
        }
        for x in [1024u64, 2047, 65_536, 1_048_575] {
            assert_eq!(format_bytes(x as f64), format!("{} KB", x / 1024));
        }
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency_ms(11.0), "11.000 ms");
        assert_eq!(format_latency_ms(1.0), "1.000 ms");
        assert_eq!(format_latency_ms(0.12345), "0.123 ms");
    }

    #[test]
    fn test_format_clients() {
        assert_eq!(format_clients(8), "8c");
        assert_eq!(format_clients(128), "128c");
    }
}
