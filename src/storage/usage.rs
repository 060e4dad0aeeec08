use chrono::{DateTime, Utc};

/// Disk and inode usage of one claim as mounted by one pod.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PvcUsage {
    pub namespace: String,
    pub pvc_name: String,
    /// Bound persistent volume; empty unless resolution was requested and succeeded.
    pub pv_name: String,
    pub pod_name: String,
    pub volume_mount_name: String,
    pub node_name: String,

    pub capacity_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub percentage_used: f64,

    pub inodes: u64,
    pub inodes_used: u64,
    pub inodes_free: u64,
    pub percentage_inodes_used: f64,

    pub stats_time: Option<DateTime<Utc>>,
}

impl PvcUsage {
    /// The larger of byte and inode usage, used to pick a row color.
    ///
    /// Non-finite percentages are ignored.
    pub fn peak_percentage(&self) -> f64 {
        [self.percentage_used, self.percentage_inodes_used]
            .into_iter()
            .filter(|p| p.is_finite())
            .fold(0.0, f64::max)
    }
}

/// `part / total * 100`.
///
/// A zero `total` is not special-cased: the result is NaN or infinite.
#[inline]
pub fn percentage(part: u64, total: u64) -> f64 {
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 100), 0.0);
        assert_eq!(percentage(50, 200), 25.0);
        assert_eq!(percentage(200, 200), 100.0);
        assert!((percentage(12_288, 25_674_731_520) - 4.786e-5).abs() < 1e-7);
    }

    #[test]
    fn test_percentage_of_zero_total_is_not_finite() {
        assert!(percentage(0, 0).is_nan());
        assert!(percentage(10, 0).is_infinite());
    }

    #[test]
    fn test_peak_percentage() {
        let usage = PvcUsage {
            percentage_used: 40.0,
            percentage_inodes_used: 80.0,
            ..Default::default()
        };
        assert_eq!(usage.peak_percentage(), 80.0);

        let usage = PvcUsage {
            percentage_used: 12.5,
            percentage_inodes_used: f64::NAN,
            ..Default::default()
        };
        assert_eq!(usage.peak_percentage(), 12.5);
    }
}
