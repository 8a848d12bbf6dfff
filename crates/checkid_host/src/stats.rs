//! Latency statistics for codec operations.
//!
//! Correction cost spans several orders of magnitude (a valid identifier is
//! checked in well under a microsecond, an ambiguous one can take
//! milliseconds), so the distribution is kept in power-of-two microsecond
//! buckets. Trackers are cheap to create and merge, which lets every rayon
//! worker fill its own and combine them at the end.

const BUCKETS: usize = 24;

/// Tracks latency statistics with minimal overhead.
///
/// Accumulates min, max, sum and count, plus a histogram where bucket `i`
/// holds measurements in `[2^(i-1), 2^i)` microseconds (bucket 0 holds
/// everything below one microsecond). The last bucket is open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyStats {
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub count: u64,
    pub buckets: [u64; BUCKETS],
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencyStats {
    /// Creates an empty tracker.
    ///
    /// `min` starts at `u64::MAX` so the first measurement becomes the
    /// minimum.
    pub fn new() -> Self {
        Self {
            min: u64::MAX,
            max: 0,
            sum: 0,
            count: 0,
            buckets: [0; BUCKETS],
        }
    }

    fn bucket_of(nanos: u64) -> usize {
        let micros = nanos / 1_000;
        let idx = (u64::BITS - micros.leading_zeros()) as usize;
        idx.min(BUCKETS - 1)
    }

    /// Records a latency measurement in nanoseconds.
    pub fn update(&mut self, nanos: u64) {
        self.min = self.min.min(nanos);
        self.max = self.max.max(nanos);
        self.sum += nanos;
        self.count += 1;
        self.buckets[Self::bucket_of(nanos)] += 1;
    }

    /// Combines two trackers as if every measurement went into one.
    pub fn merge(mut self, other: Self) -> Self {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets) {
            *mine += theirs;
        }
        self
    }

    /// Average latency in nanoseconds, or 0.0 if nothing was recorded.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    fn human(nanos: f64) -> String {
        if nanos < 1_000.0 {
            format!("{:.2} ns", nanos)
        } else if nanos < 1_000_000.0 {
            format!("{:.2} us", nanos / 1_000.0)
        } else {
            format!("{:.2} ms", nanos / 1_000_000.0)
        }
    }

    /// Prints count, min, average, max and the bucket histogram.
    pub fn print_report(&self) {
        println!("\nLatency Metrics (per identifier)");
        println!("Count: {}", self.count);
        if self.count == 0 {
            return;
        }

        println!("Min:   {}", Self::human(self.min as f64));
        println!("Avg:   {}", Self::human(self.avg()));
        println!("Max:   {}", Self::human(self.max as f64));

        println!("Distribution (power-of-two us buckets):");
        for (i, &count) in self.buckets.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let lower = if i == 0 { 0 } else { 1u64 << (i - 1) };
            if i == BUCKETS - 1 {
                println!("[{:>8}+       us]: {}", lower, count);
            } else {
                println!("[{:>8}-{:<8} us]: {}", lower, 1u64 << i, count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(LatencyStats::bucket_of(0), 0);
        assert_eq!(LatencyStats::bucket_of(999), 0);
        assert_eq!(LatencyStats::bucket_of(1_000), 1);
        assert_eq!(LatencyStats::bucket_of(3_999), 2);
        assert_eq!(LatencyStats::bucket_of(4_000), 3);
        assert_eq!(LatencyStats::bucket_of(u64::MAX), BUCKETS - 1);
    }

    #[test]
    fn test_update_and_avg() {
        let mut stats = LatencyStats::new();
        assert_eq!(stats.avg(), 0.0);
        stats.update(500);
        stats.update(1_500);
        assert_eq!(stats.min, 500);
        assert_eq!(stats.max, 1_500);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg(), 1_000.0);
        assert_eq!(stats.buckets[0], 1);
        assert_eq!(stats.buckets[1], 1);
    }

    #[test]
    fn test_merge_matches_single_tracker() {
        let samples = [10, 2_000, 70_000, 5, 123_456_789];
        let mut whole = LatencyStats::new();
        let mut left = LatencyStats::new();
        let mut right = LatencyStats::new();
        for (i, &s) in samples.iter().enumerate() {
            whole.update(s);
            if i % 2 == 0 {
                left.update(s);
            } else {
                right.update(s);
            }
        }
        assert_eq!(left.merge(right), whole);
        assert_eq!(LatencyStats::new().merge(whole.clone()), whole);
    }
}
