/// Index value for a slot that no bin has claimed during the current scan.
pub const NO_BIN: usize = usize::MAX;

/// Fixed-capacity list of the strongest bins, sorted descending by magnitude.
#[derive(Debug, Clone)]
pub(crate) struct PeakTracker {
    max: Vec<f64>,
    index: Vec<usize>,
}

impl PeakTracker {
    pub fn new(top_n: usize) -> Self {
        Self {
            max: vec![0.0; top_n],
            index: vec![NO_BIN; top_n],
        }
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    fn reset(&mut self) {
        self.max.fill(0.0);
        self.index.fill(NO_BIN);
    }

    /// Rebuilds the list from a full spectrum.
    ///
    /// Only magnitudes strictly greater than the current tail enter, so an
    /// earlier bin keeps its slot over a later bin of equal magnitude, and
    /// zero or NaN magnitudes never displace the baseline.
    pub fn scan(&mut self, spectrum: &[f64]) {
        self.reset();
        let last = self.max.len() - 1;

        for (bin, &magnitude) in spectrum.iter().enumerate() {
            if magnitude <= self.max[last] {
                continue;
            }
            let Some(slot) = self.max.iter().position(|&m| magnitude > m) else {
                continue;
            };
            self.max.copy_within(slot..last, slot + 1);
            self.index.copy_within(slot..last, slot + 1);
            self.max[slot] = magnitude;
            self.index[slot] = bin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_strongest_bins_in_descending_order() {
        let mut tracker = PeakTracker::new(3);
        tracker.scan(&[0.1, 0.9, 0.3, 0.7, 0.5, 0.2]);
        assert_eq!(tracker.max(), &[0.9, 0.7, 0.5]);
        assert_eq!(tracker.index(), &[1, 3, 4]);
    }

    #[test]
    fn earlier_bin_wins_ties() {
        let mut tracker = PeakTracker::new(2);
        tracker.scan(&[0.5, 0.5, 0.5, 0.1]);
        assert_eq!(tracker.max(), &[0.5, 0.5]);
        assert_eq!(tracker.index(), &[0, 1]);
    }

    #[test]
    fn unfilled_slots_keep_baseline() {
        let mut tracker = PeakTracker::new(4);
        tracker.scan(&[0.0, 2.0, 0.0, 1.0]);
        assert_eq!(tracker.max(), &[2.0, 1.0, 0.0, 0.0]);
        assert_eq!(tracker.index(), &[1, 3, NO_BIN, NO_BIN]);
    }

    #[test]
    fn rescan_forgets_previous_peaks() {
        let mut tracker = PeakTracker::new(2);
        tracker.scan(&[5.0, 4.0, 3.0]);
        tracker.scan(&[0.0, 1.0, 0.5]);
        assert_eq!(tracker.max(), &[1.0, 0.5]);
        assert_eq!(tracker.index(), &[1, 2]);
    }

    #[test]
    fn nan_never_enters() {
        let mut tracker = PeakTracker::new(2);
        tracker.scan(&[f64::NAN, 0.25, f64::NAN]);
        assert_eq!(tracker.max()[0], 0.25);
        assert_eq!(tracker.index(), &[1, NO_BIN]);
    }

    #[test]
    fn single_slot_tracks_maximum() {
        let mut tracker = PeakTracker::new(1);
        tracker.scan(&[0.2, 0.8, 0.4, 0.8]);
        assert_eq!(tracker.max(), &[0.8]);
        assert_eq!(tracker.index(), &[1]);
    }

    #[test]
    fn ascending_input_stays_sorted() {
        let mut tracker = PeakTracker::new(4);
        let spectrum: Vec<f64> = (0..32).map(|i| i as f64).collect();
        tracker.scan(&spectrum);
        assert_eq!(tracker.max(), &[31.0, 30.0, 29.0, 28.0]);
        assert_eq!(tracker.index(), &[31, 30, 29, 28]);
        assert!(tracker.max().windows(2).all(|w| w[0] >= w[1]));
    }
}
