//! Cycle-windowed breathing detector
//!
//! The sensor produces readings far faster than a chest rises and falls, so
//! consecutive readings barely differ whether or not the subject breathes.
//! Each reading is instead compared against a baseline latched several
//! cycles earlier. The baseline is refreshed from the current reading once
//! the cycle counter exceeds the window size, after that reading has been
//! compared.
//!
//! The baseline starts at zero. Until the first refresh every non-trivial
//! reading differs from it by more than the threshold, so the first window
//! reports breathing. The tuned threshold and window were found against
//! exactly this startup behaviour, so it is kept.

use crate::config::{DetectorConfig, MAX_WINDOW_SIZE};
use crate::sensor::PulseMeasurement;

/// Diagnostic snapshot of one detector iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSample {
    /// Cycle counter at comparison time
    pub cycle: u16,
    /// Measurement compared this iteration (µs)
    pub current_us: PulseMeasurement,
    /// Baseline it was compared against (µs)
    pub baseline_us: PulseMeasurement,
    /// `current - baseline`, saturating (µs)
    pub diff_us: i32,
}

/// Result of one detector iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Detection {
    /// Breath event: |diff| exceeded the threshold
    pub breath: bool,
    /// Values behind the decision
    pub sample: CycleSample,
}

/// Breathing detector
#[derive(Debug, Clone)]
pub struct BreathingDetector {
    /// Iterations between baseline refreshes
    window_size: u16,
    /// Breath threshold (µs)
    threshold_us: i32,
    /// Iterations since the last refresh, in `0..=window_size + 1`
    counter: u16,
    /// Latched reference measurement
    baseline_us: PulseMeasurement,
}

impl Default for BreathingDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl BreathingDetector {
    /// Create a detector with a zero baseline
    ///
    /// Window sizes above [`MAX_WINDOW_SIZE`] are clamped so the counter can
    /// always pass the window.
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            window_size: config.window_size.min(MAX_WINDOW_SIZE),
            threshold_us: config.diff_threshold_us,
            counter: 0,
            baseline_us: 0,
        }
    }

    /// Feed one measurement and decide whether it shows a breath
    pub fn update(&mut self, current_us: PulseMeasurement) -> Detection {
        let diff_us = current_us.saturating_sub(self.baseline_us);
        let breath = diff_us.saturating_abs() > self.threshold_us;

        let sample = CycleSample {
            cycle: self.counter,
            current_us,
            baseline_us: self.baseline_us,
            diff_us,
        };

        if self.counter > self.window_size {
            self.baseline_us = current_us;
            self.counter = 0;
        }
        self.counter = self.counter.saturating_add(1);

        Detection { breath, sample }
    }

    /// Current baseline (µs)
    pub fn baseline_us(&self) -> PulseMeasurement {
        self.baseline_us
    }

    /// Current cycle counter
    pub fn counter(&self) -> u16 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn detector() -> BreathingDetector {
        BreathingDetector::default()
    }

    fn run(det: &mut BreathingDetector, values: &[i32]) -> Vec<bool> {
        values.iter().map(|&v| det.update(v).breath).collect()
    }

    #[test]
    fn test_step_after_first_window() {
        // 11 zeros then a jump: compared against the still-zero baseline
        let mut values = vec![0; 11];
        values.push(5000);

        let mut det = detector();
        let events = run(&mut det, &values);

        assert!(events[..11].iter().all(|&b| !b));
        assert!(events[11]);
        assert_eq!(det.baseline_us(), 5000);
    }

    #[test]
    fn test_sample_reports_compare_values() {
        let mut det = detector();
        let d = det.update(1_200);
        assert_eq!(
            d.sample,
            CycleSample {
                cycle: 0,
                current_us: 1_200,
                baseline_us: 0,
                diff_us: 1_200,
            }
        );
        assert!(d.breath);
    }

    #[test]
    fn test_first_refresh_at_index_eleven() {
        let mut det = detector();
        for i in 0..11 {
            det.update(100 + i);
            assert_eq!(det.baseline_us(), 0, "refreshed early at {}", i);
        }
        det.update(111);
        assert_eq!(det.baseline_us(), 111);
        assert_eq!(det.counter(), 1);
    }

    #[test]
    fn test_refresh_period_is_window_plus_one() {
        let mut det = detector();
        let mut refreshes = Vec::new();
        let mut last = det.baseline_us();

        for i in 0..60 {
            // Distinct values so every refresh is visible
            det.update(1_000 + i);
            if det.baseline_us() != last {
                refreshes.push(i);
                last = det.baseline_us();
            }
        }

        assert_eq!(refreshes, vec![11, 22, 33, 44, 55]);
    }

    #[test]
    fn test_baseline_holds_through_window() {
        let mut det = detector();
        for _ in 0..12 {
            det.update(800);
        }
        assert_eq!(det.baseline_us(), 800);

        // The next 11 readings all compare against 800
        for v in 900..911 {
            let d = det.update(v);
            assert_eq!(d.sample.baseline_us, 800);
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut det = detector();
        for _ in 0..12 {
            det.update(1_000);
        }
        assert!(!det.update(1_030).breath);
        assert!(!det.update(970).breath);
        assert!(det.update(1_031).breath);
        assert!(det.update(969).breath);
    }

    #[test]
    fn test_counter_stays_bounded() {
        let mut det = detector();
        for v in 0..500 {
            let d = det.update(v);
            assert!(d.sample.cycle <= 11);
            assert!(det.counter() < 12);
        }
    }

    #[test]
    fn test_custom_window_and_threshold() {
        let mut det = BreathingDetector::new(DetectorConfig {
            window_size: 2,
            diff_threshold_us: 5,
        });
        // Refresh at index 3, then every 3 iterations
        let events = run(&mut det, &[0, 0, 0, 10, 10, 10, 10, 16]);
        assert_eq!(
            events,
            vec![false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn test_largest_window_still_refreshes() {
        let mut det = BreathingDetector::new(DetectorConfig {
            window_size: u16::MAX,
            diff_threshold_us: 30,
        });

        // Clamped window of 65534: first refresh at index 65535
        for _ in 0..=usize::from(u16::MAX) {
            det.update(1_000);
        }
        assert_eq!(det.baseline_us(), 1_000);
        assert_eq!(det.counter(), 1);
        assert!(!det.update(1_000).breath);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let mut det = detector();
        let d = det.update(i32::MIN);
        assert_eq!(d.sample.diff_us, i32::MIN);
        assert!(d.breath);
    }

    proptest! {
        #[test]
        fn prop_constant_input_settles(value in -100_000i32..100_000, len in 12usize..80) {
            let mut det = detector();
            let events = run(&mut det, &vec![value; len]);
            prop_assert!(events[12..].iter().all(|&b| !b));
        }

        #[test]
        fn prop_single_deviation_single_event(
            base in 500i32..5_000,
            offset in 31i32..2_000,
            negative in any::<bool>(),
            slot in 0usize..10,
        ) {
            let spike = if negative { base - offset } else { base + offset };

            // Settle the baseline, then spike once inside the next window
            let mut det = detector();
            run(&mut det, &vec![base; 12]);

            let mut values = vec![base; 30];
            values[slot] = spike;
            let events = run(&mut det, &values);

            prop_assert_eq!(events.iter().filter(|&&b| b).count(), 1);
            prop_assert!(events[slot]);
        }

        #[test]
        fn prop_small_noise_never_breathes(
            base in 500i32..5_000,
            noise in proptest::collection::vec(-15i32..=15, 12..100),
        ) {
            let mut det = detector();
            run(&mut det, &vec![base; 12]);

            // Any two readings differ by at most 30, whatever gets latched
            let values: Vec<i32> = noise.iter().map(|n| base + n).collect();
            prop_assert!(run(&mut det, &values).iter().all(|&b| !b));
        }
    }
}
