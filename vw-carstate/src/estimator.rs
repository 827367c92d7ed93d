//! Vehicle speed estimator
//!
//! A fixed-gain linear tracker over the state `x = [v, a]`:
//!
//! ```text
//! predict:  x' = A x        A = [[1, dt], [0, 1]]
//! correct:  x  = x' + K (z - C x')   C = [1, 0]
//! ```
//!
//! The gain `K` is pre-tuned and never re-estimated at runtime.

/// Update period of the control loop in seconds
pub const DT: f64 = 0.01;

/// Pre-tuned correction gain for [velocity, acceleration]
pub const GAIN: [f64; 2] = [0.12287673, 0.29666309];

/// Smooths the mean wheel speed into velocity and acceleration
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityEstimator {
    x: [f64; 2],
}

impl VelocityEstimator {
    /// Create an estimator at rest
    pub fn new() -> Self {
        Self { x: [0.0, 0.0] }
    }

    /// Feed one measurement in m/s and return `(velocity, acceleration)`
    pub fn update(&mut self, measurement: f64) -> (f64, f64) {
        let [v, a] = self.x;

        // x' = A x
        let predicted_v = v + DT * a;
        let predicted_a = a;

        // z - C x'
        let innovation = measurement - predicted_v;

        self.x = [
            predicted_v + GAIN[0] * innovation,
            predicted_a + GAIN[1] * innovation,
        ];

        (self.x[0], self.x[1])
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_is_gain_times_measurement() {
        let mut kf = VelocityEstimator::new();
        let (v, a) = kf.update(10.0);
        assert!((v - 1.2287673).abs() < 1e-12);
        assert!((a - 2.9666309).abs() < 1e-12);
    }

    #[test]
    fn test_second_step_uses_prediction() {
        let mut kf = VelocityEstimator::new();
        kf.update(10.0);
        let (v, a) = kf.update(10.0);

        let predicted_v = 1.2287673 + DT * 2.9666309;
        let innovation = 10.0 - predicted_v;
        assert!((v - (predicted_v + GAIN[0] * innovation)).abs() < 1e-12);
        assert!((a - (2.9666309 + GAIN[1] * innovation)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_input_stays_at_rest() {
        let mut kf = VelocityEstimator::default();
        for _ in 0..100 {
            assert_eq!(kf.update(0.0), (0.0, 0.0));
        }
    }

    #[test]
    fn test_converges_on_constant_input() {
        let mut kf = VelocityEstimator::new();
        let mut last = (0.0, 0.0);
        for _ in 0..1000 {
            last = kf.update(10.0);
        }
        assert!((last.0 - 10.0).abs() < 1e-6);
        assert!(last.1.abs() < 1e-6);
    }

    #[test]
    fn test_error_envelope_shrinks() {
        // The tuned gains overshoot slightly, so compare error peaks per window
        // rather than individual steps.
        let mut kf = VelocityEstimator::new();
        let mut peaks = Vec::new();
        for _ in 0..6 {
            let mut peak: f64 = 0.0;
            for _ in 0..100 {
                let (v, _) = kf.update(20.0);
                peak = peak.max((v - 20.0).abs());
            }
            peaks.push(peak);
        }
        for pair in peaks.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", peaks);
        }
    }
}
