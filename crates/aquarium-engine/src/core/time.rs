/// Fixed timestep accumulator.
/// Turns variable frame deltas (milliseconds) into whole scheduler quanta,
/// so creature motion runs at the same rate regardless of frame rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one quantum in milliseconds.
    quantum_ms: u32,
    /// Most quanta handed out for a single frame.
    max_steps: u32,
    /// Accumulated milliseconds not yet handed out.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(quantum_ms: u32, max_steps: u32) -> Self {
        Self {
            quantum_ms: quantum_ms.max(1),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of quanta to run.
    ///
    /// Negative or non-finite deltas (tab restored, clock skew) count as zero.
    /// A backlog beyond `max_steps` quanta is dropped rather than replayed.
    pub fn accumulate(&mut self, frame_ms: f64) -> u32 {
        if frame_ms.is_finite() && frame_ms > 0.0 {
            self.accumulator += frame_ms;
        }
        let quantum = self.quantum_ms as f64;
        self.accumulator = self.accumulator.min(quantum * self.max_steps as f64);
        let steps = (self.accumulator / quantum) as u32;
        self.accumulator -= steps as f64 * quantum;
        steps
    }

    pub fn quantum_ms(&self) -> u32 {
        self.quantum_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(10, 25);
        assert_eq!(ts.accumulate(10.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(10, 25);
        assert_eq!(ts.accumulate(6.0), 0);
        assert_eq!(ts.accumulate(6.0), 1);
        // 2 ms carried over
        assert_eq!(ts.accumulate(7.0), 0);
        assert_eq!(ts.accumulate(1.0), 1);
    }

    #[test]
    fn a_60hz_frame_is_one_or_two_quanta() {
        let mut ts = FixedTimestep::new(10, 25);
        let total: u32 = (0..60).map(|_| ts.accumulate(1000.0 / 60.0)).sum();
        assert!((99..=100).contains(&total), "total was {}", total);
    }

    #[test]
    fn caps_backlog() {
        let mut ts = FixedTimestep::new(10, 25);
        assert_eq!(ts.accumulate(5_000.0), 25);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut ts = FixedTimestep::new(10, 25);
        assert_eq!(ts.accumulate(-30.0), 0);
        assert_eq!(ts.accumulate(f64::NAN), 0);
        assert_eq!(ts.accumulate(f64::INFINITY), 0);
        assert_eq!(ts.accumulate(10.0), 1);
    }
}
