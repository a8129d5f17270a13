//! Fixed-timestep accumulator.
//!
//! Real elapsed time is accumulated and drained in whole fixed steps so
//! every system sees a constant step duration regardless of frame rate.

/// Accumulates real time and hands out whole simulation steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step duration in seconds.
    /// Step must be positive.
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Feed real elapsed seconds and return how many whole steps to run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed > 0.0 {
            self.accumulator += elapsed;
        }
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// The constant step duration.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time accumulated but not yet drained (always < step).
    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}
