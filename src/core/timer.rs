/// Fixed-step accumulator.
///
/// The simulation advances in whole steps of `1 / hz` seconds no matter how
/// long a display frame took, so per-step velocities mean the same thing at
/// 30 Hz and 144 Hz. Backlog beyond `max_steps` is dropped instead of carried,
/// which keeps a stalled frame from turning into a burst of catch-up steps.
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u32,
}

impl Accumulator {
    pub fn new(hz: f32, max_steps: u32) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Feed one frame delta, returns how many fixed steps to run
    pub fn tick(&mut self, delta: f32) -> u32 {
        if delta.is_finite() && delta > 0.0 {
            self.accumulator += delta;
        }

        let due = (self.accumulator / self.timestep) as u32;
        let steps = due.min(self.max_steps);
        if due > steps {
            log::debug!("dropping {} simulation steps of backlog", due - steps);
            self.accumulator = 0.0;
        } else {
            self.accumulator -= steps as f32 * self.timestep;
        }
        steps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }
}
