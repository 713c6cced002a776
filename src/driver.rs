//! Frame loop glue: feeds display frames through the fixed-step accumulator
//! into one effect and collects what the presentation layer needs to know.

use serde::Serialize;

use crate::config::SimConfig;
use crate::core::Accumulator;
use crate::frame::FrameInfo;
use crate::scenes::{Effect, EffectSnapshot, Input, Signal};
use crate::sim::Theme;
use crate::stage::{RecordingStage, Stage, StageCounters};

pub struct Driver<S: Stage> {
    effect: Box<dyn Effect>,
    stage: S,
    accumulator: Accumulator,
    frames: u64,
    steps: u64,
    sim_time: f32,
    signals: Vec<Signal>,
}

impl<S: Stage> Driver<S> {
    pub fn new(mut effect: Box<dyn Effect>, mut stage: S, config: &SimConfig) -> Self {
        effect.setup(&mut stage);
        log::info!("effect '{}' ready", effect.name());
        Self {
            effect,
            stage,
            accumulator: Accumulator::new(
                config.simulation.step_hz,
                config.simulation.max_steps_per_frame,
            ),
            frames: 0,
            steps: 0,
            sim_time: 0.0,
            signals: Vec::new(),
        }
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Forward host input; signals are also kept for [`Driver::drain_signals`]
    pub fn input(&mut self, input: Input) -> &[Signal] {
        let fresh = self.effect.handle(input, &mut self.stage);
        for signal in &fresh {
            log::debug!("signal: {:?}", signal);
        }
        let start = self.signals.len();
        self.signals.extend(fresh);
        &self.signals[start..]
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Run however many fixed steps this display frame owes
    pub fn frame(&mut self, frame: &FrameInfo) -> u32 {
        let steps = self.accumulator.tick(frame.delta);
        let timestep = self.accumulator.timestep();
        for _ in 0..steps {
            self.sim_time += timestep;
            let step = FrameInfo::new(self.steps, self.sim_time, timestep);
            self.effect.step(&step, &mut self.stage);
            self.steps += 1;
        }
        self.frames += 1;
        steps
    }
}

impl Driver<RecordingStage> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            effect: self.effect.snapshot(),
            frames: self.frames,
            steps: self.steps,
            live_visuals: self.stage.len(),
            visible_visuals: self.stage.visible_count(),
            instance_bytes: self.stage.instance_bytes().len(),
            stage: self.stage.counters(),
            theme: self.stage.theme().cloned(),
        }
    }
}

/// End-of-run report written by the headless binary
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub effect: EffectSnapshot,
    pub frames: u64,
    pub steps: u64,
    pub live_visuals: usize,
    pub visible_visuals: usize,
    /// Size of the packed instance buffer for the visible visuals
    pub instance_bytes: usize,
    pub stage: StageCounters,
    pub theme: Option<Theme>,
}

impl Snapshot {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
