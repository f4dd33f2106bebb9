use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

/// Algorithm stages that charge ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// One tick before the first window after start.
    Reset,
    Acquire,
    Snapshot,
    Sort,
    Smooth,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Reset => "reset",
            Stage::Acquire => "acquire",
            Stage::Snapshot => "snapshot",
            Stage::Sort => "sort",
            Stage::Smooth => "smooth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: Stage,
    pub steps: u32,
}

/// Ticks charged by each stage while processing one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowTimings {
    stages: Vec<StageTiming>,
    step_map: HashMap<Stage, u32>,
}

impl WindowTimings {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            step_map: HashMap::new(),
        }
    }

    pub fn add_step(&mut self, stage: Stage, steps: u32) {
        self.stages.push(StageTiming { stage, steps });
        *self.step_map.entry(stage).or_insert(0) += steps;
    }

    pub fn total_steps(&self) -> u32 {
        self.stages.iter().map(|s| s.steps).sum()
    }

    pub fn get_stage(&self, stage: Stage) -> Option<u32> {
        self.step_map.get(&stage).copied()
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Simulated time the window occupied the engine.
    pub fn latency(&self, tick: Duration) -> Duration {
        tick * self.total_steps()
    }

    pub fn log_summary(&self, tick: Duration) {
        let total = self.total_steps();
        for entry in &self.stages {
            let percentage = if total > 0 {
                (entry.steps as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            debug!(
                "{:<10} {:>4} ticks ({:>5.1}%)",
                entry.stage.name(),
                entry.steps,
                percentage
            );
        }
        debug!("{:<10} {:>4} ticks = {:?}", "total", total, self.latency(tick));
    }
}
