use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::accelerator::channels::fifo_link;
use crate::accelerator::common::error::{AcceleratorError, Result};
use crate::accelerator::config::AcceleratorConfig;
use crate::accelerator::filter::{EngineStats, FilterEngine, StepClock, TokioClock};
use crate::accelerator::register::RegisterFront;

/// A running filter engine and the register front that feeds it.
///
/// Must be created inside a tokio runtime.
pub struct DenoiseBlock {
    front: RegisterFront,
    engine: JoinHandle<Result<()>>,
    stats: watch::Receiver<EngineStats>,
}

impl DenoiseBlock {
    pub fn spawn(config: AcceleratorConfig) -> Result<Self> {
        let clock = TokioClock::new(config.tick);
        Self::spawn_with_clock(config, clock)
    }

    pub fn spawn_with_clock<C: StepClock + 'static>(config: AcceleratorConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let (ingest, ports) = fifo_link(config.fifo_capacity);
        let (engine, stats) = FilterEngine::with_custom(clock, config.tick, config.mask, ports);
        let front = RegisterFront::new(ingest, &config);

        info!(
            "Denoise block mapped at {:#010x} (ingest +{:#x}, result +{:#x}), fifo depth {}",
            config.base_offset, config.ingest_addr, config.result_addr, config.fifo_capacity
        );

        Ok(Self {
            front,
            engine: engine.spawn(),
            stats,
        })
    }

    pub fn front(&mut self) -> &mut RegisterFront {
        &mut self.front
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.borrow().clone()
    }

    /// Disconnects the register front and waits for the engine to stop.
    /// Any partially acquired window is dropped.
    pub async fn shutdown(self) -> Result<EngineStats> {
        let Self { front, engine, stats } = self;
        drop(front);

        engine
            .await
            .map_err(|e| AcceleratorError::EngineTask(e.to_string()))??;

        let stats = stats.borrow().clone();
        info!(
            "Denoise block stopped after {} windows ({} samples, {} ticks)",
            stats.windows_completed, stats.samples_acquired, stats.total_steps
        );
        Ok(stats)
    }
}
