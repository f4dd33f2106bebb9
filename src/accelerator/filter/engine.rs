use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::accelerator::channels::EnginePorts;
use crate::accelerator::common::error::Result;
use crate::accelerator::filter::{
    clock::{StepClock, TokioClock},
    median, smoothing,
    timing::{Stage, WindowTimings},
    types::{Mask, WINDOW_LEN, Window},
};

/// Counters the engine publishes as it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub windows_completed: u64,
    pub samples_acquired: u64,
    /// Every tick charged since start, reset tick included.
    pub total_steps: u64,
    pub last_result: Option<i32>,
    pub last_window: WindowTimings,
}

impl EngineStats {
    /// Samples of the window currently being acquired.
    pub fn pending_samples(&self) -> u64 {
        self.samples_acquired - self.windows_completed * WINDOW_LEN as u64
    }
}

/// Background activity turning colour triplets into one result per nine.
pub struct FilterEngine<C: StepClock> {
    clock: C,
    mask: Mask,
    tick: Duration,
    ports: EnginePorts,
    stats: watch::Sender<EngineStats>,
}

impl FilterEngine<TokioClock> {
    pub fn new(tick: Duration, mask: Mask, ports: EnginePorts) -> (Self, watch::Receiver<EngineStats>) {
        Self::with_custom(TokioClock::new(tick), tick, mask, ports)
    }
}

impl<C: StepClock + 'static> FilterEngine<C> {
    /// `tick` is only used to report latency; `clock` decides how steps are charged.
    pub fn with_custom(
        clock: C,
        tick: Duration,
        mask: Mask,
        ports: EnginePorts,
    ) -> (Self, watch::Receiver<EngineStats>) {
        let (stats, stats_rx) = watch::channel(EngineStats::default());
        (
            Self {
                clock,
                mask,
                tick,
                ports,
                stats,
            },
            stats_rx,
        )
    }

    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }

    /// Runs until the ingest side is dropped or nobody reads results.
    pub async fn run(mut self) -> Result<()> {
        info!("Filter engine started with mask {:?}", self.mask.rows());
        self.charge(Stage::Reset, 1).await;

        loop {
            let mut timings = WindowTimings::new();
            let mut window = Window::default();

            for slot in 0..WINDOW_LEN {
                let Some(sample) = self.ports.read_color().await else {
                    if slot > 0 {
                        debug!("Discarding partial window of {} samples", slot);
                    }
                    info!("Ingest streams closed, filter engine stopping");
                    return Ok(());
                };
                window.set(slot, sample.grey());
                self.stats.send_modify(|s| s.samples_acquired += 1);
                self.charge(Stage::Acquire, 1).await;
            }
            timings.add_step(Stage::Acquire, WINDOW_LEN as u32);

            // Snapshot copy into the sort buffer, one tick per slot.
            self.charge(Stage::Snapshot, WINDOW_LEN as u32).await;
            timings.add_step(Stage::Snapshot, WINDOW_LEN as u32);

            let outcome = median::substitute_median(&mut window);
            self.charge(Stage::Sort, outcome.swaps).await;
            timings.add_step(Stage::Sort, outcome.swaps);

            let total = smoothing::weighted_sum(&window, &self.mask);
            self.charge(Stage::Smooth, WINDOW_LEN as u32).await;
            timings.add_step(Stage::Smooth, WINDOW_LEN as u32);

            let result = smoothing::normalize(total);
            debug!(
                "Window {:?} median={} total={} result={}",
                window.samples(),
                outcome.median,
                total,
                result
            );
            timings.log_summary(self.tick);

            if !self.ports.publish(result).await {
                info!("Result stream closed, filter engine stopping");
                return Ok(());
            }

            self.stats.send_modify(|s| {
                s.windows_completed += 1;
                s.last_result = Some(result);
                s.last_window = timings;
            });
        }
    }

    /// One suspension per step, so every step costs exactly one tick.
    async fn charge(&self, stage: Stage, steps: u32) {
        for _ in 0..steps {
            self.clock.advance(stage).await;
            self.stats.send_modify(|s| s.total_steps += 1);
        }
    }
}
