use std::time::Duration;

use async_trait::async_trait;

use super::timing::Stage;

/// Charges simulated time for one algorithm step.
#[async_trait]
pub trait StepClock: Send + Sync {
    async fn advance(&self, stage: Stage);
}

/// Suspends the engine task for one `tick` per step on the tokio clock.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    tick: Duration,
}

impl TokioClock {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

#[async_trait]
impl StepClock for TokioClock {
    async fn advance(&self, _stage: Stage) {
        tokio::time::sleep(self.tick).await;
    }
}
