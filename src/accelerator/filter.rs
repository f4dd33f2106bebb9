//! Filter engine
//!
//! Greyscale reduction, 9-sample windowing, median substitution and
//! weighted smoothing, with a tick charged for every elementary step.

pub mod types;
pub mod median;
pub mod smoothing;
mod clock;
mod engine;
mod timing;


pub use types::{CENTER_INDEX, ColorSample, GreySample, MASK_X, MASK_Y, Mask, WINDOW_LEN, Window};
pub use median::MedianOutcome;
pub use clock::{StepClock, TokioClock};
pub use engine::{EngineStats, FilterEngine};
pub use timing::{Stage, StageTiming, WindowTimings};

/// Result of running both stages over one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOutcome {
    /// Window after median substitution.
    pub window: Window,
    pub median: GreySample,
    pub swaps: u32,
    pub total: i64,
    pub result: i32,
}

/// Median then weighted mean over one window, without any timing.
pub fn filter_window(mut window: Window, mask: &Mask) -> WindowOutcome {
    let MedianOutcome { median, swaps } = median::substitute_median(&mut window);
    let total = smoothing::weighted_sum(&window, mask);
    WindowOutcome {
        window,
        median,
        swaps,
        total,
        result: smoothing::normalize(total),
    }
}
