//! Windowed denoising accelerator block
//!
//! A filter engine running as a background task, fed and drained through a
//! memory-mapped register front. The two only meet through bounded streams.

pub mod common;
pub mod config;
pub mod channels;
pub mod filter;
pub mod register;
mod block;

pub use common::{
    AcceleratorError,
    Result,
};

pub use config::{
    AcceleratorConfig,
    AcceleratorConfigBuilder,
};

pub use filter::{
    ColorSample,
    EngineStats,
    FilterEngine,
    Mask,
    StepClock,
    TokioClock,
    Window,
    filter_window,
};

pub use register::{
    AddressPolicy,
    ByteOrder,
    Command,
    RegisterFront,
    ResponseStatus,
    Transaction,
    TransportResponse,
};

pub use block::DenoiseBlock;
