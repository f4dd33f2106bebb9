pub mod accelerator;
pub mod logger;
