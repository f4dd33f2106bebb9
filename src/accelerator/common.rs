//! Common utilities module
//!
//! This module contains the error type shared by the filter engine and the register front.

pub mod error;

pub use error::{AcceleratorError, Result};
