//! Sample, window and mask types for the filter engine

use serde::Deserialize;

/// Number of greyscale samples in one window (a 3x3 neighbourhood).
pub const WINDOW_LEN: usize = 9;
/// Slot that the median replaces before smoothing.
pub const CENTER_INDEX: usize = 4;
/// Mask width.
pub const MASK_X: usize = 3;
/// Mask height.
pub const MASK_Y: usize = 3;

/// Greyscale value of one pixel.
pub type GreySample = u8;

/// One pixel as written to the ingest register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Truncating average of the three channels.
    pub fn grey(self) -> GreySample {
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }
}

/// Nine greyscale samples in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    samples: [GreySample; WINDOW_LEN],
}

impl Window {
    pub fn from_samples(samples: [GreySample; WINDOW_LEN]) -> Self {
        Self { samples }
    }

    pub fn set(&mut self, slot: usize, value: GreySample) {
        self.samples[slot] = value;
    }

    pub fn center(&self) -> GreySample {
        self.samples[CENTER_INDEX]
    }

    pub fn samples(&self) -> &[GreySample; WINDOW_LEN] {
        &self.samples
    }
}

/// Fixed 3x3 convolution weights, applied row-major over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Mask {
    weights: [[i32; MASK_X]; MASK_Y],
}

impl Default for Mask {
    fn default() -> Self {
        Self {
            weights: [[1, 1, 1], [1, 2, 1], [1, 1, 1]],
        }
    }
}

impl Mask {
    pub fn new(weights: [[i32; MASK_X]; MASK_Y]) -> Self {
        Self { weights }
    }

    pub fn rows(&self) -> &[[i32; MASK_X]; MASK_Y] {
        &self.weights
    }

    /// Weights in the order they meet window slots 0..9.
    pub fn weights(&self) -> impl Iterator<Item = i32> + '_ {
        self.weights.iter().flat_map(|row| row.iter().copied())
    }

    pub fn sum(&self) -> i64 {
        self.weights().map(i64::from).sum()
    }
}
