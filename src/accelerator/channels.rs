//! Bounded streams between the register front and the filter engine
//!
//! Three colour streams carry one byte each per pixel; the result stream
//! carries one filtered value per window. Every stream suspends the writer
//! when full and the reader when empty.

use tokio::sync::mpsc;

use crate::accelerator::common::error::{AcceleratorError, Result};
use crate::accelerator::filter::ColorSample;

/// Builds both ends of the four streams, each `capacity` deep.
///
/// Panics if `capacity` is zero; `AcceleratorConfig::validate` rejects that.
pub fn fifo_link(capacity: usize) -> (IngestPorts, EnginePorts) {
    let (red_tx, red_rx) = mpsc::channel(capacity);
    let (green_tx, green_rx) = mpsc::channel(capacity);
    let (blue_tx, blue_rx) = mpsc::channel(capacity);
    let (result_tx, result_rx) = mpsc::channel(capacity);

    (
        IngestPorts {
            red: red_tx,
            green: green_tx,
            blue: blue_tx,
            result: result_rx,
        },
        EnginePorts {
            red: red_rx,
            green: green_rx,
            blue: blue_rx,
            result: result_tx,
        },
    )
}

/// Bus side: writes colour triplets, reads results.
#[derive(Debug)]
pub struct IngestPorts {
    red: mpsc::Sender<u8>,
    green: mpsc::Sender<u8>,
    blue: mpsc::Sender<u8>,
    result: mpsc::Receiver<i32>,
}

impl IngestPorts {
    /// Pushes one triplet, waiting for room on every colour stream first.
    pub async fn write_color(&self, sample: ColorSample) -> Result<()> {
        let red = self.red.reserve().await.map_err(|_| AcceleratorError::ChannelClosed("red"))?;
        let green = self.green.reserve().await.map_err(|_| AcceleratorError::ChannelClosed("green"))?;
        let blue = self.blue.reserve().await.map_err(|_| AcceleratorError::ChannelClosed("blue"))?;

        red.send(sample.red);
        green.send(sample.green);
        blue.send(sample.blue);
        Ok(())
    }

    /// Waits for the next published result.
    pub async fn read_result(&mut self) -> Result<i32> {
        self.result
            .recv()
            .await
            .ok_or(AcceleratorError::ChannelClosed("result"))
    }
}

/// Engine side: reads colour triplets, publishes results.
#[derive(Debug)]
pub struct EnginePorts {
    red: mpsc::Receiver<u8>,
    green: mpsc::Receiver<u8>,
    blue: mpsc::Receiver<u8>,
    result: mpsc::Sender<i32>,
}

impl EnginePorts {
    /// Reads red, green then blue. `None` once the ingest side is gone.
    pub async fn read_color(&mut self) -> Option<ColorSample> {
        let red = self.red.recv().await?;
        let green = self.green.recv().await?;
        let blue = self.blue.recv().await?;
        Some(ColorSample { red, green, blue })
    }

    /// Returns `false` if nobody can read the result any more.
    pub async fn publish(&self, result: i32) -> bool {
        self.result.send(result).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_triplet_round_trip() {
        let (ingest, mut engine) = fifo_link(2);
        ingest.write_color(ColorSample::new(1, 2, 3)).await.unwrap();

        assert_eq!(engine.read_color().await, Some(ColorSample::new(1, 2, 3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_stream_suspends_writer() {
        let (ingest, _engine) = fifo_link(1);
        ingest.write_color(ColorSample::new(1, 1, 1)).await.unwrap();

        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            ingest.write_color(ColorSample::new(2, 2, 2)),
        )
        .await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn test_dropped_ingest_ends_engine_reads() {
        let (ingest, mut engine) = fifo_link(4);
        ingest.write_color(ColorSample::new(9, 9, 9)).await.unwrap();
        drop(ingest);

        assert_eq!(engine.read_color().await, Some(ColorSample::new(9, 9, 9)));
        assert_eq!(engine.read_color().await, None);
    }

    #[tokio::test]
    async fn test_dropped_engine_closes_ingest() {
        let (mut ingest, engine) = fifo_link(4);
        drop(engine);

        let write = ingest.write_color(ColorSample::new(0, 0, 0)).await;
        assert!(matches!(write, Err(AcceleratorError::ChannelClosed("red"))));
        let read = ingest.read_result().await;
        assert!(matches!(read, Err(AcceleratorError::ChannelClosed("result"))));
    }
}
