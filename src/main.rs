use denoise_accel_rs::accelerator::{AcceleratorConfig, ColorSample, DenoiseBlock, ResponseStatus};
use denoise_accel_rs::logger;

use tracing::{info, warn};

const WIDTH: usize = 12;
const HEIGHT: usize = 6;

/// Horizontal gradient with a salt pixel every seventh sample.
fn synthetic_image() -> Vec<ColorSample> {
    (0..WIDTH * HEIGHT)
        .map(|i| {
            if i % 7 == 3 {
                return ColorSample::new(255, 255, 255);
            }
            let level = ((i % WIDTH) * 20) as u8;
            ColorSample::new(level, level.saturating_add(10), level.saturating_sub(10))
        })
        .collect()
}

/// Every 3x3 neighbourhood of the image, row-major, without overlap.
fn windows(image: &[ColorSample]) -> impl Iterator<Item = [ColorSample; 9]> + '_ {
    (0..HEIGHT / 3).flat_map(move |wy| {
        (0..WIDTH / 3).map(move |wx| {
            std::array::from_fn(|k| image[(wy * 3 + k / 3) * WIDTH + wx * 3 + k % 3])
        })
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting denoise accelerator...");

    let config = match std::env::args().nth(1) {
        Some(path) => AcceleratorConfig::load(&path)?,
        None => AcceleratorConfig::default(),
    };
    info!("Tick: {:?}", config.tick);
    info!("Mask: {:?}", config.mask.rows());

    let mut block = DenoiseBlock::spawn(config)?;
    let image = synthetic_image();

    for (index, window) in windows(&image).enumerate() {
        for pixel in window {
            let status = block.front().write_pixel(pixel).await?;
            if status != ResponseStatus::Ok {
                warn!("Pixel write answered {:?}", status);
            }
        }
        match block.front().read_result().await? {
            Some(result) => info!("Window {:>2}: {}", index, result),
            None => warn!("Window {:>2}: no result", index),
        }
    }

    let stats = block.shutdown().await?;
    info!(
        "Processed {} windows; last window took {} ticks",
        stats.windows_completed,
        stats.last_window.total_steps()
    );

    Ok(())
}
