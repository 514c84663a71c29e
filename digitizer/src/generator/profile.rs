use anyhow::Context;
use curvecore::calibrate::{AxisKind, Calibration, CalibrationPoint};
use curvecore::extract::{ImageFrame, TargetColor};
use curvecore::{DataPoint, PixelPoint};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for painting a synthetic chart raster: a sine curve in
/// the target color on a white background, optionally speckled with
/// stray same-color pixels to exercise the outlier filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticChartConfig {
    pub width: usize,
    pub height: usize,
    /// Sine cycles across the image width.
    pub frequency: f64,
    /// Peak amplitude as a fraction of the image height.
    pub amplitude: f64,
    /// Curve band thickness in pixels.
    pub thickness: usize,
    /// Stray curve-colored pixels scattered over the image.
    pub speckles: usize,
    pub seed: u64,
    pub curve_color: String,
    /// Data-space extent mapped onto the full image by the corner
    /// calibration.
    pub data_span_x: f64,
    pub data_span_y: f64,
}

impl Default for SyntheticChartConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            frequency: 1.5,
            amplitude: 0.3,
            thickness: 3,
            speckles: 0,
            seed: 0,
            curve_color: "#0000ff".to_string(),
            data_span_x: 10.0,
            data_span_y: 10.0,
        }
    }
}

/// Paints the configured curve into a fresh RGBA frame.
pub fn build_chart_frame(config: &SyntheticChartConfig) -> anyhow::Result<ImageFrame> {
    let color = TargetColor::from_hex(&config.curve_color)
        .context("parsing synthetic curve color")?;
    let width = config.width.max(1);
    let height = config.height.max(1);
    let mut data = vec![255u8; width * height * 4];

    let set_pixel = |data: &mut [u8], x: usize, y: usize| {
        let idx = (y * width + x) * 4;
        data[idx] = color.r;
        data[idx + 1] = color.g;
        data[idx + 2] = color.b;
        data[idx + 3] = 255;
    };

    let center = height as f64 / 2.0;
    let amplitude = config.amplitude * height as f64 / 2.0;
    let half_band = config.thickness.max(1) / 2;

    for x in 0..width {
        let phase = x as f64 / width as f64 * 2.0 * PI * config.frequency;
        let row = center - amplitude * phase.sin();
        let row = row.round().max(0.0).min((height - 1) as f64) as usize;
        let band_lo = row.saturating_sub(half_band);
        let band_hi = (row + half_band).min(height - 1);
        for y in band_lo..=band_hi {
            set_pixel(&mut data, x, y);
        }
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    for _ in 0..config.speckles {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        set_pixel(&mut data, x, y);
    }

    ImageFrame::from_rgba(width, height, data).context("assembling synthetic frame")
}

/// Corner calibration for a synthetic frame: lower-left pixel maps to
/// data (0, 0), upper-right to the configured data span.
pub fn corner_calibration(config: &SyntheticChartConfig) -> anyhow::Result<Calibration> {
    let width = config.width.max(2);
    let height = config.height.max(2);
    Calibration::try_new(
        vec![
            CalibrationPoint::new(
                PixelPoint::new(0.0, (height - 1) as f64),
                DataPoint::new(0.0, 0.0),
            ),
            CalibrationPoint::new(
                PixelPoint::new((width - 1) as f64, 0.0),
                DataPoint::new(config.data_span_x, config.data_span_y),
            ),
        ],
        AxisKind::Linear,
        AxisKind::Linear,
    )
    .context("building corner calibration")
}
