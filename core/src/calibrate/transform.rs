use crate::calibrate::axis::{AxisConfig, AxisKind};
use crate::{CoreError, CoreResult, DataPoint, PixelPoint};
use serde::{Deserialize, Serialize};

/// One user-supplied correspondence between a pixel location and a
/// data-space coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub pixel: PixelPoint,
    pub data: DataPoint,
}

impl CalibrationPoint {
    pub fn new(pixel: PixelPoint, data: DataPoint) -> Self {
        Self { pixel, data }
    }
}

/// The pixel/data mapping for one image: 2-4 correspondence points plus
/// the derived per-axis configuration.
///
/// This is the single source of truth for pixel/data transforms; it is
/// replaced wholesale on recalibration, never edited point by point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub points: Vec<CalibrationPoint>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

/// Extremal pair for one axis: the data values paired with the minimum
/// and maximum pixel coordinate among the calibration points.
struct AxisSpan {
    pixel_min: f64,
    pixel_max: f64,
    data_at_pixel_min: f64,
    data_at_pixel_max: f64,
}

impl Calibration {
    /// Validates and builds a calibration from committed points.
    ///
    /// Refused outright when fewer than 2 or more than 4 points are
    /// supplied, or when the extremal pixel coordinates coincide on
    /// either axis; the transform guards in [`Self::pixel_to_data`] are
    /// a last-resort safety net, not the primary correctness path.
    pub fn try_new(
        points: Vec<CalibrationPoint>,
        x_kind: AxisKind,
        y_kind: AxisKind,
    ) -> CoreResult<Self> {
        if points.len() < 2 {
            return Err(CoreError::InvalidCalibration(
                "insufficient calibration points (need at least 2)".into(),
            ));
        }
        if points.len() > 4 {
            return Err(CoreError::InvalidCalibration(format!(
                "too many calibration points ({}, maximum 4)",
                points.len()
            )));
        }

        let x_span = axis_span(&points, Axis::X);
        if x_span.pixel_min == x_span.pixel_max {
            return Err(CoreError::InvalidCalibration(
                "insufficient calibration points: pixel x extremes coincide".into(),
            ));
        }
        let y_span = axis_span(&points, Axis::Y);
        if y_span.pixel_min == y_span.pixel_max {
            return Err(CoreError::InvalidCalibration(
                "insufficient calibration points: pixel y extremes coincide".into(),
            ));
        }

        let (x_lo, x_hi) = data_extent(points.iter().map(|p| p.data.x));
        let (y_lo, y_hi) = data_extent(points.iter().map(|p| p.data.y));

        Ok(Self {
            points,
            x_axis: AxisConfig::new(x_kind, x_lo, x_hi),
            y_axis: AxisConfig::new(y_kind, y_lo, y_hi),
        })
    }

    /// Converts a pixel coordinate to data space, per axis independently.
    ///
    /// Extrapolation beyond the calibrated extent is allowed and
    /// expected; `t` is never clamped. The fields are public for serde,
    /// so a calibration deserialized with no points can exist; it
    /// degenerates to the identity mapping instead of panicking.
    pub fn pixel_to_data(&self, pixel: PixelPoint) -> DataPoint {
        if self.points.is_empty() {
            return DataPoint::new(pixel.x, pixel.y);
        }
        let x_span = axis_span(&self.points, Axis::X);
        let y_span = axis_span(&self.points, Axis::Y);

        DataPoint::new(
            forward_axis(pixel.x, &x_span, self.x_axis.kind),
            forward_axis(pixel.y, &y_span, self.y_axis.kind),
        )
    }

    /// Algebraic inverse of [`Self::pixel_to_data`].
    pub fn data_to_pixel(&self, data: DataPoint) -> PixelPoint {
        if self.points.is_empty() {
            return PixelPoint::new(data.x, data.y);
        }
        let x_span = axis_span(&self.points, Axis::X);
        let y_span = axis_span(&self.points, Axis::Y);

        PixelPoint::new(
            inverse_axis(data.x, &x_span, self.x_axis.kind),
            inverse_axis(data.y, &y_span, self.y_axis.kind),
        )
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn axis_span(points: &[CalibrationPoint], axis: Axis) -> AxisSpan {
    let coord = |p: &CalibrationPoint| match axis {
        Axis::X => (p.pixel.x, p.data.x),
        Axis::Y => (p.pixel.y, p.data.y),
    };

    // First occurrence wins on ties, matching stable extremal selection.
    let mut min = coord(&points[0]);
    let mut max = coord(&points[0]);
    for point in &points[1..] {
        let (pixel, data) = coord(point);
        if pixel < min.0 {
            min = (pixel, data);
        }
        if pixel > max.0 {
            max = (pixel, data);
        }
    }

    AxisSpan {
        pixel_min: min.0,
        pixel_max: max.0,
        data_at_pixel_min: min.1,
        data_at_pixel_max: max.1,
    }
}

fn data_extent<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Pixel -> data for one axis.
fn forward_axis(pixel: f64, span: &AxisSpan, kind: AxisKind) -> f64 {
    if span.pixel_max == span.pixel_min {
        return span.data_at_pixel_min;
    }

    let t = (pixel - span.pixel_min) / (span.pixel_max - span.pixel_min);

    match kind {
        AxisKind::Log if span.data_at_pixel_min > 0.0 && span.data_at_pixel_max > 0.0 => {
            span.data_at_pixel_min * (span.data_at_pixel_max / span.data_at_pixel_min).powf(t)
        }
        // A log axis with non-positive endpoints is a user-data
        // inconsistency; fall back to the linear formula rather than fail.
        _ => span.data_at_pixel_min + t * (span.data_at_pixel_max - span.data_at_pixel_min),
    }
}

/// Data -> pixel for one axis.
fn inverse_axis(data: f64, span: &AxisSpan, kind: AxisKind) -> f64 {
    if span.data_at_pixel_max == span.data_at_pixel_min {
        return span.pixel_min;
    }

    let t = match kind {
        AxisKind::Log
            if span.data_at_pixel_min > 0.0 && span.data_at_pixel_max > 0.0 && data > 0.0 =>
        {
            (data / span.data_at_pixel_min).ln()
                / (span.data_at_pixel_max / span.data_at_pixel_min).ln()
        }
        _ => (data - span.data_at_pixel_min) / (span.data_at_pixel_max - span.data_at_pixel_min),
    };

    span.pixel_min + t * (span.pixel_max - span.pixel_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_points() -> Vec<CalibrationPoint> {
        vec![
            CalibrationPoint::new(PixelPoint::new(0.0, 300.0), DataPoint::new(0.0, 0.0)),
            CalibrationPoint::new(PixelPoint::new(400.0, 0.0), DataPoint::new(10.0, 50.0)),
        ]
    }

    fn log_points() -> Vec<CalibrationPoint> {
        vec![
            CalibrationPoint::new(PixelPoint::new(10.0, 200.0), DataPoint::new(1.0, 1.0)),
            CalibrationPoint::new(PixelPoint::new(410.0, 20.0), DataPoint::new(1000.0, 100.0)),
        ]
    }

    #[test]
    fn try_new_refuses_single_point() {
        let points = vec![CalibrationPoint::new(
            PixelPoint::new(0.0, 0.0),
            DataPoint::new(0.0, 0.0),
        )];
        let err = Calibration::try_new(points, AxisKind::Linear, AxisKind::Linear).unwrap_err();
        assert!(err.to_string().contains("insufficient calibration points"));
    }

    #[test]
    fn try_new_refuses_coincident_pixel_extremes() {
        let points = vec![
            CalibrationPoint::new(PixelPoint::new(5.0, 0.0), DataPoint::new(0.0, 0.0)),
            CalibrationPoint::new(PixelPoint::new(5.0, 100.0), DataPoint::new(1.0, 1.0)),
        ];
        assert!(Calibration::try_new(points, AxisKind::Linear, AxisKind::Linear).is_err());
    }

    #[test]
    fn try_new_derives_axis_extent_from_data() {
        let cal =
            Calibration::try_new(corner_points(), AxisKind::Linear, AxisKind::Linear).unwrap();
        assert_eq!(cal.x_axis.min, 0.0);
        assert_eq!(cal.x_axis.max, 10.0);
        assert_eq!(cal.y_axis.max, 50.0);
    }

    #[test]
    fn linear_transform_maps_extremes_and_midpoint() {
        let cal =
            Calibration::try_new(corner_points(), AxisKind::Linear, AxisKind::Linear).unwrap();
        let at_min = cal.pixel_to_data(PixelPoint::new(0.0, 300.0));
        assert!((at_min.x - 0.0).abs() < 1e-9);
        assert!((at_min.y - 0.0).abs() < 1e-9);

        let mid = cal.pixel_to_data(PixelPoint::new(200.0, 150.0));
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_linear_inside_and_outside_extent() {
        let cal =
            Calibration::try_new(corner_points(), AxisKind::Linear, AxisKind::Linear).unwrap();
        for pixel in [
            PixelPoint::new(37.0, 120.5),
            PixelPoint::new(-50.0, 450.0),
            PixelPoint::new(999.0, -3.0),
        ] {
            let back = cal.data_to_pixel(cal.pixel_to_data(pixel));
            assert!((back.x - pixel.x).abs() < 1e-6, "x drifted: {back:?}");
            assert!((back.y - pixel.y).abs() < 1e-6, "y drifted: {back:?}");
        }
    }

    #[test]
    fn round_trip_log_axes() {
        let cal = Calibration::try_new(log_points(), AxisKind::Log, AxisKind::Log).unwrap();
        for pixel in [
            PixelPoint::new(10.0, 200.0),
            PixelPoint::new(210.0, 110.0),
            PixelPoint::new(500.0, -40.0),
        ] {
            let back = cal.data_to_pixel(cal.pixel_to_data(pixel));
            assert!((back.x - pixel.x).abs() < 1e-6, "x drifted: {back:?}");
            assert!((back.y - pixel.y).abs() < 1e-6, "y drifted: {back:?}");
        }
    }

    #[test]
    fn log_axis_interpolates_geometrically() {
        let cal = Calibration::try_new(log_points(), AxisKind::Log, AxisKind::Linear).unwrap();
        // Halfway across a 1..1000 log span is one and a half decades.
        let mid = cal.pixel_to_data(PixelPoint::new(210.0, 200.0));
        assert!((mid.x - 1000.0_f64.powf(0.5)).abs() < 1e-6);
    }

    #[test]
    fn log_axis_with_non_positive_data_falls_back_to_linear() {
        let points = vec![
            CalibrationPoint::new(PixelPoint::new(0.0, 100.0), DataPoint::new(-5.0, 0.0)),
            CalibrationPoint::new(PixelPoint::new(100.0, 0.0), DataPoint::new(5.0, 1.0)),
        ];
        let cal = Calibration::try_new(points, AxisKind::Log, AxisKind::Linear).unwrap();
        let mid = cal.pixel_to_data(PixelPoint::new(50.0, 50.0));
        assert!((mid.x - 0.0).abs() < 1e-9);

        let back = cal.data_to_pixel(mid);
        assert!((back.x - 50.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_pixel_span_returns_anchor_without_dividing() {
        // Bypass try_new validation to exercise the last-resort guard.
        let cal = Calibration {
            points: vec![
                CalibrationPoint::new(PixelPoint::new(7.0, 0.0), DataPoint::new(3.0, 0.0)),
                CalibrationPoint::new(PixelPoint::new(7.0, 50.0), DataPoint::new(9.0, 1.0)),
            ],
            x_axis: AxisConfig::new(AxisKind::Linear, 3.0, 9.0),
            y_axis: AxisConfig::new(AxisKind::Linear, 0.0, 1.0),
        };
        for px in [-100.0, 0.0, 7.0, 1e9] {
            let data = cal.pixel_to_data(PixelPoint::new(px, 25.0));
            assert_eq!(data.x, 3.0);
            assert!(data.x.is_finite());
        }
    }

    #[test]
    fn degenerate_data_span_inverts_to_pixel_min() {
        let cal = Calibration {
            points: vec![
                CalibrationPoint::new(PixelPoint::new(0.0, 0.0), DataPoint::new(4.0, 0.0)),
                CalibrationPoint::new(PixelPoint::new(100.0, 50.0), DataPoint::new(4.0, 1.0)),
            ],
            x_axis: AxisConfig::new(AxisKind::Linear, 4.0, 4.0),
            y_axis: AxisConfig::new(AxisKind::Linear, 0.0, 1.0),
        };
        let pixel = cal.data_to_pixel(DataPoint::new(123.0, 0.5));
        assert_eq!(pixel.x, 0.0);
    }

    #[test]
    fn empty_points_degrade_to_identity() {
        // A deserialized calibration can arrive with no points at all.
        let cal = Calibration {
            points: vec![],
            x_axis: AxisConfig::new(AxisKind::Linear, 0.0, 10.0),
            y_axis: AxisConfig::new(AxisKind::Log, 1.0, 100.0),
        };
        let data = cal.pixel_to_data(PixelPoint::new(12.5, -3.0));
        assert_eq!((data.x, data.y), (12.5, -3.0));
        let pixel = cal.data_to_pixel(DataPoint::new(4.0, 9.0));
        assert_eq!((pixel.x, pixel.y), (4.0, 9.0));
    }

    #[test]
    fn extremal_pair_is_selected_over_insertion_order() {
        // Points committed out of pixel order; the transform must use the
        // extremal pair, not the first two collected.
        let points = vec![
            CalibrationPoint::new(PixelPoint::new(200.0, 150.0), DataPoint::new(5.0, 25.0)),
            CalibrationPoint::new(PixelPoint::new(400.0, 300.0), DataPoint::new(10.0, 0.0)),
            CalibrationPoint::new(PixelPoint::new(0.0, 0.0), DataPoint::new(0.0, 50.0)),
        ];
        let cal = Calibration::try_new(points, AxisKind::Linear, AxisKind::Linear).unwrap();
        let data = cal.pixel_to_data(PixelPoint::new(100.0, 75.0));
        assert!((data.x - 2.5).abs() < 1e-9);
        assert!((data.y - 37.5).abs() < 1e-9);
    }
}
