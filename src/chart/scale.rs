//! Canvas dimensions and the mapping from bucket values to drawing coordinates.

use serde::Serialize;

use crate::{ValidationError, chart::spline::Point};

/// The smallest value the vertical axis will reach, so that a chart of all
/// zeros still has a usable scale.
pub const MIN_SCALE_VALUE: f64 = 100.0;

/// The factor applied to the largest plotted value so the curves never touch
/// the top of the graph.
pub const SCALE_HEADROOM: f64 = 1.1;

/// Space between the edge of the canvas and the graph, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(padding: f64) -> Self {
        Self {
            top: padding,
            right: padding,
            bottom: padding,
            left: padding,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

/// The drawing surface a chart is laid out on.
///
/// The graph is the area inside the padding and always has a positive width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    width: f64,
    height: f64,
    padding: Padding,
}

impl Canvas {
    /// # Errors
    /// Returns a [ValidationError] naming the offending `canvas.*` field if a
    /// dimension is not finite, the size is not positive, the padding is
    /// negative, or the padding leaves no room for the graph.
    pub fn new(width: f64, height: f64, padding: Padding) -> Result<Self, ValidationError> {
        check_positive("canvas.width", width)?;
        check_positive("canvas.height", height)?;
        check_non_negative("canvas.padding.top", padding.top)?;
        check_non_negative("canvas.padding.right", padding.right)?;
        check_non_negative("canvas.padding.bottom", padding.bottom)?;
        check_non_negative("canvas.padding.left", padding.left)?;

        if padding.left + padding.right >= width {
            return Err(ValidationError::new(
                "canvas.padding",
                format!("horizontal padding leaves no room in a canvas {width} wide"),
            ));
        }

        if padding.top + padding.bottom >= height {
            return Err(ValidationError::new(
                "canvas.padding",
                format!("vertical padding leaves no room in a canvas {height} high"),
            ));
        }

        Ok(Self {
            width,
            height,
            padding,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn graph_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn graph_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    /// The left edge of the graph.
    pub fn graph_left(&self) -> f64 {
        self.padding.left
    }

    /// The right edge of the graph.
    pub fn graph_right(&self) -> f64 {
        self.padding.left + self.graph_width()
    }

    /// The vertical position of the value zero.
    pub fn baseline(&self) -> f64 {
        self.padding.top + self.graph_height()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: Padding::default(),
        }
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be zero or a positive number, got {value}"),
        ))
    }
}

/// The range of values covered by the vertical axis, from zero to `max_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueScale {
    max_value: f64,
}

impl ValueScale {
    /// Fits a scale to `values` with [SCALE_HEADROOM], never going below [MIN_SCALE_VALUE].
    ///
    /// Non-finite values are ignored.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let largest = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max);

        Self {
            max_value: (largest * SCALE_HEADROOM).max(MIN_SCALE_VALUE),
        }
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// `count` values evenly spaced from zero to `max_value` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => (0..count)
                .map(|i| self.max_value * i as f64 / (count - 1) as f64)
                .collect(),
        }
    }
}

/// Maps bucket indices and values onto the graph area of a canvas.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    canvas: Canvas,
    scale: ValueScale,
    bucket_count: usize,
}

impl CoordinateMapper {
    pub fn new(canvas: Canvas, scale: ValueScale, bucket_count: usize) -> Self {
        Self {
            canvas,
            scale,
            bucket_count,
        }
    }

    /// The horizontal position of bucket `index`.
    ///
    /// The first bucket sits on the left edge of the graph and the last on the
    /// right edge. A lone bucket sits on the left edge.
    pub fn x(&self, index: usize) -> f64 {
        let steps = self.bucket_count.saturating_sub(1).max(1) as f64;

        self.canvas.graph_left() + (index as f64 / steps) * self.canvas.graph_width()
    }

    /// The vertical position of `value`, with zero on the baseline.
    ///
    /// Non-finite values are drawn at zero.
    pub fn y(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { 0.0 };
        let graph_height = self.canvas.graph_height();

        self.canvas.padding.top + graph_height - (value / self.scale.max_value) * graph_height
    }

    pub fn point(&self, index: usize, value: f64) -> Point {
        Point::new(self.x(index), self.y(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{Canvas, CoordinateMapper, MIN_SCALE_VALUE, Padding, ValueScale};

    fn canvas() -> Canvas {
        Canvas::new(
            500.0,
            300.0,
            Padding {
                top: 20.0,
                right: 30.0,
                bottom: 40.0,
                left: 70.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn canvas_exposes_graph_area() {
        let canvas = canvas();

        assert_eq!(canvas.graph_width(), 400.0);
        assert_eq!(canvas.graph_height(), 240.0);
        assert_eq!(canvas.graph_left(), 70.0);
        assert_eq!(canvas.graph_right(), 470.0);
        assert_eq!(canvas.baseline(), 260.0);
    }

    #[test]
    fn canvas_rejects_non_positive_width() {
        let error = Canvas::new(0.0, 300.0, Padding::uniform(10.0)).unwrap_err();

        assert_eq!(error.field, "canvas.width");
    }

    #[test]
    fn canvas_rejects_non_finite_height() {
        let error = Canvas::new(300.0, f64::NAN, Padding::uniform(10.0)).unwrap_err();

        assert_eq!(error.field, "canvas.height");
    }

    #[test]
    fn canvas_rejects_negative_padding() {
        let mut padding = Padding::uniform(10.0);
        padding.left = -1.0;

        let error = Canvas::new(300.0, 300.0, padding).unwrap_err();

        assert_eq!(error.field, "canvas.padding.left");
    }

    #[test]
    fn canvas_rejects_padding_wider_than_canvas() {
        let error = Canvas::new(100.0, 300.0, Padding::uniform(50.0)).unwrap_err();

        assert_eq!(error.field, "canvas.padding");
    }

    #[test]
    fn scale_adds_headroom() {
        let scale = ValueScale::fit([200.0, 1000.0, 0.0]);

        assert!((scale.max_value() - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn scale_of_zeros_uses_minimum() {
        let scale = ValueScale::fit([0.0, 0.0]);

        assert_eq!(scale.max_value(), MIN_SCALE_VALUE);
    }

    #[test]
    fn scale_of_nothing_uses_minimum() {
        let scale = ValueScale::fit(std::iter::empty());

        assert_eq!(scale.max_value(), MIN_SCALE_VALUE);
    }

    #[test]
    fn ticks_span_zero_to_max() {
        let scale = ValueScale::fit([0.0]);

        assert_eq!(scale.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(scale.ticks(1), vec![0.0]);
        assert!(scale.ticks(0).is_empty());
    }

    #[test]
    fn x_spreads_buckets_across_graph_width() {
        let mapper = CoordinateMapper::new(canvas(), ValueScale::fit([0.0]), 5);

        assert_eq!(mapper.x(0), 70.0);
        assert_eq!(mapper.x(2), 270.0);
        assert_eq!(mapper.x(4), 470.0);
    }

    #[test]
    fn x_of_single_bucket_is_finite() {
        let mapper = CoordinateMapper::new(canvas(), ValueScale::fit([0.0]), 1);

        assert_eq!(mapper.x(0), 70.0);
    }

    #[test]
    fn y_maps_zero_to_baseline_and_max_to_top() {
        let canvas = canvas();
        let scale = ValueScale::fit([0.0]);
        let mapper = CoordinateMapper::new(canvas, scale, 2);

        assert_eq!(mapper.y(0.0), canvas.baseline());
        assert_eq!(mapper.y(scale.max_value()), 20.0);
        assert_eq!(mapper.y(50.0), 140.0);
    }

    #[test]
    fn y_stays_within_graph_for_values_in_scale() {
        let canvas = canvas();
        let scale = ValueScale::fit([37.0, 912.5, 4.2]);
        let mapper = CoordinateMapper::new(canvas, scale, 3);

        for step in 0..=100 {
            let value = scale.max_value() * step as f64 / 100.0;
            let y = mapper.y(value);

            assert!(y >= 0.0, "{y} is above the canvas");
            assert!(y <= canvas.baseline(), "{y} is below the baseline");
        }
    }

    #[test]
    fn y_draws_nan_at_zero() {
        let canvas = canvas();
        let mapper = CoordinateMapper::new(canvas, ValueScale::fit([0.0]), 2);

        assert_eq!(mapper.y(f64::NAN), canvas.baseline());
    }
}
