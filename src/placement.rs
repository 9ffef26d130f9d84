//! Ring geometry and the placement of icons along the ring.

use std::f64::consts::PI;

use crate::error::DonutError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The square ring rect for a `width` x `height` area: side is the
    /// smaller dimension, centered, inset by half the stroke on every side.
    pub fn ring(width: f32, height: f32, stroke_width: f32) -> Self {
        let side = width.min(height);
        let left = (width - side) / 2.0;
        let top = (height - side) / 2.0;
        let inset = stroke_width / 2.0;
        Self::new(left + inset, top + inset, left + side - inset, top + side - inset)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Share of the `[min, max]` range covered by `value`, as a percentage.
pub fn percentage(value: f32, min: i32, max: i32) -> Result<f64, DonutError> {
    if max == min {
        return Err(DonutError::InvalidBounds { min, max });
    }
    Ok(100.0 * (value as f64 - min as f64) / (max as f64 - min as f64))
}

/// Point on the ring's circumference for `value`.
///
/// The percentage of `value` within `[min, max]` runs clockwise from the top:
/// 0 sits at 12 o'clock, 25 at 3, 50 at 6 and 75 at 9. The point is where the
/// line through the center at that angle meets the circle, split into the
/// right half (0, 50) and the left half (50, 100) with the two poles handled
/// exactly. A zero-width rect collapses every point onto its center.
pub fn locate(value: f32, bounds: Rect, min: i32, max: i32) -> Result<Point, DonutError> {
    let tick = percentage(value, min, max)?;

    let cx = bounds.center_x() as f64;
    let cy = bounds.center_y() as f64;
    let r = bounds.width() as f64 / 2.0;

    let m = ((tick / 50.0) * PI + PI / 2.0).tan();
    let b = ((r * r) / (m * m + 1.0)).sqrt();

    let (x, y) = if tick == 0.0 || tick == 100.0 {
        (cx, cy - r)
    } else if 0.0 < tick && tick < 50.0 {
        (cx + b, cy + m * b)
    } else if tick == 50.0 {
        (cx, cy + r)
    } else {
        (cx - b, cy - m * b)
    };

    Ok(Point::new(x as f32, y as f32))
}
