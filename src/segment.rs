//! Turns cumulative tick thresholds into the arcs that make up the ring.
//!
//! Angles follow the canvas convention: degrees, 0° at 3 o'clock and
//! positive sweeps running clockwise. Every ring starts at the top.

use rand::Rng;

use crate::config::Color;

/// Where the first segment starts (12 o'clock).
pub const START_ANGLE: f32 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Butt,
    Round,
}

/// Stroke style for arcs and the background ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub cap: Cap,
}

impl Paint {
    pub const fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
            cap: Cap::Round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub start_angle: f32,
    pub sweep_angle: f32,
    pub paint: Paint,
}

/// A tick together with its cumulative angle and paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub tick: f32,
    pub angle: f32,
    pub paint: Paint,
}

/// Cumulative angle reached by `tick`, saturating at a full turn past `max`.
pub fn angle(tick: f32, max: f32) -> f32 {
    if tick > max {
        360.0
    } else {
        360.0 * tick / max
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::argb(0xff, rng.random(), rng.random(), rng.random())
}

// ============================================================================
// COLOR ASSIGNMENT
// ============================================================================

/// Colors per tick index, fixed for the lifetime of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorAssignment {
    colors: Vec<Color>,
}

impl ColorAssignment {
    /// Provided colors are used by index, extra ones are ignored and any
    /// missing index gets a random opaque color.
    pub fn assign<R: Rng + ?Sized>(provided: &[Color], count: usize, rng: &mut R) -> Self {
        let colors = (0..count)
            .map(|index| match provided.get(index) {
                Some(color) => *color,
                None => random_color(rng),
            })
            .collect();
        Self { colors }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }
}

// ============================================================================
// BUILD STEPS
// ============================================================================

pub fn build_segments(
    ticks: &[f32],
    colors: &ColorAssignment,
    max: f32,
    stroke_width: f32,
) -> Vec<Segment> {
    ticks
        .iter()
        .enumerate()
        .map(|(index, &tick)| Segment {
            tick,
            angle: angle(tick, max),
            paint: Paint::stroke(colors.get(index).unwrap_or(Color::BLACK), stroke_width),
        })
        .collect()
}

/// Contiguous arcs between consecutive cumulative angles.
pub fn build_base(segments: &[Segment]) -> Vec<ArcParams> {
    let mut previous = 0.0;
    segments
        .iter()
        .map(|segment| {
            let arc = ArcParams {
                start_angle: START_ANGLE + previous,
                sweep_angle: segment.angle - previous,
                paint: segment.paint,
            };
            previous = segment.angle;
            arc
        })
        .collect()
}

/// When the ring is full, lay a copy of the last arc on top of everything,
/// pulled in at its start by a tenth of the range, so the end of the ring
/// visibly overlaps its beginning. The tenth is taken in whole units, so a
/// range below 10 gets no inset at all.
pub fn apply_overlap(arcs: &mut Vec<ArcParams>, segments: &[Segment], max: i32, overlap: bool) {
    if !overlap {
        return;
    }
    let (Some(last_segment), Some(last_arc)) = (segments.last(), arcs.last().copied()) else {
        return;
    };
    if last_segment.tick < max as f32 {
        return;
    }

    let inset = angle((max / 10) as f32, max as f32);
    arcs.insert(
        0,
        ArcParams {
            start_angle: last_arc.start_angle + inset,
            sweep_angle: last_arc.sweep_angle - inset,
            paint: last_arc.paint,
        },
    );
}

/// Build the full arc list for a set of ticks, drawing random colors from
/// the thread rng for ticks without one.
pub fn build(
    ticks: &[f32],
    colors: &[Color],
    max: i32,
    overlap: bool,
    stroke_width: f32,
) -> Vec<ArcParams> {
    let assignment = ColorAssignment::assign(colors, ticks.len(), &mut rand::rng());
    build_with(ticks, &assignment, max, overlap, stroke_width)
}

pub fn build_with(
    ticks: &[f32],
    colors: &ColorAssignment,
    max: i32,
    overlap: bool,
    stroke_width: f32,
) -> Vec<ArcParams> {
    let segments = build_segments(ticks, colors, max as f32, stroke_width);
    let mut arcs = build_base(&segments);
    apply_overlap(&mut arcs, &segments, max, overlap);
    arcs
}
