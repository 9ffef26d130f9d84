use log::{trace, warn};

use crate::canvas::Bitmap;
use crate::placement::{locate, Rect};
use crate::segment::{ArcParams, Paint};

/// Drawing surface the donut renders onto. Angles are in degrees, 0° at
/// 3 o'clock, positive sweeps clockwise.
pub trait Painter {
    /// Stroke the full oval inscribed in `rect`.
    fn draw_disc(&mut self, rect: Rect, paint: &Paint);
    fn draw_arc(&mut self, rect: Rect, start_angle: f32, sweep_angle: f32, paint: &Paint);
    /// Draw `bitmap` with its top-left corner at `(x, y)`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32);
}

/// Everything a single draw pass reads. Borrowed from the widget so a draw
/// can never touch the precomputed arcs.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub ring: Rect,
    pub background: &'a Paint,
    pub arcs: &'a [ArcParams],
    pub ticks: &'a [f32],
    pub icons: &'a [Option<Bitmap>],
    pub icon_size: f32,
    pub min: i32,
    pub max: i32,
}

/// Value at the middle of segment `index`; the first segment starts at 0.
pub fn icon_value(ticks: &[f32], index: usize) -> f32 {
    let start = if index == 0 { 0.0 } else { ticks[index - 1] };
    (start + ticks[index]) / 2.0
}

pub fn render<P: Painter + ?Sized>(painter: &mut P, frame: &Frame) {
    trace!(
        "drawing {} arcs and {} icons in {:?}",
        frame.arcs.len(),
        frame.icons.iter().flatten().count(),
        frame.ring
    );

    painter.draw_disc(frame.ring, frame.background);

    // index 0 ends up on top
    for arc in frame.arcs.iter().rev() {
        painter.draw_arc(frame.ring, arc.start_angle, arc.sweep_angle, &arc.paint);
    }

    draw_icons(painter, frame);
}

fn draw_icons<P: Painter + ?Sized>(painter: &mut P, frame: &Frame) {
    if frame.icons.is_empty() || !(frame.ring.width() > 0.0) {
        return;
    }

    let half = frame.icon_size / 2.0;
    for (index, bitmap) in frame.icons.iter().enumerate().take(frame.ticks.len()) {
        let Some(bitmap) = bitmap else {
            continue;
        };
        let value = icon_value(frame.ticks, index);
        match locate(value, frame.ring, frame.min, frame.max) {
            Ok(point) => painter.draw_bitmap(bitmap, point.x - half, point.y - half),
            Err(err) => {
                warn!("skipping icons for this frame: {err}");
                return;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Color;
    use crate::segment::build;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Disc(Rect, Color),
        Arc(f32, f32, Color),
        Bitmap(u32, f32, f32),
    }

    #[derive(Default)]
    pub(crate) struct RecordingPainter {
        pub calls: Vec<Call>,
    }

    impl Painter for RecordingPainter {
        fn draw_disc(&mut self, rect: Rect, paint: &Paint) {
            self.calls.push(Call::Disc(rect, paint.color));
        }

        fn draw_arc(&mut self, _rect: Rect, start_angle: f32, sweep_angle: f32, paint: &Paint) {
            self.calls.push(Call::Arc(start_angle, sweep_angle, paint.color));
        }

        fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32) {
            self.calls.push(Call::Bitmap(bitmap.size(), x, y));
        }
    }

    const RING: Rect = Rect::new(10.0, 10.0, 90.0, 90.0);
    const BACKGROUND: Paint = Paint::stroke(Color::GRAY, 4.0);

    fn frame<'a>(
        arcs: &'a [ArcParams],
        ticks: &'a [f32],
        icons: &'a [Option<Bitmap>],
        min: i32,
        max: i32,
    ) -> Frame<'a> {
        Frame {
            ring: RING,
            background: &BACKGROUND,
            arcs,
            ticks,
            icons,
            icon_size: 10.0,
            min,
            max,
        }
    }

    #[test]
    fn empty_ticks_draw_only_the_background() {
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&[], &[], &[], 0, 100));
        assert_eq!(painter.calls, vec![Call::Disc(RING, Color::GRAY)]);
    }

    #[test]
    fn arcs_are_drawn_in_reverse_after_the_background() {
        let ticks = [25.0, 50.0, 100.0];
        let arcs = build(&ticks, &[Color::GREEN, Color::YELLOW, Color::RED], 100, true, 4.0);
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&arcs, &ticks, &[], 0, 100));

        let colors: Vec<Color> = painter
            .calls
            .iter()
            .map(|call| match call {
                Call::Disc(_, color) | Call::Arc(_, _, color) => *color,
                Call::Bitmap(..) => unreachable!(),
            })
            .collect();
        // background, red, yellow, green, then the overlap seam in red
        assert_eq!(
            colors,
            vec![Color::GRAY, Color::RED, Color::YELLOW, Color::GREEN, Color::RED]
        );
    }

    #[test]
    fn icons_sit_in_the_middle_of_their_segment() {
        let ticks = [50.0, 100.0];
        let icons = [Some(Bitmap::new(10)), Some(Bitmap::new(10))];
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&[], &ticks, &icons, 0, 100));

        let bitmaps: Vec<&Call> = painter
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Bitmap(..)))
            .collect();
        assert_eq!(bitmaps.len(), 2);
        // 25 is 3 o'clock, 75 is 9 o'clock, both offset by half the icon size
        match (bitmaps[0], bitmaps[1]) {
            (Call::Bitmap(_, x0, y0), Call::Bitmap(_, x1, y1)) => {
                assert!((x0 - 85.0).abs() < 1e-3 && (y0 - 45.0).abs() < 1e-3);
                assert!((x1 - 5.0).abs() < 1e-3 && (y1 - 45.0).abs() < 1e-3);
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn missing_icons_are_skipped() {
        let ticks = [20.0, 40.0, 60.0];
        let icons = [None, Some(Bitmap::new(10))];
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&[], &ticks, &icons, 0, 100));

        let count = painter
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Bitmap(..)))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn equal_bounds_skip_icons_without_failing_the_draw() {
        let ticks = [50.0];
        let arcs = build(&ticks, &[Color::GREEN], 50, false, 4.0);
        let icons = [Some(Bitmap::new(10))];
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&arcs, &ticks, &icons, 50, 50));

        assert_eq!(painter.calls.len(), 2);
        assert!(matches!(painter.calls[1], Call::Arc(..)));
    }

    #[test]
    fn equal_bounds_stop_the_icon_pass_at_the_first_failure() {
        let ticks = [20.0, 50.0];
        let arcs = build(&ticks, &[Color::GREEN, Color::RED], 50, false, 4.0);
        let icons = [Some(Bitmap::new(10)), Some(Bitmap::new(10))];
        let mut painter = RecordingPainter::default();
        render(&mut painter, &frame(&arcs, &ticks, &icons, 50, 50));

        let arcs_drawn = painter
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Arc(..)))
            .count();
        let bitmaps_drawn = painter
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Bitmap(..)))
            .count();
        assert_eq!(arcs_drawn, 2);
        assert_eq!(bitmaps_drawn, 0);
        assert_eq!(painter.calls.len(), 3);
    }

    #[test]
    fn empty_ring_skips_icons() {
        let ticks = [50.0];
        let icons = [Some(Bitmap::new(10))];
        let mut painter = RecordingPainter::default();
        let mut f = frame(&[], &ticks, &icons, 0, 100);
        f.ring = Rect::default();
        render(&mut painter, &f);
        assert_eq!(painter.calls.len(), 1);
    }

    #[test]
    fn icon_value_is_the_segment_midpoint() {
        let ticks = [20.0, 60.0, 100.0];
        assert_eq!(icon_value(&ticks, 0), 10.0);
        assert_eq!(icon_value(&ticks, 1), 40.0);
        assert_eq!(icon_value(&ticks, 2), 80.0);
    }
}
