// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod canvas;
pub mod config;
pub mod error;
pub mod icons;
pub mod placement;
pub mod render;
pub mod segment;

// External crate imports
use log::{debug, warn};
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use canvas::{Bitmap, Canvas};
pub use config::{Attributes, Color, DonutConfig};
pub use error::DonutError;
pub use icons::{BitmapProvider, IconSet};
pub use placement::{locate, Point, Rect};
pub use render::{Frame, Painter};
pub use segment::{ArcParams, Cap, ColorAssignment, Paint};

use segment::Segment;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for type-safe donut updates from other threads
#[derive(Debug, Clone, PartialEq)]
pub enum DonutCommand {
    SetTicks(Vec<f32>),
    SetColors(Vec<Color>),
    SetOverlap(bool),
    SetIconSize(f32),
    SetBounds(i32, i32),
    /// Move the last tick, keeping the others
    SetProgress(f32),
}

/// The donut widget: configuration plus everything derived from it.
///
/// Every setter rebuilds segments and arcs from scratch and flags a redraw.
/// Drawing only reads what the last rebuild produced.
pub struct DonutProgress {
    config: DonutConfig,
    provider: Box<dyn BitmapProvider>,
    icons: Vec<Option<Bitmap>>,
    assignment: ColorAssignment,
    segments: Vec<Segment>,
    arcs: Vec<ArcParams>,
    background: Paint,
    ring: Rect,
    allotted: Option<(f32, f32)>,
    redraw_requested: bool,
}

impl std::fmt::Debug for DonutProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonutProgress")
            .field("config", &self.config)
            .field("arcs", &self.arcs)
            .field("ring", &self.ring)
            .finish_non_exhaustive()
    }
}

impl DonutProgress {
    /// Icons are resolved with an [`IconSet`], so color identifiers work.
    pub fn new(config: DonutConfig) -> Self {
        Self::with_provider(config, IconSet::new())
    }

    pub fn with_provider(config: DonutConfig, provider: impl BitmapProvider + 'static) -> Self {
        let background = Paint::stroke(config.background_color, config.stroke_width);
        let mut donut = Self {
            config,
            provider: Box::new(provider),
            icons: Vec::new(),
            assignment: ColorAssignment::default(),
            segments: Vec::new(),
            arcs: Vec::new(),
            background,
            ring: Rect::default(),
            allotted: None,
            redraw_requested: false,
        };
        donut.load_icons();
        donut.rebuild();
        donut
    }

    pub fn config(&self) -> &DonutConfig {
        &self.config
    }

    pub fn arcs(&self) -> &[ArcParams] {
        &self.arcs
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.assignment
    }

    pub fn ring(&self) -> Rect {
        self.ring
    }

    pub fn icons(&self) -> &[Option<Bitmap>] {
        &self.icons
    }

    pub fn set_colors(&mut self, colors: Vec<Color>) {
        self.config.colors = colors;
        self.rebuild();
    }

    pub fn set_ticks(&mut self, ticks: Vec<f32>) {
        self.config.ticks = ticks;
        self.rebuild();
    }

    pub fn set_overlap(&mut self, overlap: bool) {
        self.config.overlap = overlap;
        self.rebuild();
    }

    /// Icons are requested again at the new size.
    pub fn set_icon_size(&mut self, icon_size: f32) {
        self.config.icon_size = icon_size;
        self.load_icons();
        self.rebuild();
    }

    pub fn set_icons(&mut self, icons: Vec<String>) {
        self.config.icons = icons;
        self.load_icons();
        self.rebuild();
    }

    pub fn set_bounds(&mut self, min: i32, max: i32) {
        self.config.min = min;
        self.config.max = max;
        self.rebuild();
    }

    /// Changes the ring inset as well, so the last layout is redone.
    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.config.stroke_width = stroke_width;
        if let Some((width, height)) = self.allotted {
            self.ring = Rect::ring(width, height, stroke_width);
        }
        self.rebuild();
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color;
        self.rebuild();
    }

    pub fn apply(&mut self, command: DonutCommand) {
        match command {
            DonutCommand::SetTicks(ticks) => self.set_ticks(ticks),
            DonutCommand::SetColors(colors) => self.set_colors(colors),
            DonutCommand::SetOverlap(overlap) => self.set_overlap(overlap),
            DonutCommand::SetIconSize(size) => self.set_icon_size(size),
            DonutCommand::SetBounds(min, max) => self.set_bounds(min, max),
            DonutCommand::SetProgress(value) => {
                let mut ticks = self.config.ticks.clone();
                match ticks.last_mut() {
                    Some(last) => *last = value,
                    None => ticks.push(value),
                }
                self.set_ticks(ticks);
            }
        }
    }

    /// Layout callback: lays the ring out in the allotted area and returns
    /// the side of the square the donut occupies.
    pub fn on_layout(&mut self, width: f32, height: f32) -> f32 {
        self.allotted = Some((width, height));
        self.ring = Rect::ring(width, height, self.config.stroke_width);
        self.redraw_requested = true;
        width.min(height)
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        render::render(painter, &self.frame());
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            ring: self.ring,
            background: &self.background,
            arcs: &self.arcs,
            ticks: &self.config.ticks,
            icons: &self.icons,
            icon_size: self.config.icon_size,
            min: self.config.min,
            max: self.config.max,
        }
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Returns whether a redraw was pending and clears the flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn rebuild(&mut self) {
        let max = self.config.max as f32;
        self.assignment = ColorAssignment::assign(
            &self.config.colors,
            self.config.ticks.len(),
            &mut rand::rng(),
        );
        self.segments = segment::build_segments(
            &self.config.ticks,
            &self.assignment,
            max,
            self.config.stroke_width,
        );
        self.arcs = segment::build_base(&self.segments);
        segment::apply_overlap(
            &mut self.arcs,
            &self.segments,
            self.config.max,
            self.config.overlap,
        );
        self.background = Paint::stroke(self.config.background_color, self.config.stroke_width);
        self.redraw_requested = true;

        debug!(
            "rebuilt donut: {} ticks, {} arcs, {} random colors",
            self.segments.len(),
            self.arcs.len(),
            self.segments.len().saturating_sub(self.config.colors.len())
        );
    }

    fn load_icons(&mut self) {
        let size = self.config.icon_size.max(0.0).round() as u32;
        self.icons = self
            .config
            .icons
            .iter()
            .map(|id| {
                let bitmap = self.provider.bitmap(id, size);
                if bitmap.is_none() {
                    warn!("no bitmap for icon {id:?}");
                }
                bitmap
            })
            .collect();
    }
}

// ============================================================================
// WINDOW HOST
// ============================================================================

impl DonutProgress {
    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<DonutCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &mut self,
        receiver: Option<Receiver<DonutCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let logical_width = self.config.window_width;
        let logical_height = self.config.window_height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        self.on_layout(fb_width as f32, fb_height as f32);

        let frame_duration = frame_duration(self.config.max_framerate)?;
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            warn!("failed to resize buffer: {err}");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!("failed to resize surface: {err}");
                        }
                        self.on_layout(fb_width as f32, fb_height as f32);
                    }
                    WindowEvent::RedrawRequested => {
                        self.take_redraw_request();
                        let mut canvas = Canvas::new(pixels.frame_mut(), fb_width, fb_height);
                        canvas.clear(Color::WHITE);
                        self.draw(&mut canvas);
                        if let Err(err) = pixels.render() {
                            warn!("render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if let Some(ref receiver) = receiver {
                        while let Ok(command) = receiver.try_recv() {
                            self.apply(command);
                        }
                    }
                    if self.redraw_requested() && last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

fn frame_duration(max_framerate: f64) -> Result<Duration, DonutError> {
    if !(max_framerate.is_finite() && max_framerate > 0.0) {
        return Err(DonutError::invalid_config(
            "max_framerate",
            max_framerate.to_string(),
            "must be a positive number of frames per second",
        ));
    }
    Ok(Duration::from_secs_f64(1.0 / max_framerate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{Call, RecordingPainter};

    fn traffic_light(ticks: Vec<f32>) -> DonutProgress {
        DonutProgress::new(DonutConfig::builder().ticks(ticks).build())
    }

    #[test]
    fn construction_builds_arcs() {
        let donut = traffic_light(vec![25.0, 50.0, 100.0]);
        let sweeps: Vec<f32> = donut.arcs().iter().map(|a| a.sweep_angle).collect();
        assert_eq!(sweeps, vec![90.0, 90.0, 180.0]);
        assert!(donut.redraw_requested());
    }

    #[test]
    fn setters_rebuild_and_request_a_redraw() {
        let mut donut = traffic_light(vec![25.0, 50.0, 100.0]);
        assert!(donut.take_redraw_request());
        assert!(!donut.redraw_requested());

        donut.set_overlap(true);
        assert_eq!(donut.arcs().len(), 4);
        assert!(donut.take_redraw_request());

        donut.set_ticks(vec![10.0]);
        assert_eq!(donut.arcs().len(), 1);
        assert!(donut.take_redraw_request());

        donut.set_colors(vec![Color::BLUE]);
        assert_eq!(donut.arcs()[0].paint.color, Color::BLUE);
        assert!(donut.take_redraw_request());
    }

    #[test]
    fn missing_colors_are_fixed_between_draws() {
        let donut = DonutProgress::new(
            DonutConfig::builder()
                .colors(vec![])
                .ticks(vec![10.0, 20.0])
                .build(),
        );
        let first = donut.colors().clone();
        let mut painter = RecordingPainter::default();
        donut.draw(&mut painter);
        donut.draw(&mut painter);
        assert_eq!(donut.colors(), &first);
        assert!(first.as_slice().iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn layout_insets_a_centered_square() {
        let mut donut = DonutProgress::new(DonutConfig::builder().stroke_width(10.0).build());
        assert_eq!(donut.on_layout(300.0, 200.0), 200.0);
        assert_eq!(donut.ring(), Rect::new(55.0, 5.0, 245.0, 195.0));

        donut.set_stroke_width(20.0);
        assert_eq!(donut.ring(), Rect::new(60.0, 10.0, 240.0, 190.0));
    }

    #[test]
    fn empty_donut_draws_only_the_background() {
        let mut donut = DonutProgress::new(DonutConfig::default());
        donut.on_layout(100.0, 100.0);
        let mut painter = RecordingPainter::default();
        donut.draw(&mut painter);
        assert_eq!(
            painter.calls,
            vec![Call::Disc(Rect::new(2.0, 2.0, 98.0, 98.0), Color::GRAY)]
        );
    }

    #[test]
    fn icons_resolve_at_the_icon_size() {
        let mut donut = DonutProgress::new(
            DonutConfig::builder()
                .ticks(vec![50.0, 100.0])
                .icons(vec!["#ff0000".into(), "missing".into()])
                .icon_size(12.0)
                .build(),
        );
        assert_eq!(donut.icons()[0].as_ref().map(Bitmap::size), Some(12));
        assert!(donut.icons()[1].is_none());

        donut.set_icon_size(20.0);
        assert_eq!(donut.icons()[0].as_ref().map(Bitmap::size), Some(20));

        donut.on_layout(100.0, 100.0);
        let mut painter = RecordingPainter::default();
        donut.draw(&mut painter);
        let bitmaps = painter
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Bitmap(20, ..)))
            .count();
        assert_eq!(bitmaps, 1);
    }

    #[test]
    fn equal_bounds_do_not_break_drawing() {
        let mut donut = DonutProgress::new(
            DonutConfig::builder()
                .ticks(vec![50.0])
                .icons(vec!["red".into()])
                .min(50)
                .max(50)
                .build(),
        );
        donut.on_layout(100.0, 100.0);
        let mut painter = RecordingPainter::default();
        donut.draw(&mut painter);
        assert!(!painter.calls.iter().any(|c| matches!(c, Call::Bitmap(..))));
    }

    #[test]
    fn framerate_must_be_positive() {
        assert_eq!(frame_duration(50.0), Ok(Duration::from_millis(20)));
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                frame_duration(bad),
                Err(DonutError::InvalidConfig { attribute: "max_framerate", .. })
            ));
        }
    }

    #[test]
    fn commands_map_to_setters() {
        let mut donut = traffic_light(vec![25.0, 50.0]);
        donut.apply(DonutCommand::SetProgress(100.0));
        assert_eq!(donut.config().ticks, vec![25.0, 100.0]);

        donut.apply(DonutCommand::SetOverlap(true));
        assert_eq!(donut.arcs().len(), 3);

        donut.apply(DonutCommand::SetBounds(0, 200));
        assert_eq!(donut.arcs().len(), 2);

        donut.apply(DonutCommand::SetTicks(vec![]));
        donut.apply(DonutCommand::SetProgress(30.0));
        assert_eq!(donut.config().ticks, vec![30.0]);
    }
}
