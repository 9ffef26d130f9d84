use crate::config::Color;
use crate::error::DonutError;
use crate::placement::Rect;
use crate::render::Painter;
use crate::segment::{Cap, Paint};

// ============================================================================
// BITMAP
// ============================================================================

/// Square RGBA8 image used for icons
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap").field("size", &self.size).finish()
    }
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; Self::byte_len(size)],
        }
    }

    pub fn from_rgba(size: u32, pixels: Vec<u8>) -> Result<Self, DonutError> {
        let expected = Self::byte_len(size);
        if pixels.len() != expected {
            return Err(DonutError::invalid_config(
                "icons",
                format!("{} bytes", pixels.len()),
                format!("a {size}x{size} bitmap needs {expected} bytes"),
            ));
        }
        Ok(Self { size, pixels })
    }

    /// Anti-aliased filled circle touching the bitmap's edges.
    pub fn dot(size: u32, color: Color) -> Self {
        let mut bitmap = Self::new(size);
        let radius = size as f32 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (radius - dist + 0.5).clamp(0.0, 1.0);
                if aa > 0.0 {
                    let alpha = (color.a as f32 * aa).round() as u8;
                    let idx = (y as usize * size as usize + x as usize) * 4;
                    bitmap.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, alpha]);
                }
            }
        }
        bitmap
    }

    fn byte_len(size: u32) -> usize {
        size as usize * size as usize * 4
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let idx = (y as usize * self.size as usize + x as usize) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }
}

// ============================================================================
// PIXEL CANVAS
// ============================================================================

/// Software painter over an RGBA8 frame, such as the one `pixels` hands out.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = (alpha * color.a as f32 / 255.0).clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in dst.iter_mut().zip(src) {
            *channel = (value * a + *channel as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let min_x = (cx - radius - 1.0).floor() as i32;
        let max_x = (cx + radius + 1.0).ceil() as i32;
        let min_y = (cy - radius - 1.0).floor() as i32;
        let max_y = (cy + radius + 1.0).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (radius - dist + 0.5).clamp(0.0, 1.0);
                if aa > 0.0 {
                    self.set_pixel(x, y, color, aa);
                }
            }
        }
    }

    /// Stroke the part of the circle inscribed in `rect` between `start` and
    /// `start + sweep` degrees. A sweep of 360 or more strokes the whole ring.
    fn stroke_ring(&mut self, rect: Rect, start: f32, sweep: f32, paint: &Paint) {
        let cx = rect.center_x();
        let cy = rect.center_y();
        let r = rect.width() / 2.0;
        let half = paint.stroke_width / 2.0;
        let full = sweep >= 360.0;

        let reach = r + half + 1.0;
        let min_x = (cx - reach).floor() as i32;
        let max_x = (cx + reach).ceil() as i32;
        let min_y = (cy - reach).floor() as i32;
        let max_y = (cy + reach).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (1.0 - ((dist - r).abs() - half + 0.5).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa <= 0.0 {
                    continue;
                }
                let in_arc = full || {
                    let angle = dy.atan2(dx).to_degrees();
                    (angle - start).rem_euclid(360.0) <= sweep
                };
                if in_arc {
                    self.set_pixel(x, y, paint.color, aa);
                }
            }
        }
    }
}

impl Painter for Canvas<'_> {
    fn draw_disc(&mut self, rect: Rect, paint: &Paint) {
        self.stroke_ring(rect, 0.0, 360.0, paint);
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: f32, sweep_angle: f32, paint: &Paint) {
        if !(sweep_angle.abs() > 0.0) || !start_angle.is_finite() {
            return;
        }
        // counter-clockwise sweeps cover the same pixels as the mirrored clockwise one
        let (start, sweep) = if sweep_angle < 0.0 {
            (start_angle + sweep_angle, -sweep_angle)
        } else {
            (start_angle, sweep_angle)
        };

        self.stroke_ring(rect, start, sweep, paint);

        if paint.cap == Cap::Round && sweep < 360.0 {
            let cx = rect.center_x();
            let cy = rect.center_y();
            let r = rect.width() / 2.0;
            for end in [start, start + sweep] {
                let theta = end.to_radians();
                self.fill_circle(
                    cx + r * theta.cos(),
                    cy + r * theta.sin(),
                    paint.stroke_width / 2.0,
                    paint.color,
                );
            }
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32) {
        let left = x.round() as i32;
        let top = y.round() as i32;
        for by in 0..bitmap.size() {
            for bx in 0..bitmap.size() {
                let Some([r, g, b, a]) = bitmap.pixel(bx, by) else {
                    continue;
                };
                if a == 0 {
                    continue;
                }
                self.set_pixel(
                    left + bx as i32,
                    top + by as i32,
                    Color::rgb(r, g, b),
                    a as f32 / 255.0,
                );
            }
        }
    }
}
