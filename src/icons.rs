use std::collections::HashMap;

use crate::canvas::Bitmap;
use crate::config::{parse_color, Color};

/// Resolves icon identifiers to square bitmaps of the requested size.
pub trait BitmapProvider {
    fn bitmap(&self, id: &str, size: u32) -> Option<Bitmap>;
}

impl<F> BitmapProvider for F
where
    F: Fn(&str, u32) -> Option<Bitmap>,
{
    fn bitmap(&self, id: &str, size: u32) -> Option<Bitmap> {
        self(id, size)
    }
}

/// Named dot icons. Identifiers that are not registered but parse as a
/// color (`#ff00ff`, `teal`) resolve to a dot of that color.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    dots: HashMap<String, Color>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, color: Color) -> Self {
        self.insert(id, color);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, color: Color) {
        self.dots.insert(id.into(), color);
    }
}

impl BitmapProvider for IconSet {
    fn bitmap(&self, id: &str, size: u32) -> Option<Bitmap> {
        let color = match self.dots.get(id) {
            Some(color) => *color,
            None => parse_color(id).ok()?,
        };
        Some(Bitmap::dot(size, color))
    }
}
