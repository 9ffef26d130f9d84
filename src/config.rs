use bon::Builder;

use crate::error::DonutError;

// ============================================================================
// COLOR
// ============================================================================

/// ARGB color used for arcs, the background ring and generated icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const DARK_GRAY: Color = Color::rgb(0x44, 0x44, 0x44);
    pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);
    pub const LIGHT_GRAY: Color = Color::rgb(0xcc, 0xcc, 0xcc);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 0xff
    }
}

/// Parse `#RRGGBB`, `#AARRGGBB` or one of the well-known color names.
pub fn parse_color(value: &str) -> Result<Color, DonutError> {
    let trimmed = value.trim();
    let invalid = |reason: &str| DonutError::invalid_config("colors", value, reason);

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("not a hexadecimal color"));
        }
        let raw = u32::from_str_radix(hex, 16).map_err(|e| invalid(&e.to_string()))?;
        return match hex.len() {
            6 => Ok(Color::rgb((raw >> 16) as u8, (raw >> 8) as u8, raw as u8)),
            8 => Ok(Color::argb(
                (raw >> 24) as u8,
                (raw >> 16) as u8,
                (raw >> 8) as u8,
                raw as u8,
            )),
            _ => Err(invalid("expected #RRGGBB or #AARRGGBB")),
        };
    }

    named_color(trimmed).ok_or_else(|| invalid("unknown color"))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "darkgray" | "darkgrey" => Color::DARK_GRAY,
        "gray" | "grey" => Color::GRAY,
        "lightgray" | "lightgrey" => Color::LIGHT_GRAY,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" | "lime" => Color::GREEN,
        "blue" => Color::BLUE,
        "yellow" => Color::YELLOW,
        "cyan" | "aqua" => Color::CYAN,
        "magenta" | "fuchsia" => Color::MAGENTA,
        "maroon" => Color::rgb(0x80, 0x00, 0x00),
        "navy" => Color::rgb(0x00, 0x00, 0x80),
        "olive" => Color::rgb(0x80, 0x80, 0x00),
        "purple" => Color::rgb(0x80, 0x00, 0x80),
        "silver" => Color::rgb(0xc0, 0xc0, 0xc0),
        "teal" => Color::rgb(0x00, 0x80, 0x80),
        _ => return None,
    };
    Some(color)
}

// ============================================================================
// ATTRIBUTE LISTS
// ============================================================================

pub const DEFAULT_COLORS: &str = "#00ff00,#ffff00,#ff0000";
pub const DEFAULT_TICKS: &str = "";
pub const DEFAULT_ICONS: &str = "";
pub const DELIMITER: char = ',';

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Parse a comma separated color list. An empty string yields no colors.
pub fn parse_colors(value: &str) -> Result<Vec<Color>, DonutError> {
    split_list(value).map(parse_color).collect()
}

/// Parse a comma separated tick list. An empty string yields no ticks.
pub fn parse_ticks(value: &str) -> Result<Vec<f32>, DonutError> {
    split_list(value)
        .map(|item| {
            item.parse::<f32>()
                .ok()
                .filter(|tick| tick.is_finite())
                .ok_or_else(|| DonutError::invalid_config("ticks", item, "not a finite number"))
        })
        .collect()
}

pub fn parse_icons(value: &str) -> Vec<String> {
    split_list(value).map(str::to_owned).collect()
}

// ============================================================================
// DONUT CONFIGURATION
// ============================================================================

pub fn default_colors() -> Vec<Color> {
    vec![Color::GREEN, Color::YELLOW, Color::RED]
}

/// Everything needed to build a donut and the window that hosts it
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DonutConfig {
    #[builder(default = default_colors())]
    pub colors: Vec<Color>,
    #[builder(default)]
    pub ticks: Vec<f32>,
    /// Icon identifiers, resolved by a `BitmapProvider`
    #[builder(default)]
    pub icons: Vec<String>,
    #[builder(default = Color::GRAY)]
    pub background_color: Color,
    #[builder(default = 0)]
    pub min: i32,
    #[builder(default = 100)]
    pub max: i32,
    #[builder(default = false)]
    pub overlap: bool,
    #[builder(default = 4.0)]
    pub stroke_width: f32,
    #[builder(default = 48.0)]
    pub icon_size: f32,

    // Window configuration
    #[builder(default = "Donut".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Raw string attributes as a host layout file would hand them over.
///
/// Attribute names follow the widget's styleable names: `thickness`,
/// `colors`, `ticks`, `icons`, `bgcolor`, `min`, `max` and `overlapLast`.
/// Anything left unset falls back to the `DonutConfig` defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub thickness: Option<String>,
    pub colors: Option<String>,
    pub ticks: Option<String>,
    pub icons: Option<String>,
    pub bgcolor: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub overlap_last: Option<String>,
}

impl Attributes {
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, DonutError> {
        let mut attrs = Self::default();
        for (name, value) in pairs {
            let slot = match name {
                "thickness" => &mut attrs.thickness,
                "colors" => &mut attrs.colors,
                "ticks" => &mut attrs.ticks,
                "icons" => &mut attrs.icons,
                "bgcolor" => &mut attrs.bgcolor,
                "min" => &mut attrs.min,
                "max" => &mut attrs.max,
                "overlapLast" => &mut attrs.overlap_last,
                _ => {
                    return Err(DonutError::invalid_config(
                        "attributes",
                        name,
                        "unknown attribute",
                    ))
                }
            };
            *slot = Some(value.to_owned());
        }
        Ok(attrs)
    }

    /// Parse every attribute, failing on the first malformed value.
    pub fn into_config(self) -> Result<DonutConfig, DonutError> {
        let mut config = DonutConfig::default();

        if let Some(thickness) = self.thickness {
            config.stroke_width = thickness
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or_else(|| {
                    DonutError::invalid_config("thickness", &thickness, "not a positive number")
                })?;
        }
        config.colors = parse_colors(self.colors.as_deref().unwrap_or(DEFAULT_COLORS))?;
        config.ticks = parse_ticks(self.ticks.as_deref().unwrap_or(DEFAULT_TICKS))?;
        config.icons = parse_icons(self.icons.as_deref().unwrap_or(DEFAULT_ICONS));
        if let Some(bgcolor) = self.bgcolor {
            config.background_color = parse_color(&bgcolor)
                .map_err(|_| DonutError::invalid_config("bgcolor", &bgcolor, "unknown color"))?;
        }
        if let Some(min) = self.min {
            config.min = parse_int("min", &min)?;
        }
        if let Some(max) = self.max {
            config.max = parse_int("max", &max)?;
        }
        if let Some(overlap) = self.overlap_last {
            config.overlap = match overlap.trim() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(DonutError::invalid_config(
                        "overlapLast",
                        &overlap,
                        "expected true or false",
                    ))
                }
            };
        }

        Ok(config)
    }
}

fn parse_int(attribute: &'static str, value: &str) -> Result<i32, DonutError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|e| DonutError::invalid_config(attribute, value, e.to_string()))
}
