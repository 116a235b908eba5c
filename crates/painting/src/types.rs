use std::str::FromStr;

use palette::{Clamp, Darken, FromColor, Hsla, Srgba};
use serde::{Deserialize, Serialize};

/// A position in surface pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl From<Point> for kurbo::Point {
    fn from(point: Point) -> Self {
        kurbo::Point::new(point.x as f64, point.y as f64)
    }
}

impl From<kurbo::Point> for Point {
    fn from(point: kurbo::Point) -> Self {
        Point::new(point.x as f32, point.y as f32)
    }
}

/// Error returned when a colour string cannot be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid colour: {0:?} (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
pub struct ColorParseError(pub String);

/// Straight-alpha RGBA colour with channels in 0.0-1.0
///
/// Plain `[f32; 4]`-shaped storage for the surface; parsing and HSL work go
/// through `palette`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the leading `#` is
    /// optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let parsed = Srgba::<u8>::from_str(hex.trim()).map_err(|_| ColorParseError(hex.to_string()))?;
        Ok(Self::from_rgba8(parsed.into()))
    }

    pub fn from_rgba8(bytes: [u8; 4]) -> Self {
        Srgba::<u8>::from(bytes).into_format::<f32, f32>().into()
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        Srgba::from(self.clamped()).into_format::<u8, u8>().into()
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// `#rrggbbaa` representation
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// Same colour with a replaced alpha
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Reduce HSL lightness by `amount` percentage points, clamped at black
    pub fn darken(self, amount: f32) -> Self {
        let hsla = self.to_hsla().darken_fixed(amount / 100.0).clamp();
        Self::from(Srgba::from_color(hsla))
    }

    /// HSL view of the colour (hue in degrees)
    pub fn to_hsla(self) -> Hsla {
        Hsla::from_color(Srgba::from(self))
    }

    fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

impl From<Srgba> for Rgba {
    fn from(color: Srgba) -> Self {
        Self::new(color.red, color.green, color.blue, color.alpha)
    }
}

impl From<Rgba> for Srgba {
    fn from(color: Rgba) -> Self {
        Srgba::new(color.r, color.g, color.b, color.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s)
    }
}

/// How newly drawn pixels combine with existing pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    /// Normal overwrite (`source-over`)
    #[default]
    SourceOver,
    /// Keep the darker of source and destination per channel
    Darken,
}

/// Line end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Line corner style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}
