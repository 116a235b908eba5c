//! Pointer cursor hints advertised by tools

use serde::{Deserialize, Serialize};

/// What the host should show under the pointer while a tool is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CursorHint {
    /// Outline circle the size of the stroke
    Circle { diameter: f32 },
    Crosshair,
}

impl CursorHint {
    pub fn circle(diameter: f32) -> Self {
        CursorHint::Circle { diameter }
    }

    /// CSS `cursor` value: an inline SVG centred on the hotspot, falling
    /// back to a crosshair
    pub fn css(&self) -> String {
        match *self {
            CursorHint::Crosshair => "crosshair".to_string(),
            CursorHint::Circle { diameter } => {
                let svg = circle_svg(diameter)
                    .replace('%', "%25")
                    .replace('#', "%23")
                    .replace('<', "%3C")
                    .replace('>', "%3E");
                let hotspot = diameter / 2.0;
                format!("url(\"data:image/svg+xml;utf8,{svg}\") {hotspot} {hotspot}, crosshair")
            }
        }
    }
}

/// SVG document with a half-transparent outline circle of the given diameter
pub fn circle_svg(diameter: f32) -> String {
    let r = diameter / 2.0;
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{d}' height='{d}' viewBox='0 0 {d} {d}'>\
         <circle r='{r}' cy='{r}' cx='{r}' stroke-width='1' stroke='rgba(0,0,0,0.5)' fill='none'/></svg>",
        d = diameter,
    )
}
