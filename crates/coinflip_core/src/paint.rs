//! Paint primitives
//!
//! Colors, gradients and blur settings consumed by a host renderer when it
//! paints the coin flip node tree.

use serde::Serialize;

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GOLD: Color = Color::rgb(0.96, 0.77, 0.26);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Gradient type
///
/// Coordinates are relative to the painted node's bounding box (0.0-1.0).
/// Areas outside the last stop are padded with the end color.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gradient {
    /// Radial gradient from center outward
    Radial {
        center: Point,
        radius: f32,
        /// Color stops (sorted by offset)
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Create a simple radial gradient with two colors
    pub fn radial(center: Point, radius: f32, from: Color, to: Color) -> Self {
        Gradient::Radial {
            center,
            radius,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Create a radial gradient with multiple stops
    ///
    /// Stops are sorted by offset.
    pub fn radial_with_stops(center: Point, radius: f32, mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Gradient::Radial {
            center,
            radius,
            stops,
        }
    }

    /// Get the gradient stops
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Radial { stops, .. } => stops,
        }
    }

    /// Get the first color in the gradient (or BLACK if no stops)
    pub fn first_color(&self) -> Color {
        self.stops()
            .first()
            .map(|s| s.color)
            .unwrap_or(Color::BLACK)
    }

    /// Get the last color in the gradient (or BLACK if no stops)
    pub fn last_color(&self) -> Color {
        self.stops().last().map(|s| s.color).unwrap_or(Color::BLACK)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blur
// ─────────────────────────────────────────────────────────────────────────────

/// Gaussian blur applied to a whole layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Blur {
    /// Blur radius in pixels
    pub radius: f32,
}

impl Blur {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xFF8000);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::GOLD.with_alpha(0.4);
        assert_eq!(c.a, 0.4);
        assert_eq!(c.r, Color::GOLD.r);
    }

    #[test]
    fn test_radial_stops_sorted() {
        let g = Gradient::radial_with_stops(
            Point::new(0.5, 0.5),
            0.5,
            vec![
                GradientStop::new(1.0, Color::TRANSPARENT),
                GradientStop::new(0.0, Color::GOLD),
            ],
        );
        assert_eq!(g.first_color(), Color::GOLD);
        assert_eq!(g.last_color(), Color::TRANSPARENT);
    }

    #[test]
    fn test_gradient_stop_offset_clamped() {
        assert_eq!(GradientStop::new(1.5, Color::GOLD).offset, 1.0);
        assert_eq!(GradientStop::new(-0.5, Color::GOLD).offset, 0.0);
    }

    #[test]
    fn test_gradient_serializes_with_tag() {
        let g = Gradient::radial(Point::new(0.5, 0.5), 0.5, Color::GOLD, Color::TRANSPARENT);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["type"], "radial");
        assert_eq!(json["stops"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_blur_radius_non_negative() {
        assert_eq!(Blur::new(-4.0).radius, 0.0);
        assert_eq!(Blur::new(24.0).radius, 24.0);
    }
}
