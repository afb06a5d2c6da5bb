//! RGBA color helper for building material color arrays.

use serde::{Deserialize, Serialize};

/// RGBA color with `f64` channels.
///
/// ## Example
///
/// ```rust
/// use rvmat::Color;
///
/// let c = Color::rgb(0.5, 0.5, 0.5);
/// assert_eq!(c.to_array(), vec![0.5, 0.5, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color (alpha 1).
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Four-component array in material field order.
    pub fn to_array(&self) -> Vec<f64> {
        vec![self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for Vec<f64> {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Clamp a channel value to `[0, 1]`.
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
