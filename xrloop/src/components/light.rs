use super::Color;

/// The kinds of light the samples use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Sky colour from above fading to ground colour from below
    Hemisphere {
        /// Colour from above
        sky: Color,
        /// Colour from below
        ground: Color,
    },
    /// Even light from everywhere
    Ambient(Color),
    /// Light radiating from the entity's position
    Point(Color),
}

/// A light source. Positioned by the entity's transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// What kind of light
    pub kind: LightKind,
    /// How bright
    pub intensity: f32,
}

impl Light {
    /// A hemisphere light
    pub fn hemisphere(sky: Color, ground: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Hemisphere { sky, ground },
            intensity,
        }
    }
}
