use glam::Vec3;

/// An sRGB colour packed as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// White
    pub const WHITE: Color = Color(0xffffff);
    /// Black
    pub const BLACK: Color = Color(0x000000);

    /// The colour as `[r, g, b]` in `0.0..=1.0`
    pub fn to_rgb(&self) -> Vec3 {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

/// How a material responds to light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shading {
    /// Ignores lights entirely
    Unlit,
    /// Lambert diffuse plus Blinn-Phong specular
    #[default]
    Phong,
}

/// A component that instructs the renderer how an entity should look when rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// The base colour of the material
    pub color: Color,
    /// The colour of the light emitted by the material
    pub emissive: Color,
    /// How strongly the emissive colour is applied
    pub emissive_intensity: f32,
    /// Path of the colour texture, if any
    pub map: Option<String>,
    /// Lighting model
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            map: None,
            shading: Shading::Phong,
        }
    }
}

impl Material {
    /// A lit material of a single colour
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// An unlit material showing the texture at `path`
    pub fn unlit_texture(path: impl Into<String>) -> Self {
        Self {
            map: Some(path.into()),
            shading: Shading::Unlit,
            ..Default::default()
        }
    }

    /// Set the emissive colour and intensity
    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }
}
