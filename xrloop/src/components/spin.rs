use glam::Vec3;

/// Rotates an entity continuously about its local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Angular velocity about X, Y and Z, in radians per second
    pub radians_per_second: Vec3,
}

impl Spin {
    /// Spin about the Y axis only
    pub fn about_y(radians_per_second: f32) -> Self {
        Self {
            radians_per_second: Vec3::new(0.0, radians_per_second, 0.0),
        }
    }
}
