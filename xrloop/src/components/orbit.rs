use std::f32::consts::TAU;

use glam::Vec3;

/// Moves an entity on a circle in its parent's XZ plane.
///
/// Pair this with a [`super::Parent`] to orbit another entity; without one the entity orbits the
/// global origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Distance from the centre
    pub radius: f32,
    /// Seconds per revolution
    pub period: f32,
    /// Angle at time zero, in radians
    pub phase: f32,
}

impl Orbit {
    /// Where the entity is, relative to the centre, `elapsed` seconds in
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let angle = if self.period > 0.0 {
            self.phase + TAU * elapsed / self.period
        } else {
            self.phase
        };
        Vec3::new(angle.cos() * self.radius, 0.0, -angle.sin() * self.radius)
    }
}
