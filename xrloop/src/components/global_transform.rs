use glam::{Affine3A, Vec3};

use super::LocalTransform;

/// Where an entity ends up once its parents' transforms are applied: the transform from its local
/// space to the session's reference space. Written by the transform systems every frame, read by
/// the surface and the audio system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Affine3A);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Affine3A::IDENTITY)
    }
}

impl GlobalTransform {
    /// The entity's position in global space
    pub fn translation(&self) -> Vec3 {
        self.0.translation.into()
    }
}

impl From<LocalTransform> for GlobalTransform {
    fn from(local_transform: LocalTransform) -> Self {
        GlobalTransform(local_transform.to_affine())
    }
}
