use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The entity's transform relative to its [`super::Parent`].
///
/// If the entity doesn't have a [`super::Parent`], then the global transform is just whatever
/// you've set here. Frame callbacks should mutate this and never [`super::GlobalTransform`]: the
/// manager derives global transforms after the callback has run.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
    /// The non-uniform scale of the entity
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// A transform that only translates
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Convenience function to convert the [`LocalTransform`] into an [`Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Update the translation and rotation from an [`Affine3A`]. Scale is left alone.
    pub fn update_rotation_translation_from_affine(&mut self, transform: &Affine3A) {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        self.rotation = rotation;
        self.translation = translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    pub fn test_update_from_affine_keeps_scale() {
        let mut local_transform = LocalTransform {
            scale: Vec3::splat(0.5),
            ..Default::default()
        };
        let rotation = Quat::from_rotation_y(1.0);
        let affine = Affine3A::from_rotation_translation(rotation, [1.0, 2.0, 3.0].into());

        local_transform.update_rotation_translation_from_affine(&affine);

        assert_relative_eq!(local_transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(local_transform.rotation, rotation, epsilon = 0.0001);
        assert_eq!(local_transform.scale, Vec3::splat(0.5));
    }
}
