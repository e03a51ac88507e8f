use glam::{Affine3A, Mat4, Quat, Vec3};

use crate::{platform::ViewerPose, DEFAULT_FAR, DEFAULT_FOV_Y_DEGREES, DEFAULT_NEAR};

/// A perspective camera.
///
/// Outside a session this is what the scene is drawn from. Inside a session the manager moves it
/// to the viewer's pose every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view, in degrees
    pub fov_y_degrees: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Position in global space
    pub position: Vec3,
    /// Orientation in global space. Looks down -Z when identity.
    pub rotation: Quat,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_Y_DEGREES, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl Camera {
    /// Create a camera at the origin looking down -Z
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recalculate the projection matrix. Call this after changing any of the lens parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    /// Set the aspect ratio and recalculate the projection matrix
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// The projection matrix, as of the last [`Camera::update_projection_matrix`]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// The camera's transform in global space
    pub fn transform(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }

    /// Transformation from global space into the camera's view space
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from(self.transform().inverse())
    }

    /// The direction the camera is looking
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Turn the camera to face `target`. Does nothing if the camera is already at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }

        // Looking straight up or down needs a different up vector.
        let up = if direction.normalize().cross(Vec3::Y).length_squared() <= f32::EPSILON {
            Vec3::Z
        } else {
            Vec3::Y
        };

        let (_, rotation, _) = Mat4::look_at_rh(self.position, target, up)
            .inverse()
            .to_scale_rotation_translation();
        self.rotation = rotation.normalize();
    }

    /// Move the camera to the viewer's pose
    pub fn set_pose(&mut self, pose: &ViewerPose) {
        self.position = pose.position;
        self.rotation = pose.orientation;
    }
}
