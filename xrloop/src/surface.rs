use hecs::World;
use serde::{Deserialize, Serialize};

use crate::Camera;

/// Size of a drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Extent {
    /// Create an extent
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. A zero height is treated as square.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// A drawable target and its presentation loop, supplied by the rendering library.
///
/// A surface is owned by exactly one [`crate::XrSessionManager`]; it is released once, when the
/// manager is disposed.
pub trait RenderSurface {
    /// The current size of the surface
    fn extent(&self) -> Extent;

    /// Resize the surface
    fn resize(&mut self, extent: Extent);

    /// Draw `world` as seen from `camera`
    fn present(&mut self, world: &World, camera: &Camera);

    /// Release the drawing surface handle
    fn release(&mut self);
}
