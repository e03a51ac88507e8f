use std::{cell::RefCell, rc::Rc};

use hecs::World;

use crate::{
    components::{Mesh, Visible},
    surface::{Extent, RenderSurface},
    Camera,
};

/// What a [`SimulatedSurface`] has been asked to do
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceLog {
    /// The current size
    pub extent: Extent,
    /// Frames presented
    pub presents: usize,
    /// Times the surface was released
    pub released: usize,
    /// Visible meshes in the last presented frame
    pub visible_meshes: usize,
    /// The camera the last frame was presented from
    pub camera: Option<Camera>,
}

/// A [`RenderSurface`] that draws nothing and remembers everything
#[derive(Debug, Clone, Default)]
pub struct SimulatedSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl SimulatedSurface {
    /// A surface of the given size
    pub fn new(extent: Extent) -> Self {
        Self {
            log: Rc::new(RefCell::new(SurfaceLog {
                extent,
                ..Default::default()
            })),
        }
    }

    /// A copy of the log so far
    pub fn snapshot(&self) -> SurfaceLog {
        self.log.borrow().clone()
    }
}

impl RenderSurface for SimulatedSurface {
    fn extent(&self) -> Extent {
        self.log.borrow().extent
    }

    fn resize(&mut self, extent: Extent) {
        self.log.borrow_mut().extent = extent;
    }

    fn present(&mut self, world: &World, camera: &Camera) {
        let visible_meshes = world.query::<(&Mesh, &Visible)>().iter().count();
        let mut log = self.log.borrow_mut();
        log.presents += 1;
        log.visible_meshes = visible_meshes;
        log.camera = Some(*camera);
    }

    fn release(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}
