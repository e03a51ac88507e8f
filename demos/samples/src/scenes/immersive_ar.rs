use anyhow::Result;
use xrloop::{
    components::{Geometry, Material, Mesh, Spin},
    glam::Vec3,
    hecs::{Entity, World},
    systems::spin_system,
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::{add_hemisphere_light, spawn_mesh, CUBE_COLOR, ROTATION_SPEED};

/// A spinning cube half a metre in front of the viewer
#[derive(Debug, Default)]
pub struct ImmersiveAr {
    cube: Option<Entity>,
}

impl ImmersiveAr {
    /// The cube, once set up
    pub fn cube(&self) -> Option<Entity> {
        self.cube
    }
}

impl Scene for ImmersiveAr {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_ar()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        let world = &mut *context.world;
        add_hemisphere_light(world);

        let cube = spawn_mesh(
            world,
            "Cube",
            Mesh::new(Geometry::cube(0.2)),
            Material::phong(CUBE_COLOR),
            [0.0, 0.0, -0.5].into(),
        );
        world.insert_one(
            cube,
            Spin {
                radians_per_second: Vec3::new(ROTATION_SPEED, ROTATION_SPEED, 0.0),
            },
        )?;
        self.cube = Some(cube);

        Ok(())
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        spin_system(world, frame);
    }
}
