use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use hecs::World;
use log::{error, info};

use crate::{
    assets::AssetLoader, surface::RenderSurface, Camera, Frame, SessionDescriptor, SessionError,
    TickData, XrLoopResult, XrSessionManager, XrSessionManagerBuilder,
};

/// A small immersive scene: what it asks the platform for, what it builds, and what it does each
/// frame.
pub trait Scene {
    /// The session this scene wants
    fn descriptor(&self) -> SessionDescriptor;

    /// Build the scene's content. Called once, before the capability check starts.
    fn setup(&mut self, context: &mut SetupContext<'_>) -> anyhow::Result<()>;

    /// Called once per presented frame, inline or immersive
    fn frame(&mut self, frame: &Frame, world: &mut World);

    /// Release anything the scene holds outside the world. Called once, when the scene is
    /// unmounted.
    fn teardown(&mut self, _world: &mut World) {}
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn descriptor(&self) -> SessionDescriptor {
        (**self).descriptor()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> anyhow::Result<()> {
        (**self).setup(context)
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        (**self).frame(frame, world)
    }

    fn teardown(&mut self, world: &mut World) {
        (**self).teardown(world)
    }
}

/// What a [`Scene`] gets to touch during setup
pub struct SetupContext<'a> {
    /// The scene graph
    pub world: &'a mut World,
    /// The inline camera
    pub camera: &'a mut Camera,
    /// Where to load assets from, if anywhere
    pub assets: Option<&'a dyn AssetLoader>,
}

/// A [`Scene`] bound to its own [`XrSessionManager`].
///
/// Unmounting, explicitly or by dropping, tears the scene down and disposes the manager.
pub struct MountedScene<S: Scene + 'static> {
    manager: XrSessionManager,
    scene: Rc<RefCell<S>>,
    descriptor: SessionDescriptor,
    mounted: bool,
}

/// Acquire a surface, build a manager around it, set `scene` up and start the capability check.
///
/// Any failure along the way is shown to the user and unwinds whatever was already built: either
/// the whole scene is mounted or nothing is.
pub fn mount<S, F>(
    mut scene: S,
    builder: XrSessionManagerBuilder,
    acquire_surface: F,
) -> XrLoopResult<MountedScene<S>>
where
    S: Scene + 'static,
    F: FnOnce() -> anyhow::Result<Box<dyn RenderSurface>>,
{
    let descriptor = scene.descriptor();
    let mut manager = builder.mode(descriptor.mode()).try_build(acquire_surface)?;

    let setup = scene.setup(&mut manager.setup_context());
    if let Err(e) = setup {
        let error = SessionError::from(e.context("Unable to set up scene"));
        error!("[XRLOOP_SCENE] {error}");
        scene.teardown(&mut manager.world);
        manager.report(error.clone());
        manager.dispose();
        return Err(error);
    }

    let scene = Rc::new(RefCell::new(scene));
    let frame_scene = scene.clone();
    manager.on_frame(move |frame, world| frame_scene.borrow_mut().frame(frame, world));
    manager.begin_support_check();
    info!("[XRLOOP_SCENE] Mounted {} scene", descriptor.mode());

    Ok(MountedScene {
        manager,
        scene,
        descriptor,
        mounted: true,
    })
}

impl<S: Scene + 'static> MountedScene<S> {
    /// The scene's manager
    pub fn manager(&self) -> &XrSessionManager {
        &self.manager
    }

    /// The scene's manager, mutably
    pub fn manager_mut(&mut self) -> &mut XrSessionManager {
        &mut self.manager
    }

    /// The scene itself
    pub fn scene(&self) -> Ref<'_, S> {
        self.scene.borrow()
    }

    /// The user pressed the entry control
    pub fn enter(&mut self) -> XrLoopResult<()> {
        self.manager.request_session(self.descriptor.clone())
    }

    /// The user pressed the exit control
    pub fn exit(&mut self) {
        self.manager.end_session();
    }

    /// Run one display refresh
    pub fn update(&mut self) -> XrLoopResult<TickData> {
        self.manager.update()
    }

    /// Tear the scene down and dispose the manager. Only the first call does anything.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        self.scene.borrow_mut().teardown(&mut self.manager.world);
        self.manager.dispose();
        info!("[XRLOOP_SCENE] Unmounted {} scene", self.descriptor.mode());
    }
}

impl<S: Scene + 'static> Drop for MountedScene<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use crate::{
        components::{LocalTransform, Visible},
        simulator::{
            RecordingShell, SimulatedAssets, SimulatedPlatform, SimulatedSurface, SimulatorConfig,
        },
        LifecycleState, SessionMode,
    };

    use super::*;

    #[derive(Default)]
    struct Counter {
        fail_setup: bool,
        frames: usize,
        teardowns: Rc<RefCell<usize>>,
    }

    impl Scene for Counter {
        fn descriptor(&self) -> SessionDescriptor {
            SessionDescriptor::immersive_vr()
        }

        fn setup(&mut self, context: &mut SetupContext<'_>) -> anyhow::Result<()> {
            context
                .world
                .spawn((LocalTransform::default(), Visible {}));
            context.camera.position = [0.0, 0.0, 3.0].into();
            if self.fail_setup {
                return Err(anyhow!("Out of cheese"));
            }
            Ok(())
        }

        fn frame(&mut self, _frame: &Frame, _world: &mut World) {
            self.frames += 1;
        }

        fn teardown(&mut self, _world: &mut World) {
            *self.teardowns.borrow_mut() += 1;
        }
    }

    fn builder(shell: &RecordingShell) -> XrSessionManagerBuilder {
        XrSessionManager::builder()
            .platform(Some(Rc::new(SimulatedPlatform::new(
                SimulatorConfig::default(),
            ))))
            .ui_shell(shell.clone())
            .asset_loader(Rc::new(SimulatedAssets::new()))
    }

    #[test]
    pub fn test_mount_and_unmount() {
        let shell = RecordingShell::default();
        let surface = SimulatedSurface::default();
        let teardowns = Rc::new(RefCell::new(0));
        let scene = Counter {
            teardowns: teardowns.clone(),
            ..Default::default()
        };

        let mut mounted = mount(scene, builder(&shell), || {
            Ok(Box::new(surface.clone()) as Box<dyn RenderSurface>)
        })
        .unwrap();
        assert_eq!(mounted.manager().mode(), SessionMode::ImmersiveVr);
        assert_eq!(mounted.manager().state(), LifecycleState::Checking);
        assert_eq!(mounted.manager().camera.position.z, 3.0);

        mounted.update().unwrap();
        mounted.enter().unwrap();
        mounted.update().unwrap();
        assert_eq!(mounted.manager().state(), LifecycleState::Active);
        assert_eq!(mounted.scene().frames, 2);

        mounted.exit();
        assert_eq!(mounted.manager().state(), LifecycleState::Idle);

        mounted.unmount();
        mounted.unmount();
        drop(mounted);
        assert_eq!(*teardowns.borrow(), 1);
        assert_eq!(surface.snapshot().released, 1);
        assert_eq!(shell.snapshot().entry, None);
    }

    #[test]
    pub fn test_failed_setup_unwinds() {
        let shell = RecordingShell::default();
        let surface = SimulatedSurface::default();
        let teardowns = Rc::new(RefCell::new(0));
        let scene = Counter {
            fail_setup: true,
            teardowns: teardowns.clone(),
            ..Default::default()
        };

        let result = mount(scene, builder(&shell), || {
            Ok(Box::new(surface.clone()) as Box<dyn RenderSurface>)
        });
        let Err(SessionError::ResourceInitFailed(message)) = result else {
            panic!("Mounting should have failed");
        };

        assert_eq!(message, "Unable to set up scene: Out of cheese");
        assert_eq!(*teardowns.borrow(), 1);
        assert_eq!(surface.snapshot().released, 1);
        assert_eq!(surface.snapshot().presents, 0);
        let log = shell.snapshot();
        assert_eq!(log.entry, None);
        assert_eq!(log.messages.len(), 1);
    }

    #[test]
    pub fn test_no_surface() {
        let shell = RecordingShell::default();
        let result = mount(Counter::default(), builder(&shell), || {
            Err(anyhow!("No canvas"))
        });

        assert_eq!(
            result.err(),
            Some(SessionError::ResourceInitFailed("No canvas".into()))
        );
        assert_eq!(
            shell.snapshot().messages,
            vec!["Unable to initialise resources: No canvas"]
        );
    }
}
