use std::{rc::Rc, time::Duration};

use hecs::{Entity, World};
use log::{debug, error, info, trace, warn};

use super::{
    features, support_from_result, EndReason, FeatureSet, LifecycleEvent, LifecycleState,
    SessionDescriptor, SessionMode,
};
use crate::{
    assets::AssetLoader,
    frame::PerformanceTimers,
    platform::{Pending, PlatformSession, SessionEvent, XrPlatform},
    scene::SetupContext,
    surface::{Extent, RenderSurface},
    systems::{
        add_hmd, asset_system, audio_system, despawn_session_only_system,
        update_global_transform_system, update_global_transform_with_parent_system,
        update_hmd_system, video_system,
    },
    ui_shell::{unsupported_message, EntryAffordance, LoggingShell, UiShell},
    Camera, Clock, Frame, SessionError, SystemClock, TickData, XrLoopResult,
};

type FrameCallback = Box<dyn FnMut(&Frame, &mut World)>;
type TeardownHook = Box<dyn FnOnce(&mut World)>;

struct PendingRequest {
    descriptor: SessionDescriptor,
    session: Pending<Box<dyn PlatformSession>>,
}

struct ActiveSession {
    descriptor: SessionDescriptor,
    session: Box<dyn PlatformSession>,
    hit_test: bool,
    inline_camera: Camera,
}

/// Owns the lifecycle of an immersive session bound to a single render surface.
///
/// The manager is driven by calling [`XrSessionManager::update`] once per display refresh, much like
/// a game loop:
///
/// ```ignore
/// let mut manager = XrSessionManager::builder().platform(platform).build(surface);
/// manager.begin_support_check();
/// while let Ok(tick) = manager.update() {
///     // ..
/// }
/// ```
///
/// Nothing here ever blocks: platform requests are [`Pending`] values that `update` checks on.
pub struct XrSessionManager {
    /// The scene graph. Frame callbacks, setup and teardown hooks are the only things that should
    /// mutate it.
    pub world: World,
    /// The camera the scene is presented from. Follows the viewer during a session.
    pub camera: Camera,
    mode: SessionMode,
    state: LifecycleState,
    platform: Option<Rc<dyn XrPlatform>>,
    surface: Option<Box<dyn RenderSurface>>,
    ui: Box<dyn UiShell>,
    clock: Box<dyn Clock>,
    asset_loader: Option<Rc<dyn AssetLoader>>,
    hmd: Entity,
    support_query: Option<Pending<bool>>,
    pending_request: Option<PendingRequest>,
    session: Option<ActiveSession>,
    frame_callback: Option<FrameCallback>,
    teardown_hooks: Vec<TeardownHook>,
    epoch: Duration,
    last_elapsed: Duration,
    frame_index: u64,
    events: Vec<LifecycleEvent>,
    entry_shown: bool,
    performance_timers: PerformanceTimers,
}

/// Builder for [`XrSessionManager`]
pub struct XrSessionManagerBuilder {
    mode: SessionMode,
    platform: Option<Rc<dyn XrPlatform>>,
    ui: Box<dyn UiShell>,
    clock: Box<dyn Clock>,
    camera: Option<Camera>,
    asset_loader: Option<Rc<dyn AssetLoader>>,
}

impl Default for XrSessionManagerBuilder {
    fn default() -> Self {
        Self {
            mode: SessionMode::ImmersiveAr,
            platform: None,
            ui: Box::new(LoggingShell),
            clock: Box::<SystemClock>::default(),
            camera: None,
            asset_loader: None,
        }
    }
}

impl XrSessionManagerBuilder {
    /// The session mode this manager offers. Defaults to `immersive-ar`.
    pub fn mode(mut self, mode: SessionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The platform to negotiate with. `None` means the host has no XR API.
    pub fn platform(mut self, platform: Option<Rc<dyn XrPlatform>>) -> Self {
        self.platform = platform;
        self
    }

    /// The host UI. Defaults to a [`LoggingShell`].
    pub fn ui_shell(mut self, ui: impl UiShell + 'static) -> Self {
        self.ui = Box::new(ui);
        self
    }

    /// The time source. Defaults to a [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The starting camera. Its aspect ratio is replaced by the surface's.
    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Where scenes load their assets from
    pub fn asset_loader(mut self, asset_loader: Rc<dyn AssetLoader>) -> Self {
        self.asset_loader = Some(asset_loader);
        self
    }

    /// Build a manager that owns `surface`
    pub fn build(self, surface: Box<dyn RenderSurface>) -> XrSessionManager {
        let mut camera = self.camera.unwrap_or_default();
        camera.set_aspect(surface.extent().aspect());

        let mut world = World::new();
        let hmd = add_hmd(&mut world);
        let epoch = self.clock.now();

        info!(
            "[XRLOOP_SESSION] Manager created for {}, platform available: {}",
            self.mode,
            self.platform.is_some()
        );

        XrSessionManager {
            world,
            camera,
            mode: self.mode,
            state: LifecycleState::Unchecked,
            platform: self.platform,
            surface: Some(surface),
            ui: self.ui,
            clock: self.clock,
            asset_loader: self.asset_loader,
            hmd,
            support_query: None,
            pending_request: None,
            session: None,
            frame_callback: None,
            teardown_hooks: Vec::new(),
            epoch,
            last_elapsed: Duration::ZERO,
            frame_index: 0,
            events: Vec::new(),
            entry_shown: false,
            performance_timers: Default::default(),
        }
    }

    /// Build a manager around the surface `acquire_surface` returns.
    ///
    /// If the surface can't be acquired, the failure is shown to the user and nothing is built.
    pub fn try_build<F>(mut self, acquire_surface: F) -> XrLoopResult<XrSessionManager>
    where
        F: FnOnce() -> anyhow::Result<Box<dyn RenderSurface>>,
    {
        match acquire_surface() {
            Ok(surface) => Ok(self.build(surface)),
            Err(e) => {
                let error = SessionError::from(e);
                error!("[XRLOOP_SESSION] Unable to acquire a render surface: {error}");
                self.ui.show_message(&error.to_string());
                Err(error)
            }
        }
    }
}

impl XrSessionManager {
    /// Start building a manager
    pub fn builder() -> XrSessionManagerBuilder {
        Default::default()
    }

    /// Where the manager is in its lifecycle
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The session mode this manager offers
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The asset loader, if one was configured
    pub fn asset_loader(&self) -> Option<&dyn AssetLoader> {
        self.asset_loader.as_deref()
    }

    /// The features the running session enabled
    pub fn enabled_features(&self) -> Option<&FeatureSet> {
        self.session
            .as_ref()
            .map(|active| active.session.enabled_features())
    }

    /// The entity that follows the viewer
    pub fn hmd(&self) -> Entity {
        self.hmd
    }

    /// The size of the render surface, or `None` once it has been released
    pub fn surface_extent(&self) -> Option<Extent> {
        self.surface.as_ref().map(|surface| surface.extent())
    }

    /// Ask the platform whether this manager's mode is supported.
    ///
    /// The answer arrives during a later [`XrSessionManager::update`]: the manager moves to
    /// [`LifecycleState::Idle`] and offers entry, or to [`LifecycleState::Unsupported`] and says so.
    /// Only the first call does anything.
    pub fn begin_support_check(&mut self) {
        if self.state != LifecycleState::Unchecked {
            debug!(
                "[XRLOOP_SESSION] Ignoring support check in state {:?}",
                self.state
            );
            return;
        }

        let Some(platform) = self.platform.clone() else {
            self.transition(LifecycleState::Unsupported);
            self.events.push(LifecycleEvent::SupportResolved {
                mode: self.mode,
                supported: false,
            });
            self.ui.show_message(&unsupported_message(None));
            return;
        };

        self.support_query = Some(platform.is_session_supported(self.mode));
        self.transition(LifecycleState::Checking);
    }

    /// Ask the platform for a session described by `descriptor`.
    ///
    /// Refusals that can be decided straight away are returned here; whether the platform grants
    /// the session is found out during a later [`XrSessionManager::update`]. While a session is
    /// requesting or active, every further request fails with [`SessionError::AlreadyActive`] and
    /// the existing session carries on.
    pub fn request_session(&mut self, descriptor: SessionDescriptor) -> XrLoopResult<()> {
        let refusal = match self.state {
            LifecycleState::Disposed => return Err(SessionError::Disposed),
            LifecycleState::Requesting | LifecycleState::Active => Some(SessionError::AlreadyActive),
            LifecycleState::Unsupported => Some(SessionError::Unsupported(descriptor.mode())),
            LifecycleState::Unchecked | LifecycleState::Checking => {
                Some(SessionError::NotReady(descriptor.mode()))
            }
            LifecycleState::Idle | LifecycleState::Ended => None,
        };

        // Support was only ever checked for this manager's mode.
        let refusal = refusal.or_else(|| {
            (descriptor.mode() != self.mode).then(|| SessionError::NotReady(descriptor.mode()))
        });

        let platform = match (refusal, self.platform.clone()) {
            (Some(error), _) => return Err(self.refuse(error)),
            (None, None) => return Err(self.refuse(SessionError::Unsupported(descriptor.mode()))),
            (None, Some(platform)) => platform,
        };

        info!(
            "[XRLOOP_SESSION] Requesting {} session, required: {:?}, optional: {:?}",
            descriptor.mode(),
            descriptor.required_features(),
            descriptor.optional_features()
        );
        let session = platform.request_session(&descriptor);
        self.pending_request = Some(PendingRequest {
            descriptor,
            session,
        });
        self.ui.clear_message();
        self.transition(LifecycleState::Requesting);
        Ok(())
    }

    /// End the running session. Does nothing unless a session is running.
    ///
    /// A request that is still in flight is abandoned. If the platform has already granted it, the
    /// granted session is ended; if it grants it later, the grant goes nowhere.
    pub fn end_session(&mut self) {
        match self.state {
            LifecycleState::Active => self.finish_session(EndReason::User),
            LifecycleState::Requesting => {
                info!("[XRLOOP_SESSION] Abandoning session request");
                self.abandon_request();
                self.transition(LifecycleState::Idle);
                self.show_entry(EntryAffordance::Enter(self.mode));
            }
            _ => trace!(
                "[XRLOOP_SESSION] No session to end in state {:?}",
                self.state
            ),
        }
    }

    /// Set the callback that runs once per presented frame, replacing any previous one.
    pub fn on_frame<F>(&mut self, callback: F)
    where
        F: FnMut(&Frame, &mut World) + 'static,
    {
        if self.state == LifecycleState::Disposed {
            warn!("[XRLOOP_SESSION] Ignoring frame callback, manager has been disposed");
            return;
        }
        self.frame_callback = Some(Box::new(callback));
    }

    /// Run `hook` when the current session ends, or when the next one does if no session is
    /// running. Hooks run exactly once, before session-only entities are despawned.
    pub fn add_session_teardown<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut World) + 'static,
    {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.teardown_hooks.push(Box::new(hook));
    }

    /// The host has resized the surface
    pub fn handle_resize(&mut self, extent: Extent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        debug!(
            "[XRLOOP_SESSION] Resizing surface to {}x{}",
            extent.width, extent.height
        );
        surface.resize(extent);
        self.camera.set_aspect(extent.aspect());
    }

    /// Run one display refresh.
    ///
    /// Applies whatever the platform has settled since the last tick, then presents a frame: an
    /// inline preview outside a session, or an immersive frame inside one. Returns
    /// [`SessionError::Disposed`] once the manager has been disposed.
    pub fn update(&mut self) -> XrLoopResult<TickData> {
        if self.state == LifecycleState::Disposed {
            return Err(SessionError::Disposed);
        }

        self.performance_timers.start();
        let previous_state = self.state;

        self.poll_support_query();
        self.poll_session_request();
        self.poll_session_events();
        let frame = self.run_frame();

        self.performance_timers.end();

        Ok(TickData {
            previous_state,
            current_state: self.state,
            events: std::mem::take(&mut self.events),
            frame,
        })
    }

    /// Release everything: end any session, drop requests that are still in flight, drop the frame
    /// callback, release the surface and remove the entry control.
    ///
    /// Calling this more than once does nothing. Also called when the manager is dropped.
    pub fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        info!("[XRLOOP_SESSION] Disposing");

        // Dropping the query means its answer goes nowhere.
        self.support_query = None;
        self.abandon_request();

        if self.session.is_some() {
            self.finish_session(EndReason::Disposed);
        }
        self.frame_callback = None;
        self.teardown_hooks.clear();

        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        if self.entry_shown {
            self.ui.set_entry(None);
            self.entry_shown = false;
        }

        self.transition(LifecycleState::Disposed);
    }

    pub(crate) fn setup_context(&mut self) -> SetupContext<'_> {
        SetupContext {
            world: &mut self.world,
            camera: &mut self.camera,
            assets: self.asset_loader.as_deref(),
        }
    }

    /// Surface `error` to the user.
    pub(crate) fn report(&mut self, error: SessionError) {
        warn!("[XRLOOP_SESSION] {error}");
        self.ui.show_message(&error.to_string());
        self.events.push(LifecycleEvent::Error(error));
    }

    /// Drop the request in flight. A session the platform has already granted is ended, since
    /// nobody will ever see it.
    fn abandon_request(&mut self) {
        let Some(mut request) = self.pending_request.take() else {
            return;
        };
        if let Some(Ok(mut session)) = request.session.poll_ready() {
            info!(
                "[XRLOOP_SESSION] Ending {} session granted after it was abandoned",
                session.mode()
            );
            session.end();
        }
    }

    fn refuse(&mut self, error: SessionError) -> SessionError {
        self.report(error.clone());
        error
    }

    fn poll_support_query(&mut self) {
        let Some(result) = self
            .support_query
            .as_mut()
            .and_then(|query| query.poll_ready())
        else {
            return;
        };
        self.support_query = None;

        let mode = self.mode;
        let query_failed = result.is_err();
        let supported = support_from_result(mode, result);
        self.events
            .push(LifecycleEvent::SupportResolved { mode, supported });
        if query_failed {
            self.events.push(LifecycleEvent::Error(
                SessionError::CapabilityQueryFailed(mode),
            ));
        }

        if supported {
            self.transition(LifecycleState::Idle);
            self.show_entry(EntryAffordance::Enter(mode));
        } else {
            self.transition(LifecycleState::Unsupported);
            self.ui.show_message(&unsupported_message(Some(mode)));
        }
    }

    fn poll_session_request(&mut self) {
        let Some(result) = self
            .pending_request
            .as_mut()
            .and_then(|request| request.session.poll_ready())
        else {
            return;
        };
        let Some(request) = self.pending_request.take() else {
            return;
        };

        let mut session = match result {
            Ok(session) => session,
            Err(e) => {
                self.transition(LifecycleState::Idle);
                self.report(e.into());
                self.show_entry(EntryAffordance::Enter(self.mode));
                return;
            }
        };

        let enabled_features = session.enabled_features().clone();
        if let Some(missing) = request.descriptor.missing_required(&enabled_features) {
            let error = SessionError::FeatureUnavailable(missing.to_string());
            session.end();
            self.transition(LifecycleState::Idle);
            self.report(error);
            self.show_entry(EntryAffordance::Enter(self.mode));
            return;
        }

        info!(
            "[XRLOOP_SESSION] {} session started with {:?}",
            session.mode(),
            enabled_features
        );
        self.events.push(LifecycleEvent::SessionStarted {
            mode: session.mode(),
            enabled_features: enabled_features.clone(),
        });
        self.session = Some(ActiveSession {
            descriptor: request.descriptor,
            session,
            hit_test: enabled_features.contains(features::HIT_TEST),
            inline_camera: self.camera,
        });
        self.transition(LifecycleState::Active);
        self.show_entry(EntryAffordance::Exit(self.mode));
    }

    fn poll_session_events(&mut self) {
        while let Some(active) = self.session.as_mut() {
            match active.session.poll_event() {
                Some(SessionEvent::Started) => debug!("[XRLOOP_SESSION] Session is presenting"),
                Some(SessionEvent::Ended) => {
                    info!("[XRLOOP_SESSION] Session was ended by the platform");
                    self.finish_session(EndReason::System);
                }
                None => break,
            }
        }
    }

    fn run_frame(&mut self) -> Option<Frame> {
        let mut xr_frame = None;
        let mut hit_test_enabled = false;
        if let Some(active) = self.session.as_mut() {
            let Some(next) = active.session.wait_frame() else {
                trace!("[XRLOOP_SESSION] Platform skipped a frame");
                return None;
            };
            xr_frame = Some(next);
            hit_test_enabled = active.hit_test;
        }

        let elapsed = self
            .clock
            .now()
            .saturating_sub(self.epoch)
            .max(self.last_elapsed);
        let frame = Frame {
            index: self.frame_index,
            elapsed,
            delta: elapsed - self.last_elapsed,
            immersive: xr_frame.is_some(),
            viewer_pose: xr_frame.and_then(|f| f.viewer_pose),
            hit_test: xr_frame
                .and_then(|f| f.hit_test)
                .filter(|_| hit_test_enabled),
        };
        self.last_elapsed = elapsed;
        self.frame_index += 1;
        trace!("[XRLOOP_SESSION] {frame:?}");

        if let Some(pose) = &frame.viewer_pose {
            self.camera.set_pose(pose);
        }
        update_hmd_system(&mut self.world, &self.camera);
        asset_system(&mut self.world);

        if let Some(callback) = self.frame_callback.as_mut() {
            callback(&frame, &mut self.world);
        }

        update_global_transform_system(&mut self.world);
        update_global_transform_with_parent_system(&mut self.world);
        audio_system(&mut self.world);
        video_system(&mut self.world, &frame);

        if let Some(surface) = self.surface.as_mut() {
            surface.present(&self.world, &self.camera);
        }

        Some(frame)
    }

    fn finish_session(&mut self, reason: EndReason) {
        let Some(mut active) = self.session.take() else {
            return;
        };
        if reason != EndReason::System {
            active.session.end();
        }
        self.transition(LifecycleState::Ended);

        for hook in std::mem::take(&mut self.teardown_hooks) {
            hook(&mut self.world);
        }
        let despawned = despawn_session_only_system(&mut self.world);
        debug!("[XRLOOP_SESSION] Despawned {despawned} session-only entities");

        self.camera.position = active.inline_camera.position;
        self.camera.rotation = active.inline_camera.rotation;

        let mode = active.descriptor.mode();
        self.events
            .push(LifecycleEvent::SessionEnded { mode, reason });

        if reason != EndReason::Disposed {
            self.transition(LifecycleState::Idle);
            self.show_entry(EntryAffordance::Enter(mode));
        }
    }

    fn show_entry(&mut self, entry: EntryAffordance) {
        self.ui.set_entry(Some(entry));
        self.entry_shown = true;
    }

    fn transition(&mut self, state: LifecycleState) {
        if self.state == state {
            return;
        }
        info!("[XRLOOP_SESSION] State is now {state:?}");
        self.state = state;
    }
}

impl Drop for XrSessionManager {
    fn drop(&mut self) {
        self.dispose();
    }
}
