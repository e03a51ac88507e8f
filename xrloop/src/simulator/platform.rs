use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use glam::Quat;
use log::debug;

use super::SimulatorConfig;
use crate::{
    platform::{
        pending, HitTestResult, Pending, PlatformSession, Resolver, SessionEvent, ViewerPose,
        XrFrame, XrPlatform,
    },
    session::{features, FeatureSet, SessionDescriptor, SessionMode},
    PlatformError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Immediate,
    Manual,
}

struct PlatformState {
    config: SimulatorConfig,
    resolution: Resolution,
    support_queries: Vec<(SessionMode, Resolver<bool>)>,
    session_requests: Vec<(SessionDescriptor, Resolver<Box<dyn PlatformSession>>)>,
    sessions: Vec<Rc<RefCell<SessionState>>>,
    requests_made: usize,
}

#[derive(Debug)]
struct SessionState {
    events: VecDeque<SessionEvent>,
    ended: bool,
    end_calls: usize,
    frames_to_drop: usize,
    viewer_pose: ViewerPose,
    hit_test: Option<HitTestResult>,
}

/// A simulated [`XrPlatform`].
///
/// With [`SimulatedPlatform::new`] every query and request settles straight away. With
/// [`SimulatedPlatform::manual`] nothing settles until the owner calls
/// [`SimulatedPlatform::resolve_support_queries`] or [`SimulatedPlatform::resolve_session_requests`].
#[derive(Clone)]
pub struct SimulatedPlatform {
    state: Rc<RefCell<PlatformState>>,
}

impl SimulatedPlatform {
    /// A platform that answers straight away
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_resolution(config, Resolution::Immediate)
    }

    /// A platform that only answers when told to
    pub fn manual(config: SimulatorConfig) -> Self {
        Self::with_resolution(config, Resolution::Manual)
    }

    fn with_resolution(config: SimulatorConfig, resolution: Resolution) -> Self {
        Self {
            state: Rc::new(RefCell::new(PlatformState {
                config,
                resolution,
                support_queries: Vec::new(),
                session_requests: Vec::new(),
                sessions: Vec::new(),
                requests_made: 0,
            })),
        }
    }

    /// Change how future queries and requests are answered
    pub fn update_config(&self, update: impl FnOnce(&mut SimulatorConfig)) {
        update(&mut self.state.borrow_mut().config);
    }

    /// Answer every outstanding capability query. Returns how many answers had someone waiting for
    /// them.
    pub fn resolve_support_queries(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let queries = std::mem::take(&mut state.support_queries);
        let mut delivered = 0;
        for (mode, resolver) in queries {
            let sent = match answer_support(&state.config, mode) {
                Ok(supported) => resolver.resolve(supported),
                Err(e) => resolver.reject(e),
            };
            if sent {
                delivered += 1;
            } else {
                debug!("[XRLOOP_SIMULATOR] Nobody is waiting for support of {mode}");
            }
        }
        delivered
    }

    /// Answer every outstanding session request. Returns how many answers had someone waiting for
    /// them; abandoned requests never create a session.
    pub fn resolve_session_requests(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let requests = std::mem::take(&mut state.session_requests);
        let mut delivered = 0;
        for (descriptor, resolver) in requests {
            if resolver.is_cancelled() {
                debug!(
                    "[XRLOOP_SIMULATOR] {} request was abandoned",
                    descriptor.mode()
                );
                continue;
            }
            let sent = match grant(&mut state, &descriptor) {
                Ok(session) => resolver.resolve(session),
                Err(e) => resolver.reject(e),
            };
            if sent {
                delivered += 1;
            }
        }
        delivered
    }

    /// Capability queries waiting for an answer
    pub fn pending_support_queries(&self) -> usize {
        self.state.borrow().support_queries.len()
    }

    /// Session requests waiting for an answer
    pub fn pending_session_requests(&self) -> usize {
        self.state.borrow().session_requests.len()
    }

    /// How many sessions have been requested, ever
    pub fn requests_made(&self) -> usize {
        self.state.borrow().requests_made
    }

    /// How many times a session has been ended by its owner, rather than by the platform
    pub fn end_calls(&self) -> usize {
        self.state
            .borrow()
            .sessions
            .iter()
            .map(|session| session.borrow().end_calls)
            .sum()
    }

    /// End the most recent running session from the platform's side, as if the user had taken the
    /// headset off. Returns `false` if no session was running.
    pub fn end_active_session(&self) -> bool {
        let state = self.state.borrow();
        let Some(session) = state
            .sessions
            .iter()
            .rev()
            .find(|session| !session.borrow().ended)
        else {
            return false;
        };

        let mut session = session.borrow_mut();
        session.ended = true;
        session.events.push_back(SessionEvent::Ended);
        true
    }

    /// Make running sessions skip their next `count` frames
    pub fn drop_next_frames(&self, count: usize) {
        self.for_each_running_session(|session| session.frames_to_drop = count);
    }

    /// Change what running sessions report from their hit test
    pub fn set_hit_test(&self, hit_test: Option<HitTestResult>) {
        self.for_each_running_session(|session| session.hit_test = hit_test);
    }

    fn for_each_running_session(&self, mut f: impl FnMut(&mut SessionState)) {
        for session in &self.state.borrow().sessions {
            let mut session = session.borrow_mut();
            if !session.ended {
                f(&mut session);
            }
        }
    }
}

impl XrPlatform for SimulatedPlatform {
    fn is_session_supported(&self, mode: SessionMode) -> Pending<bool> {
        let mut state = self.state.borrow_mut();
        match state.resolution {
            Resolution::Immediate => match answer_support(&state.config, mode) {
                Ok(supported) => Pending::ready(supported),
                Err(e) => Pending::failed(e),
            },
            Resolution::Manual => {
                let (resolver, pending) = pending();
                state.support_queries.push((mode, resolver));
                pending
            }
        }
    }

    fn request_session(&self, descriptor: &SessionDescriptor) -> Pending<Box<dyn PlatformSession>> {
        let mut state = self.state.borrow_mut();
        state.requests_made += 1;
        match state.resolution {
            Resolution::Immediate => match grant(&mut state, descriptor) {
                Ok(session) => Pending::ready(session),
                Err(e) => Pending::failed(e),
            },
            Resolution::Manual => {
                let (resolver, pending) = pending();
                state.session_requests.push((descriptor.clone(), resolver));
                pending
            }
        }
    }
}

fn answer_support(config: &SimulatorConfig, mode: SessionMode) -> Result<bool, PlatformError> {
    if config.fail_capability_query {
        return Err(PlatformError::Other("The capability query failed".into()));
    }
    Ok(config.supported_modes.contains(&mode))
}

fn grant(
    state: &mut PlatformState,
    descriptor: &SessionDescriptor,
) -> Result<Box<dyn PlatformSession>, PlatformError> {
    let config = &state.config;
    let mode = descriptor.mode();
    if let Some(reason) = &config.deny_reason {
        return Err(PlatformError::Denied(reason.clone()));
    }
    if !config.supported_modes.contains(&mode) {
        return Err(PlatformError::Other(format!("{mode} is not supported")));
    }
    if config.enforce_required_features {
        if let Some(missing) = descriptor.missing_required(&config.supported_features) {
            return Err(PlatformError::FeatureUnavailable(missing.to_string()));
        }
    }

    let enabled_features: FeatureSet = descriptor
        .required_features()
        .iter()
        .chain(descriptor.optional_features())
        .filter(|feature| config.supported_features.contains(*feature))
        .cloned()
        .collect();

    let session = Rc::new(RefCell::new(SessionState {
        events: VecDeque::from([SessionEvent::Started]),
        ended: false,
        end_calls: 0,
        frames_to_drop: 0,
        viewer_pose: ViewerPose {
            position: config.viewer_position,
            orientation: Quat::IDENTITY,
        },
        hit_test: config.hit_test(),
    }));
    debug!("[XRLOOP_SIMULATOR] Granted {mode} with {enabled_features:?}");
    state.sessions.push(session.clone());

    Ok(Box::new(SimulatedSession {
        mode,
        enabled_features,
        state: session,
    }))
}

/// A session granted by a [`SimulatedPlatform`]
#[derive(Debug)]
pub struct SimulatedSession {
    mode: SessionMode,
    enabled_features: FeatureSet,
    state: Rc<RefCell<SessionState>>,
}

impl PlatformSession for SimulatedSession {
    fn mode(&self) -> SessionMode {
        self.mode
    }

    fn enabled_features(&self) -> &FeatureSet {
        &self.enabled_features
    }

    fn poll_event(&mut self) -> Option<SessionEvent> {
        self.state.borrow_mut().events.pop_front()
    }

    fn wait_frame(&mut self) -> Option<XrFrame> {
        let mut state = self.state.borrow_mut();
        if state.ended {
            return None;
        }
        if state.frames_to_drop > 0 {
            state.frames_to_drop -= 1;
            return None;
        }

        let hit_test_enabled = self.enabled_features.contains(features::HIT_TEST);
        Some(XrFrame {
            viewer_pose: Some(state.viewer_pose),
            hit_test: state.hit_test.filter(|_| hit_test_enabled),
        })
    }

    fn end(&mut self) {
        let mut state = self.state.borrow_mut();
        if !state.ended {
            state.ended = true;
            state.end_calls += 1;
        }
    }
}
