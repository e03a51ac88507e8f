use super::{FeatureSet, SessionMode};
use crate::SessionError;

/// Where a [`super::XrSessionManager`] is in its lifecycle.
///
/// ```text
/// Unchecked -> Checking -> Idle | Unsupported
/// Idle -> Requesting -> Active | Idle
/// Active -> Ended -> Idle
/// any -> Disposed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Nobody has asked the platform anything yet
    Unchecked,
    /// A capability query is in flight
    Checking,
    /// The mode is supported and no session is running
    Idle,
    /// The mode is not supported, or there is no platform at all
    Unsupported,
    /// A session request is in flight
    Requesting,
    /// A session owns the render surface
    Active,
    /// A session has just ended; the manager is on its way back to `Idle`
    Ended,
    /// Everything has been released
    Disposed,
}

impl LifecycleState {
    /// Whether a session owns, or is about to own, the render surface
    pub fn has_session(&self) -> bool {
        matches!(self, LifecycleState::Requesting | LifecycleState::Active)
    }

    /// Whether the manager can never leave this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Unsupported | LifecycleState::Disposed)
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// [`super::XrSessionManager::end_session`] was called
    User,
    /// The platform ended it
    System,
    /// The manager was disposed while the session was running
    Disposed,
}

/// Things that happened during a single [`super::XrSessionManager::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// The capability query settled
    SupportResolved {
        /// The mode that was checked
        mode: SessionMode,
        /// Whether it is supported
        supported: bool,
    },
    /// A session was granted
    SessionStarted {
        /// The session mode
        mode: SessionMode,
        /// The features the platform enabled
        enabled_features: FeatureSet,
    },
    /// A session ended
    SessionEnded {
        /// The session mode
        mode: SessionMode,
        /// Who ended it
        reason: EndReason,
    },
    /// Something went wrong and was shown to the user
    Error(SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_state_predicates() {
        assert!(LifecycleState::Requesting.has_session());
        assert!(LifecycleState::Active.has_session());
        assert!(!LifecycleState::Idle.has_session());
        assert!(LifecycleState::Unsupported.is_terminal());
        assert!(!LifecycleState::Ended.is_terminal());
    }
}
