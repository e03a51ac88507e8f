use thiserror::Error;

use crate::session::SessionMode;

/// Everything that can go wrong while negotiating or running a session.
///
/// None of these are fatal: the manager recovers at its boundary and hands a displayable message
/// to the [`crate::ui_shell::UiShell`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The platform could not answer a capability query. Treated as "unsupported".
    #[error("Unable to determine whether {0} is supported")]
    CapabilityQueryFailed(SessionMode),
    /// A required feature could not be satisfied.
    #[error("The required feature \"{0}\" is not available")]
    FeatureUnavailable(String),
    /// The user or the system declined the session. Retrying is fine.
    #[error("The session request was denied: {0}")]
    SessionRequestDenied(String),
    /// The drawing surface or the scene content could not be set up.
    #[error("Unable to initialise resources: {0}")]
    ResourceInitFailed(String),
    /// A session already owns the render surface.
    #[error("A session is already active on this surface")]
    AlreadyActive,
    /// The platform does not support the requested mode.
    #[error("{} is not supported", .0.label())]
    Unsupported(SessionMode),
    /// Support for the mode is not known yet.
    #[error("Support for {0} has not been checked yet")]
    NotReady(SessionMode),
    /// The manager has been disposed.
    #[error("The session manager has been disposed")]
    Disposed,
}

/// Failures reported by a platform collaborator when a pending request settles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform cannot provide a feature the request requires.
    #[error("The feature \"{0}\" is not supported by this platform")]
    FeatureUnavailable(String),
    /// The user or the system said no.
    #[error("{0}")]
    Denied(String),
    /// The platform dropped the request without settling it.
    #[error("The request was dropped before it settled")]
    Cancelled,
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<PlatformError> for SessionError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::FeatureUnavailable(feature) => SessionError::FeatureUnavailable(feature),
            PlatformError::Denied(reason) | PlatformError::Other(reason) => {
                SessionError::SessionRequestDenied(reason)
            }
            PlatformError::Cancelled => {
                SessionError::SessionRequestDenied(PlatformError::Cancelled.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for SessionError {
    fn from(error: anyhow::Error) -> Self {
        SessionError::ResourceInitFailed(format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_platform_errors_map_onto_session_errors() {
        assert_eq!(
            SessionError::from(PlatformError::FeatureUnavailable("hit-test".into())),
            SessionError::FeatureUnavailable("hit-test".into())
        );
        assert_eq!(
            SessionError::from(PlatformError::Denied("user declined".into())),
            SessionError::SessionRequestDenied("user declined".into())
        );
        assert!(matches!(
            SessionError::from(PlatformError::Cancelled),
            SessionError::SessionRequestDenied(_)
        ));
    }

    #[test]
    pub fn test_unsupported_message() {
        assert_eq!(
            SessionError::Unsupported(SessionMode::ImmersiveAr).to_string(),
            "AR is not supported"
        );
    }

    #[test]
    pub fn test_setup_failures_become_resource_errors() {
        let error = anyhow::anyhow!("no texture").context("photo sphere");
        assert_eq!(
            SessionError::from(error),
            SessionError::ResourceInitFailed("photo sphere: no texture".into())
        );
    }
}
