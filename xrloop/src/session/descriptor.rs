use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Feature names understood by platforms, as passed in a [`SessionDescriptor`].
pub mod features {
    /// Ray / real-world surface intersection
    pub const HIT_TEST: &str = "hit-test";
    /// Host UI drawn over the immersive view
    pub const DOM_OVERLAY: &str = "dom-overlay";
    /// Reference space with the origin at the viewer's start position
    pub const LOCAL: &str = "local";
    /// Reference space with the origin on the floor
    pub const LOCAL_FLOOR: &str = "local-floor";
    /// Reference space with a known boundary
    pub const BOUNDED_FLOOR: &str = "bounded-floor";
    /// Articulated hand input
    pub const HAND_TRACKING: &str = "hand-tracking";
    /// Composition layers
    pub const LAYERS: &str = "layers";
}

/// The kind of immersive session being negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    /// Virtual content blended with the real world
    ImmersiveAr,
    /// Fully virtual content
    ImmersiveVr,
}

impl SessionMode {
    /// The platform name of the mode, eg. `immersive-ar`
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::ImmersiveAr => "immersive-ar",
            SessionMode::ImmersiveVr => "immersive-vr",
        }
    }

    /// The short, user facing name of the mode, eg. `AR`
    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::ImmersiveAr => "AR",
            SessionMode::ImmersiveVr => "VR",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of feature names. Ordered so logs and comparisons are stable.
pub type FeatureSet = BTreeSet<String>;

/// A reference to the host UI surface that should stay visible during an AR session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayRoot(pub String);

/// Everything a platform needs to decide whether to grant a session.
///
/// The fields are private: once a descriptor has been handed to
/// [`super::XrSessionManager::request_session`] it cannot change under the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    mode: SessionMode,
    required_features: FeatureSet,
    optional_features: FeatureSet,
    overlay_root: Option<OverlayRoot>,
}

impl SessionDescriptor {
    /// A descriptor with no features at all
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            required_features: Default::default(),
            optional_features: Default::default(),
            overlay_root: None,
        }
    }

    /// The descriptor the stock AR button asks for: `dom-overlay` if the platform has it.
    pub fn immersive_ar() -> Self {
        Self::new(SessionMode::ImmersiveAr).optional(features::DOM_OVERLAY)
    }

    /// The descriptor the stock VR button asks for.
    pub fn immersive_vr() -> Self {
        Self::new(SessionMode::ImmersiveVr)
            .optional(features::LOCAL_FLOOR)
            .optional(features::BOUNDED_FLOOR)
            .optional(features::HAND_TRACKING)
            .optional(features::LAYERS)
    }

    /// The default descriptor for `mode`
    pub fn for_mode(mode: SessionMode) -> Self {
        match mode {
            SessionMode::ImmersiveAr => Self::immersive_ar(),
            SessionMode::ImmersiveVr => Self::immersive_vr(),
        }
    }

    /// Require `feature`. A required feature is never also optional.
    pub fn require(mut self, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        self.optional_features.remove(&feature);
        self.required_features.insert(feature);
        self
    }

    /// Ask for `feature` if the platform has it.
    pub fn optional(mut self, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        if !self.required_features.contains(&feature) {
            self.optional_features.insert(feature);
        }
        self
    }

    /// Keep `root` visible over the session. Implies an optional `dom-overlay`.
    pub fn overlay_root(mut self, root: OverlayRoot) -> Self {
        self.overlay_root = Some(root);
        self.optional(features::DOM_OVERLAY)
    }

    /// The session mode
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Features the session cannot run without
    pub fn required_features(&self) -> &FeatureSet {
        &self.required_features
    }

    /// Features the session would like
    pub fn optional_features(&self) -> &FeatureSet {
        &self.optional_features
    }

    /// The overlay root, if any
    pub fn overlay(&self) -> Option<&OverlayRoot> {
        self.overlay_root.as_ref()
    }

    /// The first required feature missing from `enabled`, if any
    pub fn missing_required<'a>(&'a self, enabled: &FeatureSet) -> Option<&'a str> {
        self.required_features
            .iter()
            .find(|feature| !enabled.contains(*feature))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_default_descriptors() {
        let ar = SessionDescriptor::immersive_ar();
        assert_eq!(ar.mode(), SessionMode::ImmersiveAr);
        assert!(ar.required_features().is_empty());
        assert!(ar.optional_features().contains(features::DOM_OVERLAY));

        let vr = SessionDescriptor::immersive_vr();
        assert_eq!(vr.optional_features().len(), 4);
        assert!(vr.optional_features().contains(features::LOCAL_FLOOR));
    }

    #[test]
    pub fn test_required_features_are_never_optional() {
        let descriptor = SessionDescriptor::new(SessionMode::ImmersiveAr)
            .optional(features::HIT_TEST)
            .require(features::HIT_TEST)
            .optional(features::HIT_TEST);

        assert!(descriptor.required_features().contains(features::HIT_TEST));
        assert!(descriptor.optional_features().is_empty());
    }

    #[test]
    pub fn test_missing_required() {
        let descriptor = SessionDescriptor::immersive_ar()
            .require(features::HIT_TEST)
            .require(features::LOCAL);
        let mut enabled = FeatureSet::new();
        enabled.insert(features::LOCAL.to_string());

        assert_eq!(descriptor.missing_required(&enabled), Some(features::HIT_TEST));
        enabled.insert(features::HIT_TEST.to_string());
        assert_eq!(descriptor.missing_required(&enabled), None);
    }

    #[test]
    pub fn test_overlay_root_implies_dom_overlay() {
        let descriptor = SessionDescriptor::new(SessionMode::ImmersiveAr)
            .overlay_root(OverlayRoot("overlay".into()));
        assert_eq!(descriptor.overlay(), Some(&OverlayRoot("overlay".into())));
        assert!(descriptor.optional_features().contains(features::DOM_OVERLAY));
    }

    #[test]
    pub fn test_mode_names() {
        assert_eq!(SessionMode::ImmersiveVr.to_string(), "immersive-vr");
        assert_eq!(SessionMode::ImmersiveAr.label(), "AR");
        let mode: SessionMode = serde_json::from_str("\"immersive-ar\"").unwrap();
        assert_eq!(mode, SessionMode::ImmersiveAr);
    }
}
