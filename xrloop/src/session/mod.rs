mod descriptor;
mod manager;
mod state;
mod support;

pub use descriptor::{features, FeatureSet, OverlayRoot, SessionDescriptor, SessionMode};
pub use manager::{XrSessionManager, XrSessionManagerBuilder};
pub use state::{EndReason, LifecycleEvent, LifecycleState};
pub use support::check_support;
pub(crate) use support::support_from_result;
