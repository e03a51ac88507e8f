use log::{info, warn};

use super::SessionMode;
use crate::{platform::XrPlatform, PlatformError};

/// Ask `platform` whether `mode` is supported.
///
/// Never fails: a missing platform, or a query the platform rejects, is simply "not supported".
pub async fn check_support(platform: Option<&dyn XrPlatform>, mode: SessionMode) -> bool {
    let Some(platform) = platform else {
        info!("[XRLOOP_SESSION] No XR platform available, {mode} is not supported");
        return false;
    };

    support_from_result(mode, platform.is_session_supported(mode).await)
}

pub(crate) fn support_from_result(mode: SessionMode, result: Result<bool, PlatformError>) -> bool {
    match result {
        Ok(supported) => {
            info!("[XRLOOP_SESSION] {mode} supported: {supported}");
            supported
        }
        Err(e) => {
            warn!("[XRLOOP_SESSION] Unable to check support for {mode}: {e}");
            false
        }
    }
}
