use log::{info, warn};

use crate::session::SessionMode;

/// The control the host shows to get into, or out of, a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryAffordance {
    /// Offer to start a session
    Enter(SessionMode),
    /// Offer to stop the running session
    Exit(SessionMode),
}

impl EntryAffordance {
    /// The button label, eg. `START AR`
    pub fn label(&self) -> &'static str {
        match self {
            EntryAffordance::Enter(SessionMode::ImmersiveAr) => "START AR",
            EntryAffordance::Exit(SessionMode::ImmersiveAr) => "STOP AR",
            EntryAffordance::Enter(SessionMode::ImmersiveVr) => "ENTER VR",
            EntryAffordance::Exit(SessionMode::ImmersiveVr) => "EXIT VR",
        }
    }
}

/// The message shown instead of an entry control when a session can't be offered.
///
/// `None` means the host has no XR API at all.
pub fn unsupported_message(mode: Option<SessionMode>) -> String {
    match mode {
        Some(mode) => format!("{} NOT SUPPORTED", mode.label()),
        None => "WEBXR NOT AVAILABLE".to_string(),
    }
}

/// The host UI. Owns layout and styling; the manager only says what should be on screen.
pub trait UiShell {
    /// Show `entry`, replacing any existing entry control. `None` removes it.
    fn set_entry(&mut self, entry: Option<EntryAffordance>);

    /// Show a banner with `message`
    fn show_message(&mut self, message: &str);

    /// Remove the banner
    fn clear_message(&mut self);
}

/// A [`UiShell`] with no UI: everything goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingShell;

impl UiShell for LoggingShell {
    fn set_entry(&mut self, entry: Option<EntryAffordance>) {
        match entry {
            Some(entry) => info!("[XRLOOP_UI] Showing \"{}\"", entry.label()),
            None => info!("[XRLOOP_UI] Entry removed"),
        }
    }

    fn show_message(&mut self, message: &str) {
        warn!("[XRLOOP_UI] {message}");
    }

    fn clear_message(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_labels() {
        assert_eq!(
            EntryAffordance::Enter(SessionMode::ImmersiveAr).label(),
            "START AR"
        );
        assert_eq!(
            EntryAffordance::Exit(SessionMode::ImmersiveVr).label(),
            "EXIT VR"
        );
        assert_eq!(
            unsupported_message(Some(SessionMode::ImmersiveVr)),
            "VR NOT SUPPORTED"
        );
        assert_eq!(unsupported_message(None), "WEBXR NOT AVAILABLE");
    }
}
