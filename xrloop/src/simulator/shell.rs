use std::{cell::RefCell, rc::Rc};

use crate::ui_shell::{EntryAffordance, UiShell};

/// What a [`RecordingShell`] has been asked to show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellLog {
    /// The entry control currently shown
    pub entry: Option<EntryAffordance>,
    /// How many times the entry control was changed or removed
    pub entry_updates: usize,
    /// Every message shown, oldest first
    pub messages: Vec<String>,
    /// The banner currently shown
    pub banner: Option<String>,
}

/// A [`UiShell`] that records what it was told
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    log: Rc<RefCell<ShellLog>>,
}

impl RecordingShell {
    /// A copy of the log so far
    pub fn snapshot(&self) -> ShellLog {
        self.log.borrow().clone()
    }
}

impl UiShell for RecordingShell {
    fn set_entry(&mut self, entry: Option<EntryAffordance>) {
        let mut log = self.log.borrow_mut();
        log.entry = entry;
        log.entry_updates += 1;
    }

    fn show_message(&mut self, message: &str) {
        let mut log = self.log.borrow_mut();
        log.messages.push(message.to_string());
        log.banner = Some(message.to_string());
    }

    fn clear_message(&mut self) {
        self.log.borrow_mut().banner = None;
    }
}
