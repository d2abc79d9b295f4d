use rfd::{MessageButtons, MessageDialog, MessageLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Blocking user notification, kept apart from command results so the
/// controller can run without a window.
pub trait Notifier {
    fn notify(&mut self, level: Level, title: &str, message: &str);
}

/// Native modal message box.
#[derive(Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&mut self, level: Level, title: &str, message: &str) {
        let level = match level {
            Level::Info => MessageLevel::Info,
            Level::Error => MessageLevel::Error,
        };
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Collects notifications instead of showing them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub seen: Vec<(Level, String)>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn errors(&self) -> usize {
        self.seen.iter().filter(|(l, _)| *l == Level::Error).count()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, level: Level, _title: &str, message: &str) {
        self.seen.push((level, message.to_owned()));
    }
}
