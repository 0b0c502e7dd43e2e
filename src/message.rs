use std::time::{Duration, Instant};

/// How long a status message stays on screen before it expires.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Whether a status message reports something that worked or something that
/// didn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient status message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// A one-slot status area: a new message replaces whatever was showing, and
/// each message expires on its own clock.
///
/// Expiry is derived from the current message's own timestamp rather than
/// from a detached timer, so replacing a message restarts the clock and a
/// stale timer can never hide a newer message.
#[derive(Debug, Default)]
pub struct MessageArea {
    current: Option<Message>,
}

impl MessageArea {
    pub fn new() -> MessageArea { MessageArea::default() }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(text, Severity::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(text, Severity::Error);
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity) {
        self.current = Some(Message {
            text: text.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    /// The message to display right now, if it hasn't expired.
    pub fn current(&self) -> Option<&Message> { self.visible_at(Instant::now()) }

    fn visible_at(&self, now: Instant) -> Option<&Message> {
        self.current
            .as_ref()
            .filter(|msg| now.duration_since(msg.shown_at) < MESSAGE_TTL)
    }

    pub fn dismiss(&mut self) { self.current = None; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_message_is_visible_and_an_old_one_is_not() {
        let mut area = MessageArea::new();
        area.success("Student signed up successfully!");

        let shown_at = area.current.as_ref().unwrap().shown_at;

        assert!(area.visible_at(shown_at).is_some());
        assert!(area.visible_at(shown_at + MESSAGE_TTL).is_none());
    }

    #[test]
    fn the_last_message_wins() {
        let mut area = MessageArea::new();
        area.success("first");
        area.error("second");

        let current = area.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn replacing_a_message_restarts_the_clock() {
        let mut area = MessageArea::new();
        area.success("first");
        let first_shown = area.current.as_ref().unwrap().shown_at;

        area.error("second");

        // even at the first message's expiry the replacement is still up
        let second = area.visible_at(first_shown + MESSAGE_TTL);
        assert_eq!(second.map(|m| m.text.as_str()), Some("second"));
    }

    #[test]
    fn dismiss_clears_the_slot() {
        let mut area = MessageArea::new();
        area.error("oops");

        area.dismiss();

        assert!(area.current().is_none());
    }
}
