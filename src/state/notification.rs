use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient message shown at the bottom of the window.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Holds at most one toast; a new one replaces the old.
#[derive(Debug, Clone)]
pub struct Notifications {
    current: Option<Notification>,
    duration: Duration,
}

impl Notifications {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Instant::now());
    }

    /// The visible toast, dropping it once it has been up for the full duration.
    pub fn active(&mut self, now: Instant) -> Option<&Notification> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Time left before the current toast disappears.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|n| self.duration.saturating_sub(now.saturating_duration_since(n.shown_at)))
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
