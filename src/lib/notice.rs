//! Transient user-facing notifications. A slot holds at most one notice;
//! showing a new one replaces whatever is pending.
use std::{
    fmt,
    time::{Duration, Instant},
};

use log::info;

/// How long the profile cards keep a toast on screen.
pub const PROFILE_TOAST_LIFETIME: Duration = Duration::from_millis(2000);
/// How long the schedule keeps a toast on screen.
pub const SCHEDULE_TOAST_LIFETIME: Duration = Duration::from_millis(3000);
/// How long the "Copied!" tooltip stays.
pub const TOOLTIP_LIFETIME: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Single-slot notification with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct Toast<T = Notice> {
    lifetime: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Toast<T> {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            pending: None,
        }
    }

    /// Replaces the pending value; its timer restarts from `now`.
    pub fn show_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.lifetime));
    }

    pub fn show(&mut self, value: T) {
        self.show_at(value, Instant::now());
    }

    /// The pending value if it has not expired by `now`.
    pub fn current_at(&self, now: Instant) -> Option<&T> {
        match &self.pending {
            Some((value, deadline)) if now < *deadline => Some(value),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current_at(Instant::now())
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

impl Toast<Notice> {
    pub fn notify(&mut self, message: impl Into<String>, kind: NoticeKind) {
        let notice = Notice::new(message, kind);
        info!("{}", notice);
        self.show(notice);
    }
}
