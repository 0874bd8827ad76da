//! Toast notification state.
//!
//! At most one toast is visible. Every `show` bumps a generation counter and
//! hands back a [`ToastTimer`] that the caller schedules; timers whose
//! generation no longer matches are ignored when they fire, so a superseded
//! dismissal never touches the newer toast.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Auto-dismiss delay for a toast
pub const TOAST_TTL_MS: u32 = 6000;
/// Length of the exit transition
pub const TOAST_EXIT_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub message: String,
    pub severity: Severity,
    pub ttl_ms: u32,
}

impl NotificationEvent {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl_ms: TOAST_TTL_MS,
        }
    }

    pub fn with_ttl(mut self, ttl_ms: u32) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }
}

/// Anything that can surface a toast. The submission pipeline reports through this.
pub trait Notifier {
    fn notify(&mut self, event: NotificationEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Idle,
    Visible,
    Leaving,
}

/// What a timer should do once it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTimerKind {
    Dismiss,
    ExitFinished,
}

/// A delayed step requested by the notification center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimer {
    pub kind: ToastTimerKind,
    pub delay_ms: u32,
    generation: u64,
}

/// Attributes the toast element should carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub class_name: String,
    pub icon: &'static str,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    phase: ToastPhase,
    current: Option<NotificationEvent>,
    generation: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            phase: ToastPhase::Idle,
            current: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&NotificationEvent> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.phase == ToastPhase::Visible
    }

    /// Replaces whatever is showing and returns the auto-dismiss timer to schedule
    pub fn show(&mut self, event: NotificationEvent) -> ToastTimer {
        self.generation += 1;
        let delay_ms = event.ttl_ms;
        self.current = Some(event);
        self.phase = ToastPhase::Visible;
        ToastTimer {
            kind: ToastTimerKind::Dismiss,
            delay_ms,
            generation: self.generation,
        }
    }

    /// Starts the exit transition. Returns the timer that completes it, or
    /// `None` if nothing is visible.
    pub fn hide(&mut self) -> Option<ToastTimer> {
        if self.phase != ToastPhase::Visible {
            return None;
        }
        self.generation += 1;
        self.phase = ToastPhase::Leaving;
        Some(ToastTimer {
            kind: ToastTimerKind::ExitFinished,
            delay_ms: TOAST_EXIT_MS,
            generation: self.generation,
        })
    }

    /// Applies a fired timer. Stale timers are no-ops. May request a follow-up timer.
    pub fn on_timer(&mut self, timer: ToastTimer) -> Option<ToastTimer> {
        if timer.generation != self.generation {
            return None;
        }
        match timer.kind {
            ToastTimerKind::Dismiss => self.hide(),
            ToastTimerKind::ExitFinished => {
                if self.phase == ToastPhase::Leaving {
                    self.phase = ToastPhase::Idle;
                    self.current = None;
                }
                None
            }
        }
    }

    pub fn view(&self) -> ToastView {
        let (severity, message) = match &self.current {
            Some(event) => (event.severity, event.message.clone()),
            None => (Severity::Info, String::new()),
        };
        let class_name = match self.phase {
            ToastPhase::Idle => "notification".to_string(),
            ToastPhase::Visible => format!("notification {severity} show"),
            ToastPhase::Leaving => format!("notification {severity} hidden"),
        };
        ToastView {
            class_name,
            icon: severity.icon(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_icons() {
        assert_eq!(Severity::Success.icon(), "✅");
        assert_eq!(Severity::Error.icon(), "❌");
        assert_eq!(Severity::Warning.icon(), "⚠️");
        assert_eq!(Severity::Info.icon(), "ℹ️");
    }

    #[test]
    fn test_show_sets_view_and_ttl() {
        let mut center = NotificationCenter::new();
        let timer = center.show(NotificationEvent::new("Saved", Severity::Success));

        assert_eq!(timer.delay_ms, TOAST_TTL_MS);
        assert_eq!(timer.kind, ToastTimerKind::Dismiss);
        let view = center.view();
        assert_eq!(view.class_name, "notification success show");
        assert_eq!(view.icon, "✅");
        assert_eq!(view.message, "Saved");
    }

    #[test]
    fn test_second_show_replaces_first() {
        let mut center = NotificationCenter::new();
        center.show(NotificationEvent::new("first", Severity::Info));
        center.show(NotificationEvent::new("second", Severity::Warning));

        assert!(center.is_visible());
        assert_eq!(center.current().unwrap().message, "second");
        assert_eq!(center.view().class_name, "notification warning show");
    }

    #[test]
    fn test_stale_dismiss_timer_is_noop() {
        let mut center = NotificationCenter::new();
        let old = center.show(NotificationEvent::new("first", Severity::Info));
        let fresh = center.show(NotificationEvent::new("second", Severity::Info));

        assert_eq!(center.on_timer(old), None);
        assert!(center.is_visible());

        let exit = center.on_timer(fresh).expect("dismiss starts exit");
        assert_eq!(exit.kind, ToastTimerKind::ExitFinished);
        assert_eq!(exit.delay_ms, TOAST_EXIT_MS);
        assert_eq!(center.phase(), ToastPhase::Leaving);
        assert_eq!(center.view().class_name, "notification info hidden");

        assert_eq!(center.on_timer(exit), None);
        assert_eq!(center.phase(), ToastPhase::Idle);
        assert_eq!(center.view().class_name, "notification");
    }

    #[test]
    fn test_finished_exit_clears_content() {
        let mut center = NotificationCenter::new();
        center.show(NotificationEvent::new("secret", Severity::Error));
        let exit = center.hide().unwrap();
        center.on_timer(exit);

        assert!(center.current().is_none());
        let view = center.view();
        assert_eq!(view.message, "");
        assert_eq!(view.class_name, "notification");
    }

    #[test]
    fn test_show_during_exit_cancels_it() {
        let mut center = NotificationCenter::new();
        center.show(NotificationEvent::new("first", Severity::Info));
        let exit = center.hide().unwrap();
        center.show(NotificationEvent::new("second", Severity::Error));

        center.on_timer(exit);
        assert!(center.is_visible());
        assert_eq!(center.view().message, "second");
    }

    #[test]
    fn test_hide_when_idle_does_nothing() {
        let mut center = NotificationCenter::new();
        assert_eq!(center.hide(), None);
        assert_eq!(center.view().class_name, "notification");
    }
}
