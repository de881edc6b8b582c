//! Transient messages that give feedback to the user

use std::fmt::{Display, Error, Formatter};

use chrono::{DateTime, Duration, Utc};

/// How long a notification is fully visible, in milliseconds
const FADE_AFTER_MS: i64 = 1500;
/// How long a notification stays on screen at all, in milliseconds
const EXPIRE_AFTER_MS: i64 = 2000;

/// The kind of a notification (this also drives its colour)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
    Secondary,
}

impl Level {
    /// The CSS class of the alert that displays this level
    pub fn alert_class(&self) -> &'static str {
        match self {
            Level::Success => "alert alert-success",
            Level::Info => "alert alert-info",
            Level::Warning => "alert alert-warning",
            Level::Danger => "alert alert-danger",
            Level::Secondary => "alert alert-secondary",
        }
    }
}


/// A message that is displayed for a short while
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub text: String,
    pub level: Level,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new<S: ToString>(text: S, level: Level) -> Self {
        Self { text: text.to_string(), level, created_at: Utc::now() }
    }

    /// Whether this notification has started to fade out
    pub fn is_fading(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::milliseconds(FADE_AFTER_MS)
    }

    /// Whether this notification should not be displayed anymore
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::milliseconds(EXPIRE_AFTER_MS)
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let symbol = match self.level {
            Level::Success => "✓",
            Level::Info => "i",
            Level::Warning => "!",
            Level::Danger => "✗",
            Level::Secondary => "-",
        };
        write!(f, "[{}] {}", symbol, self.text)
    }
}


/// A queue of the notifications that are currently displayed
#[derive(Debug, Default)]
pub struct Notifier {
    queue: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a message, and queue it for display.
    /// Returns the queued notification
    pub fn flash<S: ToString>(&mut self, text: S, level: Level) -> Notification {
        let notification = Notification::new(text, level);
        match level {
            Level::Danger => log::error!("{}", notification.text),
            Level::Warning => log::warn!("{}", notification.text),
            _ => log::info!("{}", notification.text),
        }
        self.prune(notification.created_at);
        self.queue.push(notification.clone());
        notification
    }

    /// Forget about the notifications that have expired at `now`
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.queue.retain(|n| n.is_expired(now) == false);
    }

    /// The notifications that are still displayed at `now`
    pub fn active(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.queue.iter().filter(|n| n.is_expired(now) == false).collect()
    }

    /// Take every queued notification (e.g. to print them)
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_lifetime() {
        let n = Notification::new("Tarefa salva localmente.", Level::Success);
        let t0 = n.created_at;
        assert!(n.is_fading(t0) == false);
        assert!(n.is_fading(t0 + Duration::milliseconds(1500)));
        assert!(n.is_expired(t0 + Duration::milliseconds(1999)) == false);
        assert!(n.is_expired(t0 + Duration::milliseconds(2000)));
    }

    #[test]
    fn notifier_prunes_expired() {
        let mut notifier = Notifier::new();
        let first = notifier.flash("first", Level::Info);
        notifier.flash("second", Level::Warning);

        let now = first.created_at;
        assert_eq!(notifier.active(now).len(), 2);

        notifier.prune(now + Duration::seconds(10));
        assert!(notifier.active(now).is_empty());
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn flash_forgets_expired_notifications() {
        let mut notifier = Notifier::new();
        let mut old = notifier.flash("old", Level::Info);
        old.created_at = old.created_at - Duration::seconds(3);
        notifier.queue = vec![old];

        let recent = notifier.flash("recent", Level::Success);
        assert_eq!(notifier.drain(), vec![recent]);
    }

    #[test]
    fn display() {
        let n = Notification::new("Erro ao gravar no armazenamento local.", Level::Danger);
        assert_eq!(n.to_string(), "[✗] Erro ao gravar no armazenamento local.");
        assert_eq!(n.level.alert_class(), "alert alert-danger");
    }
}
