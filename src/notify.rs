//! User-visible notifications.

use std::fmt;

/// An error message for the user, shown by whatever host embeds the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub category: &'static str,
    pub message: &'static str,
}

impl Notification {
    /// Sent once for every cmake invocation that fails.
    pub const CMAKE_FAILED: Notification = Notification {
        category: "CMake Docs",
        message: "Unable to run CMake to get docs",
    };
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Receives notifications from the resolver.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<F> Notifier for F
where
    F: Fn(&Notification),
{
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Default notifier: logs at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::error!("{}", notification);
    }
}
