//! Ports the controllers use to reach the hosting shell.

/// Transient, non-blocking user notifications (toasts).
pub trait Notifier: Send + Sync {
    /// Shows a success notification.
    fn success(&self, message: &str);

    /// Shows an error notification.
    fn error(&self, message: &str);
}

/// Navigation capabilities of the hosting shell.
pub trait Navigator: Send + Sync {
    /// Requests a refresh of the current view's server data.
    fn refresh(&self);

    /// Performs a full navigation to an absolute URL, leaving the app.
    fn assign(&self, url: &str);
}
