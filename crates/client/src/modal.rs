use tokio::sync::watch;

/// Shared open/closed state for one modal.
///
/// Clones observe and drive the same modal, so a controller can close the
/// dialog that hosts it while views subscribe for re-rendering.
#[derive(Debug, Clone)]
pub struct ModalHandle {
    state: watch::Sender<bool>,
}

impl ModalHandle {
    /// Creates a closed modal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(false),
        }
    }

    /// Opens the modal.
    pub fn open(&self) {
        self.state.send_replace(true);
    }

    /// Closes the modal.
    pub fn close(&self) {
        self.state.send_replace(false);
    }

    /// Returns whether the modal is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.state.borrow()
    }

    /// Subscribes to open/closed transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Default for ModalHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ModalHandle;

    #[test]
    fn clones_share_the_same_modal() {
        let modal = ModalHandle::new();
        let clone = modal.clone();

        clone.open();
        assert!(modal.is_open());
        modal.close();
        assert!(!clone.is_open());
    }
}
