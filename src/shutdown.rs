//! Cancellation for the accept loop.

use tokio::sync::watch;

/// Fires the signal. Dropping every handle also counts as firing it.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

/// Observed by the accept loop.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

pub fn channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, Shutdown { rx })
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        // send_replace works even after every receiver is gone
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Completes once the signal fires. Cancel safe.
    pub async fn recv(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn recv_waits_for_trigger() {
        let (handle, mut shutdown) = channel();
        assert!(!shutdown.is_triggered());
        assert!(timeout(Duration::from_millis(50), shutdown.recv()).await.is_err());

        handle.trigger();
        assert!(shutdown.is_triggered());
        timeout(Duration::from_secs(1), shutdown.recv()).await.unwrap();
        // stays fired
        timeout(Duration::from_secs(1), shutdown.recv()).await.unwrap();
    }

    #[tokio::test]
    async fn dropped_handle_fires() {
        let (handle, mut shutdown) = channel();
        drop(handle);
        assert!(shutdown.is_triggered());
        timeout(Duration::from_secs(1), shutdown.recv()).await.unwrap();
    }

    #[tokio::test]
    async fn clones_see_the_same_signal() {
        let (handle, shutdown) = channel();
        let mut other = shutdown.clone();
        handle.trigger();
        timeout(Duration::from_secs(1), other.recv()).await.unwrap();
    }
}
