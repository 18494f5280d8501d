use ferrous_mdns_domain::DomainError;
use tokio::sync::watch;

/// Broadcast raised after every cache merge.
///
/// Each listener tracks the last version it saw, so one that subscribes
/// before inspecting the cache is woken by any merge that lands afterwards.
#[derive(Debug)]
pub struct CacheUpdateSignal {
    version: watch::Sender<u64>,
}

impl CacheUpdateSignal {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self { version }
    }

    pub fn subscribe(&self) -> CacheUpdateListener {
        CacheUpdateListener {
            receiver: self.version.subscribe(),
        }
    }

    pub fn notify(&self) {
        self.version
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }
}

impl Default for CacheUpdateSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CacheUpdateListener {
    receiver: watch::Receiver<u64>,
}

impl CacheUpdateListener {
    /// Waits for a merge newer than the last one observed and returns its version.
    pub async fn changed(&mut self) -> Result<u64, DomainError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| DomainError::ClientClosed)?;
        Ok(*self.receiver.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn notify_before_wait_is_not_lost() {
        let signal = CacheUpdateSignal::new();
        let mut listener = signal.subscribe();

        signal.notify();

        let version = tokio::time::timeout(Duration::from_millis(200), listener.changed())
            .await
            .expect("update raised after subscribe must be observed")
            .unwrap();
        assert_eq!(version, 1);
    }

    #[tokio::test]
    async fn updates_before_subscribe_are_already_seen() {
        let signal = CacheUpdateSignal::new();
        signal.notify();
        signal.notify();

        let mut listener = signal.subscribe();
        let waited = tokio::time::timeout(Duration::from_millis(50), listener.changed()).await;
        assert!(waited.is_err(), "stale updates should not wake a new listener");
        assert_eq!(signal.version(), 2);
    }

    #[tokio::test]
    async fn every_listener_is_woken() {
        let signal = CacheUpdateSignal::new();
        let mut first = signal.subscribe();
        let mut second = signal.subscribe();

        signal.notify();

        assert_eq!(first.changed().await.unwrap(), 1);
        assert_eq!(second.changed().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn dropped_signal_closes_listeners() {
        let signal = CacheUpdateSignal::new();
        let mut listener = signal.subscribe();
        drop(signal);

        assert_eq!(listener.changed().await, Err(DomainError::ClientClosed));
    }
}
