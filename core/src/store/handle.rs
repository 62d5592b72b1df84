use super::RecordStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared reference to the current store.
///
/// Queries take a snapshot with [`StoreHandle::current`] and keep it for their
/// whole evaluation. A reload swaps the reference in one step, so a query sees
/// either the old store or the new one, never a mix.
#[derive(Clone)]
pub struct StoreHandle {
    sender: Arc<watch::Sender<Arc<RecordStore>>>,
}

impl StoreHandle {
    pub fn new(store: RecordStore) -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(store));
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Arc<RecordStore> {
        self.sender.borrow().clone()
    }

    /// Installs `store` for new queries and returns the one it replaced.
    pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
        self.sender.send_replace(Arc::new(store))
    }

    /// Receiver that is notified whenever the store is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Arc<RecordStore>> {
        self.sender.subscribe()
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(RecordStore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{build_store, RawRow};

    fn store_with(frequencies: &[f64]) -> RecordStore {
        let rows: Vec<RawRow> = frequencies
            .iter()
            .map(|&mhz| {
                RawRow::new()
                    .with("Device_Type", "T")
                    .with("Frequency", mhz)
                    .with("Bandwidth_kHz", 10.0)
                    .with("Latitude", 0.0)
                    .with("Longitude", 0.0)
            })
            .collect();
        build_store(&rows).unwrap().0
    }

    #[test]
    fn replace_keeps_existing_snapshots_intact() {
        let handle = StoreHandle::new(store_with(&[100.0]));
        let snapshot = handle.current();

        let previous = handle.replace(store_with(&[200.0, 300.0]));

        assert_eq!(snapshot.len(), 1);
        assert!(Arc::ptr_eq(&snapshot, &previous));
        assert_eq!(handle.current().len(), 2);
    }

    #[test]
    fn subscribers_observe_reloads() {
        let handle = StoreHandle::default();
        let mut receiver = handle.subscribe();
        assert!(!receiver.has_changed().unwrap());

        handle.replace(store_with(&[100.0]));

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().len(), 1);
    }

    #[test]
    fn clones_share_the_same_store() {
        let handle = StoreHandle::default();
        let clone = handle.clone();
        clone.replace(store_with(&[100.0, 200.0]));
        assert_eq!(handle.current().len(), 2);
    }
}
