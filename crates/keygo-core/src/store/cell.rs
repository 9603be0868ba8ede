// ── Single-value reactive store ──
//
// One writer, many readers. The writer half stays private to the module
// that owns the state; everyone else gets a `StoreReader`.

use std::sync::Arc;

use tokio::sync::watch;

use super::stream::StoreStream;

/// The value and its version, published together in one channel so a
/// reader never sees one without the other.
pub(crate) struct Snapshot<T> {
    pub(crate) version: u64,
    pub(crate) value: Arc<T>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            value: Arc::clone(&self.value),
        }
    }
}

/// Writable half of a reactive store.
///
/// Holds the latest value and a version counter. Version 0 means the store
/// still holds its initial value; every write bumps it.
pub(crate) struct Store<T: Send + Sync + 'static> {
    sender: watch::Sender<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Store<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(Snapshot {
            version: 0,
            value: Arc::new(initial),
        });
        Self { sender }
    }

    /// Replace the value. Last write wins.
    pub(crate) fn set(&self, value: T) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.sender.send_modify(|snap| {
            snap.version += 1;
            snap.value = Arc::new(value);
        });
    }

    pub(crate) fn get(&self) -> Arc<T> {
        Arc::clone(&self.sender.borrow().value)
    }

    pub(crate) fn reader(&self) -> StoreReader<T> {
        StoreReader {
            receiver: self.sender.subscribe(),
        }
    }
}

impl<T: Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Read-only handle to a reactive store. Cheap to clone.
pub struct StoreReader<T: Send + Sync + 'static> {
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Clone for StoreReader<T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> StoreReader<T> {
    /// The latest value.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.receiver.borrow().value)
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.receiver.borrow().version
    }

    /// `true` once the owner has written at least once.
    pub fn is_set(&self) -> bool {
        self.version() > 0
    }

    /// The latest value together with its version, read in one step.
    pub fn versioned(&self) -> (u64, Arc<T>) {
        let snap = self.receiver.borrow();
        (snap.version, Arc::clone(&snap.value))
    }

    /// Register an observer. The subscription starts with the latest value
    /// and is unregistered by dropping it.
    pub fn subscribe(&self) -> StoreStream<T> {
        StoreStream::new(self.receiver.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn starts_unset_with_initial_value() {
        let store = Store::new(7);
        let reader = store.reader();
        assert_eq!(*reader.get(), 7);
        assert_eq!(reader.version(), 0);
        assert!(!reader.is_set());
    }

    #[test]
    fn set_is_visible_to_existing_readers() {
        let store: Store<String> = Store::default();
        let reader = store.reader();

        store.set("a".into());
        store.set("b".into());

        assert_eq!(reader.get().as_str(), "b");
        assert_eq!(*store.get(), "b");
        assert_eq!(reader.version(), 2);
        assert!(reader.is_set());
    }

    #[test]
    fn cloned_readers_share_state() {
        let store = Store::new(0u32);
        let reader = store.reader();
        let clone = reader.clone();
        store.set(5);
        assert_eq!(*clone.get(), 5);
    }

    #[test]
    fn readers_outlive_the_writer() {
        let store = Store::new(1);
        let reader = store.reader();
        store.set(2);
        drop(store);
        assert_eq!(*reader.get(), 2);
    }

    #[test]
    fn version_and_value_move_together_under_concurrent_reads() {
        // Each write stores its own version number as the value.
        let store = Store::new(0u64);
        let reader = store.reader();
        let done = Arc::new(AtomicBool::new(false));

        let watcher = {
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut torn = 0u64;
                while !done.load(Ordering::Acquire) {
                    let (version, value) = reader.versioned();
                    if version != *value {
                        torn += 1;
                    }
                }
                torn
            })
        };

        for i in 1..=200_000u64 {
            store.set(i);
        }
        done.store(true, Ordering::Release);

        assert_eq!(watcher.join().unwrap(), 0);
        assert_eq!(store.reader().versioned(), (200_000, Arc::new(200_000)));
    }
}
