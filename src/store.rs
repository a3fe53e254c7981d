//! The bounded unique-selection store.
//!
//! Single source of truth for "currently selected identifiers": an
//! insertion-ordered list of unique ids with a hard capacity, persisted
//! under one storage key and observable through synchronous subscriptions.
//! Adds beyond capacity and duplicate adds are absorbed as no-ops so the
//! surrounding UI can degrade gracefully; it checks [`SelectionStore::is_full`]
//! when it wants to warn the user instead.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{StorageError, StoreError};
use crate::snapshot::Snapshot;
use crate::storage::StorageBackend;

/// Capacity used by the compare-list deployment of this store.
pub const DEFAULT_CAPACITY: usize = 4;

type ChangeCallback = Box<dyn Fn(&[String]) + Send>;
type ErrorHook = Box<dyn Fn(&StorageError) + Send>;

/// Handle for an active subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    items: Vec<String>,
    subscribers: Vec<(SubscriptionId, ChangeCallback)>,
    next_subscription: u64,
    error_hook: Option<ErrorHook>,
}

/// Persisted, capacity-bounded set of unique identifiers.
///
/// All access is serialized through one lock, so a shared instance behaves
/// on a multi-threaded host exactly as it does on a single-threaded event
/// loop: each operation is atomic and applies in call order.
pub struct SelectionStore {
    key: String,
    capacity: usize,
    backend: Arc<dyn StorageBackend>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("key", &self.key)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Open the store under `key`, rehydrating any persisted record.
    ///
    /// A missing or unreadable record is not fatal: the store starts empty
    /// and the failure is logged. `capacity` must be at least 1.
    pub fn open(
        key: impl Into<String>,
        capacity: usize,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        let key = key.into();
        let items = match rehydrate(&key, capacity, backend.as_ref()) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("failed to load record under {key:?}, starting empty: {e}");
                Vec::new()
            }
        };
        Ok(Self {
            key,
            capacity,
            backend,
            inner: Mutex::new(Inner {
                items,
                subscribers: Vec::new(),
                next_subscription: 0,
                error_hook: None,
            }),
        })
    }

    /// Open with the compare-list default capacity of 4.
    pub fn open_default(
        key: impl Into<String>,
        backend: Arc<dyn StorageBackend>,
    ) -> Result<Self, StoreError> {
        Self::open(key, DEFAULT_CAPACITY, backend)
    }

    /// Add `id` to the selection.
    ///
    /// No-op when `id` is already selected or the selection is full; only a
    /// malformed identifier is an error.
    pub fn add(&self, id: &str) -> Result<(), StoreError> {
        validate(id)?;
        let mut inner = self.inner.lock();
        if inner.items.iter().any(|existing| existing == id) {
            log::debug!("add {id:?} ignored: already selected");
            return Ok(());
        }
        if inner.items.len() == self.capacity {
            log::debug!(
                "add {id:?} ignored: selection full ({} of {})",
                inner.items.len(),
                self.capacity
            );
            return Ok(());
        }
        inner.items.push(id.to_string());
        self.commit(&mut inner);
        Ok(())
    }

    /// Remove `id` from the selection, preserving the order of the rest.
    ///
    /// No-op when `id` is not selected.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        validate(id)?;
        let mut inner = self.inner.lock();
        let Some(pos) = inner.items.iter().position(|existing| existing == id) else {
            log::debug!("remove {id:?} ignored: not selected");
            return Ok(());
        };
        inner.items.remove(pos);
        self.commit(&mut inner);
        Ok(())
    }

    /// Empty the selection and persist the empty record.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        if inner.items.is_empty() {
            log::debug!("clear ignored: selection already empty");
            return;
        }
        inner.items.clear();
        self.commit(&mut inner);
    }

    /// Whether `id` is currently selected.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().items.iter().any(|existing| existing == id)
    }

    /// Copy-on-read snapshot of the selection in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.inner.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Whether the next distinct `add` would be dropped.
    pub fn is_full(&self) -> bool {
        self.inner.lock().items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Storage key this store owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register `callback` to receive the new ordered selection after every
    /// change, in transition order.
    ///
    /// Callbacks run synchronously under the store lock and must not call
    /// back into the store.
    pub fn subscribe(&self, callback: impl Fn(&[String]) + Send + 'static) -> SubscriptionId {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop the subscription for `id`. No-op for an unknown handle.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.lock().subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Install the side channel for persistence failures, replacing any
    /// previous hook. Failures are also logged as warnings.
    pub fn on_persistence_error(&self, hook: impl Fn(&StorageError) + Send + 'static) {
        self.inner.lock().error_hook = Some(Box::new(hook));
    }

    /// Persist the current items and notify subscribers. Caller holds the
    /// lock, so subscribers observe transitions in order with none dropped.
    fn commit(&self, inner: &mut Inner) {
        let persisted = Snapshot::new(inner.items.clone())
            .encode()
            .and_then(|raw| self.backend.save(&self.key, &raw));
        match persisted {
            Ok(()) => log::debug!(
                "record saved under {:?} ({} item(s))",
                self.key,
                inner.items.len()
            ),
            Err(e) => {
                // In-memory state stays authoritative for the session.
                log::warn!("failed to persist record under {:?}: {e}", self.key);
                if let Some(hook) = &inner.error_hook {
                    hook(&e);
                }
            }
        }
        let items = inner.items.clone();
        for (_, callback) in &inner.subscribers {
            callback(&items);
        }
    }
}

/// Load and repair the persisted record for `key`.
fn rehydrate(
    key: &str,
    capacity: usize,
    backend: &dyn StorageBackend,
) -> Result<Vec<String>, StorageError> {
    let Some(raw) = backend.load(key)? else {
        log::info!("no record under {key:?}, starting fresh");
        return Ok(Vec::new());
    };
    let snapshot = Snapshot::decode(key, &raw)?;
    let items = repair(snapshot.items, capacity);
    log::info!("loaded {} selected item(s) under {key:?}", items.len());
    Ok(items)
}

/// Re-establish uniqueness and the capacity bound on rehydrated items.
/// First occurrence wins; malformed ids are dropped.
fn repair(raw: Vec<String>, capacity: usize) -> Vec<String> {
    let mut items: Vec<String> = Vec::with_capacity(raw.len().min(capacity));
    for id in raw {
        if items.len() == capacity {
            break;
        }
        if validate(&id).is_err() || items.contains(&id) {
            continue;
        }
        items.push(id);
    }
    items
}

/// Reject empty, whitespace-only, and control-character identifiers.
fn validate(id: &str) -> Result<(), StoreError> {
    if id.trim().is_empty() || id.chars().any(char::is_control) {
        return Err(StoreError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}
