//! # Product Group Synchronizer
//!
//! Keeps the enclosing product group (bundles, "buy together" offers) told
//! which product and variant this summary currently shows.
//!
//! ## Registration Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  provider created ──► add_item_to_group(P1, V1) ──► active: (P1, V1)    │
//! │                                                                         │
//! │  SetHover / SetQuantity ───────────────────────────► (no change)        │
//! │                                                                         │
//! │  SetProduct(P2, V2) ──► remove (P1, V1)                                 │
//! │                     ──► add_item_to_group(P2, V2) ──► active: (P2, V2)  │
//! │                                                                         │
//! │  provider dropped ────► remove (P2, V2) ───────────► active: none       │
//! │                                                                         │
//! │  At most ONE active registration per provider. The old one is always    │
//! │  removed before the next one is made.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! The synchronizer holds its lock while calling into the group, so a
//! group must not dispatch into the same provider from inside
//! `add_item_to_group` or a removal callback.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use summary_core::{Product, Sku, Snapshot};
use tracing::debug;
use uuid::Uuid;

// =============================================================================
// Collaborator Interface
// =============================================================================

/// A product group that summaries register themselves with.
///
/// Implemented by whatever aggregates several summaries (a bundle offer, a
/// compare bar). This crate only consumes it.
pub trait ProductGroup: Send + Sync {
    /// Adds `product` with the given variant to the group.
    ///
    /// `item` is `None` only when the product has neither a selected
    /// variant nor any catalog variants.
    fn add_item_to_group(&self, product: &Product, item: Option<&Sku>) -> GroupRegistration;
}

/// Handle to one entry in a product group.
///
/// Removing it (explicitly or by dropping it) runs the group's removal
/// callback exactly once.
pub struct GroupRegistration {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl GroupRegistration {
    /// Wraps the group's removal callback.
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        GroupRegistration {
            remove: Some(Box::new(remove)),
        }
    }

    /// A registration with nothing to undo.
    pub fn noop() -> Self {
        GroupRegistration { remove: None }
    }

    /// Removes the entry from the group.
    pub fn remove(mut self) {
        self.run_remove();
    }

    fn run_remove(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for GroupRegistration {
    fn drop(&mut self) {
        self.run_remove();
    }
}

impl fmt::Debug for GroupRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupRegistration")
            .field("pending", &self.remove.is_some())
            .finish()
    }
}

// =============================================================================
// Synchronizer
// =============================================================================

/// The registration currently held, keyed by what it was made for.
struct ActiveEntry {
    product: Product,
    selected_item: Option<Sku>,
    registration: GroupRegistration,
}

impl ActiveEntry {
    fn matches(&self, snapshot: &Snapshot) -> bool {
        self.selected_item == snapshot.selected_item && self.product == snapshot.product
    }
}

/// Mirrors a provider's `(product, selected_item)` into its product group.
pub(crate) struct GroupSynchronizer {
    provider_id: Uuid,
    group: Option<Arc<dyn ProductGroup>>,
    active: Mutex<Option<ActiveEntry>>,
}

impl GroupSynchronizer {
    pub(crate) fn new(provider_id: Uuid, group: Option<Arc<dyn ProductGroup>>) -> Self {
        GroupSynchronizer {
            provider_id,
            group,
            active: Mutex::new(None),
        }
    }

    /// Brings the group in line with the latest committed snapshot.
    ///
    /// `latest` is read after the lock is taken, so when several dispatches
    /// race, whichever syncs last registers the newest selection.
    pub(crate) fn sync(&self, latest: impl FnOnce() -> Arc<Snapshot>) {
        let Some(group) = &self.group else {
            return;
        };

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = latest();

        if active.as_ref().is_some_and(|entry| entry.matches(&snapshot)) {
            return;
        }

        if let Some(previous) = active.take() {
            debug!(
                provider = %self.provider_id,
                product_id = %previous.product.product_id,
                "Removing item from product group"
            );
            previous.registration.remove();
        }

        let item = snapshot.group_item();
        debug!(
            provider = %self.provider_id,
            product_id = %snapshot.product.product_id,
            item_id = item.map(|i| i.item_id.as_str()).unwrap_or("-"),
            "Adding item to product group"
        );
        let registration = group.add_item_to_group(&snapshot.product, item);

        *active = Some(ActiveEntry {
            product: snapshot.product.clone(),
            selected_item: snapshot.selected_item.clone(),
            registration,
        });
    }

    /// Removes the active registration, if any.
    pub(crate) fn teardown(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = active.take() {
            debug!(
                provider = %self.provider_id,
                product_id = %previous.product.product_id,
                "Provider torn down, removing item from product group"
            );
            previous.registration.remove();
        }
    }
}

impl Drop for GroupSynchronizer {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_registration_removes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registration = GroupRegistration::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registration.remove();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registration_removes_on_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        {
            let _registration = GroupRegistration::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noop_registration() {
        let registration = GroupRegistration::noop();
        assert_eq!(format!("{:?}", registration), "GroupRegistration { pending: false }");
        registration.remove();
    }
}
