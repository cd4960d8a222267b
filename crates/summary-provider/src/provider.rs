//! # Product Summary Provider
//!
//! The container that owns one summary's snapshot for its whole lifetime.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Dispatch::dispatch(intent)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock snapshot ──► reduce_with(current, intent) ──► commit Arc<Snapshot>│
//! │       │                                               (unlock)          │
//! │       ▼                                                                 │
//! │  changed? ──no──► done                                                  │
//! │       │                                                                 │
//! │      yes                                                                │
//! │       ▼                                                                 │
//! │  GroupSynchronizer::sync ──► remove old entry, add new entry            │
//! │                                                                         │
//! │  Readers see the new snapshot before the group hears about it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The provider is the only strong owner of its state. [`Dispatch`] and
//! [`SummaryHandle`] hold weak references, so dropping the provider tears
//! it down (and removes its group entry) no matter how many handles are
//! still around. Handles used afterwards report [`ContextMissingError`].

use std::sync::{Arc, Mutex, PoisonError, Weak};

use summary_core::{
    reduce_with, ContextMissingError, Intent, ProviderProps, Snapshot, TransitionOptions,
};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::SummaryConfig;
use crate::context;
use crate::group::{GroupSynchronizer, ProductGroup};

// =============================================================================
// Shared State
// =============================================================================

pub(crate) struct ProviderInner {
    id: Uuid,
    snapshot: Mutex<Arc<Snapshot>>,
    options: TransitionOptions,
    sync: GroupSynchronizer,
}

impl ProviderInner {
    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn dispatch(&self, intent: Intent) {
        let kind = intent.kind();
        debug!(provider = %self.id, intent = kind, "Dispatching intent");

        let changed = {
            let mut current = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
            let next = reduce_with(&current, intent, &self.options);
            if next == **current {
                false
            } else {
                *current = Arc::new(next);
                true
            }
        };

        if changed {
            self.sync.sync(|| self.snapshot());
        } else {
            trace!(provider = %self.id, intent = kind, "Snapshot unchanged");
        }
    }
}

impl Drop for ProviderInner {
    fn drop(&mut self) {
        debug!(provider = %self.id, "Product summary provider dropped");
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Owns the state of one product summary.
///
/// ## Usage
/// ```rust
/// use summary_core::{Intent, Product, ProviderProps};
/// use summary_provider::{use_product_summary, ProductSummaryProvider};
///
/// let product = Product {
///     product_id: "1".to_string(),
///     product_name: "Mug".to_string(),
///     link_text: None,
///     brand: None,
///     items: vec![],
///     sku: None,
///     selected_properties: None,
/// };
/// let provider = ProductSummaryProvider::new(ProviderProps::new(product), None);
///
/// provider.dispatcher().dispatch(Intent::SetQuantity { quantity: 2 });
///
/// let quantity = provider.provide(|| use_product_summary().map(|s| s.selected_quantity));
/// assert_eq!(quantity, Ok(2));
/// assert!(use_product_summary().is_err());
/// ```
pub struct ProductSummaryProvider {
    inner: Arc<ProviderInner>,
}

impl ProductSummaryProvider {
    /// Creates a provider with the default configuration.
    ///
    /// With a group present, the initial selection is registered right away.
    pub fn new(props: ProviderProps, group: Option<Arc<dyn ProductGroup>>) -> Self {
        Self::with_config(props, group, &SummaryConfig::default())
    }

    pub fn with_config(
        props: ProviderProps,
        group: Option<Arc<dyn ProductGroup>>,
        config: &SummaryConfig,
    ) -> Self {
        let id = Uuid::new_v4();
        let options = config.transition;
        let snapshot = Snapshot::initial_with(props, &options);

        info!(
            provider = %id,
            product_id = %snapshot.product.product_id,
            grouped = group.is_some(),
            "Product summary provider created"
        );

        let inner = Arc::new(ProviderInner {
            id,
            snapshot: Mutex::new(Arc::new(snapshot)),
            options,
            sync: GroupSynchronizer::new(id, group),
        });
        inner.sync.sync(|| inner.snapshot());

        ProductSummaryProvider { inner }
    }

    /// Instance id, as it appears in log fields.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot()
    }

    pub fn dispatcher(&self) -> Dispatch {
        Dispatch {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// A handle to pass explicitly to consumers.
    pub fn handle(&self) -> SummaryHandle {
        SummaryHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Runs `f` with this provider as the active one on the current thread.
    ///
    /// Inside `f`, [`crate::use_product_summary`] and
    /// [`crate::use_product_summary_dispatch`] resolve to this provider
    /// unless a nested `provide` shadows it.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = context::enter(Arc::downgrade(&self.inner));
        f()
    }

    #[cfg(test)]
    pub(crate) fn inner_for_tests(&self) -> &Arc<ProviderInner> {
        &self.inner
    }
}

impl std::fmt::Debug for ProductSummaryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSummaryProvider")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Handles
// =============================================================================

/// Sends intents to a provider.
#[derive(Debug, Clone)]
pub struct Dispatch {
    inner: Weak<ProviderInner>,
}

impl Dispatch {
    pub(crate) fn from_weak(inner: Weak<ProviderInner>) -> Self {
        Dispatch { inner }
    }

    /// Applies `intent` to the provider's snapshot.
    ///
    /// Ignored when the provider no longer exists, so a stale dispatcher
    /// can never re-register a torn-down summary with its group.
    pub fn dispatch(&self, intent: Intent) {
        match self.inner.upgrade() {
            Some(inner) => inner.dispatch(intent),
            None => warn!(
                intent = intent.kind(),
                "Dispatch to a dropped product summary ignored"
            ),
        }
    }
}

/// Explicitly passed access to a provider.
#[derive(Debug, Clone)]
pub struct SummaryHandle {
    inner: Weak<ProviderInner>,
}

impl SummaryHandle {
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, ContextMissingError> {
        self.inner
            .upgrade()
            .map(|inner| inner.snapshot())
            .ok_or(ContextMissingError::new("SummaryHandle::snapshot"))
    }

    pub fn dispatcher(&self) -> Result<Dispatch, ContextMissingError> {
        if self.inner.strong_count() == 0 {
            return Err(ContextMissingError::new("SummaryHandle::dispatcher"));
        }
        Ok(Dispatch::from_weak(self.inner.clone()))
    }

    /// Whether the provider still exists.
    pub fn is_active(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
