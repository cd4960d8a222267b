//! # Scoped Accessors
//!
//! Lets code deep inside a summary reach the enclosing provider without
//! threading a handle through every call.
//!
//! ```text
//! provider_a.provide(|| {
//!     use_product_summary()          // -> provider_a
//!     provider_b.provide(|| {
//!         use_product_summary()      // -> provider_b (innermost wins)
//!     });
//!     use_product_summary()          // -> provider_a again
//! });
//! use_product_summary()              // -> Err(ContextMissingError)
//! ```
//!
//! Scopes are per thread. Code that runs on another thread should be given
//! a [`crate::SummaryHandle`] instead.

use std::cell::RefCell;
use std::sync::{Arc, Weak};

use summary_core::{ContextMissingError, Snapshot};

use crate::provider::{Dispatch, ProviderInner};

thread_local! {
    static ACTIVE: RefCell<Vec<Weak<ProviderInner>>> = const { RefCell::new(Vec::new()) };
}

/// Pops the provider pushed by [`enter`] when dropped, including on panic.
pub(crate) struct ScopeGuard {
    _not_send: std::marker::PhantomData<*const ()>,
}

pub(crate) fn enter(provider: Weak<ProviderInner>) -> ScopeGuard {
    ACTIVE.with(|stack| stack.borrow_mut().push(provider));
    ScopeGuard {
        _not_send: std::marker::PhantomData,
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn current() -> Option<Weak<ProviderInner>> {
    ACTIVE.with(|stack| stack.borrow().last().cloned())
}

/// Snapshot of the innermost active provider.
pub fn use_product_summary() -> Result<Arc<Snapshot>, ContextMissingError> {
    current()
        .and_then(|weak| weak.upgrade())
        .map(|inner| inner.snapshot())
        .ok_or(ContextMissingError::new("use_product_summary"))
}

/// Dispatcher of the innermost active provider.
pub fn use_product_summary_dispatch() -> Result<Dispatch, ContextMissingError> {
    current()
        .filter(|weak| weak.strong_count() > 0)
        .map(Dispatch::from_weak)
        .ok_or(ContextMissingError::new("use_product_summary_dispatch"))
}
