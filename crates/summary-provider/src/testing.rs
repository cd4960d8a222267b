//! Test doubles shared by the unit tests of this crate.

use std::sync::{Arc, Mutex, Once};

use summary_core::{Product, Sku};

use crate::group::{GroupRegistration, ProductGroup};

pub(crate) fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("summary_provider=trace"))
            .with_test_writer()
            .try_init();
    });
}

pub(crate) fn sku(id: &str) -> Sku {
    Sku {
        item_id: id.to_string(),
        name: format!("Variant {}", id),
        ean: None,
    }
}

/// A product with variants `<id>-1`, `<id>-2` and legacy sku `<id>-legacy`.
pub(crate) fn product(id: &str) -> Product {
    Product {
        product_id: id.to_string(),
        product_name: format!("Product {}", id),
        link_text: Some(format!("product-{}", id.to_lowercase())),
        brand: None,
        items: vec![sku(&format!("{}-1", id)), sku(&format!("{}-2", id))],
        sku: Some(sku(&format!("{}-legacy", id))),
        selected_properties: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GroupEvent {
    Added {
        product_id: String,
        item_id: Option<String>,
    },
    Removed {
        product_id: String,
        item_id: Option<String>,
    },
}

impl GroupEvent {
    pub(crate) fn added(product_id: &str, item_id: Option<&str>) -> Self {
        GroupEvent::Added {
            product_id: product_id.to_string(),
            item_id: item_id.map(str::to_string),
        }
    }

    pub(crate) fn removed(product_id: &str, item_id: Option<&str>) -> Self {
        GroupEvent::Removed {
            product_id: product_id.to_string(),
            item_id: item_id.map(str::to_string),
        }
    }
}

#[derive(Default)]
struct Log {
    events: Vec<GroupEvent>,
    /// (product_id, item_id) of live registrations.
    active: Vec<(String, Option<String>)>,
}

/// Records every add/remove a provider makes.
#[derive(Clone, Default)]
pub(crate) struct RecordingGroup {
    log: Arc<Mutex<Log>>,
}

impl RecordingGroup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared(&self) -> Arc<dyn ProductGroup> {
        Arc::new(self.clone())
    }

    pub(crate) fn events(&self) -> Vec<GroupEvent> {
        self.log.lock().unwrap().events.clone()
    }

    pub(crate) fn active_count(&self) -> usize {
        self.log.lock().unwrap().active.len()
    }

    pub(crate) fn active_products(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .active
            .iter()
            .map(|(product_id, _)| product_id.clone())
            .collect()
    }
}

impl ProductGroup for RecordingGroup {
    fn add_item_to_group(&self, product: &Product, item: Option<&Sku>) -> GroupRegistration {
        let entry = (product.product_id.clone(), item.map(|i| i.item_id.clone()));
        {
            let mut log = self.log.lock().unwrap();
            assert!(
                log.active.is_empty(),
                "second registration while {:?} is still active",
                log.active
            );
            log.events.push(GroupEvent::Added {
                product_id: entry.0.clone(),
                item_id: entry.1.clone(),
            });
            log.active.push(entry.clone());
        }

        let log = Arc::clone(&self.log);
        GroupRegistration::new(move || {
            let mut log = log.lock().unwrap();
            log.events.push(GroupEvent::Removed {
                product_id: entry.0.clone(),
                item_id: entry.1.clone(),
            });
            log.active.retain(|active| *active != entry);
        })
    }
}
