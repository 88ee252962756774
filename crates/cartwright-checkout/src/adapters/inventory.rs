//! In-memory stock levels.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use cartwright_core::{Availability, ProductId, StockDeduction};
use tracing::{debug, warn};

use crate::config::InventorySettings;
use crate::ports::StockPort;

/// Stock levels keyed by product.
///
/// Products absent from the table are assumed to hold `default_level`
/// units. A product listed twice in one request is checked and deducted
/// against the sum of its quantities.
#[derive(Debug)]
pub struct InventoryStock {
    default_level: u64,
    levels: Mutex<HashMap<ProductId, u64>>,
}

impl InventoryStock {
    /// Creates an empty inventory where unknown products have no stock.
    pub fn new() -> Self {
        InventoryStock {
            default_level: 0,
            levels: Mutex::new(HashMap::new()),
        }
    }

    /// Builds the inventory described by `[inventory]` in checkout.toml.
    pub fn from_settings(settings: &InventorySettings) -> Self {
        let levels = settings
            .levels
            .iter()
            .map(|l| (l.product_id, l.quantity))
            .collect();
        InventoryStock {
            default_level: settings.default_level,
            levels: Mutex::new(levels),
        }
    }

    /// Sets the level of one product.
    pub fn set_level(&self, product_id: ProductId, quantity: u64) {
        self.lock().insert(product_id, quantity);
    }

    /// Current level of one product.
    pub fn level(&self, product_id: ProductId) -> u64 {
        let levels = self.lock();
        self.level_in(&levels, product_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ProductId, u64>> {
        self.levels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn level_in(&self, levels: &HashMap<ProductId, u64>, product_id: ProductId) -> u64 {
        levels.get(&product_id).copied().unwrap_or(self.default_level)
    }

    fn shortages(
        &self,
        levels: &HashMap<ProductId, u64>,
        requested: &BTreeMap<ProductId, u64>,
    ) -> Vec<ProductId> {
        requested
            .iter()
            .filter(|(id, qty)| self.level_in(levels, **id) < **qty)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Default for InventoryStock {
    fn default() -> Self {
        Self::new()
    }
}

/// Sums quantities per product, pairing the slices by position.
fn requested(product_ids: &[ProductId], quantities: &[u64]) -> BTreeMap<ProductId, u64> {
    if product_ids.len() != quantities.len() {
        warn!(
            ids = product_ids.len(),
            quantities = quantities.len(),
            "Mismatched stock request; extra entries ignored"
        );
    }
    let mut totals = BTreeMap::new();
    for (id, qty) in product_ids.iter().zip(quantities) {
        let entry = totals.entry(*id).or_insert(0u64);
        *entry = entry.saturating_add(*qty);
    }
    totals
}

impl StockPort for InventoryStock {
    fn check_availability(&self, product_ids: &[ProductId], quantities: &[u64]) -> Availability {
        let requested = requested(product_ids, quantities);
        let levels = self.lock();
        let availability = Availability::from_unavailable(self.shortages(&levels, &requested));

        debug!(
            available = availability.available,
            unavailable = ?availability.unavailable,
            "Checked stock availability"
        );
        availability
    }

    fn deduct(&self, product_ids: &[ProductId], quantities: &[u64]) -> StockDeduction {
        let requested = requested(product_ids, quantities);
        let mut levels = self.lock();

        let short = self.shortages(&levels, &requested);
        if !short.is_empty() {
            warn!(unavailable = ?short, "Stock deduction refused, nothing removed");
            return StockDeduction::failed();
        }

        for (id, qty) in &requested {
            let current = self.level_in(&levels, *id);
            levels.insert(*id, current - qty);
        }

        debug!(products = requested.len(), "Stock deducted");
        StockDeduction::succeeded()
    }
}
