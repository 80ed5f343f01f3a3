//! Inventory mirror of the carried set for downstream consumers.

use crate::detection::TrackingId;
use crate::error::InventoryError;
use crate::tracker::CarriedItem;

/// Collection that mirrors what the user is carrying.
///
/// The tracker treats a failed `remove` during disposal as retryable and
/// leaves its own state untouched.
pub trait Inventory: Send {
    fn insert(&mut self, item: &CarriedItem) -> Result<(), InventoryError>;

    fn remove(&mut self, ids: &[TrackingId]) -> Result<(), InventoryError>;

    fn clear(&mut self) -> Result<(), InventoryError>;

    fn items(&self) -> Vec<CarriedItem>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    items: Vec<CarriedItem>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inventory for MemoryInventory {
    fn insert(&mut self, item: &CarriedItem) -> Result<(), InventoryError> {
        if self.items.iter().any(|i| i.tracking_id == item.tracking_id) {
            return Err(InventoryError::Rejected(
                item.tracking_id,
                "already in inventory".into(),
            ));
        }
        self.items.push(item.clone());
        Ok(())
    }

    fn remove(&mut self, ids: &[TrackingId]) -> Result<(), InventoryError> {
        self.items.retain(|i| !ids.contains(&i.tracking_id));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), InventoryError> {
        self.items.clear();
        Ok(())
    }

    fn items(&self) -> Vec<CarriedItem> {
        self.items.clone()
    }
}
