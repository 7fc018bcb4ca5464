//! Caught fish held by the player, bounded by a capacity.

use super::catalog::{FishTypeDef, SizeTier};

/// A caught fish. Values are copied from the catalog at catch time.
#[derive(Clone, Debug, PartialEq)]
pub struct FishItem {
    pub type_name: String,
    pub size_name: String,
    pub base_value: f64,
    pub size_multiplier: f64,
}

impl FishItem {
    pub fn new(fish: &FishTypeDef, size: &SizeTier) -> Self {
        Self {
            type_name: fish.name.clone(),
            size_name: size.name.clone(),
            base_value: fish.base_value,
            size_multiplier: size.multiplier,
        }
    }

    /// Value before the market price is applied.
    pub fn worth(&self) -> f64 {
        self.base_value * self.size_multiplier
    }
}

/// Per-type summary row for display.
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryLine {
    pub type_name: String,
    pub count: usize,
    pub worth: f64,
}

/// Items in catch order. `len() <= max_size` always holds: the bound is
/// checked on insert and capacity only ever grows.
#[derive(Clone, Debug)]
pub struct Inventory {
    items: Vec<FishItem>,
    max_size: usize,
}

impl Inventory {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size,
        }
    }

    /// Append `item` if there is room. Returns false without touching the
    /// inventory when full.
    pub fn try_add(&mut self, item: FishItem) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[cfg(test)]
    pub fn free_slots(&self) -> usize {
        self.max_size.saturating_sub(self.items.len())
    }

    pub fn grow(&mut self, extra: usize) {
        self.max_size = self.max_size.saturating_add(extra);
    }

    pub fn items(&self) -> &[FishItem] {
        &self.items
    }

    /// Counts grouped by fish type, in order of first catch.
    pub fn summary(&self) -> Vec<InventoryLine> {
        let mut lines: Vec<InventoryLine> = Vec::new();
        for item in &self.items {
            match lines.iter_mut().find(|l| l.type_name == item.type_name) {
                Some(line) => {
                    line.count += 1;
                    line.worth += item.worth();
                }
                None => lines.push(InventoryLine {
                    type_name: item.type_name.clone(),
                    count: 1,
                    worth: item.worth(),
                }),
            }
        }
        lines
    }
}
