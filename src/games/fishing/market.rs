//! Fish market: per-type supply counters and the decaying price curve.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Price curve constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Price at zero supply.
    pub base_price: f64,
    /// Price drop per unit ever sold.
    pub decay_rate: f64,
    /// The price never goes below this.
    pub floor_price: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_price: 1.5,
            decay_rate: 0.05,
            floor_price: 0.5,
        }
    }
}

impl MarketConfig {
    /// Unit price after `supply` units of a type have been sold.
    pub fn price_at(&self, supply: u64) -> f64 {
        (self.base_price - self.decay_rate * supply as f64).max(self.floor_price)
    }
}

/// Supply counters are never reset; unknown types read as zero supply.
#[derive(Clone, Debug, Default)]
pub struct Market {
    config: MarketConfig,
    supply: BTreeMap<String, u64>,
}

impl Market {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            config,
            supply: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Units of `fish_type` sold so far.
    pub fn supply(&self, fish_type: &str) -> u64 {
        self.supply.get(fish_type).copied().unwrap_or(0)
    }

    /// Current unit price of `fish_type`.
    pub fn price(&self, fish_type: &str) -> f64 {
        self.config.price_at(self.supply(fish_type))
    }

    /// Count one sold unit.
    pub fn record_sale(&mut self, fish_type: &str) {
        *self.supply.entry(fish_type.to_string()).or_insert(0) += 1;
    }

    /// Total units sold across all types.
    pub fn total_supply(&self) -> u64 {
        self.supply.values().sum()
    }
}
