//! Fishing game state definitions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::catalog::Catalog;
use super::inventory::{Inventory, InventoryLine};
use super::market::Market;
use super::tuning::Tuning;
use super::upgrades::UpgradeDef;

/// Parameters the player can change through upgrades.
/// The inventory capacity lives on [`Inventory`] itself.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub gold: f64,
    /// Catch attempts per click (at least 1).
    pub fish_per_click: u32,
    /// Catch log shows each fish's worth.
    pub has_scale: bool,
    /// Market board is visible.
    pub show_prices: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            gold: 0.0,
            fish_per_click: 1,
            has_scale: false,
            show_prices: false,
        }
    }
}

/// Lifetime counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    pub clicks: u64,
    pub fish_caught: u64,
    pub fish_sold: u64,
    pub gold_earned: f64,
    pub best_sale: f64,
}

/// Full state of a fishing game. No presentation state lives here.
pub struct FishingState {
    pub player: PlayerState,
    pub inventory: Inventory,
    pub market: Market,
    pub catalog: Catalog,
    /// Upgrades in display order.
    pub upgrades: Vec<UpgradeDef>,
    pub stats: Stats,
    pub rng: ChaCha8Rng,
}

/// Current price of one fish type, for the market board.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceLine {
    pub type_name: String,
    pub price: f64,
    pub supply: u64,
}

/// Read-only projection handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct StateView {
    pub gold: f64,
    pub fish_per_click: u32,
    pub inventory_len: usize,
    pub max_inventory_size: usize,
    pub has_scale: bool,
    pub show_prices: bool,
    pub inventory: Vec<InventoryLine>,
    /// Empty unless `show_prices` is set.
    pub prices: Vec<PriceLine>,
}

impl FishingState {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(tuning: &Tuning, rng: ChaCha8Rng) -> Self {
        Self {
            player: PlayerState {
                gold: tuning.start.gold,
                fish_per_click: tuning.start.fish_per_click,
                ..PlayerState::default()
            },
            inventory: Inventory::new(tuning.start.max_inventory_size),
            market: Market::new(tuning.market),
            catalog: tuning.catalog(),
            upgrades: tuning.upgrades.clone(),
            stats: Stats::default(),
            rng,
        }
    }

    pub fn can_afford(&self, upgrade: &UpgradeDef) -> bool {
        !upgrade.purchased && self.player.gold >= upgrade.cost
    }

    /// Number of upgrades not yet bought.
    pub fn available_upgrade_count(&self) -> usize {
        self.upgrades.iter().filter(|u| !u.purchased).count()
    }

    pub fn view(&self) -> StateView {
        let prices = if self.player.show_prices {
            self.catalog
                .fish()
                .iter()
                .map(|f| PriceLine {
                    type_name: f.name.clone(),
                    price: self.market.price(&f.name),
                    supply: self.market.supply(&f.name),
                })
                .collect()
        } else {
            Vec::new()
        };
        StateView {
            gold: self.player.gold,
            fish_per_click: self.player.fish_per_click,
            inventory_len: self.inventory.len(),
            max_inventory_size: self.inventory.max_size(),
            has_scale: self.player.has_scale,
            show_prices: self.player.show_prices,
            inventory: self.inventory.summary(),
            prices,
        }
    }
}
