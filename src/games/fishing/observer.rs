//! Notifications the game logic sends to whoever presents it.
//!
//! The logic never formats UI text or touches render state; it reports
//! outcomes through this trait. Every method has an empty default so an
//! implementation only overrides what it shows.

use super::inventory::FishItem;
use super::logic::SaleReceipt;
use super::upgrades::{PurchaseError, PurchaseReceipt};

pub trait GameObserver {
    /// One caught fish. `worth` is `Some` only when the scale is owned.
    fn fish_caught(&mut self, _item: &FishItem, _worth: Option<f64>) {}

    /// A catch attempt ran out of room after `caught` of `requested` fish.
    fn inventory_full(&mut self, _caught: usize, _requested: u32) {}

    /// End of a catch action that landed at least one fish.
    fn catch_finished(&mut self, _caught: usize) {}

    fn sold(&mut self, _receipt: &SaleReceipt) {}

    fn nothing_to_sell(&mut self) {}

    fn upgrade_purchased(&mut self, _receipt: &PurchaseReceipt) {}

    fn upgrade_rejected(&mut self, _id: &str, _error: &PurchaseError) {}
}

/// Observer that ignores everything.
#[cfg(test)]
pub struct Silent;

#[cfg(test)]
impl GameObserver for Silent {}
