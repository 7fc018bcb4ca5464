//! One-time upgrades and their effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::state::PlayerState;

/// What an upgrade does once bought.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum UpgradeEffect {
    IncrementFishPerClick { amount: u32 },
    IncrementCapacity { amount: usize },
    /// Reveal each catch's worth in the log.
    SetHasScale,
    /// Reveal the market board.
    SetShowPrices,
}

impl UpgradeEffect {
    /// Short label used in the log and the upgrade list.
    pub fn summary(&self) -> String {
        match self {
            UpgradeEffect::IncrementFishPerClick { amount } => format!("釣果+{}", amount),
            UpgradeEffect::IncrementCapacity { amount } => format!("容量+{}", amount),
            UpgradeEffect::SetHasScale => "価値表示".to_string(),
            UpgradeEffect::SetShowPrices => "相場表示".to_string(),
        }
    }
}

/// Apply `effect` to the player. Called exactly once per purchased upgrade.
pub fn apply_effect(effect: &UpgradeEffect, player: &mut PlayerState, inventory: &mut Inventory) {
    match effect {
        UpgradeEffect::IncrementFishPerClick { amount } => {
            player.fish_per_click = player.fish_per_click.saturating_add(*amount);
        }
        UpgradeEffect::IncrementCapacity { amount } => {
            inventory.grow(*amount);
        }
        UpgradeEffect::SetHasScale => player.has_scale = true,
        UpgradeEffect::SetShowPrices => player.show_prices = true,
    }
}

/// A purchasable upgrade. `purchased` flips false → true once and never back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub effect: UpgradeEffect,
    #[serde(skip)]
    pub purchased: bool,
}

/// Why a purchase was refused. Nothing is mutated on any of these.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseError {
    UnknownUpgrade(String),
    AlreadyPurchased,
    InsufficientGold { cost: f64, gold: f64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::UnknownUpgrade(id) => write!(f, "unknown upgrade '{id}'"),
            PurchaseError::AlreadyPurchased => write!(f, "already purchased"),
            PurchaseError::InsufficientGold { cost, gold } => {
                write!(f, "insufficient gold: need {cost:.2}, have {gold:.2}")
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Successful purchase details handed back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseReceipt {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub effect: UpgradeEffect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_mutate_expected_fields() {
        let mut player = PlayerState::default();
        let mut inv = Inventory::new(10);

        apply_effect(&UpgradeEffect::IncrementFishPerClick { amount: 2 }, &mut player, &mut inv);
        assert_eq!(player.fish_per_click, 3);

        apply_effect(&UpgradeEffect::IncrementCapacity { amount: 5 }, &mut player, &mut inv);
        assert_eq!(inv.max_size(), 15);

        assert!(!player.has_scale);
        apply_effect(&UpgradeEffect::SetHasScale, &mut player, &mut inv);
        assert!(player.has_scale);

        assert!(!player.show_prices);
        apply_effect(&UpgradeEffect::SetShowPrices, &mut player, &mut inv);
        assert!(player.show_prices);
    }

    #[test]
    fn effect_json_shape() {
        let effect: UpgradeEffect =
            serde_json::from_str(r#"{ "kind": "IncrementCapacity", "amount": 25 }"#).unwrap();
        assert_eq!(effect, UpgradeEffect::IncrementCapacity { amount: 25 });
        let flag: UpgradeEffect = serde_json::from_str(r#"{ "kind": "SetShowPrices" }"#).unwrap();
        assert_eq!(flag, UpgradeEffect::SetShowPrices);
    }

    #[test]
    fn purchased_flag_is_not_read_from_data() {
        let json = r#"{
            "id": "x", "name": "X", "description": "d", "cost": 1.0,
            "effect": { "kind": "SetHasScale" }, "purchased": true
        }"#;
        let def: UpgradeDef = serde_json::from_str(json).unwrap();
        assert!(!def.purchased);
    }

    #[test]
    fn error_messages_are_distinct() {
        let a = PurchaseError::AlreadyPurchased.to_string();
        let b = PurchaseError::InsufficientGold { cost: 50.0, gold: 40.0 }.to_string();
        assert_ne!(a, b);
        assert!(b.contains("50.00"));
    }
}
