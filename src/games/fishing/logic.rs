//! Fishing game logic: catch, sell and upgrade purchase.
//!
//! Every action runs to completion and reports its outcome both as a return
//! value and through the [`GameObserver`]. Rejections are ordinary outcomes.

use super::inventory::FishItem;
use super::observer::GameObserver;
use super::state::FishingState;
use super::upgrades::{apply_effect, PurchaseError, PurchaseReceipt};

/// Result of one catch action.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchOutcome {
    /// Fish actually added, in catch order.
    pub items: Vec<FishItem>,
    /// `fish_per_click` at the time of the catch.
    pub requested: u32,
    /// The inventory refused at least one attempt.
    pub capacity_hit: bool,
}

impl CatchOutcome {
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// One sold fish.
#[derive(Clone, Debug, PartialEq)]
pub struct SaleLine {
    pub type_name: String,
    pub size_name: String,
    /// Market price at this fish's turn in the batch.
    pub unit_price: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaleReceipt {
    pub lines: Vec<SaleLine>,
    pub total: f64,
}

impl SaleReceipt {
    pub fn sold_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SaleOutcome {
    Sold(SaleReceipt),
    /// Inventory was empty; nothing changed.
    Empty,
}

/// Try to catch `fish_per_click` fish, stopping at the first refusal.
pub fn catch_fish(state: &mut FishingState, obs: &mut impl GameObserver) -> CatchOutcome {
    state.stats.clicks += 1;
    let requested = state.player.fish_per_click;
    let mut items = Vec::new();
    let mut capacity_hit = false;

    for _ in 0..requested {
        if state.inventory.is_full() {
            capacity_hit = true;
            break;
        }
        let item = match state.catalog.sample(&mut state.rng) {
            Some((fish, size)) => FishItem::new(fish, size),
            None => break,
        };
        if !state.inventory.try_add(item.clone()) {
            capacity_hit = true;
            break;
        }
        let worth = state.player.has_scale.then(|| item.worth());
        obs.fish_caught(&item, worth);
        items.push(item);
    }

    state.stats.fish_caught += items.len() as u64;
    if capacity_hit {
        obs.inventory_full(items.len(), requested);
    }
    if !items.is_empty() {
        obs.catch_finished(items.len());
    }

    CatchOutcome {
        items,
        requested,
        capacity_hit,
    }
}

/// Sell the whole inventory.
///
/// Fish are sold in catch order and each sale bumps that type's supply
/// before the next fish is priced, so repeats of a type within one batch
/// fetch progressively less.
pub fn sell_all(state: &mut FishingState, obs: &mut impl GameObserver) -> SaleOutcome {
    if state.inventory.is_empty() {
        obs.nothing_to_sell();
        return SaleOutcome::Empty;
    }

    let mut lines = Vec::with_capacity(state.inventory.len());
    let mut total = 0.0;
    for item in state.inventory.items() {
        let unit_price = state.market.price(&item.type_name);
        let value = item.worth() * unit_price;
        state.market.record_sale(&item.type_name);
        total += value;
        lines.push(SaleLine {
            type_name: item.type_name.clone(),
            size_name: item.size_name.clone(),
            unit_price,
            value,
        });
    }
    state.inventory.clear();

    state.player.gold += total;
    state.stats.fish_sold += lines.len() as u64;
    state.stats.gold_earned += total;
    if total > state.stats.best_sale {
        state.stats.best_sale = total;
    }

    let receipt = SaleReceipt { lines, total };
    obs.sold(&receipt);
    SaleOutcome::Sold(receipt)
}

/// Buy the upgrade with `id`. On any error nothing is mutated.
pub fn buy_upgrade(
    state: &mut FishingState,
    id: &str,
    obs: &mut impl GameObserver,
) -> Result<PurchaseReceipt, PurchaseError> {
    let idx = match check_purchase(state, id) {
        Ok(idx) => idx,
        Err(e) => {
            obs.upgrade_rejected(id, &e);
            return Err(e);
        }
    };

    let upgrade = &mut state.upgrades[idx];
    upgrade.purchased = true;
    state.player.gold -= upgrade.cost;
    apply_effect(&upgrade.effect, &mut state.player, &mut state.inventory);

    let receipt = PurchaseReceipt {
        id: upgrade.id.clone(),
        name: upgrade.name.clone(),
        cost: upgrade.cost,
        effect: upgrade.effect.clone(),
    };
    obs.upgrade_purchased(&receipt);
    Ok(receipt)
}

fn check_purchase(state: &FishingState, id: &str) -> Result<usize, PurchaseError> {
    let idx = state
        .upgrades
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
    let upgrade = &state.upgrades[idx];
    if upgrade.purchased {
        return Err(PurchaseError::AlreadyPurchased);
    }
    if state.player.gold < upgrade.cost {
        return Err(PurchaseError::InsufficientGold {
            cost: upgrade.cost,
            gold: state.player.gold,
        });
    }
    Ok(idx)
}

/// Format gold with thousands separators and two decimals.
pub fn format_gold(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_gold(-n));
    }
    let cents = (n * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}.{:02}", grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::fishing::catalog::{Catalog, FishTypeDef, SizeTier};
    use crate::games::fishing::observer::Silent;
    use crate::games::fishing::tuning::Tuning;
    use crate::games::fishing::upgrades::{UpgradeDef, UpgradeEffect};

    /// Records every notification for assertions.
    #[derive(Default)]
    struct Recorder {
        caught: Vec<(String, Option<f64>)>,
        full: Vec<(usize, u32)>,
        finished: Vec<usize>,
        sales: Vec<f64>,
        empty_sales: u32,
        bought: Vec<String>,
        rejected: Vec<PurchaseError>,
    }

    impl GameObserver for Recorder {
        fn fish_caught(&mut self, item: &FishItem, worth: Option<f64>) {
            self.caught.push((item.type_name.clone(), worth));
        }
        fn inventory_full(&mut self, caught: usize, requested: u32) {
            self.full.push((caught, requested));
        }
        fn catch_finished(&mut self, caught: usize) {
            self.finished.push(caught);
        }
        fn sold(&mut self, receipt: &SaleReceipt) {
            self.sales.push(receipt.total);
        }
        fn nothing_to_sell(&mut self) {
            self.empty_sales += 1;
        }
        fn upgrade_purchased(&mut self, receipt: &PurchaseReceipt) {
            self.bought.push(receipt.id.clone());
        }
        fn upgrade_rejected(&mut self, _id: &str, error: &PurchaseError) {
            self.rejected.push(error.clone());
        }
    }

    fn new_state() -> FishingState {
        FishingState::new(&Tuning::builtin().unwrap(), 42)
    }

    /// State whose catalog only yields base 1.0 × 1.0 sardines.
    fn sardine_state() -> FishingState {
        let mut state = new_state();
        state.catalog = Catalog::new(
            vec![FishTypeDef { name: "Sardine".into(), base_value: 1.0 }],
            vec![SizeTier { name: "Medium".into(), multiplier: 1.0 }],
        );
        state
    }

    fn upgrade(id: &str, cost: f64, effect: UpgradeEffect) -> UpgradeDef {
        UpgradeDef {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            cost,
            effect,
            purchased: false,
        }
    }

    // ── catch ──────────────────────────────────────────────────

    #[test]
    fn catch_one_fish_per_click() {
        let mut state = new_state();
        let mut rec = Recorder::default();
        let outcome = catch_fish(&mut state, &mut rec);
        assert_eq!(outcome.count(), 1);
        assert!(!outcome.capacity_hit);
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(rec.caught.len(), 1);
        assert_eq!(rec.finished, vec![1]);
        assert!(rec.full.is_empty());
        assert_eq!(state.stats.clicks, 1);
        assert_eq!(state.stats.fish_caught, 1);
    }

    #[test]
    fn catch_snapshots_catalog_values() {
        let mut state = new_state();
        let outcome = catch_fish(&mut state, &mut Silent);
        let item = &outcome.items[0];
        let def = state.catalog.fish_type(&item.type_name).unwrap();
        assert!((item.base_value - def.base_value).abs() < f64::EPSILON);
        assert!(state
            .catalog
            .sizes()
            .iter()
            .any(|s| s.name == item.size_name && s.multiplier == item.size_multiplier));
    }

    #[test]
    fn catch_partial_when_one_slot_left() {
        let mut state = new_state();
        state.player.fish_per_click = 3;
        state.inventory = crate::games::fishing::inventory::Inventory::new(1);
        let mut rec = Recorder::default();
        let outcome = catch_fish(&mut state, &mut rec);
        assert_eq!(outcome.count(), 1);
        assert!(outcome.capacity_hit);
        assert_eq!(rec.full, vec![(1, 3)]);
        assert_eq!(state.inventory.len(), 1);
    }

    #[test]
    fn catch_into_full_inventory_catches_nothing() {
        let mut state = new_state();
        for _ in 0..10 {
            catch_fish(&mut state, &mut Silent);
        }
        assert!(state.inventory.is_full());
        let mut rec = Recorder::default();
        let outcome = catch_fish(&mut state, &mut rec);
        assert_eq!(outcome.count(), 0);
        assert!(outcome.capacity_hit);
        assert_eq!(rec.full, vec![(0, 1)]);
        assert!(rec.finished.is_empty());
        assert_eq!(state.inventory.len(), 10);
    }

    #[test]
    fn catch_filling_exactly_is_not_capacity_hit() {
        let mut state = new_state();
        state.player.fish_per_click = 10;
        let outcome = catch_fish(&mut state, &mut Silent);
        assert_eq!(outcome.count(), 10);
        assert!(!outcome.capacity_hit);
        assert!(state.inventory.is_full());
    }

    #[test]
    fn worth_hidden_without_scale() {
        let mut state = new_state();
        let mut rec = Recorder::default();
        catch_fish(&mut state, &mut rec);
        assert_eq!(rec.caught[0].1, None);

        state.player.has_scale = true;
        catch_fish(&mut state, &mut rec);
        let worth = rec.caught[1].1.unwrap();
        assert!((worth - state.inventory.items()[1].worth()).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_catches() {
        let tuning = Tuning::builtin().unwrap();
        let mut a = FishingState::new(&tuning, 7);
        let mut b = FishingState::new(&tuning, 7);
        a.player.fish_per_click = 10;
        b.player.fish_per_click = 10;
        assert_eq!(catch_fish(&mut a, &mut Silent), catch_fish(&mut b, &mut Silent));
    }

    // ── sell ───────────────────────────────────────────────────

    #[test]
    fn sell_empty_is_noop() {
        let mut state = new_state();
        state.player.gold = 3.0;
        let mut rec = Recorder::default();
        assert_eq!(sell_all(&mut state, &mut rec), SaleOutcome::Empty);
        assert!((state.player.gold - 3.0).abs() < f64::EPSILON);
        assert_eq!(state.market.total_supply(), 0);
        assert_eq!(rec.empty_sales, 1);
        assert!(rec.sales.is_empty());
    }

    #[test]
    fn sell_five_of_a_kind_decays_within_batch() {
        let mut state = sardine_state();
        state.player.fish_per_click = 5;
        catch_fish(&mut state, &mut Silent);
        assert_eq!(state.inventory.len(), 5);

        let receipt = match sell_all(&mut state, &mut Silent) {
            SaleOutcome::Sold(r) => r,
            SaleOutcome::Empty => panic!("expected a sale"),
        };
        let prices: Vec<f64> = receipt.lines.iter().map(|l| l.unit_price).collect();
        for (got, want) in prices.iter().zip([1.50, 1.45, 1.40, 1.35, 1.30]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert_eq!(receipt.sold_count(), 5);
        assert!((receipt.total - 7.0).abs() < 1e-9);
        assert!((state.player.gold - 7.0).abs() < 1e-9);
        assert_eq!(state.market.supply("Sardine"), 5);
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn sale_value_uses_size_and_base() {
        let mut state = new_state();
        state.inventory.try_add(FishItem {
            type_name: "Tuna".into(),
            size_name: "Huge".into(),
            base_value: 5.0,
            size_multiplier: 2.5,
        });
        sell_all(&mut state, &mut Silent);
        // 5.0 * 2.5 * 1.5
        assert!((state.player.gold - 18.75).abs() < 1e-9);
    }

    #[test]
    fn next_batch_starts_at_lower_price() {
        let mut state = sardine_state();
        catch_fish(&mut state, &mut Silent);
        sell_all(&mut state, &mut Silent);
        catch_fish(&mut state, &mut Silent);
        let receipt = match sell_all(&mut state, &mut Silent) {
            SaleOutcome::Sold(r) => r,
            SaleOutcome::Empty => panic!("expected a sale"),
        };
        assert!((receipt.lines[0].unit_price - 1.45).abs() < 1e-9);
    }

    #[test]
    fn sell_updates_stats_and_notifies() {
        let mut state = sardine_state();
        state.player.fish_per_click = 2;
        catch_fish(&mut state, &mut Silent);
        let mut rec = Recorder::default();
        sell_all(&mut state, &mut rec);
        assert_eq!(rec.sales.len(), 1);
        assert_eq!(state.stats.fish_sold, 2);
        assert!((state.stats.gold_earned - 2.95).abs() < 1e-9);
        assert!((state.stats.best_sale - 2.95).abs() < 1e-9);
    }

    #[test]
    fn sale_lines_follow_catch_order_and_keep_capacity() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("bucket", 0.0, UpgradeEffect::IncrementCapacity { amount: 5 })];
        buy_upgrade(&mut state, "bucket", &mut Silent).unwrap();
        state.player.fish_per_click = 4;
        let caught = catch_fish(&mut state, &mut Silent);
        let receipt = match sell_all(&mut state, &mut Silent) {
            SaleOutcome::Sold(r) => r,
            SaleOutcome::Empty => panic!("expected a sale"),
        };
        let sold: Vec<&str> = receipt.lines.iter().map(|l| l.type_name.as_str()).collect();
        let held: Vec<&str> = caught.items.iter().map(|i| i.type_name.as_str()).collect();
        assert_eq!(sold, held);
        assert!(state.inventory.is_empty());
        assert_eq!(state.inventory.max_size(), 15);
    }

    #[test]
    fn sale_frees_space_for_catching() {
        let mut state = new_state();
        state.player.fish_per_click = 10;
        catch_fish(&mut state, &mut Silent);
        assert!(catch_fish(&mut state, &mut Silent).capacity_hit);
        sell_all(&mut state, &mut Silent);
        assert_eq!(catch_fish(&mut state, &mut Silent).count(), 10);
    }

    // ── upgrades ───────────────────────────────────────────────

    #[test]
    fn purchase_success_applies_effect_once() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("rod", 10.0, UpgradeEffect::IncrementFishPerClick { amount: 1 })];
        state.player.gold = 25.0;
        let mut rec = Recorder::default();
        let receipt = buy_upgrade(&mut state, "rod", &mut rec).unwrap();
        assert_eq!(receipt.id, "rod");
        assert!((state.player.gold - 15.0).abs() < 1e-9);
        assert_eq!(state.player.fish_per_click, 2);
        assert!(state.upgrades[0].purchased);
        assert_eq!(rec.bought, vec!["rod"]);
    }

    #[test]
    fn purchase_twice_second_is_rejected() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("bucket", 10.0, UpgradeEffect::IncrementCapacity { amount: 5 })];
        state.player.gold = 100.0;
        buy_upgrade(&mut state, "bucket", &mut Silent).unwrap();
        let player_after_first = state.player.clone();
        let capacity_after_first = state.inventory.max_size();

        let mut rec = Recorder::default();
        let err = buy_upgrade(&mut state, "bucket", &mut rec).unwrap_err();
        assert_eq!(err, PurchaseError::AlreadyPurchased);
        assert_eq!(state.player, player_after_first);
        assert_eq!(state.inventory.max_size(), capacity_after_first);
        assert_eq!(rec.rejected, vec![PurchaseError::AlreadyPurchased]);
    }

    #[test]
    fn purchase_insufficient_gold() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("board", 50.0, UpgradeEffect::SetShowPrices)];
        state.player.gold = 40.0;
        let err = buy_upgrade(&mut state, "board", &mut Silent).unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientGold { cost: 50.0, gold: 40.0 });
        assert!((state.player.gold - 40.0).abs() < f64::EPSILON);
        assert!(!state.upgrades[0].purchased);
        assert!(!state.player.show_prices);
    }

    #[test]
    fn purchase_with_exact_gold() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("scale", 25.0, UpgradeEffect::SetHasScale)];
        state.player.gold = 25.0;
        assert!(buy_upgrade(&mut state, "scale", &mut Silent).is_ok());
        assert!(state.player.gold.abs() < 1e-9);
        assert!(state.player.has_scale);
    }

    #[test]
    fn purchase_unknown_id() {
        let mut state = new_state();
        state.player.gold = 1e6;
        let mut rec = Recorder::default();
        let err = buy_upgrade(&mut state, "nope", &mut rec).unwrap_err();
        assert_eq!(err, PurchaseError::UnknownUpgrade("nope".into()));
        assert!((state.player.gold - 1e6).abs() < f64::EPSILON);
        assert_eq!(rec.rejected.len(), 1);
    }

    #[test]
    fn capacity_upgrade_unblocks_full_inventory() {
        let mut state = new_state();
        state.upgrades = vec![upgrade("bucket", 0.0, UpgradeEffect::IncrementCapacity { amount: 1 })];
        state.player.fish_per_click = 10;
        catch_fish(&mut state, &mut Silent);
        assert!(state.inventory.is_full());
        buy_upgrade(&mut state, "bucket", &mut Silent).unwrap();
        assert_eq!(catch_fish(&mut state, &mut Silent).count(), 1);
        assert_eq!(state.inventory.len(), 11);
    }

    // ── format_gold ────────────────────────────────────────────

    #[test]
    fn format_gold_examples() {
        assert_eq!(format_gold(0.0), "0.00");
        assert_eq!(format_gold(1.5), "1.50");
        assert_eq!(format_gold(7.0), "7.00");
        assert_eq!(format_gold(1234.567), "1,234.57");
        assert_eq!(format_gold(1_000_000.0), "1,000,000.00");
        assert_eq!(format_gold(-2.25), "-2.25");
    }
}
