//! Semantic action IDs for fishing click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CATCH: u16 = 0;
pub const SELL_ALL: u16 = 1;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_INVENTORY: u16 = 10;
pub const TAB_UPGRADES: u16 = 11;
pub const TAB_MARKET: u16 = 12;

// ── Upgrade purchase (base + upgrade index) ─────────────────────
pub const BUY_UPGRADE_BASE: u16 = 200;
