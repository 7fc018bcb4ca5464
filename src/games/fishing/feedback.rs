//! Presentation-side observer: message log, floating text and flashes.
//!
//! Turns game notifications into what the renderer draws. The particle and
//! flash timers only count down here; game state never reads them.

use super::inventory::FishItem;
use super::logic::{format_gold, SaleReceipt};
use super::observer::GameObserver;
use super::upgrades::{PurchaseError, PurchaseReceipt};

const MAX_LOG: usize = 50;
const MAX_PARTICLES: usize = 20;

/// Log entry for the fishing game.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// A floating text (e.g. "+3") rising from the pond.
#[derive(Clone, Debug)]
pub struct Particle {
    pub text: String,
    /// Column offset from the pond centre.
    pub col_offset: i16,
    pub life: u32,
    pub max_life: u32,
}

#[derive(Default)]
pub struct Feedback {
    pub log: Vec<LogEntry>,
    pub particles: Vec<Particle>,
    /// Ticks left on the catch highlight.
    pub catch_flash: u32,
    /// Ticks left on the sale/purchase highlight.
    pub gold_flash: u32,
    pub anim_frame: u32,
    spawned: u32,
}

impl Feedback {
    pub fn new() -> Self {
        let mut fb = Self::default();
        fb.add_log("池に釣り糸を垂らした… [C]で釣る、[S]で全部売る", true);
        fb
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// Count down cosmetic timers and drop expired particles.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);
        self.catch_flash = self.catch_flash.saturating_sub(delta_ticks);
        self.gold_flash = self.gold_flash.saturating_sub(delta_ticks);
        for p in &mut self.particles {
            p.life = p.life.saturating_sub(delta_ticks);
        }
        self.particles.retain(|p| p.life > 0);
    }

    fn float_text(&mut self, text: String) {
        // Deterministic spread: offsets cycle through -6..=6.
        let col_offset = (self.spawned.wrapping_mul(5) % 13) as i16 - 6;
        let life = 8 + self.spawned % 5;
        self.spawned = self.spawned.wrapping_add(1);
        self.particles.push(Particle {
            text,
            col_offset,
            life,
            max_life: life,
        });
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }
}

impl GameObserver for Feedback {
    fn fish_caught(&mut self, item: &FishItem, worth: Option<f64>) {
        let text = match worth {
            Some(w) => format!(
                "{} ({}) を釣った！ 価値 {}",
                item.type_name,
                item.size_name,
                format_gold(w)
            ),
            None => format!("{} ({}) を釣った！", item.type_name, item.size_name),
        };
        self.add_log(&text, false);
    }

    fn inventory_full(&mut self, caught: usize, requested: u32) {
        if caught == 0 {
            self.add_log("バケツがいっぱい！ [S]で売ろう", true);
        } else {
            self.add_log(
                &format!("バケツがいっぱい！ {}/{}匹だけ釣れた", caught, requested),
                true,
            );
        }
    }

    fn catch_finished(&mut self, caught: usize) {
        self.catch_flash = 3;
        self.float_text(format!("+{}", caught));
    }

    fn sold(&mut self, receipt: &SaleReceipt) {
        self.gold_flash = 5;
        self.float_text(format!("+{}G", format_gold(receipt.total)));
        self.add_log(
            &format!(
                "{}匹を売った！ +{} G",
                receipt.sold_count(),
                format_gold(receipt.total)
            ),
            true,
        );
    }

    fn nothing_to_sell(&mut self) {
        self.add_log("売る魚がない", false);
    }

    fn upgrade_purchased(&mut self, receipt: &PurchaseReceipt) {
        self.gold_flash = 8;
        self.add_log(
            &format!("✦ {} を購入！ {}", receipt.name, receipt.effect.summary()),
            true,
        );
    }

    fn upgrade_rejected(&mut self, _id: &str, error: &PurchaseError) {
        let text = match error {
            PurchaseError::AlreadyPurchased => "購入済みです".to_string(),
            PurchaseError::InsufficientGold { cost, gold } => format!(
                "ゴールドが足りない ({} / {} G)",
                format_gold(*gold),
                format_gold(*cost)
            ),
            PurchaseError::UnknownUpgrade(_) => error.to_string(),
        };
        self.add_log(&text, false);
    }
}
