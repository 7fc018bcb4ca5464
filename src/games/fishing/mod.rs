//! Fishing: an incremental fish-catching clicker.

pub mod actions;
pub mod catalog;
pub mod feedback;
pub mod inventory;
pub mod logic;
pub mod market;
pub mod observer;
pub mod render;
pub mod state;
pub mod tuning;
pub mod upgrades;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use feedback::Feedback;
use state::FishingState;
use tuning::Tuning;

/// Which panel is shown under the pond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Inventory,
    Upgrades,
    Market,
}

pub struct FishingGame {
    pub state: FishingState,
    pub feedback: Feedback,
    pub tab: Tab,
}

impl FishingGame {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            state: FishingState::new(tuning, seed),
            feedback: Feedback::new(),
            tab: Tab::Inventory,
        }
    }

    fn catch(&mut self) {
        logic::catch_fish(&mut self.state, &mut self.feedback);
    }

    fn sell(&mut self) {
        logic::sell_all(&mut self.state, &mut self.feedback);
    }

    /// Buy the upgrade at `idx` in display order (all upgrades are listed).
    fn buy_at(&mut self, idx: usize) -> bool {
        let Some(id) = self.state.upgrades.get(idx).map(|u| u.id.clone()) else {
            return false;
        };
        logic::buy_upgrade(&mut self.state, &id, &mut self.feedback).is_ok()
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' => self.catch(),
            's' => self.sell(),
            'i' => self.tab = Tab::Inventory,
            'u' => self.tab = Tab::Upgrades,
            'm' => self.tab = Tab::Market,
            '1'..='9' if self.tab == Tab::Upgrades => {
                let idx = key as usize - '1' as usize;
                self.buy_at(idx);
            }
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            CATCH => self.catch(),
            SELL_ALL => self.sell(),
            TAB_INVENTORY => self.tab = Tab::Inventory,
            TAB_UPGRADES => self.tab = Tab::Upgrades,
            TAB_MARKET => self.tab = Tab::Market,
            id if id >= BUY_UPGRADE_BASE => {
                self.buy_at((id - BUY_UPGRADE_BASE) as usize);
            }
            _ => return false,
        }
        true
    }
}

impl Game for FishingGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        self.feedback.tick(delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
