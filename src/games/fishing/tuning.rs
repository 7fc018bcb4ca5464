//! Game tuning data: starting parameters, market curve, catalog and upgrades.
//!
//! The shipped values live in `data/tuning.json` and are embedded at compile
//! time. Everything is validated once at load; the rest of the game relies on
//! the invariants checked here (non-empty catalog, unique keys, sane numbers).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, FishTypeDef, SizeTier};
use super::market::MarketConfig;
use super::upgrades::UpgradeDef;

const BUILTIN_TUNING: &str = include_str!("../../../data/tuning.json");

/// Initial player parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartParams {
    pub gold: f64,
    pub fish_per_click: u32,
    pub max_inventory_size: usize,
}

impl Default for StartParams {
    fn default() -> Self {
        Self {
            gold: 0.0,
            fish_per_click: 1,
            max_inventory_size: 10,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default)]
    pub start: StartParams,
    #[serde(default)]
    pub market: MarketConfig,
    pub fish: Vec<FishTypeDef>,
    pub sizes: Vec<SizeTier>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeDef>,
}

#[derive(Debug)]
pub enum TuningError {
    /// Malformed JSON or wrong field types.
    Parse(serde_json::Error),
    /// A list that must have entries is empty.
    Empty(&'static str),
    DuplicateName { list: &'static str, name: String },
    InvalidValue { field: String, value: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Empty(list) => write!(f, "tuning list '{list}' is empty"),
            TuningError::DuplicateName { list, name } => {
                write!(f, "duplicate entry '{name}' in '{list}'")
            }
            TuningError::InvalidValue { field, value } => {
                write!(f, "invalid value {value} for '{field}'")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// The tuning shipped with the game.
    pub fn builtin() -> Result<Self, TuningError> {
        Self::from_json(BUILTIN_TUNING)
    }

    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.fish.clone(), self.sizes.clone())
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.fish.is_empty() {
            return Err(TuningError::Empty("fish"));
        }
        if self.sizes.is_empty() {
            return Err(TuningError::Empty("sizes"));
        }
        unique("fish", self.fish.iter().map(|f| f.name.as_str()))?;
        unique("sizes", self.sizes.iter().map(|s| s.name.as_str()))?;
        unique("upgrades", self.upgrades.iter().map(|u| u.id.as_str()))?;

        for fish in &self.fish {
            non_negative(&format!("fish.{}.base_value", fish.name), fish.base_value)?;
        }
        for size in &self.sizes {
            if !(size.multiplier.is_finite() && size.multiplier > 0.0) {
                return Err(invalid(format!("sizes.{}.multiplier", size.name), size.multiplier));
            }
        }
        for upgrade in &self.upgrades {
            non_negative(&format!("upgrades.{}.cost", upgrade.id), upgrade.cost)?;
        }

        let m = &self.market;
        non_negative("market.base_price", m.base_price)?;
        non_negative("market.decay_rate", m.decay_rate)?;
        non_negative("market.floor_price", m.floor_price)?;
        if m.floor_price > m.base_price {
            return Err(invalid("market.floor_price".to_string(), m.floor_price));
        }

        non_negative("start.gold", self.start.gold)?;
        if self.start.fish_per_click == 0 {
            return Err(invalid("start.fish_per_click".to_string(), 0.0));
        }
        if self.start.max_inventory_size == 0 {
            return Err(invalid("start.max_inventory_size".to_string(), 0.0));
        }
        Ok(())
    }
}

fn unique<'a>(list: &'static str, names: impl Iterator<Item = &'a str>) -> Result<(), TuningError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TuningError::DuplicateName {
                list,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field.to_string(), value))
    }
}

fn invalid(field: String, value: f64) -> TuningError {
    TuningError::InvalidValue { field, value }
}
