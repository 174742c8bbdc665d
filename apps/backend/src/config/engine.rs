//! Engine configuration loaded from the environment.
//!
//! | Variable         | Default | Meaning                                  |
//! |------------------|---------|------------------------------------------|
//! | `HUNT_BASE_XP`   | 10      | Experience granted to both sides         |
//! | `HUNT_WINNER_XP` | 15      | Extra experience for the winning side    |
//! | `HUNT_RNG_SEED`  | unset   | Fixed match seed; unset draws OS entropy |

use std::env;
use std::str::FromStr;

use crate::domain::settlement::SettlementRules;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub base_xp: i64,
    pub winner_xp: i64,
    /// Seed for every new match; `None` means a fresh random seed per match.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let rules = SettlementRules::default();
        Self {
            base_xp: rules.base_xp,
            winner_xp: rules.winner_xp,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_xp = parse_var(&lookup, "HUNT_BASE_XP")?.unwrap_or(defaults.base_xp);
        let winner_xp = parse_var(&lookup, "HUNT_WINNER_XP")?.unwrap_or(defaults.winner_xp);
        let rng_seed = parse_var(&lookup, "HUNT_RNG_SEED")?;

        if base_xp < 0 || winner_xp < 0 {
            return Err(AppError::config(format!(
                "Experience values must be non-negative (base {base_xp}, winner {winner_xp})"
            )));
        }

        Ok(Self {
            base_xp,
            winner_xp,
            rng_seed,
        })
    }

    pub fn settlement_rules(&self) -> SettlementRules {
        SettlementRules {
            base_xp: self.base_xp,
            winner_xp: self.winner_xp,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| AppError::config(format!("Invalid value for '{name}': {e}")))
}
