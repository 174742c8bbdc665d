use serde::{Deserialize, Serialize};

use crate::domain::perks::{perk_cost, perk_level_bonus, PerkId, PerkKind};
use crate::domain::state::{Gold, Inventory, Side};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub perk: PerkId,
    /// Rank (or charge count for consumables) owned after the purchase.
    pub owned: u32,
    pub cost: Gold,
    pub level_bonus: u32,
}

/// Buy `perk` for `side` and grant it in `inventory`.
///
/// `rank` selects the rank of a ranked perk and must be exactly one above
/// the owned rank; it is ignored for consumables. `spendable` is the part of
/// the balance not locked in a running bet.
pub fn purchase(
    inventory: &mut Inventory,
    side: Side,
    perk: PerkId,
    rank: Option<u8>,
    spendable: Gold,
) -> Result<PurchaseReceipt, DomainError> {
    if perk.side() != side {
        return Err(DomainError::validation(
            ValidationKind::WrongSide,
            format!("{} is a {} perk", perk.as_str(), perk.side().as_str()),
        ));
    }

    let current = inventory.rank_of(perk);
    let (priced_rank, owned) = match perk.kind() {
        PerkKind::Consumable => (1u8, current.saturating_add(1)),
        PerkKind::Unique => {
            if current > 0 || rank.is_some_and(|r| r != 1) {
                return Err(rank_unavailable(perk, rank, current));
            }
            (1, 1)
        }
        PerkKind::Ranked { max_rank } => {
            let next = current + 1;
            let wanted = rank.map(u32::from).unwrap_or(next);
            if wanted != next || next > max_rank as u32 {
                return Err(rank_unavailable(perk, rank, current));
            }
            (next as u8, next)
        }
    };

    let cost =
        perk_cost(perk, priced_rank).ok_or_else(|| rank_unavailable(perk, rank, current))?;
    if cost > spendable {
        return Err(DomainError::validation(
            ValidationKind::InsufficientFunds,
            format!("{} costs {cost}, only {spendable} available", perk.as_str()),
        ));
    }

    let level_bonus = match perk.kind() {
        PerkKind::Consumable => 0,
        _ => perk_level_bonus(perk, priced_rank).unwrap_or(0),
    };
    inventory.set_rank(perk, owned);
    inventory.add_character_levels(side, level_bonus);

    Ok(PurchaseReceipt {
        perk,
        owned,
        cost,
        level_bonus,
    })
}

fn rank_unavailable(perk: PerkId, rank: Option<u8>, current: u32) -> DomainError {
    DomainError::validation(
        ValidationKind::RankUnavailable,
        format!(
            "Cannot buy {} at rank {} (owned {current})",
            perk.as_str(),
            rank.map(|r| r.to_string())
                .unwrap_or_else(|| "next".to_string())
        ),
    )
}
