//! Player store contract: balances, experience and perk inventory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::perks::{accumulated_level_bonus, PerkId};
use crate::domain::state::{Gold, Inventory, PlayerId, Side};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One inventory row: a perk and its owned rank (or charge count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item: PerkId,
    pub quantity: i64,
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn get_balance(&self, player_id: PlayerId) -> Result<Gold, DomainError>;

    async fn set_balance(&self, player_id: PlayerId, balance: Gold) -> Result<(), DomainError>;

    /// Grant role-specific experience.
    async fn add_experience(
        &self,
        player_id: PlayerId,
        role: Side,
        amount: i64,
    ) -> Result<(), DomainError>;

    async fn get_inventory(&self, player_id: PlayerId) -> Result<Vec<InventoryItem>, DomainError>;

    /// Add `quantity` (negative to remove) of `item` to the player's inventory.
    async fn add_inventory_item(
        &self,
        player_id: PlayerId,
        item: PerkId,
        quantity: i64,
    ) -> Result<(), DomainError>;
}

/// Build the in-match inventory from both players' stored items.
///
/// Each player contributes only the perks of the role they are seated in.
/// Character levels are recomputed from the owned ranks.
pub async fn load_inventory(
    store: &dyn PlayerStore,
    hunter_id: PlayerId,
    duck_id: PlayerId,
) -> Result<Inventory, DomainError> {
    let mut inventory = Inventory::default();
    for (side, player_id) in [(Side::Hunter, hunter_id), (Side::Duck, duck_id)] {
        let items = store.get_inventory(player_id).await?;
        apply_items(&mut inventory, side, player_id, &items)?;
    }
    Ok(inventory)
}

fn apply_items(
    inventory: &mut Inventory,
    side: Side,
    player_id: PlayerId,
    items: &[InventoryItem],
) -> Result<(), DomainError> {
    for row in items.iter().filter(|row| row.item.side() == side) {
        if row.quantity < 0 {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "Player {player_id} holds {} of {}",
                    row.quantity,
                    row.item.as_str()
                ),
            ));
        }
        let owned = inventory.rank_of(row.item) as i64 + row.quantity;
        inventory.set_rank(row.item, owned.min(u32::MAX as i64) as u32);
    }

    let level: u32 = PerkId::ALL
        .into_iter()
        .filter(|perk| perk.side() == side)
        .map(|perk| accumulated_level_bonus(perk, inventory.rank_of(perk)))
        .sum();
    inventory.add_character_levels(side, level);
    Ok(())
}
