use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::Availability;
use crate::domain::perks::PerkId;
use crate::domain::state::{Gold, PlayerId, Side};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::players::{InventoryItem, PlayerStore};

/// Everything the store keeps about one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub balance: Gold,
    pub hunter_xp: i64,
    pub duck_xp: i64,
    pub inventory: HashMap<PerkId, i64>,
}

#[derive(Debug, Default)]
pub struct MemoryPlayerStore {
    players: Mutex<HashMap<PlayerId, PlayerRecord>>,
    availability: Availability,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player with a starting balance.
    pub fn insert_player(&self, player_id: PlayerId, balance: Gold) {
        self.players.lock().insert(
            player_id,
            PlayerRecord {
                balance,
                ..PlayerRecord::default()
            },
        );
    }

    pub fn with_player(self, player_id: PlayerId, balance: Gold) -> Self {
        self.insert_player(player_id, balance);
        self
    }

    /// Grant `quantity` of a perk directly, bypassing the shop.
    pub fn grant(&self, player_id: PlayerId, item: PerkId, quantity: i64) {
        let mut players = self.players.lock();
        let record = players.entry(player_id).or_default();
        *record.inventory.entry(item).or_insert(0) += quantity;
    }

    pub fn set_available(&self, available: bool) {
        self.availability.set(available);
    }

    pub fn record(&self, player_id: PlayerId) -> Option<PlayerRecord> {
        self.players.lock().get(&player_id).cloned()
    }

    pub fn balance(&self, player_id: PlayerId) -> Option<Gold> {
        self.players.lock().get(&player_id).map(|r| r.balance)
    }

    pub fn quantity(&self, player_id: PlayerId, item: PerkId) -> i64 {
        self.players
            .lock()
            .get(&player_id)
            .and_then(|r| r.inventory.get(&item).copied())
            .unwrap_or(0)
    }

    fn with_record<T>(
        &self,
        player_id: PlayerId,
        f: impl FnOnce(&mut PlayerRecord) -> T,
    ) -> Result<T, DomainError> {
        self.availability.check("player store")?;
        let mut players = self.players.lock();
        let record = players.get_mut(&player_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })?;
        Ok(f(record))
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn get_balance(&self, player_id: PlayerId) -> Result<Gold, DomainError> {
        self.with_record(player_id, |r| r.balance)
    }

    async fn set_balance(&self, player_id: PlayerId, balance: Gold) -> Result<(), DomainError> {
        self.with_record(player_id, |r| r.balance = balance)
    }

    async fn add_experience(
        &self,
        player_id: PlayerId,
        role: Side,
        amount: i64,
    ) -> Result<(), DomainError> {
        self.with_record(player_id, |r| match role {
            Side::Hunter => r.hunter_xp += amount,
            Side::Duck => r.duck_xp += amount,
        })
    }

    async fn get_inventory(&self, player_id: PlayerId) -> Result<Vec<InventoryItem>, DomainError> {
        self.with_record(player_id, |r| {
            PerkId::ALL
                .into_iter()
                .filter_map(|item| {
                    r.inventory
                        .get(&item)
                        .filter(|q| **q > 0)
                        .map(|&quantity| InventoryItem { item, quantity })
                })
                .collect()
        })
    }

    async fn add_inventory_item(
        &self,
        player_id: PlayerId,
        item: PerkId,
        quantity: i64,
    ) -> Result<(), DomainError> {
        self.with_record(player_id, |r| {
            let held = r.inventory.entry(item).or_insert(0);
            *held += quantity;
            if *held <= 0 {
                r.inventory.remove(&item);
            }
        })
    }
}
