//! Collaborator contracts the engine talks to.
//!
//! The engine owns game state only. Balances, experience, inventory,
//! match history and lobby seating live behind these traits and are
//! injected into the service as `Arc<dyn ...>`.

pub mod history;
pub mod lobby;
pub mod players;

pub use history::{MatchHistory, MatchStatus, MatchSummary};
pub use lobby::{LobbyDirectory, MatchSeating};
pub use players::{load_inventory, InventoryItem, PlayerStore};
