use tracing::{info, warn};

use super::MatchFlowService;
use crate::domain::game_transition::MatchLifecycleView;
use crate::domain::perks::PerkId;
use crate::domain::shop::purchase;
use crate::domain::state::{GameState, MatchId, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl MatchFlowService {
    /// Buy a perk (or the next rank of one) for the player's role.
    ///
    /// The price comes out of the stored balance minus any bet still at
    /// stake. The in-match inventory changes immediately; the state's gold
    /// snapshot does not.
    pub async fn purchase_perk(
        &self,
        match_id: MatchId,
        actor_id: PlayerId,
        perk: PerkId,
        rank: Option<u8>,
    ) -> Result<GameState, AppError> {
        let _guard = self.locks.acquire(match_id).await;
        let current = self.require_state(match_id).await?;

        let side = current.side_of(actor_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NotAParticipant,
                format!("Player {actor_id} is not seated in match {match_id}"),
            )
        })?;

        let balance = self.players.get_balance(actor_id).await?;
        let locked = if current.is_ended() && current.is_settled() {
            0
        } else {
            current.bet_of(side).max(0)
        };

        let before = MatchLifecycleView::of(&current);
        let mut next = current;
        let receipt = purchase(&mut next.inventory, side, perk, rank, balance - locked)?;

        self.players
            .set_balance(actor_id, balance - receipt.cost)
            .await?;
        if let Err(e) = self.players.add_inventory_item(actor_id, perk, 1).await {
            warn!(
                match_id,
                actor_id,
                perk = perk.as_str(),
                error = %e,
                "Granting purchased perk failed, refunding"
            );
            if let Err(refund) = self.players.set_balance(actor_id, balance).await {
                warn!(match_id, actor_id, error = %refund, "Refund failed");
            }
            return Err(e.into());
        }

        info!(
            match_id,
            actor_id,
            perk = perk.as_str(),
            owned = receipt.owned,
            cost = receipt.cost,
            "Perk purchased"
        );

        let result = self.commit(&before, next).await?;
        Ok(result.state)
    }
}
