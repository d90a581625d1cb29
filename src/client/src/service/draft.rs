use common::error::{ClientError, Result};
use common::model::game::TEAM_SIZE;
use common::model::messages::AssignRequest;
use tracing::info;

use crate::model::events::UiEvent;
use crate::service::MatchContext;

// Draw-and-assign during the draft. The local checks are a fast path only;
// the service re-validates everything and its rejection message wins.
pub struct DraftFlow {
    ctx: MatchContext,
}

impl DraftFlow {
    pub fn new(ctx: MatchContext) -> Self {
        DraftFlow { ctx }
    }

    pub async fn draw(&self) -> Result<()> {
        {
            let state = self.ctx.state.lock().await;
            if !state.your_turn {
                return Err(ClientError::validation("not your turn"));
            }
            if state.drawn.is_some() {
                return Err(ClientError::validation("assign the drawn card first"));
            }
        }
        let card = self
            .ctx
            .api
            .draw_card(&self.ctx.session.room, self.ctx.session.team)
            .await?;
        info!("drew {}", card.name);
        self.ctx.state.lock().await.drawn = Some(card.clone());
        self.ctx.emit(UiEvent::CardDrawn { card }).await;
        Ok(())
    }

    // A slot takes the held card iff it is empty, a card is held, and it is
    // still our turn. On a rejection the draw is kept so another slot can be
    // tried.
    pub async fn assign(&self, slot: usize) -> Result<()> {
        if slot >= TEAM_SIZE {
            return Err(ClientError::validation("no such slot"));
        }
        {
            let state = self.ctx.state.lock().await;
            if state.drawn.is_none() {
                return Err(ClientError::validation("no card drawn"));
            }
            if !state.your_turn {
                return Err(ClientError::validation("not your turn"));
            }
            if state.team.card_at(slot).is_some() {
                return Err(ClientError::validation("slot already filled"));
            }
        }
        self.ctx
            .api
            .assign_card(
                &self.ctx.session.room,
                AssignRequest {
                    team: self.ctx.session.team,
                    slot,
                },
            )
            .await?;
        self.ctx.state.lock().await.drawn = None;
        self.ctx.emit(UiEvent::CardAssigned { slot }).await;
        Ok(())
    }

    // Each team may throw one pending draw back per match; the service
    // tracks the allowance.
    pub async fn skip_draw(&self) -> Result<()> {
        {
            let state = self.ctx.state.lock().await;
            if state.drawn.is_none() {
                return Err(ClientError::validation("no card to discard"));
            }
        }
        self.ctx
            .api
            .skip_draw(&self.ctx.session.room, self.ctx.session.team)
            .await?;
        self.ctx.state.lock().await.drawn = None;
        self.ctx.emit(UiEvent::DrawDiscarded).await;
        Ok(())
    }
}
