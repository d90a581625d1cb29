use common::error::{ClientError, Result};
use common::model::game::TEAM_SIZE;
use common::model::messages::SwapRequest;
use tracing::info;

use crate::model::events::UiEvent;
use crate::service::MatchContext;

// The one optional swap decision. Confirm and skip both close the prompt
// unconditionally; only the two-slot requirement is checked locally.
pub struct SwapFlow {
    ctx: MatchContext,
}

impl SwapFlow {
    pub fn new(ctx: MatchContext) -> Self {
        SwapFlow { ctx }
    }

    // Register a candidate pick. Returns whether it was taken; repeats and
    // anything past two are ignored.
    pub async fn select(&self, slot: usize) -> Result<bool> {
        if slot >= TEAM_SIZE {
            return Err(ClientError::validation("no such slot"));
        }
        let mut state = self.ctx.state.lock().await;
        Ok(state.swap.select(slot))
    }

    pub async fn confirm(&self) -> Result<()> {
        let pair = {
            let state = self.ctx.state.lock().await;
            state.swap.pair()
        };
        let Some((slot1, slot2)) = pair else {
            return Err(ClientError::validation("select two cards to swap"));
        };
        info!("swapping slots {slot1} and {slot2}");
        let outcome = self
            .ctx
            .api
            .submit_swap(
                &self.ctx.session.room,
                SwapRequest::swap(self.ctx.session.team, slot1, slot2),
            )
            .await;
        self.close(false).await;
        outcome
    }

    pub async fn skip(&self) -> Result<()> {
        info!("keeping the drafted order");
        let outcome = self
            .ctx
            .api
            .submit_swap(
                &self.ctx.session.room,
                SwapRequest::skip(self.ctx.session.team),
            )
            .await;
        self.close(true).await;
        outcome
    }

    async fn close(&self, skipped: bool) {
        self.ctx.state.lock().await.swap.clear();
        self.ctx.emit(UiEvent::SwapClosed { skipped }).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use common::model::game::Team;
    use common::test::{RecordedCall, ScriptedApi};
    use tokio::sync::mpsc;

    use super::*;
    use crate::model::internal::ClientSession;

    fn wired(api: Arc<ScriptedApi>) -> (SwapFlow, mpsc::Receiver<UiEvent>) {
        let (events, event_rx) = mpsc::channel(100);
        let session = ClientSession {
            username: "ann".to_owned(),
            room: "AB12CD".to_owned(),
            team: Team::A,
        };
        let ctx = MatchContext::new(api, session, events);
        (SwapFlow::new(ctx), event_rx)
    }

    #[tokio::test]
    async fn confirm_needs_exactly_two_picks() {
        let api = Arc::new(ScriptedApi::new());
        let (flow, _rx) = wired(api.clone());

        let error = flow.confirm().await.unwrap_err();
        assert!(error.is_validation());

        flow.select(3).await.unwrap();
        let error = flow.confirm().await.unwrap_err();
        assert!(error.is_validation());

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn picking_the_same_slot_twice_counts_once() {
        let api = Arc::new(ScriptedApi::new());
        let (flow, _rx) = wired(api.clone());

        assert!(flow.select(1).await.unwrap());
        assert!(!flow.select(1).await.unwrap());

        assert_eq!(flow.ctx.state.lock().await.swap.len(), 1);
        let error = flow.confirm().await.unwrap_err();
        assert!(error.is_validation());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn a_third_pick_is_ignored() {
        let api = Arc::new(ScriptedApi::new());
        let (flow, _rx) = wired(api);

        assert!(flow.select(0).await.unwrap());
        assert!(flow.select(5).await.unwrap());
        assert!(!flow.select(2).await.unwrap());

        assert_eq!(flow.ctx.state.lock().await.swap.pair(), Some((0, 5)));
    }

    #[tokio::test]
    async fn confirm_submits_the_pair_and_closes() {
        let api = Arc::new(ScriptedApi::new());
        let (flow, mut rx) = wired(api.clone());
        flow.select(1).await.unwrap();
        flow.select(4).await.unwrap();

        flow.confirm().await.unwrap();

        assert_eq!(
            api.calls(),
            vec![RecordedCall::SubmitSwap {
                skip: false,
                slots: Some((1, 4)),
            }]
        );
        assert!(flow.ctx.state.lock().await.swap.is_empty());
        let mut closed = false;
        while let Ok(event) = rx.try_recv() {
            closed |= event == UiEvent::SwapClosed { skipped: false };
        }
        assert!(closed);
    }

    #[tokio::test]
    async fn skip_submits_the_skip_form() {
        let api = Arc::new(ScriptedApi::new());
        let (flow, _rx) = wired(api.clone());

        flow.skip().await.unwrap();

        assert_eq!(
            api.calls(),
            vec![RecordedCall::SubmitSwap {
                skip: true,
                slots: None,
            }]
        );
    }

    #[tokio::test]
    async fn a_rejected_confirm_still_closes_the_prompt() {
        let api = Arc::new(ScriptedApi::new());
        api.stage_swap(Err("Already decided".to_owned()));
        let (flow, mut rx) = wired(api);
        flow.select(0).await.unwrap();
        flow.select(1).await.unwrap();

        let error = flow.confirm().await.unwrap_err();

        assert_eq!(error.to_string(), "Already decided");
        let mut closed = false;
        while let Ok(event) = rx.try_recv() {
            closed |= matches!(event, UiEvent::SwapClosed { .. });
        }
        assert!(closed);
    }
}
