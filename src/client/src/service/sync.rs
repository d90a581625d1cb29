use std::ops::ControlFlow;
use std::time::Duration;

use common::model::game::Phase;
use common::model::messages::{PollSnapshot, SwapRequest};
use common::poll::{start_polling, PollHandle};
use tokio::time;
use tracing::{debug, info, warn};

use crate::model::events::UiEvent;
use crate::service::result::ResultFlow;
use crate::service::MatchContext;

// The phase synchronization machine. The transport is polling, at least once
// per phase and usually many times, so every phase-entry action here is made
// idempotent through the guard flags in ClientState - there is no
// "phase changed" event to lean on, only "phase currently is" snapshots.
#[derive(Clone)]
pub struct MatchSync {
    ctx: MatchContext,
}

impl MatchSync {
    pub fn new(ctx: MatchContext) -> Self {
        MatchSync { ctx }
    }

    // Matchmaking: poll until the opponent arrives, then wind the poller
    // down. The in-match poller is started separately after the countdown.
    pub async fn wait_for_opponent(&self, period: Duration) {
        self.ctx.emit(UiEvent::WaitingForOpponent).await;
        let api = self.ctx.api.clone();
        let room = self.ctx.session.room.clone();
        let team = self.ctx.session.team;
        let ctx = self.ctx.clone();
        let handle = start_polling(
            period,
            move || {
                let api = api.clone();
                let room = room.clone();
                async move { api.poll_state(&room, team).await }
            },
            move |snapshot: PollSnapshot| {
                let ctx = ctx.clone();
                async move {
                    if !snapshot.opponent_joined {
                        return ControlFlow::Continue(());
                    }
                    let username = snapshot
                        .players
                        .get(team.opponent().as_str())
                        .and_then(|name| name.clone());
                    ctx.emit(UiEvent::OpponentJoined { username }).await;
                    ControlFlow::Break(())
                }
            },
        );
        handle.stopped().await;
    }

    // Local fixed countdown between matchmaking and the draft. Not
    // server-driven; the service is already in its drafting stage by now.
    pub async fn run_countdown(&self, ticks: u32, tick_len: Duration) {
        for seconds_left in (1..=ticks).rev() {
            self.ctx.emit(UiEvent::CountdownTick { seconds_left }).await;
            time::sleep(tick_len).await;
        }
        self.ctx.emit(UiEvent::MatchStarted).await;
    }

    // Start the in-match poll loop. It ends itself on RESULT entry.
    pub fn start(&self, period: Duration) -> PollHandle {
        let api = self.ctx.api.clone();
        let room = self.ctx.session.room.clone();
        let team = self.ctx.session.team;
        let sync = self.clone();
        start_polling(
            period,
            move || {
                let api = api.clone();
                let room = room.clone();
                async move { api.poll_state(&room, team).await }
            },
            move |snapshot| {
                let sync = sync.clone();
                async move { sync.handle_snapshot(snapshot).await }
            },
        )
    }

    // One in-match tick. Turn and team are reconciled on every snapshot;
    // swap and result entries are one-shot.
    pub async fn handle_snapshot(&self, snapshot: PollSnapshot) -> ControlFlow<()> {
        debug!(phase = ?snapshot.phase, your_turn = snapshot.your_turn, "snapshot");
        {
            let mut state = self.ctx.state.lock().await;
            state.your_turn = snapshot.your_turn;
            state.team = snapshot.your_team.clone();
        }
        self.ctx
            .emit(UiEvent::TurnStatus {
                your_turn: snapshot.your_turn,
            })
            .await;
        self.ctx
            .emit(UiEvent::TeamUpdated {
                slots: snapshot.your_team.clone(),
            })
            .await;

        match snapshot.phase {
            Phase::SwapOptional => {
                self.enter_swap(&snapshot).await;
                ControlFlow::Continue(())
            }
            Phase::Result => self.enter_result().await,
            _ => ControlFlow::Continue(()),
        }
    }

    async fn enter_swap(&self, snapshot: &PollSnapshot) {
        {
            let mut state = self.ctx.state.lock().await;
            if state.guards.swap_prompt_shown {
                return;
            }
            state.guards.swap_prompt_shown = true;
            state.swap.clear();
        }
        if snapshot.skip_available {
            info!("entering swap decision");
            self.ctx
                .emit(UiEvent::SwapPrompt {
                    slots: snapshot.your_team.clone(),
                })
                .await;
            return;
        }
        // No eligible swap, so there is no choice to offer; decide on the
        // player's behalf.
        info!("no swap available, skipping automatically");
        let request = SwapRequest::skip(self.ctx.session.team);
        match self.ctx.api.submit_swap(&self.ctx.session.room, request).await {
            Ok(()) => self.ctx.emit(UiEvent::SwapClosed { skipped: true }).await,
            Err(error) => {
                warn!("automatic skip failed: {error}");
                self.ctx
                    .emit(UiEvent::Notice {
                        message: error.to_string(),
                    })
                    .await;
            }
        }
    }

    async fn enter_result(&self) -> ControlFlow<()> {
        {
            let mut state = self.ctx.state.lock().await;
            if state.guards.result_shown {
                return ControlFlow::Break(());
            }
            state.guards.result_shown = true;
        }
        info!("match finished, fetching result");
        if let Err(error) = ResultFlow::new(self.ctx.clone()).show().await {
            warn!("result fetch failed: {error}");
            self.ctx
                .emit(UiEvent::Notice {
                    message: error.to_string(),
                })
                .await;
        }
        // Polling is over either way; the summary is terminal.
        ControlFlow::Break(())
    }
}
