use common::model::game::{Card, MatchResult, TeamSlots};

// Everything the frontend needs to render, pushed over a channel by the sync
// machine and the flows. TurnStatus and TeamUpdated repeat every in-match
// tick (continuous reconciliation); the rest are one-shot.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    WaitingForOpponent,
    OpponentJoined { username: Option<String> },
    CountdownTick { seconds_left: u32 },
    MatchStarted,
    TurnStatus { your_turn: bool },
    TeamUpdated { slots: TeamSlots },
    CardDrawn { card: Card },
    CardAssigned { slot: usize },
    DrawDiscarded,
    SwapPrompt { slots: TeamSlots },
    SwapClosed { skipped: bool },
    MatchFinished { result: MatchResult },
    Notice { message: String },
}
