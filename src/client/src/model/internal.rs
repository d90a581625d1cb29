use common::model::game::{Card, Team, TeamSlots};

// Identity of the local player in a match. Assigned by the service on
// create/join and immutable afterwards; a full restart is the only reset.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub username: String,
    pub room: String,
    pub team: Team,
}

// One-shot guards for phase-entry actions. The transport only ever says
// "phase currently is", at least once per second, so these flags are the sole
// thing keeping the swap prompt and the result fetch from firing again on the
// next identical snapshot.
#[derive(Debug, Default)]
pub struct PhaseGuards {
    pub swap_prompt_shown: bool,
    pub result_shown: bool,
}

// Ordered pick of at most two distinct slots for the swap decision.
#[derive(Debug, Default)]
pub struct SwapSelection(Vec<usize>);

impl SwapSelection {
    // Re-picking a selected slot and picking past two are both no-ops.
    pub fn select(&mut self, index: usize) -> bool {
        if self.0.contains(&index) || self.0.len() >= 2 {
            return false;
        }
        self.0.push(index);
        true
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        match self.0[..] {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// The single mutable state record, shared between the poll-driven sync
// machine and the player-driven flows. Everything here is superseded by the
// next snapshot or cleared by the flow that owns it.
#[derive(Debug, Default)]
pub struct ClientState {
    pub your_turn: bool,
    pub team: TeamSlots,
    pub drawn: Option<Card>,
    pub guards: PhaseGuards,
    pub swap: SwapSelection,
}
