use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::game::{Phase, Team, TeamSlots};

// Wire records for the remote service surface. Field-keyed JSON throughout;
// unknown fields the service may add are ignored on the way in.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoomJoined {
    pub room: String,
    pub team: Team,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JoinRoomRequest {
    pub room: String,
    pub username: String,
}

// One observation of authoritative match state, replaced wholesale each tick.
// your_turn/your_team only mean something during the draft, opponent_joined
// during matchmaking, skip_available during the swap decision.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    pub phase: Phase,
    #[serde(default)]
    pub your_turn: bool,
    #[serde(default)]
    pub your_team: TeamSlots,
    #[serde(default)]
    pub opponent_joined: bool,
    #[serde(default)]
    pub skip_available: bool,
    #[serde(default)]
    pub players: HashMap<String, Option<String>>,
    #[serde(default)]
    pub swap_done: HashMap<String, bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssignRequest {
    pub team: Team,
    pub slot: usize,
}

// Two wire forms share one record: the skip form carries `skip: true` and no
// slots, the swap form carries both slots and no `skip` key.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SwapRequest {
    pub team: Team,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot1: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot2: Option<usize>,
}

impl SwapRequest {
    pub fn skip(team: Team) -> Self {
        SwapRequest {
            team,
            skip: true,
            slot1: None,
            slot2: None,
        }
    }

    pub fn swap(team: Team, slot1: usize, slot2: usize) -> Self {
        SwapRequest {
            team,
            skip: false,
            slot1: Some(slot1),
            slot2: Some(slot2),
        }
    }
}

// Error envelope the service uses for every failure.
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
}
