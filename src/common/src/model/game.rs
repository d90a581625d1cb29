use std::fmt;

use serde::{Deserialize, Serialize};

pub const TEAM_SIZE: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// Fixed role ordering; a slot index keeps its role for the whole match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Captain,
    Vice,
    Tank,
    Healer,
    Support1,
    Support2,
}

impl Role {
    pub const ALL: [Role; TEAM_SIZE] = [
        Role::Captain,
        Role::Vice,
        Role::Tank,
        Role::Healer,
        Role::Support1,
        Role::Support2,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Role> {
        Role::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Captain => "Captain",
            Role::Vice => "Vice",
            Role::Tank => "Tank",
            Role::Healer => "Healer",
            Role::Support1 => "Support1",
            Role::Support2 => "Support2",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub image: String,
}

// The six role slots of one side, in role order. Wire shape is a plain
// 6-element array with null for an unfilled slot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TeamSlots([Option<Card>; TEAM_SIZE]);

impl TeamSlots {
    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.0.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn get(&self, role: Role) -> Option<&Card> {
        self.card_at(role.index())
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|slot| slot.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&Card>)> {
        Role::ALL.iter().map(move |role| (*role, self.get(*role)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Role, &Card)> {
        self.iter().filter_map(|(role, card)| card.map(|c| (role, c)))
    }
}

impl From<[Option<Card>; TEAM_SIZE]> for TeamSlots {
    fn from(slots: [Option<Card>; TEAM_SIZE]) -> Self {
        TeamSlots(slots)
    }
}

// Countdown is client-local; the service never reports it. The aliases accept
// the service's own names for the waiting and drafting stages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[serde(alias = "WAITING")]
    Matchmaking,
    Countdown,
    #[serde(alias = "DRAFT")]
    InProgress,
    SwapOptional,
    Result,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub role: Role,
    #[serde(rename = "A_name")]
    pub a_name: String,
    #[serde(rename = "A_power")]
    pub a_power: i64,
    #[serde(rename = "B_name")]
    pub b_name: String,
    #[serde(rename = "B_power")]
    pub b_power: i64,
    pub winner: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub rounds: Vec<RoundOutcome>,
    pub final_winner: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> Card {
        Card {
            name: name.to_owned(),
            image: format!("{name}.png"),
        }
    }

    #[test]
    fn phase_names_match_the_wire() {
        let phase: Phase = serde_json::from_str("\"SWAP_OPTIONAL\"").unwrap();
        assert_eq!(phase, Phase::SwapOptional);
        assert_eq!(
            serde_json::to_string(&Phase::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
    }

    #[test]
    fn phase_accepts_service_aliases() {
        let waiting: Phase = serde_json::from_str("\"WAITING\"").unwrap();
        let draft: Phase = serde_json::from_str("\"DRAFT\"").unwrap();
        assert_eq!(waiting, Phase::Matchmaking);
        assert_eq!(draft, Phase::InProgress);
    }

    #[test]
    fn slots_parse_from_a_six_element_array() {
        let slots: TeamSlots =
            serde_json::from_str(r#"[{"name":"Rei","image":"rei.png"},null,null,null,null,null]"#)
                .unwrap();
        assert_eq!(slots.get(Role::Captain).unwrap().name, "Rei");
        assert!(slots.get(Role::Vice).is_none());
        assert!(!slots.is_full());
    }

    #[test]
    fn occupied_walks_role_order() {
        let slots = TeamSlots::from([
            Some(card("a")),
            None,
            Some(card("c")),
            None,
            None,
            Some(card("f")),
        ]);
        let roles: Vec<Role> = slots.occupied().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![Role::Captain, Role::Tank, Role::Support2]);
    }

    #[test]
    fn role_index_round_trips() {
        for role in Role::ALL {
            assert_eq!(Role::from_index(role.index()), Some(role));
        }
        assert_eq!(Role::from_index(TEAM_SIZE), None);
    }
}
