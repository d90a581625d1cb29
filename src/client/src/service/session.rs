use common::api::GameApi;
use common::error::{ClientError, Result};
use common::model::messages::JoinRoomRequest;
use tracing::info;

use crate::model::internal::ClientSession;

// Room establishment. No retries: a failed attempt is terminal and the
// player has to re-invoke it.

pub async fn create_room(api: &dyn GameApi, username: &str) -> Result<ClientSession> {
    let joined = api.create_room().await?;
    info!("created room {} as team {}", joined.room, joined.team);
    Ok(ClientSession {
        username: username.to_owned(),
        room: joined.room,
        team: joined.team,
    })
}

pub async fn join_room(api: &dyn GameApi, code: &str, username: &str) -> Result<ClientSession> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ClientError::validation("room code must not be empty"));
    }
    let joined = api
        .join_room(JoinRoomRequest {
            room: code.to_owned(),
            username: username.to_owned(),
        })
        .await?;
    info!("joined room {} as team {}", joined.room, joined.team);
    Ok(ClientSession {
        username: username.to_owned(),
        room: joined.room,
        team: joined.team,
    })
}

#[cfg(test)]
mod tests {
    use common::model::game::Team;
    use common::model::messages::RoomJoined;
    use common::test::ScriptedApi;

    use super::*;

    #[tokio::test]
    async fn empty_code_never_reaches_the_network() {
        let api = ScriptedApi::new();
        let error = join_room(&api, "   ", "ann").await.unwrap_err();
        assert!(error.is_validation());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn join_trims_the_code_and_carries_the_username() {
        let api = ScriptedApi::new();
        api.stage_join(Ok(RoomJoined {
            room: "AB12CD".to_owned(),
            team: Team::B,
        }));
        let session = join_room(&api, " AB12CD ", "ann").await.unwrap();
        assert_eq!(session.room, "AB12CD");
        assert_eq!(session.team, Team::B);
        assert_eq!(session.username, "ann");
        assert_eq!(
            api.calls(),
            vec![common::test::RecordedCall::JoinRoom {
                room: "AB12CD".to_owned(),
                username: "ann".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn service_rejection_is_surfaced_verbatim() {
        let api = ScriptedApi::new();
        api.stage_join(Err("Room full".to_owned()));
        let error = join_room(&api, "AB12CD", "ann").await.unwrap_err();
        assert_eq!(error.to_string(), "Room full");
    }

    #[tokio::test]
    async fn create_binds_the_assigned_team() {
        let api = ScriptedApi::new();
        api.stage_create(Ok(RoomJoined {
            room: "XY34ZW".to_owned(),
            team: Team::A,
        }));
        let session = create_room(&api, "ann").await.unwrap();
        assert_eq!(session.room, "XY34ZW");
        assert_eq!(session.team, Team::A);
    }
}
