use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::model::game::{Card, MatchResult, Team};
use crate::model::messages::{
    AssignRequest, ErrorBody, JoinRoomRequest, PollSnapshot, RoomJoined, SwapRequest,
};

// The remote service surface the client consumes, one method per endpoint.
// Splitting this behind a trait keeps the sync layer testable against a
// scripted stand-in (see crate::test).
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn create_room(&self) -> Result<RoomJoined>;
    async fn join_room(&self, request: JoinRoomRequest) -> Result<RoomJoined>;
    async fn poll_state(&self, room: &str, team: Team) -> Result<PollSnapshot>;
    async fn draw_card(&self, room: &str, team: Team) -> Result<Card>;
    async fn assign_card(&self, room: &str, request: AssignRequest) -> Result<()>;
    async fn skip_draw(&self, room: &str, team: Team) -> Result<()>;
    async fn submit_swap(&self, room: &str, request: SwapRequest) -> Result<()>;
    async fn fetch_result(&self, room: &str) -> Result<MatchResult>;
}

pub struct HttpGameApi {
    base: String,
    http: Client,
}

impl HttpGameApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut base = server_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        HttpGameApi {
            base,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

// A non-success status always carries the service's {"error": ...} envelope;
// that message is surfaced verbatim, never translated.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(remote_error(response).await)
}

async fn expect_ok(response: Response) -> Result<()> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(remote_error(response).await)
}

async fn remote_error(response: Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Remote(body.error),
        Err(_) => ClientError::remote(format!("service returned {status}")),
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn create_room(&self) -> Result<RoomJoined> {
        let response = self.http.post(self.url("api/create")).send().await?;
        decode(response).await
    }

    async fn join_room(&self, request: JoinRoomRequest) -> Result<RoomJoined> {
        let response = self
            .http
            .post(self.url("api/join"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn poll_state(&self, room: &str, team: Team) -> Result<PollSnapshot> {
        let url = self.url(&format!("api/state/{room}/{team}"));
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn draw_card(&self, room: &str, team: Team) -> Result<Card> {
        let url = self.url(&format!("api/draw/{room}/{team}"));
        debug!("drawing from {url}");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn assign_card(&self, room: &str, request: AssignRequest) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!("api/assign/{room}")))
            .json(&request)
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn skip_draw(&self, room: &str, team: Team) -> Result<()> {
        let url = self.url(&format!("api/skip/{room}/{team}"));
        let response = self.http.post(url).send().await?;
        expect_ok(response).await
    }

    async fn submit_swap(&self, room: &str, request: SwapRequest) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!("api/swap/{room}")))
            .json(&request)
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn fetch_result(&self, room: &str) -> Result<MatchResult> {
        let response = self
            .http
            .get(self.url(&format!("api/result/{room}")))
            .send()
            .await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpGameApi::new("http://127.0.0.1:5000///");
        assert_eq!(api.url("api/create"), "http://127.0.0.1:5000/api/create");
    }
}
