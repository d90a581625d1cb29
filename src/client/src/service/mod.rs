pub mod draft;
pub mod result;
pub mod session;
pub mod swap;
pub mod sync;

use std::sync::Arc;

use common::api::GameApi;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tracing::debug;

use crate::model::events::UiEvent;
use crate::model::internal::{ClientSession, ClientState};

// Shared wiring handed to every service: the remote surface, the session
// identity, the single mutable state record, and the channel UI events are
// pushed through.
#[derive(Clone)]
pub struct MatchContext {
    pub api: Arc<dyn GameApi>,
    pub session: ClientSession,
    pub state: Arc<Mutex<ClientState>>,
    pub events: Sender<UiEvent>,
}

impl MatchContext {
    pub fn new(api: Arc<dyn GameApi>, session: ClientSession, events: Sender<UiEvent>) -> Self {
        MatchContext {
            api,
            session,
            state: Arc::new(Mutex::new(ClientState::default())),
            events,
        }
    }

    pub(crate) async fn emit(&self, event: UiEvent) {
        if self.events.send(event).await.is_err() {
            debug!("ui receiver dropped");
        }
    }
}
