use std::time::Duration;

use tracing::info;

use crate::service::sync::MatchSync;
use crate::service::MatchContext;

#[derive(Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub poll_period: Duration,
    pub countdown_ticks: u32,
    pub countdown_tick: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: "http://127.0.0.1:5000".to_owned(),
            poll_period: Duration::from_secs(1),
            countdown_ticks: 5,
            countdown_tick: Duration::from_secs(1),
        }
    }
}

// Drive one match end to end: matchmaking poll until the opponent arrives,
// the local countdown, then the in-match poll loop until RESULT is handled.
// Exactly one poller is alive at a time; the matchmaking one is gone before
// the countdown starts.
pub async fn run_match(ctx: MatchContext, config: ClientConfig) {
    let sync = MatchSync::new(ctx);
    sync.wait_for_opponent(config.poll_period).await;
    sync.run_countdown(config.countdown_ticks, config.countdown_tick).await;
    let handle = sync.start(config.poll_period);
    handle.stopped().await;
    info!("match loop finished");
}
