use std::fmt::Display;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

// Handle to a running poll loop. stop() cancels future ticks; a request
// already in flight is not aborted, its response is just discarded. Dropping
// the handle closes the stop channel, which also winds the loop down.
pub struct PollHandle {
    stop: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(&self) {
        let _ = self.stop.send(());
    }

    // Wait for the loop to exit, however it ended.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

// Issue `fetch` every `period` and hand each result to `on_result`. Ticks are
// serialized: the next one is only scheduled after the previous response has
// been fully processed, so a round trip longer than the period skips ticks
// instead of overlapping them. A failed fetch is logged and treated as "no
// new information" - the loop itself never dies from one bad tick. Returning
// ControlFlow::Break from `on_result` ends the loop from within.
pub fn start_polling<F, FFut, T, E, C, CFut>(
    period: Duration,
    mut fetch: F,
    mut on_result: C,
) -> PollHandle
where
    F: FnMut() -> FFut + Send + 'static,
    FFut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    C: FnMut(T) -> CFut + Send + 'static,
    CFut: Future<Output = ControlFlow<()>> + Send + 'static,
{
    let (stop, mut stop_rx) = broadcast::channel(1);
    let task = tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = stop_rx.recv() => break,
                _ = interval.tick() => {
                    let result = fetch().await;
                    // A stop that landed during the round trip discards the
                    // response instead of delivering it.
                    if stop_rx.try_recv().is_ok() {
                        break;
                    }
                    match result {
                        Ok(value) => {
                            if on_result(value).await.is_break() {
                                break;
                            }
                        }
                        Err(error) => warn!("poll tick failed: {error}"),
                    }
                }
            }
        }
        debug!("poll loop exited");
    });
    PollHandle { stop, task }
}
