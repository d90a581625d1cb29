use common::error::Result;

use crate::model::events::UiEvent;
use crate::service::MatchContext;

// Final summary fetch. Fires once per match; re-entry is the caller's
// problem (the sync machine's result guard).
pub struct ResultFlow {
    ctx: MatchContext,
}

impl ResultFlow {
    pub fn new(ctx: MatchContext) -> Self {
        ResultFlow { ctx }
    }

    pub async fn show(&self) -> Result<()> {
        let result = self.ctx.api.fetch_result(&self.ctx.session.room).await?;
        self.ctx.emit(UiEvent::MatchFinished { result }).await;
        Ok(())
    }
}
