use crate::error::AppResult;
use crate::models::{DrawPhase, NotificationLevel, ResetOutcome};
use crate::services::DrawService;

impl DrawService {
    /// Clear all winners and restore every prize's stock.
    ///
    /// Rejected while a winner is being recorded or another reset is running.
    /// A spin in progress is aborted before the request goes out. When the
    /// request fails, winners, stock, carousel position and popups stay as they were.
    pub async fn reset(&self) -> AppResult<ResetOutcome> {
        {
            let mut state = self.state().lock().await;
            if state.closed || state.phase == DrawPhase::Committing || state.resetting {
                log::debug!("Reset ignored while {:?}", state.phase);
                return Ok(ResetOutcome::Rejected);
            }
            if state.phase == DrawPhase::Spinning {
                state.abort_draw();
                state.displayed_employee = None;
                state.tick_count = 0;
            }
            state.resetting = true;
        }

        log::info!("Resetting all winners");
        let result = self.call("reset", self.store().reset()).await;

        let request = {
            let mut state = self.state().lock().await;
            state.resetting = false;
            if let Err(e) = result {
                log::error!("Reset failed: {e}");
                state.notify(NotificationLevel::Error, e.user_message());
                return Err(e);
            }

            state.winners.clear();
            for prize in state.prizes.iter_mut() {
                prize.stock = prize.total_stock;
            }
            state.carousel.reset();
            state.clear_popups();
            state.abort_draw();
            state.displayed_employee = None;
            state.last_winner = None;
            state.tick_count = 0;
            state.revision += 1;
            state.notify(NotificationLevel::Info, "Undian telah direset".to_string());
            state.invalidate_pool()
        };

        if let Some(request) = request
            && let Err(e) = self.fetch_pool(request).await
        {
            log::warn!("Employee load after reset failed: {e}");
        }

        log::info!("Reset completed");
        Ok(ResetOutcome::Reset)
    }
}
