use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::DrawConfig;
use crate::error::{AppError, AppResult};
use crate::external::DoorprizeStore;
use crate::models::{
    Blocked, DrawEngineView, DrawPhase, Employee, Notification, NotificationLevel, Popup,
    PopupAction, Prize, StartOutcome, WinnersOverview,
};
use crate::services::draw_state::{ActiveDraw, DrawEngineState, PoolRequest, group_winners};
use crate::services::selector::pick_random;
use crate::services::spin_scheduler::{SpinEnd, SpinScheduler, interval_at};

/// Controller of one drawing session.
///
/// All state lives in [`DrawEngineState`] behind a single lock, so every
/// operation observes and mutates it atomically. Timers (spin ticks, popup
/// delay) run as tokio tasks tied to cancellation tokens derived from the
/// session token, which `teardown` cancels as a whole.
#[derive(Clone)]
pub struct DrawService {
    store: Arc<dyn DoorprizeStore>,
    config: DrawConfig,
    state: Arc<Mutex<DrawEngineState>>,
    session: CancellationToken,
}

impl DrawService {
    /// Load the initial snapshot and bring the engine up idle on the first prize
    pub async fn bootstrap(store: Arc<dyn DoorprizeStore>, config: DrawConfig) -> AppResult<Self> {
        let snapshot = tokio::time::timeout(config.request_timeout(), store.load_snapshot())
            .await
            .map_err(|_| AppError::Timeout("load snapshot".to_string()))??;
        let state = DrawEngineState::from_snapshot(snapshot, config.max_notifications)?;

        let service = Self {
            store,
            config,
            state: Arc::new(Mutex::new(state)),
            session: CancellationToken::new(),
        };

        let request = service.state.lock().await.invalidate_pool();
        if let Some(request) = request
            && let Err(e) = service.fetch_pool(request).await
        {
            log::warn!("Initial employee load failed: {e}");
        }

        Ok(service)
    }

    pub async fn view(&self) -> DrawEngineView {
        self.state.lock().await.view()
    }

    pub async fn take_notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.drain(..).collect()
    }

    /// Start a draw for the current prize.
    ///
    /// A violated guard is not an error: nothing changes and the blocking
    /// condition is reported back.
    pub async fn start_draw(&self) -> StartOutcome {
        let mut state = self.state.lock().await;
        if let Some(reason) = state.blocked() {
            log::debug!("Start draw ignored: {reason:?}");
            return StartOutcome::Blocked { reason };
        }
        let Some(prize) = state.current_prize().cloned() else {
            return StartOutcome::Blocked {
                reason: Blocked::NoCurrentPrize,
            };
        };

        let draw_id = Uuid::new_v4();
        let token = self.session.child_token();
        let pool = state.pool.clone();

        state.phase = DrawPhase::Spinning;
        state.draw = Some(ActiveDraw {
            id: draw_id,
            prize_id: prize.id.clone(),
            spin_token: Some(token.clone()),
        });
        state.displayed_employee = None;
        state.tick_count = 0;
        state.spin_interval = Some(interval_at(Duration::ZERO));
        drop(state);

        log::info!(
            "Draw {draw_id} started for prize {} ({} eligible)",
            prize.id,
            pool.len()
        );

        let service = self.clone();
        tokio::spawn(async move {
            service.run_draw(draw_id, token, prize, pool).await;
        });

        StartOutcome::Started { draw_id }
    }

    async fn run_draw(
        &self,
        draw_id: Uuid,
        token: CancellationToken,
        prize: Prize,
        pool: Vec<Employee>,
    ) {
        let scheduler = SpinScheduler::new(token);
        let this = self;
        let ticks = &pool;
        let end = scheduler
            .run(move |tick, interval| this.apply_tick(draw_id, ticks, tick, interval))
            .await;

        if end == SpinEnd::Cancelled {
            log::debug!("Draw {draw_id} cancelled during spin");
            return;
        }

        // the committed winner is a fresh pick, independent of the last tick
        let pick = {
            let mut rng = rand::rng();
            pick_random(&mut rng, &pool).cloned()
        };

        let employee = {
            let mut state = self.state.lock().await;
            if !state.is_current_draw(draw_id) || state.phase != DrawPhase::Spinning {
                return;
            }
            match pick {
                Ok(employee) => {
                    state.phase = DrawPhase::Committing;
                    state.spin_interval = None;
                    state.displayed_employee = Some(employee.clone());
                    if let Some(draw) = state.draw.as_mut() {
                        draw.spin_token = None;
                    }
                    employee
                }
                Err(e) => {
                    state.abort_draw();
                    state.notify(NotificationLevel::Error, e.user_message());
                    return;
                }
            }
        };

        log::info!(
            "Draw {draw_id}: recording {} ({}) for prize {}",
            employee.name,
            employee.id,
            prize.id
        );
        let result = self
            .call("record winner", self.store.record_winner(&prize.id, &employee.id))
            .await;

        let request = {
            let mut state = self.state.lock().await;
            state.draw = None;
            state.phase = DrawPhase::Idle;
            if state.closed {
                log::info!("Draw {draw_id} finished after teardown, result dropped");
                return;
            }

            match result {
                Ok(recorded) => {
                    log::info!(
                        "Draw {draw_id}: winner #{} confirmed, prize {} stock now {}",
                        recorded.winner.winner_number.unwrap_or_default(),
                        prize.id,
                        recorded.stock
                    );
                    if let Some(popup) = state.apply_recorded(&prize.id, recorded) {
                        self.schedule_popup(&mut state, popup);
                    }
                    state.invalidate_pool()
                }
                Err(e) => {
                    log::error!("Draw {draw_id}: failed to record winner: {e}");
                    state.notify(NotificationLevel::Error, e.user_message());
                    None
                }
            }
        };

        if let Some(request) = request
            && let Err(e) = self.fetch_pool(request).await
        {
            log::warn!("Employee refresh after draw {draw_id} failed: {e}");
        }
    }

    async fn apply_tick(&self, draw_id: Uuid, pool: &[Employee], tick: u32, interval: Duration) {
        let picked = {
            let mut rng = rand::rng();
            pick_random(&mut rng, pool).ok().cloned()
        };

        let mut state = self.state.lock().await;
        if !state.is_current_draw(draw_id) || state.phase != DrawPhase::Spinning {
            return;
        }
        state.displayed_employee = picked;
        state.tick_count = tick;
        state.spin_interval = Some(interval);
    }

    /// Queue a popup behind the configured delay. Must be called with the state lock held.
    fn schedule_popup(&self, state: &mut DrawEngineState, popup: Popup) {
        let token = self.session.child_token();
        if let Some(previous) = state.popup_token.replace(token.clone()) {
            previous.cancel();
        }
        state.popups.schedule(popup);

        let service = self.clone();
        let delay = self.config.popup_delay();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => service.reveal_popup(&token).await,
            }
        });
    }

    async fn reveal_popup(&self, token: &CancellationToken) {
        let mut state = self.state.lock().await;
        if token.is_cancelled() || state.phase.is_busy() {
            return;
        }
        if let Some(popup) = state.popups.reveal() {
            log::info!("Showing popup {popup:?}");
        }
    }

    /// Close the visible popup. `ViewWinners` also returns the winners overview.
    pub async fn dismiss_popup(&self, action: PopupAction) -> AppResult<Option<WinnersOverview>> {
        let dismissed = {
            let mut state = self.state.lock().await;
            let dismissed = state.popups.dismiss();
            if dismissed.is_some() && !state.popups.is_active() {
                state.popup_token = None;
            }
            dismissed
        };
        if dismissed.is_none() {
            return Ok(None);
        }

        match action {
            PopupAction::Acknowledge => Ok(None),
            PopupAction::ViewWinners => self.winners_overview().await.map(Some),
        }
    }

    pub async fn next_prize(&self) -> bool {
        self.navigate(true).await
    }

    pub async fn prev_prize(&self) -> bool {
        self.navigate(false).await
    }

    async fn navigate(&self, forward: bool) -> bool {
        let request = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            if state.closed || state.phase.is_busy() || state.resetting {
                log::debug!("Navigation ignored while {:?}", state.phase);
                return false;
            }
            let moved = if forward {
                state.carousel.next(&state.prizes)
            } else {
                state.carousel.prev(&state.prizes)
            };
            if !moved {
                return false;
            }
            state.invalidate_pool()
        };

        if let Some(request) = request
            && let Err(e) = self.fetch_pool(request).await
        {
            log::warn!("Employee load after navigation failed: {e}");
        }
        true
    }

    /// Reload the eligible pool of the current prize, e.g. after a failed load
    pub async fn reload_employees(&self) -> AppResult<usize> {
        let request = {
            let mut state = self.state.lock().await;
            if state.closed {
                return Ok(0);
            }
            state.invalidate_pool()
        };
        if let Some(request) = request {
            self.fetch_pool(request).await?;
        }
        Ok(self.state.lock().await.pool.len())
    }

    /// Fetch the available employees for a pool request and apply the result
    /// unless a newer request or another prize superseded it.
    pub(crate) async fn fetch_pool(&self, request: PoolRequest) -> AppResult<()> {
        let result = self
            .call(
                "load available employees",
                self.store.available_employees(&request.prize_id),
            )
            .await;

        let mut state = self.state.lock().await;
        if !state.is_pending_load(&request) {
            log::warn!(
                "Discarding stale employee list for prize {}",
                request.prize_id
            );
            return Ok(());
        }

        match result {
            Ok(employees) => {
                state.apply_pool(&employees);
                log::debug!(
                    "Prize {}: {} eligible employees",
                    request.prize_id,
                    state.pool.len()
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to load employees for prize {}: {e}", request.prize_id);
                state.fail_pool(e.user_message());
                Err(e)
            }
        }
    }

    /// Fetch all winners, reconciling local winners and stock with the server
    /// when nothing was committed or reset while the request was in flight.
    pub async fn winners_overview(&self) -> AppResult<WinnersOverview> {
        let revision = self.state.lock().await.revision;
        let result = self.call("fetch winners", self.store.winners()).await;

        let mut state = self.state.lock().await;
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to fetch winners: {e}");
                state.notify(NotificationLevel::Error, e.user_message());
                return Err(e);
            }
        };

        let overview = group_winners(&data.prizes, &data.winners);
        if state.revision != revision || state.phase.is_busy() || state.resetting {
            log::debug!("Winners changed during fetch, local state kept");
            return Ok(overview);
        }

        if let Err(e) = state.reconcile(data.winners, data.prizes) {
            log::warn!("Ignoring inconsistent winners response: {e}");
            return Ok(overview);
        }
        let request = state.invalidate_pool();
        drop(state);

        if let Some(request) = request
            && let Err(e) = self.fetch_pool(request).await
        {
            log::warn!("Employee refresh after winners fetch failed: {e}");
        }
        Ok(overview)
    }

    /// Cancel every timer of the session. In-flight requests complete but
    /// their results are dropped; later operations are no-ops.
    pub async fn teardown(&self) {
        self.session.cancel();
        let mut state = self.state.lock().await;
        state.closed = true;
        if state.phase == DrawPhase::Spinning {
            state.abort_draw();
        }
        state.clear_popups();
        log::info!("Draw session closed");
    }

    /// Bound an external call by the configured timeout
    pub(crate) async fn call<T>(
        &self,
        what: &str,
        request: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.config.request_timeout(), request).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(what.to_string())),
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn DoorprizeStore> {
        &self.store
    }

    pub(crate) fn state(&self) -> &Arc<Mutex<DrawEngineState>> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Banner;
    use crate::services::eligibility::tests::{employee, prize};
    use crate::services::test_support::FakeStore;

    const AFTER_SPIN: Duration = Duration::from_millis(5001);
    const POPUP_DELAY: Duration = Duration::from_millis(2000);

    async fn service(store: &Arc<FakeStore>) -> DrawService {
        DrawService::bootstrap(store.clone(), DrawConfig::default())
            .await
            .unwrap()
    }

    fn assert_stock_invariant(view: &DrawEngineView) {
        for prize in &view.prizes {
            assert!(prize.stock <= prize.total_stock, "prize {} out of range", prize.id);
        }
    }

    fn three_employees() -> Vec<Employee> {
        vec![employee("e1"), employee("e2"), employee("e3")]
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_unit_shows_stock_finished_popup() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 1, 5), prize("p2", 2, 2)]);
        let service = service(&store).await;
        assert!(service.view().await.can_start);

        assert!(service.start_draw().await.is_started());
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Spinning);
        assert_eq!(view.label.as_deref(), Some("Mengundi..."));

        tokio::time::sleep(AFTER_SPIN).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.winners.len(), 1);
        assert_eq!(view.prizes[0].stock, 0);
        assert_eq!(view.winners[0].winner_number, Some(5));
        assert_eq!(view.popup, None);
        assert_stock_invariant(&view);
        // p1 dropped out of the rotation
        assert_eq!(view.current_prize.unwrap().id, "p2");
        assert_eq!(store.draw_calls(), 1);

        tokio::time::sleep(POPUP_DELAY).await;
        let view = service.view().await;
        assert_eq!(
            view.popup,
            Some(Popup::StockFinished {
                prize_id: "p1".into(),
                prize_name: "Hadiah p1".into(),
            })
        );
        assert_eq!(view.blocked, Some(Blocked::PopupPending));

        service.dismiss_popup(PopupAction::Acknowledge).await.unwrap();
        assert!(service.view().await.can_start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_prize_shows_finished_popup_only() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 1, 5), prize("p2", 0, 2)]);
        let service = service(&store).await;

        assert!(service.start_draw().await.is_started());
        tokio::time::sleep(AFTER_SPIN).await;
        tokio::time::sleep(POPUP_DELAY).await;

        let view = service.view().await;
        assert_eq!(view.popup, Some(Popup::Finished));
        assert!(view.all_prizes_finished);
        assert!(view.current_prize.is_none());

        let overview = service
            .dismiss_popup(PopupAction::ViewWinners)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(overview.total_winners, 1);
        assert_eq!(service.view().await.popup, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_spinning_is_noop() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 3, 3)]);
        let service = service(&store).await;

        let first = service.start_draw().await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        let before = service.view().await;

        let second = service.start_draw().await;
        assert_eq!(
            second,
            StartOutcome::Blocked {
                reason: Blocked::AlreadySpinning
            }
        );
        let after = service.view().await;
        assert_eq!(after.phase, DrawPhase::Spinning);
        assert_eq!(after.tick_count, before.tick_count);
        assert!(first.is_started());

        tokio::time::sleep(AFTER_SPIN).await;
        assert_eq!(service.view().await.winners.len(), 1);
        assert_eq!(store.draw_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_ticks_decelerate() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 3, 3)]);
        let service = service(&store).await;
        service.start_draw().await;

        tokio::time::sleep(Duration::from_millis(1025)).await;
        let view = service.view().await;
        assert_eq!(view.tick_count, 20);
        assert_eq!(view.spin_interval_ms, Some(50));
        assert!(view.displayed_employee.is_some());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let view = service.view().await;
        assert_eq!(view.tick_count, 56);
        assert_eq!(view.spin_interval_ms, Some(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_blocked_while_spinning() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 3, 3), prize("p2", 1, 1)]);
        let service = service(&store).await;

        service.start_draw().await;
        assert!(!service.next_prize().await);
        assert!(!service.prev_prize().await);
        assert_eq!(service.view().await.current_prize_index, 0);

        tokio::time::sleep(AFTER_SPIN).await;
        assert!(service.next_prize().await);
        assert_eq!(service.view().await.current_prize.unwrap().id, "p2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_prizes_exhausted_rejects_start() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 0, 1), prize("p2", 0, 2)]);
        let service = service(&store).await;

        let view = service.view().await;
        assert!(view.all_prizes_finished);
        assert!(view.current_prize.is_none());
        assert_eq!(
            service.start_draw().await,
            StartOutcome::Blocked {
                reason: Blocked::NoCurrentPrize
            }
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.tick_count, 0);
        assert_eq!(store.draw_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_commit_leaves_stock_unchanged() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 2, 2)]);
        store.fail_draw(Some("Database sedang sibuk"));
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;

        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.prizes[0].stock, 2);
        assert!(view.winners.is_empty());
        assert!(view.can_start);

        let notifications = service.take_notifications().await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert_eq!(notifications[0].message, "Database sedang sibuk");
        assert!(service.take_notifications().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_commit_times_out() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 2, 2)]);
        store.set_draw_delay(Duration::from_secs(60));
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;
        assert_eq!(service.view().await.phase, DrawPhase::Committing);

        tokio::time::sleep(DrawConfig::default().request_timeout()).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.prizes[0].stock, 2);
        assert_eq!(service.take_notifications().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_rejected_while_committing() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 2, 2)]);
        store.set_draw_delay(Duration::from_secs(3));
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Committing);
        assert_eq!(view.label.as_deref(), Some("Menyimpan..."));
        assert!(!view.can_reset);
        assert_eq!(
            service.start_draw().await,
            StartOutcome::Blocked {
                reason: Blocked::Committing
            }
        );

        tokio::time::sleep(Duration::from_secs(3)).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.winners.len(), 1);
        assert_eq!(store.draw_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_winner_numbers_are_per_prize() {
        let employees: Vec<Employee> = (1..=6).map(|i| employee(&format!("e{i}"))).collect();
        let store = FakeStore::new(employees, vec![prize("p1", 3, 3), prize("p2", 2, 2)]);
        let service = service(&store).await;

        let draws = ["p1", "p2", "p1", "p2", "p1"];
        for expected in draws {
            let view = service.view().await;
            if view.current_prize.as_ref().unwrap().id != expected {
                assert!(service.next_prize().await);
            }
            assert!(service.start_draw().await.is_started());
            tokio::time::sleep(AFTER_SPIN).await;
            tokio::time::sleep(POPUP_DELAY).await;
            service.dismiss_popup(PopupAction::Acknowledge).await.unwrap();
            assert_stock_invariant(&service.view().await);
        }

        let view = service.view().await;
        for prize_id in ["p1", "p2"] {
            let numbers: Vec<u32> = view
                .winners
                .iter()
                .filter(|w| w.prize.id == prize_id)
                .filter_map(|w| w.winner_number)
                .collect();
            let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
            assert_eq!(numbers, expected);
        }
        assert!(view.all_prizes_finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_winner_leaves_pool() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 3, 3)]);
        let service = service(&store).await;
        assert_eq!(service.view().await.available_count, 3);

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;

        let view = service.view().await;
        let winner_id = view.winners[0].employee.id.clone();
        assert_eq!(view.available_count, 2);
        assert_eq!(view.displayed_employee.unwrap().id, winner_id);

        let state = service.state().lock().await;
        assert!(state.pool.iter().all(|e| e.id != winner_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_everyone_won_shows_empty_pool_banner() {
        let store = FakeStore::new(vec![employee("e1")], vec![prize("p1", 2, 2)]);
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;

        let view = service.view().await;
        assert_eq!(view.prizes[0].stock, 1);
        assert_eq!(view.banner, Some(Banner::EmptyPool));
        assert_eq!(view.blocked, Some(Blocked::EmptyPool));
        assert!(!service.start_draw().await.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_failure_blocks_until_reload() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 1, 1)]);
        store.fail_load(true);
        let service = service(&store).await;

        let view = service.view().await;
        assert!(matches!(view.banner, Some(Banner::LoadFailed { .. })));
        assert_eq!(view.blocked, Some(Blocked::LoadFailed));
        assert_eq!(view.available_count, 0);
        assert!(!view.can_start);

        assert!(service.reload_employees().await.is_err());
        store.fail_load(false);
        assert_eq!(service.reload_employees().await.unwrap(), 3);
        let view = service.view().await;
        assert_eq!(view.banner, None);
        assert!(view.can_start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_spin() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 1, 1)]);
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        service.teardown().await;
        let ticks = service.view().await.tick_count;

        tokio::time::sleep(Duration::from_secs(10)).await;
        let view = service.view().await;
        assert_eq!(view.phase, DrawPhase::Idle);
        assert_eq!(view.tick_count, ticks);
        assert!(view.winners.is_empty());
        assert_eq!(store.draw_calls(), 0);
        assert_eq!(
            service.start_draw().await,
            StartOutcome::Blocked {
                reason: Blocked::SessionClosed
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_winners_overview_matches_last_draw() {
        let store = FakeStore::new(three_employees(), vec![prize("p1", 3, 5), prize("p2", 1, 1)]);
        let service = service(&store).await;

        service.start_draw().await;
        tokio::time::sleep(AFTER_SPIN).await;
        let local = service.view().await.prizes[0].clone();

        let overview = service.winners_overview().await.unwrap();
        let group = overview
            .groups
            .iter()
            .find(|g| g.prize.id == "p1")
            .unwrap();
        assert_eq!(group.prize.stock, local.stock);
        assert_eq!(group.prize.total_stock, local.total_stock);
        assert_eq!(group.winners.len(), 1);

        let view = service.view().await;
        assert_eq!(view.prizes[0].stock, 2);
        assert_eq!(view.winners.len(), 1);
    }
}
