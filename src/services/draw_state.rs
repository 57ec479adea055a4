use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Banner, Blocked, DrawEngineView, DrawPhase, DrawStats, Employee, Event, Notification,
    NotificationLevel, Popup, Prize, PrizeWinners, RecordedWinner, Snapshot, Winner,
    WinnersOverview,
};
use crate::services::carousel::PrizeCarousel;
use crate::services::eligibility::eligible;
use crate::services::popup_sequencer::{PopupSequencer, popup_after_commit};

/// Draw currently in flight
#[derive(Debug)]
pub(crate) struct ActiveDraw {
    pub id: Uuid,
    pub prize_id: String,
    /// Spin timers; released once the draw reaches the commit
    pub spin_token: Option<CancellationToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PoolStatus {
    Ready,
    Loading,
    Failed(String),
}

/// Outstanding available-employee fetch
#[derive(Debug, Clone)]
pub(crate) struct PoolRequest {
    pub generation: u64,
    pub prize_id: String,
}

/// Everything the engine knows about the running session.
///
/// Owned by [`DrawService`](super::DrawService) behind one lock; the view
/// layer only ever sees [`DrawEngineView`].
#[derive(Debug)]
pub struct DrawEngineState {
    pub(crate) event: Event,
    pub(crate) employees: Vec<Employee>,
    pub(crate) prizes: Vec<Prize>,
    pub(crate) winners: Vec<Winner>,
    pub(crate) carousel: PrizeCarousel,
    pub(crate) phase: DrawPhase,
    pub(crate) draw: Option<ActiveDraw>,
    pub(crate) displayed_employee: Option<Employee>,
    pub(crate) tick_count: u32,
    pub(crate) spin_interval: Option<Duration>,
    pub(crate) last_winner: Option<Winner>,
    pub(crate) pool: Vec<Employee>,
    pub(crate) pool_status: PoolStatus,
    pub(crate) load_generation: u64,
    pub(crate) resetting: bool,
    /// Bumped by every commit and reset
    pub(crate) revision: u64,
    pub(crate) popups: PopupSequencer,
    pub(crate) popup_token: Option<CancellationToken>,
    pub(crate) notifications: VecDeque<Notification>,
    pub(crate) max_notifications: usize,
    pub(crate) closed: bool,
}

impl DrawEngineState {
    pub fn from_snapshot(snapshot: Snapshot, max_notifications: usize) -> AppResult<Self> {
        let prizes = sanitize_prizes(snapshot.prizes)?;
        let winners = number_winners(snapshot.winners);

        log::info!(
            "Loaded event {} ({}): {} employees, {} prizes, {} winners",
            snapshot.event.id,
            snapshot.event.name,
            snapshot.employees.len(),
            prizes.len(),
            winners.len()
        );

        Ok(Self {
            event: snapshot.event,
            employees: snapshot.employees,
            prizes,
            winners,
            carousel: PrizeCarousel::new(),
            phase: DrawPhase::Idle,
            draw: None,
            displayed_employee: None,
            tick_count: 0,
            spin_interval: None,
            last_winner: None,
            pool: Vec::new(),
            pool_status: PoolStatus::Ready,
            load_generation: 0,
            resetting: false,
            revision: 0,
            popups: PopupSequencer::default(),
            popup_token: None,
            notifications: VecDeque::new(),
            max_notifications,
            closed: false,
        })
    }

    pub fn current_prize(&self) -> Option<&Prize> {
        self.carousel.current(&self.prizes)
    }

    pub fn all_prizes_finished(&self) -> bool {
        self.prizes.iter().all(|p| p.stock == 0)
    }

    pub(crate) fn is_current_draw(&self, draw_id: Uuid) -> bool {
        self.draw.as_ref().is_some_and(|d| d.id == draw_id)
    }

    /// First guard that keeps a draw from starting, if any
    pub fn blocked(&self) -> Option<Blocked> {
        if self.closed {
            return Some(Blocked::SessionClosed);
        }
        match self.phase {
            DrawPhase::Spinning => return Some(Blocked::AlreadySpinning),
            DrawPhase::Committing => return Some(Blocked::Committing),
            DrawPhase::Idle => {}
        }
        if self.resetting {
            return Some(Blocked::Resetting);
        }
        if self.popups.is_active() {
            return Some(Blocked::PopupPending);
        }
        let Some(prize) = self.current_prize() else {
            return Some(Blocked::NoCurrentPrize);
        };
        if prize.stock == 0 {
            return Some(Blocked::OutOfStock);
        }
        match self.pool_status {
            PoolStatus::Loading => return Some(Blocked::EmployeesLoading),
            PoolStatus::Failed(_) => return Some(Blocked::LoadFailed),
            PoolStatus::Ready => {}
        }
        if self.pool.is_empty() {
            return Some(Blocked::EmptyPool);
        }
        None
    }

    /// Recompute the pool for the current prize from local data and mark a
    /// server refresh as due. Any fetch still in flight becomes stale.
    pub(crate) fn invalidate_pool(&mut self) -> Option<PoolRequest> {
        self.load_generation += 1;
        let current = self.current_prize().cloned();
        self.pool = eligible(&self.employees, &self.winners, current.as_ref());
        match current {
            Some(prize) => {
                self.pool_status = PoolStatus::Loading;
                Some(PoolRequest {
                    generation: self.load_generation,
                    prize_id: prize.id,
                })
            }
            None => {
                self.pool_status = PoolStatus::Ready;
                None
            }
        }
    }

    /// Whether a fetch result still matches the prize on screen
    pub(crate) fn is_pending_load(&self, request: &PoolRequest) -> bool {
        self.load_generation == request.generation
            && self
                .current_prize()
                .is_some_and(|p| p.id == request.prize_id)
    }

    pub(crate) fn apply_pool(&mut self, employees: &[Employee]) {
        let current = self.current_prize().cloned();
        self.pool = eligible(employees, &self.winners, current.as_ref());
        self.pool_status = PoolStatus::Ready;
    }

    pub(crate) fn fail_pool(&mut self, message: String) {
        self.pool.clear();
        self.pool_status = PoolStatus::Failed(message);
    }

    /// Apply a confirmed winner. Returns the popup the commit triggers, if any.
    pub(crate) fn apply_recorded(
        &mut self,
        prize_id: &str,
        recorded: RecordedWinner,
    ) -> Option<Popup> {
        let mut winner = recorded.winner;
        let drawn = match self.prizes.iter_mut().find(|p| p.id == prize_id) {
            Some(prize) => {
                prize.stock = recorded.stock;
                if prize.clamp_stock() {
                    log::warn!(
                        "Server stock {} for prize {} exceeds total {}, clamped",
                        recorded.stock,
                        prize.id,
                        prize.total_stock
                    );
                }
                if winner.winner_number.is_none() {
                    let derived = prize.total_stock - prize.stock;
                    if derived == 0 {
                        log::warn!(
                            "Prize {} reports full stock after a win, numbering winner as 1",
                            prize.id
                        );
                    }
                    winner.winner_number = Some(derived.max(1));
                }
                prize.clone()
            }
            None => {
                log::warn!("Recorded winner for unknown prize {prize_id}");
                self.winners.push(winner.clone());
                self.last_winner = Some(winner);
                self.revision += 1;
                return None;
            }
        };

        self.winners.push(winner.clone());
        self.last_winner = Some(winner);
        self.revision += 1;
        self.carousel.normalize(&self.prizes);

        popup_after_commit(&drawn, &self.prizes)
    }

    /// Replace winners and prizes with the server's view
    pub(crate) fn reconcile(&mut self, winners: Vec<Winner>, prizes: Vec<Prize>) -> AppResult<()> {
        self.prizes = sanitize_prizes(prizes)?;
        self.winners = number_winners(winners);
        self.carousel.normalize(&self.prizes);
        Ok(())
    }

    pub(crate) fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notifications.push_back(Notification {
            level,
            message,
            created_at: Utc::now(),
        });
        while self.notifications.len() > self.max_notifications {
            self.notifications.pop_front();
        }
    }

    /// Drop the spin timers and the draw record, back to idle
    pub(crate) fn abort_draw(&mut self) {
        if let Some(draw) = self.draw.take() {
            if let Some(token) = draw.spin_token {
                token.cancel();
            }
            log::info!("Draw {} for prize {} aborted", draw.id, draw.prize_id);
        }
        self.phase = DrawPhase::Idle;
        self.spin_interval = None;
    }

    pub(crate) fn clear_popups(&mut self) {
        if let Some(token) = self.popup_token.take() {
            token.cancel();
        }
        self.popups.clear();
    }

    pub fn stats(&self) -> DrawStats {
        DrawStats {
            total_employees: self.employees.len(),
            total_winners: self.winners.len(),
            total_prizes: self.prizes.len(),
            remaining_stock: self.prizes.iter().map(|p| p.stock).sum(),
            total_stock: self.prizes.iter().map(|p| p.total_stock).sum(),
        }
    }

    fn banner(&self) -> Option<Banner> {
        self.current_prize()?;
        match &self.pool_status {
            PoolStatus::Loading => Some(Banner::Loading),
            PoolStatus::Failed(message) => Some(Banner::LoadFailed {
                message: message.clone(),
            }),
            PoolStatus::Ready if self.pool.is_empty() => Some(Banner::EmptyPool),
            PoolStatus::Ready => None,
        }
    }

    pub fn view(&self) -> DrawEngineView {
        let blocked = self.blocked();
        let carousel: Vec<Prize> = PrizeCarousel::entries(&self.prizes)
            .into_iter()
            .cloned()
            .collect();

        DrawEngineView {
            event: self.event.clone(),
            phase: self.phase,
            label: self.phase.label().map(str::to_string),
            current_prize_index: self.carousel.index(),
            current_prize: self.current_prize().cloned(),
            can_navigate: !self.closed
                && !self.phase.is_busy()
                && !self.resetting
                && carousel.len() > 1,
            carousel,
            prizes: self.prizes.clone(),
            winners: self.winners.clone(),
            last_winner: self.last_winner.clone(),
            displayed_employee: self.displayed_employee.clone(),
            tick_count: self.tick_count,
            spin_interval_ms: self.spin_interval.map(|d| d.as_millis() as u64),
            available_count: self.pool.len(),
            all_prizes_finished: self.all_prizes_finished(),
            can_start: blocked.is_none(),
            can_reset: !self.closed && self.phase != DrawPhase::Committing && !self.resetting,
            blocked,
            banner: self.banner(),
            popup: self.popups.visible().cloned(),
            stats: self.stats(),
        }
    }
}

/// Enforce `total_stock >= 1` and `stock <= total_stock`
fn sanitize_prizes(mut prizes: Vec<Prize>) -> AppResult<Vec<Prize>> {
    for prize in prizes.iter_mut() {
        if prize.total_stock == 0 {
            return Err(AppError::ValidationError(format!(
                "Prize {} has no total stock",
                prize.id
            )));
        }
        let reported = prize.stock;
        if prize.clamp_stock() {
            log::warn!(
                "Prize {} reports stock {} above total {}, clamped",
                prize.id,
                reported,
                prize.total_stock
            );
        }
    }
    Ok(prizes)
}

/// Fill in missing winner numbers from the order winners appear in
fn number_winners(mut winners: Vec<Winner>) -> Vec<Winner> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for winner in winners.iter_mut() {
        let count = counts.entry(winner.prize.id.clone()).or_insert(0);
        *count += 1;
        if winner.winner_number.is_none() {
            winner.winner_number = Some(*count);
        }
    }
    winners
}

/// Group winners by prize, in prize order, each group sorted by winner number
pub fn group_winners(prizes: &[Prize], winners: &[Winner]) -> WinnersOverview {
    let mut groups: Vec<PrizeWinners> = prizes
        .iter()
        .map(|prize| PrizeWinners {
            prize: prize.clone(),
            winners: Vec::new(),
        })
        .collect();

    for winner in winners {
        match groups.iter_mut().find(|g| g.prize.id == winner.prize.id) {
            Some(group) => group.winners.push(winner.clone()),
            // prize removed since the win; keep the snapshot
            None => groups.push(PrizeWinners {
                prize: winner.prize.clone(),
                winners: vec![winner.clone()],
            }),
        }
    }

    for group in groups.iter_mut() {
        group.winners.sort_by_key(|w| w.winner_number.unwrap_or(u32::MAX));
    }

    WinnersOverview {
        groups,
        total_winners: winners.len(),
    }
}
