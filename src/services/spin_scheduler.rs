//! Decelerating tick cadence of the spin animation.
//!
//! The spin runs for [`SPIN_DURATION`] and slows down in four fixed stages.
//! Ticks are scheduled against the spin start (`sleep_until`) so a slow tick
//! handler never stretches the total duration.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Total spin length before the winner is committed
pub const SPIN_DURATION: Duration = Duration::from_millis(5000);

/// `(stage end, tick interval)` in milliseconds
const SPIN_STAGES: [(u64, u64); 4] = [(2000, 50), (3000, 100), (4000, 200), (5000, 400)];

/// Tick interval in effect at `elapsed` into the spin
pub fn interval_at(elapsed: Duration) -> Duration {
    let ms = elapsed.as_millis() as u64;
    let interval = SPIN_STAGES
        .iter()
        .find(|(until, _)| ms < *until)
        .map(|(_, interval)| *interval)
        .unwrap_or(SPIN_STAGES[SPIN_STAGES.len() - 1].1);
    Duration::from_millis(interval)
}

/// Offsets from spin start at which a tick fires; all strictly before [`SPIN_DURATION`]
pub fn tick_offsets() -> impl Iterator<Item = Duration> {
    let mut at = Duration::ZERO;
    std::iter::from_fn(move || {
        at += interval_at(at);
        (at < SPIN_DURATION).then_some(at)
    })
}

/// Why a spin ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEnd {
    Completed,
    Cancelled,
}

/// One spin's timer set, released as a unit through its cancellation token.
pub struct SpinScheduler {
    token: CancellationToken,
}

impl SpinScheduler {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Drive the tick sequence, calling `on_tick(tick_number, next_interval)` at every tick.
    ///
    /// Returns [`SpinEnd::Completed`] once the full duration elapsed. After
    /// cancellation no further tick is delivered.
    pub async fn run<F, Fut>(&self, mut on_tick: F) -> SpinEnd
    where
        F: FnMut(u32, Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let start = Instant::now();

        for (index, offset) in tick_offsets().enumerate() {
            tokio::select! {
                _ = self.token.cancelled() => return SpinEnd::Cancelled,
                _ = sleep_until(start + offset) => {}
            }
            if self.token.is_cancelled() {
                return SpinEnd::Cancelled;
            }
            on_tick(index as u32 + 1, interval_at(offset)).await;
        }

        tokio::select! {
            _ = self.token.cancelled() => SpinEnd::Cancelled,
            _ = sleep_until(start + SPIN_DURATION) => {
                if self.token.is_cancelled() {
                    SpinEnd::Cancelled
                } else {
                    SpinEnd::Completed
                }
            }
        }
    }
}
