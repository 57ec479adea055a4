use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Employee, RecordedWinner, Snapshot, WinnersApiResponse};

/// Request/response boundary to the system of record.
///
/// The engine never touches persistence directly; every durable change goes
/// through one of these calls and the engine only applies confirmed results.
#[async_trait]
pub trait DoorprizeStore: Send + Sync {
    /// Initial page-load snapshot
    async fn load_snapshot(&self) -> AppResult<Snapshot>;

    /// Employees that have not yet won `prize_id`
    async fn available_employees(&self, prize_id: &str) -> AppResult<Vec<Employee>>;

    /// Durably record a winner; returns the winner and the confirmed stock
    async fn record_winner(&self, prize_id: &str, employee_id: &str) -> AppResult<RecordedWinner>;

    /// Delete every winner and restore every prize stock
    async fn reset(&self) -> AppResult<()>;

    async fn winners(&self) -> AppResult<WinnersApiResponse>;
}
