use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Employee, Event, Prize, Winner};

/// Phase of the draw session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    Idle,
    Spinning,
    Committing,
}

impl DrawPhase {
    /// Whether a draw is in flight (spin or commit)
    pub fn is_busy(&self) -> bool {
        !matches!(self, DrawPhase::Idle)
    }

    /// Status label shown on the projector
    pub fn label(&self) -> Option<&'static str> {
        match self {
            DrawPhase::Idle => None,
            DrawPhase::Spinning => Some("Mengundi..."),
            DrawPhase::Committing => Some("Menyimpan..."),
        }
    }
}

/// Guard condition that prevents a draw from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Blocked {
    AlreadySpinning,
    Committing,
    Resetting,
    NoCurrentPrize,
    OutOfStock,
    EmployeesLoading,
    LoadFailed,
    EmptyPool,
    PopupPending,
    SessionClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartOutcome {
    Started {
        #[serde(rename = "drawId")]
        draw_id: Uuid,
    },
    Blocked {
        reason: Blocked,
    },
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResetOutcome {
    Reset,
    /// A commit or another reset is in flight
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Popup {
    /// The current prize ran out while other prizes still have stock
    StockFinished {
        #[serde(rename = "prizeId")]
        prize_id: String,
        #[serde(rename = "prizeName")]
        prize_name: String,
    },
    /// Every prize ran out
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PopupAction {
    Acknowledge,
    ViewWinners,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DismissPopupRequest {
    pub action: PopupAction,
}

/// Persistent banner over the draw area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    Loading,
    /// Every employee already won the current prize
    EmptyPool,
    LoadFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient user-visible notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawStats {
    pub total_employees: usize,
    pub total_winners: usize,
    pub total_prizes: usize,
    pub remaining_stock: u32,
    pub total_stock: u32,
}

/// Read-only projection of the engine handed to the view layer
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawEngineView {
    pub event: Event,
    pub phase: DrawPhase,
    pub label: Option<String>,
    pub current_prize_index: usize,
    pub current_prize: Option<Prize>,
    /// Prizes still in the carousel
    pub carousel: Vec<Prize>,
    pub prizes: Vec<Prize>,
    pub winners: Vec<Winner>,
    pub last_winner: Option<Winner>,
    pub displayed_employee: Option<Employee>,
    pub tick_count: u32,
    pub spin_interval_ms: Option<u64>,
    pub available_count: usize,
    pub all_prizes_finished: bool,
    pub can_start: bool,
    pub can_navigate: bool,
    pub can_reset: bool,
    pub blocked: Option<Blocked>,
    pub banner: Option<Banner>,
    pub popup: Option<Popup>,
    pub stats: DrawStats,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeWinners {
    pub prize: Prize,
    pub winners: Vec<Winner>,
}

/// All winners grouped per prize, for the "view all winners" screen
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnersOverview {
    pub groups: Vec<PrizeWinners>,
    pub total_winners: usize,
}
