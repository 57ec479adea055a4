use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee taking part in the drawing. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: String,
    pub name: String,
}

/// Prize configured for the event.
///
/// `stock` is the only field that changes during a session and always stays
/// within `0..=total_stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub color_tag: Option<String>,
    pub stock: u32,
    pub total_stock: u32,
}

impl Prize {
    /// Whether the prize still has units left to draw
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Clamp `stock` back into `0..=total_stock`, returning true if it was out of range.
    pub fn clamp_stock(&mut self) -> bool {
        if self.stock > self.total_stock {
            self.stock = self.total_stock;
            return true;
        }
        false
    }
}

/// Winner record. The employee and prize are snapshots taken at win time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub id: String,
    pub employee: Employee,
    pub prize: Prize,
    pub timestamp: String,
    /// 1-based rank among the winners of this prize
    #[serde(default)]
    pub winner_number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Initial page-load snapshot handed to the engine at bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub event: Event,
    pub employees: Vec<Employee>,
    pub prizes: Vec<Prize>,
    #[serde(default)]
    pub winners: Vec<Winner>,
    /// Server-side statistics are recomputed locally and only kept for logging
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableEmployeesResponse {
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    pub prize_id: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeStock {
    pub stock: u32,
}

/// Raw `POST draw` response from the persistence boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawApiResponse {
    pub success: bool,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub prize: Option<PrizeStock>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetApiResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnersApiResponse {
    pub winners: Vec<Winner>,
    pub prizes: Vec<Prize>,
}

/// Confirmed result of recording a winner
#[derive(Debug, Clone)]
pub struct RecordedWinner {
    pub winner: Winner,
    /// Server-confirmed stock of the prize after the decrement
    pub stock: u32,
}
