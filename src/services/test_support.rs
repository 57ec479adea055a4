//! In-memory persistence boundary for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::external::DoorprizeStore;
use crate::models::{Employee, Event, Prize, RecordedWinner, Snapshot, Winner, WinnersApiResponse};
use crate::services::eligibility::eligible;

#[derive(Default)]
struct FakeData {
    employees: Vec<Employee>,
    prizes: Vec<Prize>,
    winners: Vec<Winner>,
    draw_error: Option<String>,
    reset_error: Option<String>,
    load_fails: bool,
    draw_delay: Option<Duration>,
    reset_delay: Option<Duration>,
}

pub(crate) struct FakeStore {
    data: Mutex<FakeData>,
    draw_calls: AtomicUsize,
    reset_calls: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn new(employees: Vec<Employee>, prizes: Vec<Prize>) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(FakeData {
                employees,
                prizes,
                ..Default::default()
            }),
            draw_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn fail_draw(&self, message: Option<&str>) {
        self.data.lock().unwrap().draw_error = message.map(str::to_string);
    }

    pub(crate) fn fail_reset(&self, message: Option<&str>) {
        self.data.lock().unwrap().reset_error = message.map(str::to_string);
    }

    pub(crate) fn fail_load(&self, fails: bool) {
        self.data.lock().unwrap().load_fails = fails;
    }

    pub(crate) fn set_draw_delay(&self, delay: Duration) {
        self.data.lock().unwrap().draw_delay = Some(delay);
    }

    pub(crate) fn set_reset_delay(&self, delay: Duration) {
        self.data.lock().unwrap().reset_delay = Some(delay);
    }

    pub(crate) fn draw_calls(&self) -> usize {
        self.draw_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DoorprizeStore for FakeStore {
    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        let data = self.data.lock().unwrap();
        Ok(Snapshot {
            event: Event {
                id: "ev1".to_string(),
                name: "Family Gathering".to_string(),
                date: None,
            },
            employees: data.employees.clone(),
            prizes: data.prizes.clone(),
            winners: data.winners.clone(),
            stats: None,
        })
    }

    async fn available_employees(&self, prize_id: &str) -> AppResult<Vec<Employee>> {
        let data = self.data.lock().unwrap();
        if data.load_fails {
            return Err(AppError::LoadFailed("Gagal memuat karyawan".to_string()));
        }
        let prize = data.prizes.iter().find(|p| p.id == prize_id);
        Ok(eligible(&data.employees, &data.winners, prize))
    }

    async fn record_winner(&self, prize_id: &str, employee_id: &str) -> AppResult<RecordedWinner> {
        self.draw_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.data.lock().unwrap().draw_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut data = self.data.lock().unwrap();
        if let Some(message) = &data.draw_error {
            return Err(AppError::Persistence(message.clone()));
        }
        let employee = data
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| AppError::Persistence(format!("Karyawan {employee_id} tidak ditemukan")))?;
        let prize = data
            .prizes
            .iter_mut()
            .find(|p| p.id == prize_id)
            .ok_or_else(|| AppError::Persistence(format!("Hadiah {prize_id} tidak ditemukan")))?;
        if prize.stock == 0 {
            return Err(AppError::Persistence("Stok hadiah habis".to_string()));
        }
        prize.stock -= 1;
        let snapshot = prize.clone();

        let winner = Winner {
            id: format!("w{}", data.winners.len() + 1),
            employee,
            winner_number: Some(snapshot.total_stock - snapshot.stock),
            prize: snapshot.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        data.winners.push(winner.clone());
        Ok(RecordedWinner {
            winner,
            stock: snapshot.stock,
        })
    }

    async fn reset(&self) -> AppResult<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.data.lock().unwrap().reset_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut data = self.data.lock().unwrap();
        if let Some(message) = &data.reset_error {
            return Err(AppError::Persistence(message.clone()));
        }
        data.winners.clear();
        for prize in data.prizes.iter_mut() {
            prize.stock = prize.total_stock;
        }
        Ok(())
    }

    async fn winners(&self) -> AppResult<WinnersApiResponse> {
        let data = self.data.lock().unwrap();
        Ok(WinnersApiResponse {
            winners: data.winners.clone(),
            prizes: data.prizes.clone(),
        })
    }
}
