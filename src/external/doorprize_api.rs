use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::DoorprizeConfig;
use crate::error::{AppError, AppResult};
use crate::external::DoorprizeStore;
use crate::models::{
    AvailableEmployeesResponse, DrawApiResponse, DrawRequest, Employee, RecordedWinner,
    ResetApiResponse, Snapshot, WinnersApiResponse,
};

/// Banner text when the available-employee list cannot be fetched
pub const LOAD_FAILED_MESSAGE: &str = "Gagal memuat karyawan";

/// HTTP client for the doorprize persistence service
#[derive(Clone)]
pub struct DoorprizeApi {
    client: Client,
    config: DoorprizeConfig,
}

impl DoorprizeApi {
    pub fn new(config: DoorprizeConfig, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await?;
        parse_body(status, &body)
    }
}

/// Parse a JSON body, keeping the status code in the error when the body is not JSON
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> AppResult<T> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(AppError::ExternalApiError(format!(
            "Doorprize API returned {status}: {body}"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Transport and decode failures never reach the banner verbatim
fn load_failed(prize_id: &str, err: AppError) -> AppError {
    log::warn!("Available employees for prize {prize_id} could not be fetched: {err}");
    AppError::LoadFailed(LOAD_FAILED_MESSAGE.to_string())
}

fn recorded_winner(result: DrawApiResponse) -> AppResult<RecordedWinner> {
    if !result.success {
        return Err(AppError::Persistence(
            result
                .error
                .unwrap_or_else(|| "Gagal menyimpan pemenang".to_string()),
        ));
    }

    match (result.winner, result.prize) {
        (Some(winner), Some(prize)) => Ok(RecordedWinner {
            winner,
            stock: prize.stock,
        }),
        _ => Err(AppError::Persistence(
            "Draw response is missing winner or prize stock".to_string(),
        )),
    }
}

fn reset_result(result: ResetApiResponse) -> AppResult<()> {
    if result.success {
        return Ok(());
    }
    Err(AppError::Persistence(
        result
            .error
            .unwrap_or_else(|| "Gagal mereset undian".to_string()),
    ))
}

#[async_trait]
impl DoorprizeStore for DoorprizeApi {
    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        let response = self
            .authorize(self.client.get(self.url("bootstrap")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn available_employees(&self, prize_id: &str) -> AppResult<Vec<Employee>> {
        let response = self
            .authorize(self.client.get(self.url("available-employees")))
            .query(&[("prizeId", prize_id)])
            .send()
            .await
            .map_err(|e| load_failed(prize_id, e.into()))?;

        let result: AvailableEmployeesResponse = Self::read_json(response)
            .await
            .map_err(|e| load_failed(prize_id, e))?;
        Ok(result.employees)
    }

    async fn record_winner(&self, prize_id: &str, employee_id: &str) -> AppResult<RecordedWinner> {
        let request = DrawRequest {
            prize_id: prize_id.to_string(),
            employee_id: employee_id.to_string(),
        };
        let response = self
            .authorize(self.client.post(self.url("draw")))
            .json(&request)
            .send()
            .await?;

        recorded_winner(Self::read_json(response).await?)
    }

    async fn reset(&self) -> AppResult<()> {
        let response = self
            .authorize(self.client.post(self.url("reset")))
            .send()
            .await?;

        reset_result(Self::read_json(response).await?)
    }

    async fn winners(&self) -> AppResult<WinnersApiResponse> {
        let response = self
            .authorize(self.client.get(self.url("winners")))
            .send()
            .await?;
        Self::read_json(response).await
    }
}
