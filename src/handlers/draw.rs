use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::DrawService;

#[utoipa::path(
    get,
    path = "/draw/state",
    tag = "draw",
    responses(
        (status = 200, description = "Current engine projection", body = DrawEngineView)
    )
)]
/// Read-only projection of the draw engine for the projector view
pub async fn get_state(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let view = service.view().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

#[utoipa::path(
    post,
    path = "/draw/start",
    tag = "draw",
    responses(
        (status = 200, description = "Draw started, or the guard that blocked it", body = StartOutcome)
    )
)]
/// Start a draw for the current prize.
/// A blocked start is not an error; the response names the blocking condition.
pub async fn start(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let outcome = service.start_draw().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}

#[utoipa::path(
    post,
    path = "/draw/next",
    tag = "draw",
    responses(
        (status = 200, description = "Carousel moved forward (or not, while drawing)", body = DrawEngineView)
    )
)]
pub async fn next_prize(service: web::Data<DrawService>) -> Result<HttpResponse> {
    service.next_prize().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.view().await)))
}

#[utoipa::path(
    post,
    path = "/draw/prev",
    tag = "draw",
    responses(
        (status = 200, description = "Carousel moved backward (or not, while drawing)", body = DrawEngineView)
    )
)]
pub async fn prev_prize(service: web::Data<DrawService>) -> Result<HttpResponse> {
    service.prev_prize().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.view().await)))
}

#[utoipa::path(
    post,
    path = "/draw/reset",
    tag = "draw",
    responses(
        (status = 200, description = "Reset done or rejected while a winner is being saved", body = ResetOutcome),
        (status = 502, description = "Persistence service refused the reset")
    )
)]
/// Clear all winners and restore every prize's stock
pub async fn reset(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.reset().await {
        Ok(ResetOutcome::Reset) => Ok(HttpResponse::Ok().json(
            ApiResponse::success_with_message(ResetOutcome::Reset, "Undian telah direset"),
        )),
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/popup/dismiss",
    tag = "draw",
    request_body = DismissPopupRequest,
    responses(
        (status = 200, description = "Popup dismissed; winners overview when requested", body = WinnersOverview),
        (status = 502, description = "Winners could not be fetched")
    )
)]
pub async fn dismiss_popup(
    service: web::Data<DrawService>,
    payload: web::Json<DismissPopupRequest>,
) -> Result<HttpResponse> {
    match service.dismiss_popup(payload.action).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(overview))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draw/winners",
    tag = "draw",
    responses(
        (status = 200, description = "All winners grouped by prize", body = WinnersOverview),
        (status = 502, description = "Winners could not be fetched")
    )
)]
pub async fn get_winners(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.winners_overview().await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(overview))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/employees/reload",
    tag = "draw",
    responses(
        (status = 200, description = "Number of eligible employees for the current prize", body = usize),
        (status = 502, description = "Employees could not be loaded")
    )
)]
pub async fn reload_employees(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.reload_employees().await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(count))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draw/notifications",
    tag = "draw",
    responses(
        (status = 200, description = "Pending notifications, removed once read", body = [Notification])
    )
)]
pub async fn take_notifications(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let notifications = service.take_notifications().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(notifications)))
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draw")
            .route("/state", web::get().to(get_state))
            .route("/start", web::post().to(start))
            .route("/next", web::post().to(next_prize))
            .route("/prev", web::post().to(prev_prize))
            .route("/reset", web::post().to(reset))
            .route("/popup/dismiss", web::post().to(dismiss_popup))
            .route("/winners", web::get().to(get_winners))
            .route("/employees/reload", web::post().to(reload_employees))
            .route("/notifications", web::get().to(take_notifications)),
    );
}
