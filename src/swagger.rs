use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draw::get_state,
        handlers::draw::start,
        handlers::draw::next_prize,
        handlers::draw::prev_prize,
        handlers::draw::reset,
        handlers::draw::dismiss_popup,
        handlers::draw::get_winners,
        handlers::draw::reload_employees,
        handlers::draw::take_notifications,
    ),
    components(
        schemas(
            Employee,
            Prize,
            Winner,
            Event,
            DrawPhase,
            Blocked,
            StartOutcome,
            ResetOutcome,
            Popup,
            PopupAction,
            DismissPopupRequest,
            Banner,
            NotificationLevel,
            Notification,
            DrawStats,
            DrawEngineView,
            PrizeWinners,
            WinnersOverview,
            ApiError,
        )
    ),
    tags(
        (name = "draw", description = "Doorprize draw API"),
    ),
    info(
        title = "Doorprize Draw Engine API",
        version = "1.0.0",
        description = "Controls the doorprize draw shown on the projector view"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
