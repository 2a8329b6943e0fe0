//! Reservation API Handlers

use axum::{Json, extract::State};
use shared::models::{ReservationCreated, ReservationList, ReservationRequest};

use crate::auth::MaybeCaller;
use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /reservations - 获取所有预订
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ReservationList>> {
    let reservations = state.reservations().find_all().await?;
    Ok(Json(ReservationList { reservations }))
}

/// POST /reservations - 提交预订
pub async fn create(
    State(state): State<ServerState>,
    MaybeCaller(caller): MaybeCaller,
    AppJson(payload): AppJson<ReservationRequest>,
) -> AppResult<Json<ReservationCreated>> {
    let reservation_id = state.admission.admit(caller.as_ref(), payload).await?;
    Ok(Json(ReservationCreated { reservation_id }))
}
