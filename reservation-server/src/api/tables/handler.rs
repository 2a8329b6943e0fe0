//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DiningTable, DiningTableCreate, TableCreated, TableList};

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<TableList>> {
    let tables = state.tables().find_all().await?;
    Ok(Json(TableList { tables }))
}

/// GET /tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let Ok(table_id) = id.trim().parse::<i64>() else {
        return Err(AppError::table_not_found(id));
    };
    let table = state
        .tables()
        .find_by_id(table_id)
        .await?
        .ok_or_else(|| AppError::table_not_found(table_id))?;
    Ok(Json(table))
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<DiningTableCreate>,
) -> AppResult<Json<TableCreated>> {
    let table = state.tables().create(payload).await?;
    tracing::info!(id = table.id, number = table.number, places = table.places, "Table created");
    Ok(Json(TableCreated { id: table.id }))
}
