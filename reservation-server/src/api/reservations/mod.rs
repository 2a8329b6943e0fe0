//! Reservation API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list).post(handler::create))
}
