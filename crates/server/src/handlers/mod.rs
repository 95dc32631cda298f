//! # API Route Handlers
//!
//! The Axum route handlers for `abroad-rag-server`, split by concern:
//! `general` for liveness endpoints and `programs` for the major, program
//! and question flow.

pub mod general;
pub mod programs;

pub use general::*;
pub use programs::*;

use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use serde_json::Value;

/// Wraps a successful result in the standard `ApiResponse` envelope, adding
/// debug information only when the request asked for it.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}
