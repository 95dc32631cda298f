//! # Program Handlers
//!
//! Majors, the programs offered for a major, program details, and the
//! question endpoint. Every handler only reads the shared advisor.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use abroad_rag::prompts::advisor::frame_question;
use abroad_rag::{Answer, ProgramDetails, QueryError};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

// --- API Payloads ---

#[derive(Serialize, Deserialize)]
pub struct MajorsResponse {
    pub majors: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ProgramsResponse {
    pub major: String,
    pub programs: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AskRequest {
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub question: String,
}

// --- Handlers ---

/// `GET /majors`: the sorted major vocabulary.
pub async fn majors_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<MajorsResponse>> {
    let majors = app_state.advisor.majors().to_vec();
    wrap_response(MajorsResponse { majors }, debug_params, None)
}

/// `GET /majors/{major}/programs`: programs whose study areas match the major.
pub async fn programs_for_major_handler(
    State(app_state): State<AppState>,
    Path(major): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<ProgramsResponse>>, AppError> {
    let programs = app_state.advisor.programs_for_major(&major)?.to_vec();
    info!(%major, count = programs.len(), "Listing programs for major.");
    Ok(wrap_response(
        ProgramsResponse { major, programs },
        debug_params,
        None,
    ))
}

/// `GET /programs/{program}`: summary and link of one program.
pub async fn program_details_handler(
    State(app_state): State<AppState>,
    Path(program): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<ProgramDetails>>, AppError> {
    let details = app_state.advisor.program_details(&program)?;
    Ok(wrap_response(details, debug_params, None))
}

/// `POST /ask`: answers a question about one program.
///
/// A failing model call still returns `200` with a degraded answer. With
/// `?debug=true` the response also carries the assembled context and the
/// framed question.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ApiResponse<Answer>>, AppError> {
    info!(program = %payload.program, "Received question.");
    if payload.question.trim().is_empty() {
        return Err(QueryError::EmptyQuestion.into());
    }
    let advisor = &app_state.advisor;
    let context = advisor.context_for(&payload.program)?;
    let answer = advisor
        .ask_with_context(&payload.program, &payload.question, &context)
        .await;

    let debug_info = if debug_params.debug.unwrap_or(false) {
        Some(json!({
            "context": context,
            "framed_question": frame_question(&payload.program, &payload.question),
        }))
    } else {
        None
    };
    Ok(wrap_response(answer, debug_params, debug_info))
}
