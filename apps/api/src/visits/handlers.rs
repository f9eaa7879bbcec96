use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::{Local, NaiveTime};
use tracing::info;

use crate::documents::{build_visit_report, visit_report_file_name};
use crate::errors::AppError;
use crate::models::visit::{Visit, VisitInput, EXIT_TIME_PENDING};
use crate::response::{created, pdf_attachment, render_document, success, Changes, Success};
use crate::state::AppState;
use crate::visits::repository::{
    delete_visit, get_visit, insert_visit, list_todays_visits, update_visit,
};

/// Trims every field; all are required. The exit time is either the pending
/// marker or an `HH:MM` clock time.
fn normalize(input: VisitInput) -> Result<VisitInput, AppError> {
    let normalized = VisitInput {
        visitor_name: input.visitor_name.trim().to_string(),
        id_number: input.id_number.trim().to_string(),
        destination: input.destination.trim().to_string(),
        reason: input.reason.trim().to_string(),
        entry_time: input.entry_time.trim().to_string(),
        exit_time: input.exit_time.trim().to_string(),
    };

    let complete = [
        &normalized.visitor_name,
        &normalized.id_number,
        &normalized.destination,
        &normalized.reason,
        &normalized.entry_time,
        &normalized.exit_time,
    ]
    .iter()
    .all(|value| !value.is_empty());

    if !complete {
        return Err(AppError::Validation(
            "All visit fields are required".to_string(),
        ));
    }

    let exit_time = normalized.exit_time.as_str();
    if exit_time != EXIT_TIME_PENDING && NaiveTime::parse_from_str(exit_time, "%H:%M").is_err() {
        return Err(AppError::Validation(format!(
            "horaSalida must be HH:MM or \"{EXIT_TIME_PENDING}\""
        )));
    }
    Ok(normalized)
}

async fn fetch_visit(state: &AppState, id: i64) -> Result<Visit, AppError> {
    get_visit(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visit {id} not found")))
}

/// GET /visits
pub async fn handle_list_visits(
    State(state): State<AppState>,
) -> Result<Json<Success<Vec<Visit>>>, AppError> {
    Ok(success(list_todays_visits(&state.db).await?))
}

/// POST /visits
pub async fn handle_create_visit(
    State(state): State<AppState>,
    Json(input): Json<VisitInput>,
) -> Result<(StatusCode, Json<Success<Visit>>), AppError> {
    let input = normalize(input)?;
    let id = insert_visit(&state.db, &input).await?;
    let visit = fetch_visit(&state, id).await?;

    info!(id, destination = %visit.destination, "Visit registered");
    Ok(created(visit))
}

/// PUT /visits/:id
pub async fn handle_update_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<VisitInput>,
) -> Result<Json<Success<Visit>>, AppError> {
    let input = normalize(input)?;
    if update_visit(&state.db, id, &input).await? == 0 {
        return Err(AppError::NotFound(format!("Visit {id} not found")));
    }

    info!(id, exit_time = %input.exit_time, "Visit updated");
    Ok(success(fetch_visit(&state, id).await?))
}

/// DELETE /visits/:id
pub async fn handle_delete_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Success<Changes>>, AppError> {
    let changes = delete_visit(&state.db, id).await?;
    if changes == 0 {
        return Err(AppError::NotFound(format!("Visit {id} not found")));
    }
    info!(id, "Visit deleted");
    Ok(success(Changes { changes }))
}

/// GET /visits/report
pub async fn handle_visit_report(State(state): State<AppState>) -> Result<Response, AppError> {
    let visits = list_todays_visits(&state.db).await?;
    let now = Local::now().naive_local();
    let file_name = visit_report_file_name(now.date());

    let bytes = render_document("Reporte diario de visitantes".to_string(), move || {
        build_visit_report(&visits, now)
    })
    .await?;

    Ok(pdf_attachment(bytes, &file_name))
}
