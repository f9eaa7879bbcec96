use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Local;
use tracing::info;

use crate::departments::repository::find_department_by_name;
use crate::documents::{build_work_certificate, certificate_file_name};
use crate::errors::AppError;
use crate::models::personnel::{Personnel, PersonnelInput};
use crate::personnel::repository::{
    delete_personnel, find_personnel_by_id_number, get_personnel, insert_personnel,
    list_personnel, update_personnel,
};
use crate::response::{created, pdf_attachment, render_document, success, Changes, Success};
use crate::state::AppState;

/// Checks required fields and resolves the department to its stored spelling.
async fn validate_input(
    state: &AppState,
    input: PersonnelInput,
) -> Result<PersonnelInput, AppError> {
    let mut input = normalize(input)?;
    let department = find_department_by_name(&state.db, &input.department)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("Department '{}' does not exist", input.department))
        })?;
    input.department = department.name;
    Ok(input)
}

fn normalize(input: PersonnelInput) -> Result<PersonnelInput, AppError> {
    let required = |value: &str| value.trim().to_string();
    let optional = |value: Option<String>| {
        value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let normalized = PersonnelInput {
        id_number: required(&input.id_number),
        full_name: required(&input.full_name),
        position: required(&input.position),
        department: required(&input.department),
        phone: optional(input.phone),
        email: optional(input.email),
        hired_on: optional(input.hired_on),
        salary: optional(input.salary),
        photo: input.photo.filter(|s| !s.trim().is_empty()),
        pending_vacation: Some(
            input
                .pending_vacation
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        ),
    };

    let missing: Vec<&str> = [
        ("cedula", &normalized.id_number),
        ("nombre", &normalized.full_name),
        ("cargo", &normalized.position),
        ("departamento", &normalized.department),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    Ok(normalized)
}

fn duplicate_id_number(input: &PersonnelInput) -> String {
    format!(
        "A staff member with cedula '{}' already exists",
        input.id_number
    )
}

/// GET /personnel
pub async fn handle_list_personnel(
    State(state): State<AppState>,
) -> Result<Json<Success<Vec<Personnel>>>, AppError> {
    Ok(success(list_personnel(&state.db).await?))
}

/// GET /personnel/:cedula
pub async fn handle_get_personnel(
    State(state): State<AppState>,
    Path(id_number): Path<String>,
) -> Result<Json<Success<Personnel>>, AppError> {
    let person = find_personnel_by_id_number(&state.db, &id_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No staff member with cedula {id_number}")))?;
    Ok(success(person))
}

/// POST /personnel
pub async fn handle_create_personnel(
    State(state): State<AppState>,
    Json(input): Json<PersonnelInput>,
) -> Result<(StatusCode, Json<Success<Personnel>>), AppError> {
    let input = validate_input(&state, input).await?;
    let id = insert_personnel(&state.db, &input)
        .await
        .map_err(|e| AppError::from_unique(e, duplicate_id_number(&input)))?;

    let person = get_personnel(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("staff member {id} vanished after insert")))?;

    info!(id, department = %person.department, "Staff member created");
    Ok(created(person))
}

/// PUT /personnel/:id
pub async fn handle_update_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PersonnelInput>,
) -> Result<Json<Success<Personnel>>, AppError> {
    let input = validate_input(&state, input).await?;
    let changed = update_personnel(&state.db, id, &input)
        .await
        .map_err(|e| AppError::from_unique(e, duplicate_id_number(&input)))?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Staff member {id} not found")));
    }

    let person = get_personnel(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff member {id} not found")))?;

    info!(id, "Staff member updated");
    Ok(success(person))
}

/// DELETE /personnel/:id
pub async fn handle_delete_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Success<Changes>>, AppError> {
    let changes = delete_personnel(&state.db, id).await?;
    if changes == 0 {
        return Err(AppError::NotFound(format!("Staff member {id} not found")));
    }
    info!(id, "Staff member deleted");
    Ok(success(Changes { changes }))
}

/// GET /personnel/:cedula/certificate
pub async fn handle_work_certificate(
    State(state): State<AppState>,
    Path(id_number): Path<String>,
) -> Result<Response, AppError> {
    let person = find_personnel_by_id_number(&state.db, &id_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No staff member with cedula {id_number}")))?;

    let file_name = certificate_file_name(&person);
    let issued_on = Local::now().date_naive();
    let letterhead = state.letterhead;
    let strategy = state.config.justify_strategy;

    let bytes = render_document("Constancia de trabajo".to_string(), move || {
        build_work_certificate(&person, issued_on, &letterhead, strategy)
    })
    .await?;

    info!(id_number = %id_number, bytes = bytes.len(), "Work certificate issued");
    Ok(pdf_attachment(bytes, &file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personnel::repository::sample_input;

    #[test]
    fn test_normalize_trims_fields() {
        let mut input = sample_input(" 123 ", " Ana Rivera ", " Secretaria ");
        input.email = Some("   ".to_string());
        input.pending_vacation = None;

        let normalized = normalize(input).unwrap();
        assert_eq!(normalized.id_number, "123");
        assert_eq!(normalized.full_name, "Ana Rivera");
        assert_eq!(normalized.department, "Secretaria");
        assert_eq!(normalized.email, None);
        assert_eq!(normalized.pending_vacation.as_deref(), Some(""));
    }

    #[test]
    fn test_normalize_lists_missing_fields() {
        let input = sample_input("", "Ana", " ");
        match normalize(input) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Missing required fields: cedula, departamento")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
