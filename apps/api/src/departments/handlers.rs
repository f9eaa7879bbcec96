use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::info;

use crate::departments::repository::{
    delete_department, get_department, insert_department, list_departments, update_department,
};
use crate::documents::{build_department_listing, listing_file_name};
use crate::errors::AppError;
use crate::models::department::{Department, DepartmentInput};
use crate::personnel::repository::list_personnel_in_department;
use crate::response::{created, pdf_attachment, render_document, success, Changes, Success};
use crate::state::AppState;

/// Trims the name and drops blank optional fields.
fn normalize(input: DepartmentInput) -> Result<DepartmentInput, AppError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation(
            "Department name is required".to_string(),
        ));
    }
    let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    Ok(DepartmentInput {
        name,
        icon: non_blank(input.icon),
        description: non_blank(input.description),
        color: non_blank(input.color),
    })
}

/// GET /departments
pub async fn handle_list_departments(
    State(state): State<AppState>,
) -> Result<Json<Success<Vec<Department>>>, AppError> {
    Ok(success(list_departments(&state.db).await?))
}

/// POST /departments
pub async fn handle_create_department(
    State(state): State<AppState>,
    Json(input): Json<DepartmentInput>,
) -> Result<(StatusCode, Json<Success<Department>>), AppError> {
    let input = normalize(input)?;
    let department = insert_department(&state.db, &input)
        .await
        .map_err(|e| {
            AppError::from_unique(e, format!("Department '{}' already exists", input.name))
        })?;

    info!(id = department.id, name = %department.name, "Department created");
    Ok(created(department))
}

/// PUT /departments/:id
pub async fn handle_update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<DepartmentInput>,
) -> Result<Json<Success<Department>>, AppError> {
    let input = normalize(input)?;
    let changed = update_department(&state.db, id, &input)
        .await
        .map_err(|e| {
            AppError::from_unique(e, format!("Department '{}' already exists", input.name))
        })?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Department {id} not found")));
    }

    info!(id, name = %input.name, "Department updated");
    Ok(success(Department {
        id,
        name: input.name,
        icon: input.icon,
        description: input.description,
        color: input.color,
    }))
}

/// DELETE /departments/:id
pub async fn handle_delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Success<Changes>>, AppError> {
    let changes = delete_department(&state.db, id).await?;
    if changes == 0 {
        return Err(AppError::NotFound(format!("Department {id} not found")));
    }
    info!(id, "Department deleted");
    Ok(success(Changes { changes }))
}

/// GET /departments/:id/personnel/report
pub async fn handle_department_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let department = get_department(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {id} not found")))?;
    let personnel = list_personnel_in_department(&state.db, &department.name).await?;

    let file_name = listing_file_name(&department);
    let title = format!("Listado de personal - {}", department.name);
    let bytes = render_document(title, move || {
        build_department_listing(&department, &personnel)
    })
    .await?;

    Ok(pdf_attachment(bytes, &file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blanks() {
        let input = DepartmentInput {
            name: "  Archivo ".to_string(),
            icon: Some(" ".to_string()),
            description: Some(" Custodia de expedientes ".to_string()),
            color: None,
        };
        let normalized = normalize(input).unwrap();
        assert_eq!(normalized.name, "Archivo");
        assert_eq!(normalized.icon, None);
        assert_eq!(
            normalized.description.as_deref(),
            Some("Custodia de expedientes")
        );
    }

    #[test]
    fn test_normalize_requires_name() {
        let result = normalize(DepartmentInput::default());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
