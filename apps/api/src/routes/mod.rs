pub mod health;

use axum::{routing::get, Router};

use crate::departments::handlers as departments;
use crate::personnel::handlers as personnel;
use crate::state::AppState;
use crate::visits::handlers as visits;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Departments
        .route(
            "/departments",
            get(departments::handle_list_departments).post(departments::handle_create_department),
        )
        .route(
            "/departments/:id",
            axum::routing::put(departments::handle_update_department)
                .delete(departments::handle_delete_department),
        )
        .route(
            "/departments/:id/personnel/report",
            get(departments::handle_department_listing),
        )
        // Personnel: GET takes a cedula, PUT/DELETE the numeric row id
        .route(
            "/personnel",
            get(personnel::handle_list_personnel).post(personnel::handle_create_personnel),
        )
        .route(
            "/personnel/:id",
            get(personnel::handle_get_personnel)
                .put(personnel::handle_update_personnel)
                .delete(personnel::handle_delete_personnel),
        )
        .route(
            "/personnel/:id/certificate",
            get(personnel::handle_work_certificate),
        )
        // Visits
        .route(
            "/visits",
            get(visits::handle_list_visits).post(visits::handle_create_visit),
        )
        .route("/visits/report", get(visits::handle_visit_report))
        .route(
            "/visits/:id",
            axum::routing::put(visits::handle_update_visit).delete(visits::handle_delete_visit),
        )
        .with_state(state)
}
