use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Exit time recorded while the visitor is still inside.
pub const EXIT_TIME_PENDING: &str = "Por Definir";

/// One entry of the daily visitor log.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Visit {
    pub id: i64,
    #[serde(rename = "nombreCompleto")]
    pub visitor_name: String,
    #[serde(rename = "cedula")]
    pub id_number: String,
    #[serde(rename = "departamentoDestino")]
    pub destination: String,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "horaEntrada")]
    pub entry_time: String,
    #[serde(rename = "horaSalida")]
    pub exit_time: String,
    /// Local wall-clock time the row was inserted.
    #[serde(rename = "fechaRegistro")]
    pub registered_at: NaiveDateTime,
}

/// Body of `POST /visits` and `PUT /visits/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitInput {
    #[serde(rename = "nombreCompleto", default)]
    pub visitor_name: String,
    #[serde(rename = "cedula", default)]
    pub id_number: String,
    #[serde(rename = "departamentoDestino", default)]
    pub destination: String,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "horaEntrada", default)]
    pub entry_time: String,
    #[serde(rename = "horaSalida", default)]
    pub exit_time: String,
}
