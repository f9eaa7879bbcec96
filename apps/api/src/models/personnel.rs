use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A staff member. JSON keys keep the names the front-end was built against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Personnel {
    pub id: i64,
    #[serde(rename = "cedula")]
    pub id_number: String,
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "cargo")]
    pub position: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    /// ISO `YYYY-MM-DD` as entered in the form; free text is tolerated.
    #[serde(rename = "fechaIngreso")]
    pub hired_on: Option<String>,
    #[serde(rename = "salario")]
    pub salary: Option<String>,
    /// Data URL of the uploaded photo.
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "vacacionesPorDisfrutar")]
    pub pending_vacation: String,
}

/// Body of `POST /personnel` and `PUT /personnel/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonnelInput {
    #[serde(rename = "cedula", default)]
    pub id_number: String,
    #[serde(rename = "nombre", default)]
    pub full_name: String,
    #[serde(rename = "cargo", default)]
    pub position: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "fechaIngreso")]
    pub hired_on: Option<String>,
    #[serde(rename = "salario")]
    pub salary: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "vacacionesPorDisfrutar")]
    pub pending_vacation: Option<String>,
}
