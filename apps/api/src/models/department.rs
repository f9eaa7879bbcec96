use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Body of `POST /departments` and `PUT /departments/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentInput {
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}
