use sqlx::SqlitePool;

use crate::models::department::{Department, DepartmentInput};

pub async fn list_departments(pool: &SqlitePool) -> Result<Vec<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get_department(pool: &SqlitePool, id: i64) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Case-insensitive lookup; SQLite `LOWER` folds ASCII only.
pub async fn find_department_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE LOWER(name) = LOWER(?)")
        .bind(name.trim())
        .fetch_optional(pool)
        .await
}

pub async fn insert_department(
    pool: &SqlitePool,
    input: &DepartmentInput,
) -> Result<Department, sqlx::Error> {
    let result =
        sqlx::query("INSERT INTO departments (name, icon, description, color) VALUES (?, ?, ?, ?)")
            .bind(&input.name)
            .bind(&input.icon)
            .bind(&input.description)
            .bind(&input.color)
            .execute(pool)
            .await?;

    Ok(Department {
        id: result.last_insert_rowid(),
        name: input.name.clone(),
        icon: input.icon.clone(),
        description: input.description.clone(),
        color: input.color.clone(),
    })
}

/// Returns the number of rows changed.
pub async fn update_department(
    pool: &SqlitePool,
    id: i64,
    input: &DepartmentInput,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE departments SET name = ?, icon = ?, description = ?, color = ? WHERE id = ?",
    )
    .bind(&input.name)
    .bind(&input.icon)
    .bind(&input.description)
    .bind(&input.color)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_department(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
