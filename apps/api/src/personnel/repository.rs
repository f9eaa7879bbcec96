use sqlx::SqlitePool;

use crate::models::personnel::{Personnel, PersonnelInput};

pub async fn list_personnel(pool: &SqlitePool) -> Result<Vec<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>("SELECT * FROM personnel ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get_personnel(pool: &SqlitePool, id: i64) -> Result<Option<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_personnel_by_id_number(
    pool: &SqlitePool,
    id_number: &str,
) -> Result<Option<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>("SELECT * FROM personnel WHERE id_number = ?")
        .bind(id_number.trim())
        .fetch_optional(pool)
        .await
}

/// Staff whose department matches `department` regardless of case, by name.
pub async fn list_personnel_in_department(
    pool: &SqlitePool,
    department: &str,
) -> Result<Vec<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>(
        "SELECT * FROM personnel WHERE LOWER(department) = LOWER(?) ORDER BY full_name, id",
    )
    .bind(department)
    .fetch_all(pool)
    .await
}

pub async fn insert_personnel(
    pool: &SqlitePool,
    input: &PersonnelInput,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO personnel
            (id_number, full_name, position, department, phone, email,
             hired_on, salary, photo, pending_vacation)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.id_number)
    .bind(&input.full_name)
    .bind(&input.position)
    .bind(&input.department)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.hired_on)
    .bind(&input.salary)
    .bind(&input.photo)
    .bind(input.pending_vacation.as_deref().unwrap_or(""))
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Returns the number of rows changed.
pub async fn update_personnel(
    pool: &SqlitePool,
    id: i64,
    input: &PersonnelInput,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE personnel SET
            id_number = ?, full_name = ?, position = ?, department = ?, phone = ?,
            email = ?, hired_on = ?, salary = ?, photo = ?, pending_vacation = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.id_number)
    .bind(&input.full_name)
    .bind(&input.position)
    .bind(&input.department)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.hired_on)
    .bind(&input.salary)
    .bind(&input.photo)
    .bind(input.pending_vacation.as_deref().unwrap_or(""))
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_personnel(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM personnel WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
pub(crate) fn sample_input(id_number: &str, full_name: &str, department: &str) -> PersonnelInput {
    PersonnelInput {
        id_number: id_number.to_string(),
        full_name: full_name.to_string(),
        position: "Analista".to_string(),
        department: department.to_string(),
        phone: Some("0414-5550000".to_string()),
        email: None,
        hired_on: Some("2019-03-04".to_string()),
        salary: Some("4.500,00".to_string()),
        photo: None,
        pending_vacation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_insert_and_lookup_by_id_number() {
        let pool = test_pool().await;
        let id = insert_personnel(&pool, &sample_input("12345678", "Ana Rivera", "Secretaria"))
            .await
            .unwrap();

        let person = find_personnel_by_id_number(&pool, " 12345678 ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(person.id, id);
        assert_eq!(person.full_name, "Ana Rivera");
        assert_eq!(person.pending_vacation, "");
        assert_eq!(person.hired_on.as_deref(), Some("2019-03-04"));
        assert_eq!(get_personnel(&pool, id).await.unwrap(), Some(person));

        assert!(find_personnel_by_id_number(&pool, "000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_number_is_rejected() {
        let pool = test_pool().await;
        insert_personnel(&pool, &sample_input("1", "Ana", "Secretaria"))
            .await
            .unwrap();
        let err = insert_personnel(&pool, &sample_input("1", "Luis", "Secretaria"))
            .await
            .unwrap_err();
        assert!(err
            .as_database_error()
            .map(|e| e.is_unique_violation())
            .unwrap_or(false));
    }

    #[tokio::test]
    async fn test_department_listing_is_case_insensitive() {
        let pool = test_pool().await;
        insert_personnel(&pool, &sample_input("1", "Luis Mata", "secretaria"))
            .await
            .unwrap();
        insert_personnel(&pool, &sample_input("2", "Ana Rivera", "Secretaria"))
            .await
            .unwrap();
        insert_personnel(&pool, &sample_input("3", "Rosa Paez", "Presidencia"))
            .await
            .unwrap();

        let names: Vec<String> = list_personnel_in_department(&pool, "SECRETARIA")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert_eq!(names, vec!["Ana Rivera", "Luis Mata"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_changes() {
        let pool = test_pool().await;
        let id = insert_personnel(&pool, &sample_input("1", "Ana", "Secretaria"))
            .await
            .unwrap();

        let mut input = sample_input("1", "Ana Rivera", "Presidencia");
        input.pending_vacation = Some("10".to_string());
        assert_eq!(update_personnel(&pool, id, &input).await.unwrap(), 1);
        assert_eq!(update_personnel(&pool, id + 1, &input).await.unwrap(), 0);

        let person = get_personnel(&pool, id).await.unwrap().unwrap();
        assert_eq!(person.department, "Presidencia");
        assert_eq!(person.pending_vacation, "10");

        assert_eq!(delete_personnel(&pool, id).await.unwrap(), 1);
        assert_eq!(list_personnel(&pool).await.unwrap().len(), 0);
    }
}
