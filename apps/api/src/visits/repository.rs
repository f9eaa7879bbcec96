use sqlx::SqlitePool;

use crate::models::visit::{Visit, VisitInput};

/// Visits registered today (local time), newest first.
pub async fn list_todays_visits(pool: &SqlitePool) -> Result<Vec<Visit>, sqlx::Error> {
    sqlx::query_as::<_, Visit>(
        r#"
        SELECT * FROM visits
        WHERE date(registered_at) = date('now', 'localtime')
        ORDER BY datetime(registered_at) DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_visit(pool: &SqlitePool, id: i64) -> Result<Option<Visit>, sqlx::Error> {
    sqlx::query_as::<_, Visit>("SELECT * FROM visits WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_visit(pool: &SqlitePool, input: &VisitInput) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO visits
            (visitor_name, id_number, destination, reason, entry_time, exit_time)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.visitor_name)
    .bind(&input.id_number)
    .bind(&input.destination)
    .bind(&input.reason)
    .bind(&input.entry_time)
    .bind(&input.exit_time)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Returns the number of rows changed. The registration time is kept.
pub async fn update_visit(
    pool: &SqlitePool,
    id: i64,
    input: &VisitInput,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE visits SET
            visitor_name = ?, id_number = ?, destination = ?,
            reason = ?, entry_time = ?, exit_time = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.visitor_name)
    .bind(&input.id_number)
    .bind(&input.destination)
    .bind(&input.reason)
    .bind(&input.entry_time)
    .bind(&input.exit_time)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_visit(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM visits WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes every visit registered before today (local time).
pub async fn delete_visits_before_today(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM visits WHERE date(registered_at) < date('now', 'localtime')")
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
pub(crate) fn sample_visit(name: &str) -> VisitInput {
    VisitInput {
        visitor_name: name.to_string(),
        id_number: "V-20111222".to_string(),
        destination: "Secretaria".to_string(),
        reason: "Entrega de documentos".to_string(),
        entry_time: "08:30".to_string(),
        exit_time: crate::models::visit::EXIT_TIME_PENDING.to_string(),
    }
}

/// Inserts a visit dated `days_ago` days back, bypassing the default timestamp.
#[cfg(test)]
pub(crate) async fn insert_backdated_visit(pool: &SqlitePool, name: &str, days_ago: u32) -> i64 {
    let id = insert_visit(pool, &sample_visit(name)).await.unwrap();
    sqlx::query(
        "UPDATE visits SET registered_at = datetime('now', 'localtime', ?) WHERE id = ?",
    )
    .bind(format!("-{days_ago} days"))
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_insert_sets_registration_time() {
        let pool = test_pool().await;
        let id = insert_visit(&pool, &sample_visit("Ana Rivera")).await.unwrap();
        let visit = get_visit(&pool, id).await.unwrap().unwrap();

        assert_eq!(visit.visitor_name, "Ana Rivera");
        assert_eq!(visit.exit_time, "Por Definir");
        let today = chrono::Local::now().date_naive();
        let yesterday = today.pred_opt().unwrap();
        // Tolerate a run that straddles midnight.
        assert!(visit.registered_at.date() == today || visit.registered_at.date() == yesterday);
    }

    #[tokio::test]
    async fn test_today_list_is_newest_first_and_skips_older_days() {
        let pool = test_pool().await;
        let first = insert_visit(&pool, &sample_visit("Primero")).await.unwrap();
        let second = insert_visit(&pool, &sample_visit("Segundo")).await.unwrap();
        insert_backdated_visit(&pool, "Ayer", 1).await;

        let ids: Vec<i64> = list_todays_visits(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_update_keeps_registration_time() {
        let pool = test_pool().await;
        let id = insert_backdated_visit(&pool, "Ana", 2).await;
        let before = get_visit(&pool, id).await.unwrap().unwrap();

        let mut input = sample_visit("Ana Rivera");
        input.exit_time = "10:15".to_string();
        assert_eq!(update_visit(&pool, id, &input).await.unwrap(), 1);
        assert_eq!(update_visit(&pool, id + 100, &input).await.unwrap(), 0);

        let after = get_visit(&pool, id).await.unwrap().unwrap();
        assert_eq!(after.exit_time, "10:15");
        assert_eq!(after.registered_at, before.registered_at);
    }

    #[tokio::test]
    async fn test_delete_before_today() {
        let pool = test_pool().await;
        insert_backdated_visit(&pool, "Ayer", 1).await;
        insert_backdated_visit(&pool, "Semana pasada", 7).await;
        let today = insert_visit(&pool, &sample_visit("Hoy")).await.unwrap();

        assert_eq!(delete_visits_before_today(&pool).await.unwrap(), 2);
        assert_eq!(delete_visits_before_today(&pool).await.unwrap(), 0);
        assert!(get_visit(&pool, today).await.unwrap().is_some());
        assert_eq!(delete_visit(&pool, today).await.unwrap(), 1);
        assert_eq!(delete_visit(&pool, today).await.unwrap(), 0);
    }
}
