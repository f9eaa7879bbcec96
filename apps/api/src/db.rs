use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Creates and returns a SQLite connection pool. `?mode=rwc` in the URL creates
/// the file on first start.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL UNIQUE,
        icon        TEXT,
        description TEXT,
        color       TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS personnel (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        id_number        TEXT NOT NULL UNIQUE,
        full_name        TEXT NOT NULL,
        position         TEXT NOT NULL,
        department       TEXT NOT NULL,
        phone            TEXT,
        email            TEXT,
        hired_on         TEXT,
        salary           TEXT,
        photo            TEXT,
        pending_vacation TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS visits (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        visitor_name  TEXT NOT NULL,
        id_number     TEXT NOT NULL,
        destination   TEXT NOT NULL,
        reason        TEXT NOT NULL,
        entry_time    TEXT NOT NULL,
        exit_time     TEXT NOT NULL,
        registered_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
    )
    "#,
];

/// (id, name, icon, description, color)
const SEED_DEPARTMENTS: [(i64, &str, &str, &str, &str); 14] = [
    (2, "Presidencia", "👤", "Dirección ejecutiva y representación legal de la institución.", "#676252ff"),
    (3, "Vice Presidencia", "👥", "Apoyo a la presidencia y suplencia en funciones ejecutivas.", "#3f3b30ff"),
    (4, "Secretaria", "📋", "Gestion documental, actas y comunicacion institucional.", "#504a37ff"),
    (5, "Direccion de Auditoria Interna", "🏢", "Supervision y evaluacion de los procesos internos para asegurar la transparencia y eficiencia.", "#443f30ff"),
    (6, "Plenaria Legislativa", "🏛️", "Organo principal de debate y decision legislativa.", "#2a52be"),
    (7, "Direccion de Gestion Humana", "👨‍💼", "Gestion de recursos humanos, nomina y bienestar del personal.", "#ff5733"),
    (8, "Direccion de Investigacion y desarrollo legislativo", "🔬", "Investigacion y desarrollo de propuestas legislativas.", "#4CAF50"),
    (9, "Direccion de consultoria juridica", "⚖️", "Asesoramiento legal y gestion de asuntos juridicos.", "#8A2BE2"),
    (10, "Direccion de gestion comunicacional", "📢", "Gestion de la comunicacion interna y externa de la institucion.", "#FFD700"),
    (11, "Direccion de Servicios Generales", "🛠️", "Gestion y mantenimiento de los servicios generales de la institucion.", "#607D8B"),
    (12, "Direccion de Gestion Administrativa", "💼", "Gestion de los recursos administrativos y financieros de la institucion.", "#FF8C00"),
    (13, "Direccion de Planificacion, Presupuesto y Control de Gestion", "📊", "Planificacion estrategica, elaboracion de presupuestos y control de gestion institucional.", "#8B0000"),
    (14, "Direccion de Tecnologia Informatica", "💻", "Gestion de la infraestructura tecnologica, sistemas y soporte informatico.", "#00008B"),
    (15, "Coordinacion de cultura", "🎨", "Coordinación de actividades culturales y artísticas.", "#FF6347"),
];

/// Creates missing tables and inserts the stock departments. Safe to run on
/// every start: existing rows are left alone.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    let mut seeded = 0;
    for (id, name, icon, description, color) in SEED_DEPARTMENTS {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO departments (id, name, icon, description, color) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(icon)
        .bind(description)
        .bind(color)
        .execute(pool)
        .await?;
        seeded += result.rows_affected();
    }

    info!(seeded, "Schema ready");
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}
