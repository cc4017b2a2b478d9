use contracts::domain::a001_product::Product;
use contracts::domain::a002_location::Location;
use contracts::domain::a003_supply_transaction::SupplyTransaction;
use contracts::domain::a004_logistics_detail::LogisticsDetail;
use contracts::domain::a005_notification::Notification;
use contracts::domain::a006_report::Report;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_business_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Minimal schema bootstrap: create missing business tables on startup.
/// System tables (sys_*) are handled by the auth migration.
async fn create_business_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(
        conn,
        &Product::table_name(),
        r#"
            CREATE TABLE a001_product (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                full_description TEXT NOT NULL DEFAULT '',
                sku TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'active',
                created_by TEXT,
                extra TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        &Location::table_name(),
        r#"
            CREATE TABLE a002_location (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                address TEXT NOT NULL DEFAULT '',
                location_type TEXT NOT NULL DEFAULT 'warehouse',
                latitude REAL,
                longitude REAL,
                extra TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        &SupplyTransaction::table_name(),
        r#"
            CREATE TABLE a003_supply_transaction (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                product_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                from_location_id TEXT,
                to_location_id TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                chain_hash TEXT NOT NULL,
                previous_transaction_id TEXT,
                created_by TEXT,
                extra TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // Head-of-chain lookup: latest transaction per product
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "CREATE INDEX IF NOT EXISTS idx_a003_product_created
         ON a003_supply_transaction (product_id, created_at);"
            .to_string(),
    ))
    .await?;

    ensure_table(
        conn,
        &LogisticsDetail::table_name(),
        r#"
            CREATE TABLE a004_logistics_detail (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                transaction_id TEXT NOT NULL,
                temperature REAL,
                humidity REAL,
                transport_vehicle TEXT,
                transport_duration TEXT,
                storage_conditions TEXT,
                quality_checks TEXT,
                additional_data TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        &Notification::table_name(),
        r#"
            CREATE TABLE a005_notification (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                user_id TEXT NOT NULL,
                message TEXT NOT NULL,
                kind TEXT NOT NULL DEFAULT 'info',
                status TEXT NOT NULL DEFAULT 'unread',
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        &Report::table_name(),
        r#"
            CREATE TABLE a006_report (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                kind TEXT NOT NULL DEFAULT '',
                frequency TEXT NOT NULL DEFAULT 'monthly',
                last_run TEXT,
                next_run TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                created_by TEXT,
                extra TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    if !table_exists(conn, name).await? {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}
