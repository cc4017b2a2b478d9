use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Schema for the authentication subsystem; embedded so the binary is
/// self-contained. Statements are idempotent.
const AUTH_MIGRATION_SQL: &str = r#"
-- Users (profiles)
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    company_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_login_at TEXT,
    created_by TEXT
);

-- Refresh tokens (stored hashed)
CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    token_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    revoked_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash
    ON sys_refresh_tokens (token_hash);

-- Key/value settings (JWT secret lives here)
CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT,
    updated_at TEXT
);
"#;

/// Apply authentication system migration
pub async fn apply_auth_migration() -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    // Execute each statement separately (SQLite doesn't support execute_batch in sea-orm)
    for (idx, statement) in AUTH_MIGRATION_SQL.split(';').enumerate() {
        // Remove comment lines and trim
        let cleaned: String = statement
            .lines()
            .filter(|line| {
                let trimmed_line = line.trim();
                !trimmed_line.is_empty() && !trimmed_line.starts_with("--")
            })
            .collect::<Vec<_>>()
            .join("\n");

        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("{};", trimmed),
            ))
            .await
            .with_context(|| {
                format!(
                    "Failed to execute statement #{}: {}",
                    idx,
                    trimmed.lines().take(3).collect::<Vec<_>>().join(" ")
                )
            })?;
        }
    }

    tracing::info!("Auth system migration applied successfully");

    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    // Check if any users exist
    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            company_name: None,
            is_admin: true,
        };

        let admin_id = service::create(admin_dto, None).await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin user created!");
        tracing::warn!("  Username: admin");
        tracing::warn!("  Password: admin");
        tracing::warn!("  User ID: {}", admin_id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}
