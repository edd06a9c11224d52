use std::{fs, path::Path};

use chrono::Utc;
use sqlx::SqlitePool;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// SQLite needs the parent directory of a file-backed database to exist
/// before the first connection.
pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"));

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Seed the shop's catalog and roster on first start. Inserts are keyed, so
/// rerunning on an already-seeded database is a no-op.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    seed_services(pool).await?;
    seed_barbers(pool).await?;
    Ok(())
}

async fn seed_services(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let services: &[(&str, &str, &str, f64, &str)] = &[
        (
            "classic-cut",
            "Classic Cut",
            "Clean scissor cut with a sharp finish.",
            150.0,
            "Haircut",
        ),
        (
            "fade-cut",
            "Skin Fade",
            "Tight fade blended to your length on top.",
            180.0,
            "Haircut",
        ),
        (
            "signature-cut",
            "Signature Cut & Style",
            "Consultation, precision cut, and styling.",
            250.0,
            "Haircut",
        ),
        (
            "beard-trim",
            "Beard Trim",
            "Shape-up and conditioning for the beard.",
            120.0,
            "Grooming",
        ),
        (
            "hot-towel-shave",
            "Hot Towel Shave",
            "Straight-razor shave with hot towel prep.",
            200.0,
            "Grooming",
        ),
    ];

    for (position, (id, name, description, price, category)) in services.iter().enumerate() {
        sqlx::query(
            r#"INSERT INTO services (id, name, description, price, category, position, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO NOTHING"#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(position as i64)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_barbers(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let barbers = [
        ("marco-reyes", "Marco", "Reyes"),
        ("paolo-santos", "Paolo", "Santos"),
        ("jun-navarro", "Jun", "Navarro"),
    ];

    for (id, first_name, last_name) in barbers {
        sqlx::query(
            r#"INSERT INTO barbers (id, first_name, last_name, active, created_at)
               VALUES (?, ?, ?, 1, ?)
               ON CONFLICT(id) DO NOTHING"#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    }

    Ok(())
}
