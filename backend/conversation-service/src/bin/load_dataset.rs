/// Bulk loader for the conversation store.
///
/// Applies the embedded migrations, then `COPY`s the CSV files produced by
/// `generate-dataset` straight into PostgreSQL. Contacts must load before
/// messages so the foreign keys hold.
///
/// Environment:
/// - `DATABASE_URL` (required)
/// - `DATA_DIR` (default `./data`)
use anyhow::{Context, Result};
use conversation_service::db;
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")?;
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    let pool = db::init_pool(&database_url)
        .await
        .context("failed to create database pool")?;

    info!("applying migrations");
    db::MIGRATOR
        .run(&pool)
        .await
        .context("database migrations failed")?;

    let contacts_path = Path::new(&data_dir).join("contacts.csv");
    let messages_path = Path::new(&data_dir).join("messages.csv");

    info!(path = %contacts_path.display(), "loading contacts");
    let loaded = copy_csv(
        &pool,
        "COPY contacts (name, phone_number) FROM STDIN WITH (FORMAT csv)",
        &contacts_path,
    )
    .await?;
    info!(rows = loaded, "contacts loaded");

    info!(path = %messages_path.display(), "loading messages (this may take a few minutes)");
    let loaded = copy_csv(
        &pool,
        "COPY messages (from_contact_id, to_contact_id, content, created_at) FROM STDIN WITH (FORMAT csv)",
        &messages_path,
    )
    .await?;
    info!(rows = loaded, "messages loaded");

    pool.close().await;
    info!("database successfully populated");
    Ok(())
}

async fn copy_csv(pool: &PgPool, statement: &str, path: &Path) -> Result<u64> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut conn = pool
        .acquire()
        .await
        .context("failed to acquire connection for COPY")?;
    let mut copy_in = conn
        .copy_in_raw(statement)
        .await
        .context("COPY start failed")?;
    copy_in
        .read_from(file)
        .await
        .context("COPY stream failed")?;
    let rows = copy_in.finish().await.context("COPY finish failed")?;

    Ok(rows)
}
