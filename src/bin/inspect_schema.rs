//! Utility to inspect the leads store and print the table layout.

use lead_logger::config::Config;
use lead_logger::db::Database;
use lead_logger::db_storage::LeadStorage;

/// Connects to the configured SQLite file and lists the `leads` columns
/// together with the current row count.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let db = Database::new(&config);

    let columns: Vec<(String, String, i64)> =
        sqlx::query_as("SELECT name, type, pk FROM pragma_table_info('leads') ORDER BY cid")
            .fetch_all(&db.pool)
            .await?;

    if columns.is_empty() {
        println!("No leads table in {}", config.db_path);
        return Ok(());
    }

    println!("leads ({}):", config.db_path);
    for (name, type_, pk) in columns {
        let marker = if pk > 0 { " PRIMARY KEY" } else { "" };
        println!("  - {}: {}{}", name, type_, marker);
    }

    let count = LeadStorage::new(db.pool.clone())
        .count_leads()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("{} row(s)", count);

    Ok(())
}
