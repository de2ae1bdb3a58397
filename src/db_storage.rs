use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, LeadMetrics, LeadPage, LeadQuery, Pagination, HOT_LEAD_THRESHOLD};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const CREATE_LEADS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS leads (
        chat_id TEXT PRIMARY KEY,
        name TEXT,
        phone TEXT,
        budget TEXT,
        area TEXT,
        location TEXT,
        unit_type TEXT,
        heat_score TEXT,
        start_time TEXT,
        summary TEXT
    )
"#;

const UPSERT_LEAD: &str = r#"
    INSERT OR REPLACE INTO leads (
        chat_id, name, phone, budget, area, location, unit_type, heat_score, start_time, summary
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

// Rows written by other tools may carry NULLs; leads never do.
const LEAD_COLUMNS: &str = "IFNULL(chat_id, '') AS chat_id, \
     IFNULL(name, '') AS name, \
     IFNULL(phone, '') AS phone, \
     IFNULL(budget, '') AS budget, \
     IFNULL(area, '') AS area, \
     IFNULL(location, '') AS location, \
     IFNULL(unit_type, '') AS unit_type, \
     IFNULL(heat_score, '') AS heat_score, \
     IFNULL(start_time, '') AS start_time, \
     IFNULL(summary, '') AS summary";

/// Storage service for the `leads` table.
///
/// Each call checks a connection out of the pool for a single statement and
/// returns it afterwards; no state is shared between calls.
#[derive(Clone)]
pub struct LeadStorage {
    pool: SqlitePool,
}

impl LeadStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `leads` table if it is missing.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_LEADS_TABLE)
            .execute(&self.pool)
            .await
            .context("creating leads table")?;
        Ok(())
    }

    /// Inserts the lead, fully replacing any row with the same chat id.
    pub async fn save_lead(&self, lead: &Lead) -> Result<(), AppError> {
        sqlx::query(UPSERT_LEAD)
            .bind(&lead.chat_id)
            .bind(&lead.name)
            .bind(&lead.phone)
            .bind(&lead.budget)
            .bind(&lead.area)
            .bind(&lead.location)
            .bind(&lead.unit_type)
            .bind(&lead.heat_score)
            .bind(&lead.start_time)
            .bind(&lead.summary)
            .execute(&self.pool)
            .await
            .with_context(|| format!("saving lead {}", lead.chat_id))?;

        tracing::info!("Lead saved to database: {}", lead.chat_id);
        Ok(())
    }

    pub async fn get_lead(&self, chat_id: &str) -> Result<Option<Lead>, AppError> {
        let sql = format!("SELECT {} FROM leads WHERE chat_id = ?", LEAD_COLUMNS);
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("loading lead {}", chat_id))?;
        Ok(lead)
    }

    pub async fn count_leads(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(&self.pool)
            .await
            .context("counting leads")?;
        Ok(count)
    }

    /// Returns one page of leads matching `query`, newest `start_time` first.
    pub async fn list_leads(&self, query: &LeadQuery) -> Result<LeadPage, AppError> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM leads WHERE 1=1");
        push_filters(&mut count_qb, query);
        let (total_count,): (i64,) = count_qb
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .context("counting filtered leads")?;

        let mut data_qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM leads WHERE 1=1",
            LEAD_COLUMNS
        ));
        push_filters(&mut data_qb, query);
        data_qb
            .push(" ORDER BY start_time DESC, chat_id ASC LIMIT ")
            .push_bind(i64::from(query.limit()))
            .push(" OFFSET ")
            .push_bind(query.offset());

        let leads = data_qb
            .build_query_as::<Lead>()
            .fetch_all(&self.pool)
            .await
            .context("listing leads")?;

        Ok(LeadPage {
            leads,
            pagination: Pagination::new(query.page(), query.limit(), total_count),
        })
    }

    /// Aggregates over the whole table. Non-numeric budgets and heat scores
    /// count as zero, following SQLite's `CAST` rules.
    pub async fn metrics(&self) -> Result<LeadMetrics, AppError> {
        let (total_leads, projected_revenue, hot_leads, avg_heat_score): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    IFNULL(SUM(CAST(REPLACE(REPLACE(budget, '$', ''), ',', '') AS INTEGER)), 0),
                    IFNULL(SUM(CASE WHEN CAST(heat_score AS INTEGER) > ? THEN 1 ELSE 0 END), 0),
                    IFNULL(CAST(ROUND(AVG(CAST(heat_score AS INTEGER))) AS INTEGER), 0)
                FROM leads
                "#,
            )
            .bind(HOT_LEAD_THRESHOLD)
            .fetch_one(&self.pool)
            .await
            .context("computing lead metrics")?;

        Ok(LeadMetrics {
            total_leads,
            projected_revenue,
            hot_leads,
            avg_heat_score,
        })
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, query: &LeadQuery) {
    if let Some(min) = query.min_heat_score {
        qb.push(" AND CAST(heat_score AS INTEGER) >= ")
            .push_bind(min);
    }
    if query.full_data_only {
        qb.push(" AND IFNULL(name, '') != '' AND IFNULL(phone, '') != '' AND IFNULL(budget, '') != ''");
    }
    if query.summary_only {
        qb.push(" AND IFNULL(summary, '') != ''");
    }
    if let Some(start) = query.start_bound() {
        qb.push(" AND start_time >= ").push_bind(start);
    }
    if let Some(end) = query.end_bound() {
        qb.push(" AND start_time <= ").push_bind(end);
    }
}
