use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A captured sales/contact event, keyed by chat id.
///
/// Every field is opaque text. A missing or malformed value is stored as the
/// empty string, so "absent" and "explicitly empty" are indistinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub chat_id: String,
    pub name: String,
    pub phone: String,
    pub budget: String,
    pub area: String,
    pub location: String,
    pub unit_type: String,
    pub heat_score: String,
    pub start_time: String,
    pub summary: String,
}

/// Wire names of the lead fields, in storage column order.
pub const LEAD_FIELDS: [&str; 10] = [
    "chatId",
    "name",
    "phone",
    "budget",
    "area",
    "location",
    "unitType",
    "heatScore",
    "startTime",
    "summary",
];

impl Lead {
    /// Builds a lead by looking up each wire field through `field`.
    pub fn from_fields<F>(mut field: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            chat_id: field("chatId"),
            name: field("name"),
            phone: field("phone"),
            budget: field("budget"),
            area: field("area"),
            location: field("location"),
            unit_type: field("unitType"),
            heat_score: field("heatScore"),
            start_time: field("startTime"),
            summary: field("summary"),
        }
    }
}

/// Query parameters for `GET /leads`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadQuery {
    pub min_heat_score: Option<i64>,
    #[serde(default)]
    pub full_data_only: bool,
    #[serde(default)]
    pub summary_only: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

impl LeadQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }

    /// Lower `start_time` bound, covering the whole start day.
    pub fn start_bound(&self) -> Option<String> {
        self.start_date
            .map(|d| format!("{} 00:00:00", d.format("%Y-%m-%d")))
    }

    /// Upper `start_time` bound, covering the whole end day.
    pub fn end_bound(&self) -> Option<String> {
        self.end_date
            .map(|d| format!("{} 23:59:59", d.format("%Y-%m-%d")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_count: i64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_count: i64) -> Self {
        let limit_i = i64::from(limit.max(1));
        let total_pages = (total_count + limit_i - 1) / limit_i;
        Self {
            page,
            limit,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            total_count,
        }
    }
}

/// Response body of `GET /leads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    pub pagination: Pagination,
}

/// Response body of `GET /leads/metrics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadMetrics {
    pub total_leads: i64,
    /// Sum of budgets with `$` and `,` stripped.
    pub projected_revenue: i64,
    /// Leads whose integer heat score exceeds [`HOT_LEAD_THRESHOLD`].
    pub hot_leads: i64,
    pub avg_heat_score: i64,
}

pub const HOT_LEAD_THRESHOLD: i64 = 75;
