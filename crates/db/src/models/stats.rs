//! Aggregate counts for the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// A `(label, count)` pair from a `GROUP BY` query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Platform-wide totals shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub users_by_role: Vec<LabelCount>,
    pub projects_by_status: Vec<LabelCount>,
    pub total_notes: i64,
    pub pending_submissions: i64,
    pub approved_submissions: i64,
    pub published_press_kits: i64,
    pub total_uploads: i64,
}
