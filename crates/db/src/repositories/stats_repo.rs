//! Aggregate queries for the admin dashboard.

use box_core::community::{SUBMISSION_APPROVED, SUBMISSION_PENDING};
use sqlx::PgPool;

use crate::models::stats::{DashboardStats, LabelCount};
use crate::repositories::{CreativeNoteRepo, PressKitRepo, SharedContentRepo, UploadRepo};

pub struct StatsRepo;

impl StatsRepo {
    pub async fn users_by_role(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT role AS label, COUNT(*) AS count FROM users GROUP BY role ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn projects_by_status(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT status AS label, COUNT(*) AS count FROM projects \
             GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Collect every dashboard figure.
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        Ok(DashboardStats {
            users_by_role: Self::users_by_role(pool).await?,
            projects_by_status: Self::projects_by_status(pool).await?,
            total_notes: CreativeNoteRepo::count(pool).await?,
            pending_submissions: SharedContentRepo::count_by_status(pool, SUBMISSION_PENDING)
                .await?,
            approved_submissions: SharedContentRepo::count_by_status(pool, SUBMISSION_APPROVED)
                .await?,
            published_press_kits: PressKitRepo::count_published(pool).await?,
            total_uploads: UploadRepo::count_complete(pool).await?,
        })
    }
}
