// Application store gateway

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::applications::models::{JobApplication, NewApplication};
use crate::store::{StoreError, UpdateResult};

/// Gateway for all reads and writes to the application collection
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list_by_applicant(&self, email: &str) -> Result<Vec<JobApplication>, StoreError>;

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>, StoreError>;

    async fn create(&self, application: NewApplication) -> Result<JobApplication, StoreError>;

    /// Overwrite the status of one application.
    ///
    /// An unknown id is not an error: the result reports zero matches.
    async fn update_status(&self, id: Uuid, status: &str) -> Result<UpdateResult, StoreError>;
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    applicant_email: String,
    status: Option<String>,
    linkedin: Option<String>,
    github: Option<String>,
    resume: Option<String>,
}

impl From<ApplicationRow> for JobApplication {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: row.id,
            job_id: row.job_id,
            applicant_email: row.applicant_email,
            status: row.status,
            linkedin: row.linkedin,
            github: row.github,
            resume: row.resume,
        }
    }
}

/// PostgreSQL-backed application gateway
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn list_by_applicant(&self, email: &str) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, job_id, applicant_email, status, linkedin, github, resume
            FROM job_applications
            WHERE applicant_email = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobApplication::from).collect())
    }

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, job_id, applicant_email, status, linkedin, github, resume
            FROM job_applications
            WHERE job_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobApplication::from).collect())
    }

    async fn create(&self, application: NewApplication) -> Result<JobApplication, StoreError> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO job_applications (id, job_id, applicant_email, status, linkedin, github, resume)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, job_id, applicant_email, status, linkedin, github, resume
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(application.job_id)
        .bind(&application.applicant_email)
        .bind(&application.status)
        .bind(&application.linkedin)
        .bind(&application.github)
        .bind(&application.resume)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<UpdateResult, StoreError> {
        // Re-applying the current status counts as matched, not modified
        let (matched, modified): (i64, i64) = sqlx::query_as(
            r#"
            WITH target AS (
                SELECT id, status FROM job_applications WHERE id = $1
            ),
            updated AS (
                UPDATE job_applications a
                SET status = $2
                FROM target t
                WHERE a.id = t.id AND t.status IS DISTINCT FROM $2
                RETURNING a.id
            )
            SELECT (SELECT COUNT(*) FROM target), (SELECT COUNT(*) FROM updated)
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult::new(matched as u64, modified as u64))
    }
}
