// Job store gateway

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::jobs::models::{Job, NewJob, SalaryRange};
use crate::store::StoreError;

/// Maximum number of postings returned by the preview listing
pub const PREVIEW_LIMIT: usize = 6;

/// Gateway for all reads and writes to the job collection
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// All postings, optionally restricted to one recruiter
    async fn list_all(&self, hr_email: Option<&str>) -> Result<Vec<Job>, StoreError>;

    /// At most [`PREVIEW_LIMIT`] postings in store order
    async fn list_preview(&self) -> Result<Vec<Job>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError>;

    /// Store a new posting under a freshly generated id
    async fn create(&self, job: NewJob) -> Result<Job, StoreError>;

    /// Add one to the application count of a posting.
    ///
    /// Returns the new count, or `None` when no posting has this id.
    /// The increment is applied atomically by the store.
    async fn increment_application_count(&self, id: Uuid) -> Result<Option<i64>, StoreError>;
}

const JOB_COLUMNS: &str = "id, hr_email, hr_name, title, company, company_logo, location, \
     job_type, category, application_deadline, salary_min, salary_max, salary_currency, \
     description, requirements, responsibilities, status, application_count";

/// Flat row shape of the `jobs` table
#[derive(Debug, FromRow)]
struct JobRow {
    id: Uuid,
    hr_email: String,
    hr_name: Option<String>,
    title: String,
    company: String,
    company_logo: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    category: Option<String>,
    application_deadline: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    salary_currency: Option<String>,
    description: Option<String>,
    requirements: Vec<String>,
    responsibilities: Vec<String>,
    status: Option<String>,
    application_count: i64,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let salary_range = match (row.salary_min, row.salary_max, row.salary_currency) {
            (None, None, None) => None,
            (min, max, currency) => Some(SalaryRange { min, max, currency }),
        };

        Self {
            id: row.id,
            hr_email: row.hr_email,
            hr_name: row.hr_name,
            title: row.title,
            company: row.company,
            company_logo: row.company_logo,
            location: row.location,
            job_type: row.job_type,
            category: row.category,
            application_deadline: row.application_deadline,
            salary_range,
            description: row.description,
            requirements: row.requirements,
            responsibilities: row.responsibilities,
            status: row.status,
            application_count: row.application_count,
        }
    }
}

/// PostgreSQL-backed job gateway
#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new PgJobRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn list_all(&self, hr_email: Option<&str>) -> Result<Vec<Job>, StoreError> {
        let rows = match hr_email {
            Some(email) => {
                sqlx::query_as::<_, JobRow>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs WHERE hr_email = $1 ORDER BY created_at, id"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JobRow>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at, id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn list_preview(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at, id LIMIT $1"
        ))
        .bind(PREVIEW_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Job::from))
    }

    async fn create(&self, job: NewJob) -> Result<Job, StoreError> {
        let salary = job.salary_range.clone().unwrap_or(SalaryRange {
            min: None,
            max: None,
            currency: None,
        });

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (id, hr_email, hr_name, title, company, company_logo, location,
                job_type, category, application_deadline, salary_min, salary_max, salary_currency,
                description, requirements, responsibilities, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&job.hr_email)
        .bind(&job.hr_name)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.company_logo)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.category)
        .bind(&job.application_deadline)
        .bind(salary.min)
        .bind(salary.max)
        .bind(&salary.currency)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(&job.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn increment_application_count(&self, id: Uuid) -> Result<Option<i64>, StoreError> {
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE jobs
            SET application_count = application_count + 1
            WHERE id = $1
            RETURNING application_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(count)
    }
}
