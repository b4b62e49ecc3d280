// HTTP handlers for job posting endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::jobs::models::{Job, JobFilter, NewJob};
use crate::store::{parse_id, InsertResult};
use crate::AppState;

/// List every posting, optionally for one recruiter
/// GET /jobAll
///
/// The `email` filter is not tied to the session: anyone may list any
/// recruiter's postings.
#[utoipa::path(
    get,
    path = "/jobAll",
    params(("email" = Option<String>, Query, description = "Recruiter email to filter by")),
    responses(
        (status = 200, description = "Matching postings", body = Vec<Job>),
        (status = 500, description = "Store failure")
    ),
    tag = "jobs"
)]
pub async fn list_all_jobs_handler(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let hr_email = filter.email.as_deref().filter(|e| !e.is_empty());
    tracing::debug!("Fetching jobs, recruiter filter: {:?}", hr_email);

    let jobs = state.jobs.list_all(hr_email).await?;
    Ok(Json(jobs))
}

/// First postings for the landing page
/// GET /jobs
#[utoipa::path(
    get,
    path = "/jobs",
    responses((status = 200, description = "Up to six postings", body = Vec<Job>)),
    tag = "jobs"
)]
pub async fn list_preview_jobs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = state.jobs.list_preview().await?;
    tracing::debug!("Preview returned {} jobs", jobs.len());
    Ok(Json(jobs))
}

/// GET /jobs/{id}
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Posting found", body = Job),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No posting with this id")
    ),
    tag = "jobs"
)]
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let job_id = parse_id(&id)?;

    let job = state
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job", job_id))?;

    Ok(Json(job))
}

/// POST /jobs
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = NewJob,
    responses(
        (status = 201, description = "Posting stored", body = InsertResult),
        (status = 400, description = "Invalid posting")
    ),
    tag = "jobs"
)]
pub async fn create_job_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewJob>,
) -> Result<(StatusCode, Json<InsertResult>), ApiError> {
    payload.validate()?;

    let job = state.jobs.create(payload).await?;
    tracing::info!("Created job {} for {}", job.id, job.hr_email);

    Ok((StatusCode::CREATED, Json(InsertResult::new(job.id))))
}
