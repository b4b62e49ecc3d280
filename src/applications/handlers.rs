// HTTP handlers for job application endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::applications::models::{
    ApplicantQuery, CreateApplicationRequest, EnrichedApplication, JobApplication,
    UpdateStatusRequest,
};
use crate::auth::SessionIdentity;
use crate::error::ApiError;
use crate::store::{parse_id, InsertResult, UpdateResult};
use crate::AppState;

/// Applications of the signed-in applicant
/// GET /job-application?email=
///
/// Requires a session whose email matches the `email` query parameter.
#[utoipa::path(
    get,
    path = "/job-application",
    params(("email" = String, Query, description = "Applicant email; must match the session")),
    responses(
        (status = 200, description = "Applications with job details", body = Vec<EnrichedApplication>),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Session belongs to another applicant")
    ),
    tag = "applications"
)]
pub async fn list_my_applications_handler(
    State(state): State<AppState>,
    identity: SessionIdentity,
    Query(query): Query<ApplicantQuery>,
) -> Result<Json<Vec<EnrichedApplication>>, ApiError> {
    identity.ensure_owner(query.email.as_deref())?;

    let applications = state.applications.list_for_applicant(&identity.email).await?;
    tracing::debug!(
        "Returning {} applications for {}",
        applications.len(),
        identity.email
    );
    Ok(Json(applications))
}

/// GET /job-application/jobs/{job_id}
#[utoipa::path(
    get,
    path = "/job-application/jobs/{job_id}",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Applications for the job", body = Vec<JobApplication>),
        (status = 400, description = "Malformed id")
    ),
    tag = "applications"
)]
pub async fn list_job_applications_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<JobApplication>>, ApiError> {
    let job_id = parse_id(&job_id)?;
    let applications = state.applications.list_for_job(job_id).await?;
    Ok(Json(applications))
}

/// POST /job-application
#[utoipa::path(
    post,
    path = "/job-application",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application stored", body = InsertResult),
        (status = 400, description = "Invalid application"),
        (status = 404, description = "Referenced job does not exist")
    ),
    tag = "applications"
)]
pub async fn submit_application_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<InsertResult>), ApiError> {
    request.validate()?;
    let application = request.into_new()?;

    let result = state.applications.submit(application).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// PATCH /job-application/{id}
///
/// The status is overwritten as given; an unknown id yields `matchedCount: 0`.
#[utoipa::path(
    patch,
    path = "/job-application/{id}",
    params(("id" = String, Path, description = "Application id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Update result", body = UpdateResult),
        (status = 400, description = "Malformed id")
    ),
    tag = "applications"
)]
pub async fn update_application_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_id(&id)?;
    let result = state.applications.update_status(id, &request.status).await?;
    Ok(Json(result))
}
