// Job application models and DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::jobs::Job;
use crate::store::{parse_id, StoreError};

/// A stored job application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JobApplication {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub job_id: Uuid,
    #[schema(example = "candidate@example.com")]
    pub applicant_email: String,
    /// Free-form review state, e.g. `pending`, `accepted`, `rejected`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl JobApplication {
    pub fn from_new(id: Uuid, new: NewApplication) -> Self {
        Self {
            id,
            job_id: new.job_id,
            applicant_email: new.applicant_email,
            status: new.status,
            linkedin: new.linkedin,
            github: new.github,
            resume: new.resume,
        }
    }
}

/// An application joined with display fields from its job.
///
/// The job fields are absent when the referenced job no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrichedApplication {
    #[serde(flatten)]
    pub application: JobApplication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl EnrichedApplication {
    pub fn new(application: JobApplication, job: Option<&Job>) -> Self {
        Self {
            application,
            company: job.map(|j| j.company.clone()),
            title: job.map(|j| j.title.clone()),
            company_logo: job.and_then(|j| j.company_logo.clone()),
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.company.is_some() || self.title.is_some()
    }
}

/// Request DTO for POST /job-application
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    pub job_id: String,
    #[validate(email(message = "applicant_email must be a valid email address"))]
    pub applicant_email: String,
    pub status: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub resume: Option<String>,
}

impl CreateApplicationRequest {
    /// Resolve the referenced job id
    pub fn into_new(self) -> Result<NewApplication, StoreError> {
        Ok(NewApplication {
            job_id: parse_id(&self.job_id)?,
            applicant_email: self.applicant_email,
            status: self.status,
            linkedin: self.linkedin,
            github: self.github,
            resume: self.resume,
        })
    }
}

/// Validated application ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub applicant_email: String,
    pub status: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub resume: Option<String>,
}

/// Request DTO for PATCH /job-application/{id}
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "accepted")]
    pub status: String,
}

/// Query string for GET /job-application
#[derive(Debug, Default, Deserialize)]
pub struct ApplicantQuery {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_application() -> JobApplication {
        JobApplication {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            applicant_email: "a@x.com".to_string(),
            status: Some("pending".to_string()),
            linkedin: None,
            github: None,
            resume: None,
        }
    }

    #[test]
    fn test_enriched_application_flattens_fields() {
        let application = sample_application();
        let job: Job = serde_json::from_value(json!({
            "_id": application.job_id,
            "hr_email": "hr@acme.com",
            "title": "Engineer",
            "company": "Acme",
            "company_logo": "logo.png",
        }))
        .unwrap();

        let enriched = EnrichedApplication::new(application.clone(), Some(&job));
        let value = serde_json::to_value(&enriched).unwrap();

        assert!(enriched.is_enriched());
        assert_eq!(value["_id"], application.id.to_string());
        assert_eq!(value["applicant_email"], "a@x.com");
        assert_eq!(value["company"], "Acme");
        assert_eq!(value["title"], "Engineer");
        assert_eq!(value["company_logo"], "logo.png");
    }

    #[test]
    fn test_missing_job_leaves_fields_absent() {
        let enriched = EnrichedApplication::new(sample_application(), None);
        let value = serde_json::to_value(&enriched).unwrap();

        assert!(!enriched.is_enriched());
        assert!(value.get("company").is_none());
        assert!(value.get("title").is_none());
        assert!(value.get("company_logo").is_none());
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn test_create_request_rejects_malformed_job_id() {
        let request: CreateApplicationRequest = serde_json::from_value(json!({
            "job_id": "64b7f0c2e13a4b0012345678",
            "applicant_email": "a@x.com",
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert!(matches!(request.into_new(), Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn test_create_request_validates_email() {
        let request: CreateApplicationRequest = serde_json::from_value(json!({
            "job_id": Uuid::new_v4().to_string(),
            "applicant_email": "nope",
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }
}
