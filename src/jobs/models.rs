// Job posting models and DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// Salary band advertised on a posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A stored job posting
///
/// Field names on the wire follow the portal front-end (`_id`, `hr_email`,
/// `applicationCount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "recruiter@acme.com")]
    pub hr_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_name: Option<String>,
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[schema(example = "Acme")]
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "jobType", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "applicationDeadline", skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(rename = "salaryRange", skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<SalaryRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "applicationCount", default)]
    pub application_count: i64,
}

impl Job {
    /// Materialise a posting from its creation payload
    pub fn from_new(id: Uuid, new: NewJob) -> Self {
        Self {
            id,
            hr_email: new.hr_email,
            hr_name: new.hr_name,
            title: new.title,
            company: new.company,
            company_logo: new.company_logo,
            location: new.location,
            job_type: new.job_type,
            category: new.category,
            application_deadline: new.application_deadline,
            salary_range: new.salary_range,
            description: new.description,
            requirements: new.requirements,
            responsibilities: new.responsibilities,
            status: new.status,
            application_count: 0,
        }
    }
}

/// Request DTO for POST /jobs
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewJob {
    #[validate(email(message = "hr_email must be a valid email address"))]
    pub hr_email: String,
    pub hr_name: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub title: String,
    #[validate(custom = "validate_not_blank")]
    pub company: String,
    pub company_logo: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "applicationDeadline")]
    pub application_deadline: Option<String>,
    #[serde(rename = "salaryRange")]
    pub salary_range: Option<SalaryRange>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub status: Option<String>,
}

/// Query string for GET /jobAll
#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    pub email: Option<String>,
}
