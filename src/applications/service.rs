use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::applications::{
    ApplicationRepository, EnrichedApplication, JobApplication, NewApplication,
};
use crate::error::ApiError;
use crate::jobs::{Job, JobRepository};
use crate::store::{InsertResult, UpdateResult};

/// Service layer coordinating applications with the jobs they reference
#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ApplicationService {
    /// Create a new ApplicationService
    pub fn new(applications: Arc<dyn ApplicationRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { applications, jobs }
    }

    /// Applications of one applicant, joined with their job's display fields.
    ///
    /// Applications whose job is gone are returned without the job fields.
    pub async fn list_for_applicant(&self, email: &str) -> Result<Vec<EnrichedApplication>, ApiError> {
        let applications = self.applications.list_by_applicant(email).await?;

        let mut jobs: HashMap<Uuid, Option<Job>> = HashMap::new();
        let mut enriched = Vec::with_capacity(applications.len());
        for application in applications {
            if !jobs.contains_key(&application.job_id) {
                let job = self.jobs.find_by_id(application.job_id).await?;
                if job.is_none() {
                    tracing::debug!(
                        "Application {} references missing job {}",
                        application.id,
                        application.job_id
                    );
                }
                jobs.insert(application.job_id, job);
            }
            let job = jobs.get(&application.job_id).and_then(Option::as_ref);
            enriched.push(EnrichedApplication::new(application, job));
        }

        Ok(enriched)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>, ApiError> {
        Ok(self.applications.list_by_job(job_id).await?)
    }

    /// Store an application and bump its job's application count.
    ///
    /// This method:
    /// 1. Verifies the referenced job exists
    /// 2. Stores the application
    /// 3. Increments the job's application count
    ///
    /// Steps 2 and 3 are separate writes; a failure between them leaves the
    /// count one short.
    pub async fn submit(&self, application: NewApplication) -> Result<InsertResult, ApiError> {
        let job_id = application.job_id;

        // 1. Verify job exists
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Err(ApiError::not_found("Job", job_id));
        }

        // 2. Store the application
        let stored = self.applications.create(application).await?;

        // 3. Increment application count
        match self.jobs.increment_application_count(job_id).await? {
            Some(count) => {
                tracing::info!(
                    "Application {} stored for job {} (count now {})",
                    stored.id,
                    job_id,
                    count
                );
            }
            None => {
                tracing::warn!(
                    "Job {} disappeared before its count could be incremented",
                    job_id
                );
            }
        }

        Ok(InsertResult::new(stored.id))
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<UpdateResult, ApiError> {
        let result = self.applications.update_status(id, status).await?;
        if result.matched_count == 0 {
            tracing::debug!("Status update for unknown application {}", id);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::NewJob;
    use crate::store::{InMemoryApplicationRepository, InMemoryJobRepository};
    use axum::http::StatusCode;

    struct Fixture {
        jobs: Arc<InMemoryJobRepository>,
        service: ApplicationService,
    }

    fn fixture() -> Fixture {
        let jobs = Arc::new(InMemoryJobRepository::new());
        let service = ApplicationService::new(
            Arc::new(InMemoryApplicationRepository::new()),
            jobs.clone(),
        );
        Fixture { jobs, service }
    }

    async fn create_job(jobs: &InMemoryJobRepository, title: &str) -> Job {
        jobs.create(NewJob {
            hr_email: "hr@acme.com".to_string(),
            hr_name: None,
            title: title.to_string(),
            company: "Acme".to_string(),
            company_logo: Some("logo.png".to_string()),
            location: None,
            job_type: None,
            category: None,
            application_deadline: None,
            salary_range: None,
            description: None,
            requirements: vec![],
            responsibilities: vec![],
            status: None,
        })
        .await
        .unwrap()
    }

    fn application(job_id: Uuid, email: &str) -> NewApplication {
        NewApplication {
            job_id,
            applicant_email: email.to_string(),
            status: Some("pending".to_string()),
            linkedin: None,
            github: None,
            resume: None,
        }
    }

    #[tokio::test]
    async fn test_submissions_increment_count() {
        let f = fixture();
        let job = create_job(&f.jobs, "Engineer").await;

        for i in 0..3 {
            f.service
                .submit(application(job.id, &format!("user{i}@x.com")))
                .await
                .unwrap();
        }

        let stored = f.jobs.find_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(stored.application_count, 3);
        assert_eq!(f.service.list_for_job(job.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_to_missing_job_is_not_found_and_not_stored() {
        let f = fixture();
        let missing = Uuid::new_v4();

        let error = f.service.submit(application(missing, "a@x.com")).await.unwrap_err();

        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert!(f.service.list_for_job(missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrichment_copies_job_fields() {
        let f = fixture();
        let job = create_job(&f.jobs, "Engineer").await;
        f.service.submit(application(job.id, "a@x.com")).await.unwrap();
        f.service.submit(application(job.id, "b@x.com")).await.unwrap();

        let listed = f.service.list_for_applicant("a@x.com").await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].application.applicant_email, "a@x.com");
        assert_eq!(listed[0].title.as_deref(), Some("Engineer"));
        assert_eq!(listed[0].company.as_deref(), Some("Acme"));
        assert_eq!(listed[0].company_logo.as_deref(), Some("logo.png"));
    }

    #[tokio::test]
    async fn test_enrichment_skips_missing_job() {
        let f = fixture();
        let kept = create_job(&f.jobs, "Kept").await;
        let dropped = create_job(&f.jobs, "Dropped").await;
        f.service.submit(application(kept.id, "a@x.com")).await.unwrap();
        f.service.submit(application(dropped.id, "a@x.com")).await.unwrap();
        assert!(f.jobs.remove(dropped.id).await);

        let listed = f.service.list_for_applicant("a@x.com").await.unwrap();

        assert_eq!(listed.len(), 2);
        let orphan = listed
            .iter()
            .find(|a| a.application.job_id == dropped.id)
            .unwrap();
        assert!(!orphan.is_enriched());
        assert!(orphan.company_logo.is_none());
        let enriched = listed.iter().find(|a| a.application.job_id == kept.id).unwrap();
        assert_eq!(enriched.title.as_deref(), Some("Kept"));
    }

    #[tokio::test]
    async fn test_update_status_on_unknown_id_reports_no_match() {
        let f = fixture();
        let result = f.service.update_status(Uuid::new_v4(), "accepted").await.unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);
        assert!(result.acknowledged);
    }
}
