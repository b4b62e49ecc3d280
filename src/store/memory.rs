//! In-memory gateways
//!
//! Used when no database is configured and by the test-suite. Documents are
//! kept in insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::applications::{ApplicationRepository, JobApplication, NewApplication};
use crate::jobs::{Job, JobRepository, NewJob, PREVIEW_LIMIT};
use crate::store::{StoreError, UpdateResult};

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a posting, leaving its applications behind
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        jobs.len() != before
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list_all(&self, hr_email: Option<&str>) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .filter(|job| hr_email.map_or(true, |email| job.hr_email == email))
            .cloned()
            .collect())
    }

    async fn list_preview(&self) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().take(PREVIEW_LIMIT).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn create(&self, job: NewJob) -> Result<Job, StoreError> {
        let job = Job::from_new(Uuid::new_v4(), job);
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn increment_application_count(&self, id: Uuid) -> Result<Option<i64>, StoreError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.iter_mut().find(|job| job.id == id).map(|job| {
            job.application_count += 1;
            job.application_count
        }))
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<Vec<JobApplication>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn list_by_applicant(&self, email: &str) -> Result<Vec<JobApplication>, StoreError> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|a| a.applicant_email == email)
            .cloned()
            .collect())
    }

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>, StoreError> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn create(&self, application: NewApplication) -> Result<JobApplication, StoreError> {
        let application = JobApplication::from_new(Uuid::new_v4(), application);
        self.applications.write().await.push(application.clone());
        Ok(application)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<UpdateResult, StoreError> {
        let mut applications = self.applications.write().await;
        let result = match applications.iter_mut().find(|a| a.id == id) {
            Some(application) if application.status.as_deref() == Some(status) => {
                UpdateResult::new(1, 0)
            }
            Some(application) => {
                application.status = Some(status.to_string());
                UpdateResult::new(1, 1)
            }
            None => UpdateResult::new(0, 0),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn new_job(hr_email: &str, title: &str) -> NewJob {
        NewJob {
            hr_email: hr_email.to_string(),
            hr_name: None,
            title: title.to_string(),
            company: "Acme".to_string(),
            company_logo: None,
            location: None,
            job_type: None,
            category: None,
            application_deadline: None,
            salary_range: None,
            description: None,
            requirements: vec![],
            responsibilities: vec![],
            status: None,
        }
    }

    fn new_application(job_id: Uuid, email: &str) -> NewApplication {
        NewApplication {
            job_id,
            applicant_email: email.to_string(),
            status: None,
            linkedin: None,
            github: None,
            resume: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_returns_input_with_id() {
        let repository = InMemoryJobRepository::new();
        let input = new_job("hr@acme.com", "Engineer");

        let created = repository.create(input.clone()).await.unwrap();
        let found = repository.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found, Job::from_new(created.id, input));
        assert!(repository.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_filters_by_recruiter_in_insertion_order() {
        let repository = InMemoryJobRepository::new();
        repository.create(new_job("a@acme.com", "First")).await.unwrap();
        repository.create(new_job("b@acme.com", "Other")).await.unwrap();
        repository.create(new_job("a@acme.com", "Second")).await.unwrap();

        let titles: Vec<_> = repository
            .list_all(Some("a@acme.com"))
            .await
            .unwrap()
            .into_iter()
            .map(|job| job.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(repository.list_all(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repository = Arc::new(InMemoryJobRepository::new());
        let job_id = repository.create(new_job("hr@acme.com", "Hot")).await.unwrap().id;

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.increment_application_count(job_id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let found = repository.find_by_id(job_id).await.unwrap().unwrap();
        assert_eq!(found.application_count, 50);
    }

    #[tokio::test]
    async fn test_increment_unknown_job() {
        let repository = InMemoryJobRepository::new();
        assert_eq!(repository.increment_application_count(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_status_reports_matches() {
        let repository = InMemoryApplicationRepository::new();
        let created = repository
            .create(new_application(Uuid::new_v4(), "a@x.com"))
            .await
            .unwrap();

        assert_eq!(
            repository.update_status(created.id, "accepted").await.unwrap(),
            UpdateResult::new(1, 1)
        );
        assert_eq!(
            repository.update_status(created.id, "accepted").await.unwrap(),
            UpdateResult::new(1, 0)
        );
        assert_eq!(
            repository.update_status(Uuid::new_v4(), "rejected").await.unwrap(),
            UpdateResult::new(0, 0)
        );

        let listed = repository.list_by_applicant("a@x.com").await.unwrap();
        assert_eq!(listed[0].status.as_deref(), Some("accepted"));
    }

    #[tokio::test]
    async fn test_list_by_job_and_applicant() {
        let repository = InMemoryApplicationRepository::new();
        let job_a = Uuid::new_v4();
        let job_b = Uuid::new_v4();
        repository.create(new_application(job_a, "a@x.com")).await.unwrap();
        repository.create(new_application(job_b, "a@x.com")).await.unwrap();
        repository.create(new_application(job_a, "b@x.com")).await.unwrap();

        assert_eq!(repository.list_by_job(job_a).await.unwrap().len(), 2);
        assert_eq!(repository.list_by_applicant("a@x.com").await.unwrap().len(), 2);
        assert!(repository.list_by_applicant("c@x.com").await.unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_preview_never_exceeds_limit(total in 0usize..20) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let preview = rt.block_on(async {
                let repository = InMemoryJobRepository::new();
                for i in 0..total {
                    repository.create(new_job("hr@acme.com", &format!("Job {i}"))).await.unwrap();
                }
                repository.list_preview().await.unwrap()
            });

            prop_assert!(preview.len() <= PREVIEW_LIMIT);
            prop_assert_eq!(preview.len(), total.min(PREVIEW_LIMIT));
        }
    }
}
