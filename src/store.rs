//! In-memory entity stores. Each page owns one store as its single source
//! of truth; mutations rebuild the whole collection so callers never see a
//! half-applied update.

use std::ops::RangeInclusive;

use chrono::Utc;
use thiserror::Error;

use crate::models::{
    Applicant, ApplicantStatus, Department, Education, Job, JobStatus, User, UserStatus,
};
use crate::seed;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    Validation(String),
}

impl StoreError {
    fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

// --- Applicants ---

/// Job half of the applicant filter: everything, or one posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    All,
    Job(String),
}

/// Conjunctive filter over the applicant collection. Pure; inclusive
/// experience bounds; preserves collection order.
#[derive(Debug, Clone)]
pub struct ApplicantFilter {
    pub job: JobFilter,
    pub education: Option<Education>,
    pub experience: RangeInclusive<u32>,
}

impl Default for ApplicantFilter {
    fn default() -> Self {
        Self {
            job: JobFilter::All,
            education: None,
            experience: 0..=10,
        }
    }
}

impl ApplicantFilter {
    pub fn matches(&self, applicant: &Applicant) -> bool {
        if let JobFilter::Job(id) = &self.job {
            if applicant.job_id != *id {
                return false;
            }
        }
        if let Some(education) = self.education {
            if applicant.education != education {
                return false;
            }
        }
        self.experience.contains(&applicant.experience)
    }
}

pub struct ApplicantStore {
    applicants: Vec<Applicant>,
}

impl ApplicantStore {
    pub fn new(applicants: Vec<Applicant>) -> Self {
        Self { applicants }
    }

    pub fn seeded() -> Self {
        Self::new(seed::applicants())
    }

    pub fn all(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn get(&self, id: &str) -> Option<&Applicant> {
        self.applicants.iter().find(|a| a.id == id)
    }

    /// Derived visible subset; an empty result is valid.
    pub fn filtered(&self, filter: &ApplicantFilter) -> Vec<&Applicant> {
        self.applicants.iter().filter(|a| filter.matches(a)).collect()
    }

    /// Replaces one applicant's status, leaving every other field and every
    /// other applicant untouched. Any status is reachable from any status;
    /// re-applying the current status is a no-op by construction.
    pub fn set_status(&mut self, id: &str, status: ApplicantStatus) -> Result<(), StoreError> {
        if !self.applicants.iter().any(|a| a.id == id) {
            return Err(StoreError::not_found("applicant", id));
        }
        self.applicants = self
            .applicants
            .iter()
            .map(|a| {
                if a.id == id {
                    let mut next = a.clone();
                    next.status = status;
                    next
                } else {
                    a.clone()
                }
            })
            .collect();
        Ok(())
    }
}

// --- Jobs ---

/// Form input for a new posting.
#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub department: Department,
    pub location: String,
    pub status: JobStatus,
}

/// Partial update; `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.department.is_none()
            && self.location.is_none()
            && self.status.is_none()
    }
}

pub struct JobStore {
    jobs: Vec<Job>,
}

impl JobStore {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    pub fn seeded() -> Self {
        Self::new(seed::jobs())
    }

    pub fn all(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Creates a posting with a time-derived id, zero applicants, and
    /// today's date, prepended so the listing stays most-recent-first.
    pub fn create(&mut self, draft: JobDraft) -> Result<&Job, StoreError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StoreError::Validation("job title must not be empty".into()));
        }
        let location = draft.location.trim();
        if location.is_empty() {
            return Err(StoreError::Validation(
                "job location must not be empty".into(),
            ));
        }

        let now = Utc::now();
        let job = Job {
            id: now.timestamp_millis().to_string(),
            title: title.to_string(),
            department: draft.department,
            location: location.to_string(),
            status: draft.status,
            applicants: 0,
            created_at: now.date_naive(),
        };

        let mut next = Vec::with_capacity(self.jobs.len() + 1);
        next.push(job);
        next.extend(self.jobs.iter().cloned());
        self.jobs = next;
        Ok(&self.jobs[0])
    }

    /// Merges a partial field set into the matching record.
    pub fn update(&mut self, id: &str, patch: JobPatch) -> Result<(), StoreError> {
        if !self.jobs.iter().any(|j| j.id == id) {
            return Err(StoreError::not_found("job", id));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::Validation("job title must not be empty".into()));
            }
        }
        self.jobs = self
            .jobs
            .iter()
            .map(|j| {
                if j.id != id {
                    return j.clone();
                }
                let mut next = j.clone();
                if let Some(title) = &patch.title {
                    next.title = title.trim().to_string();
                }
                if let Some(department) = patch.department {
                    next.department = department;
                }
                if let Some(location) = &patch.location {
                    next.location = location.trim().to_string();
                }
                if let Some(status) = patch.status {
                    next.status = status;
                }
                next
            })
            .collect();
        Ok(())
    }

    /// Removes exactly one record. Applicants pointing at the deleted job
    /// keep their dangling job_id; there is no cascade.
    pub fn delete(&mut self, id: &str) -> Result<Job, StoreError> {
        let pos = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| StoreError::not_found("job", id))?;
        let mut next = self.jobs.clone();
        let removed = next.remove(pos);
        self.jobs = next;
        Ok(removed)
    }
}

// --- Users ---

pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn seeded() -> Self {
        Self::new(seed::users())
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Flips a user between active and inactive and returns the new status.
    pub fn toggle_status(&mut self, id: &str) -> Result<UserStatus, StoreError> {
        let current = self
            .get(id)
            .map(|u| u.status)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        let next_status = current.toggled();
        self.users = self
            .users
            .iter()
            .map(|u| {
                if u.id == id {
                    let mut next = u.clone();
                    next.status = next_status;
                    next
                } else {
                    u.clone()
                }
            })
            .collect();
        Ok(next_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_with(job: JobFilter, education: Option<Education>, exp: RangeInclusive<u32>) -> ApplicantFilter {
        ApplicantFilter {
            job,
            education,
            experience: exp,
        }
    }

    #[test]
    fn test_default_filter_passes_everything_in_order() {
        let store = ApplicantStore::seeded();
        let visible = store.filtered(&ApplicantFilter::default());
        let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_filter_predicates_are_conjunctive() {
        let store = ApplicantStore::seeded();
        // Job 1, Master's: only Sarah Williams and James Wilson hold job 1
        // with a Master's, and both sit inside 0..=10 years.
        let filter = filter_with(
            JobFilter::Job("1".into()),
            Some(Education::Masters),
            0..=10,
        );
        let ids: Vec<&str> = store
            .filtered(&filter)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["2", "5"]);
    }

    #[test]
    fn test_filter_experience_bounds_are_inclusive() {
        let store = ApplicantStore::seeded();
        // Exactly [3, 5] keeps the 3, 4, and 5 year applicants.
        let filter = filter_with(JobFilter::All, None, 3..=5);
        let years: Vec<u32> = store
            .filtered(&filter)
            .iter()
            .map(|a| a.experience)
            .collect();
        assert_eq!(years, [5, 3, 4]);
    }

    #[test]
    fn test_filter_empty_result_is_valid() {
        let store = ApplicantStore::seeded();
        let filter = filter_with(JobFilter::Job("2".into()), Some(Education::Bachelors), 0..=10);
        assert!(store.filtered(&filter).is_empty());
    }

    #[test]
    fn test_filter_result_is_ordered_subset_satisfying_predicates() {
        let store = ApplicantStore::seeded();
        let filter = filter_with(JobFilter::Job("1".into()), None, 0..=4);
        let visible = store.filtered(&filter);
        for applicant in &visible {
            assert_eq!(applicant.job_id, "1");
            assert!(applicant.experience <= 4);
        }
        // Relative order matches the backing collection.
        let mut last_pos = 0;
        for applicant in &visible {
            let pos = store
                .all()
                .iter()
                .position(|a| a.id == applicant.id)
                .unwrap();
            assert!(pos >= last_pos);
            last_pos = pos;
        }
    }

    #[test]
    fn test_set_status_touches_only_the_target_status() {
        let mut store = ApplicantStore::seeded();
        let before: Vec<Applicant> = store.all().to_vec();

        store
            .set_status("5", ApplicantStatus::Interview)
            .expect("applicant 5 exists");

        for (prev, now) in before.iter().zip(store.all()) {
            if prev.id == "5" {
                assert_eq!(now.status, ApplicantStatus::Interview);
                assert_eq!(now.name, prev.name);
                assert_eq!(now.email, prev.email);
                assert_eq!(now.score, prev.score);
                assert_eq!(now.resume_summary, prev.resume_summary);
            } else {
                assert_eq!(now.status, prev.status);
                assert_eq!(now.name, prev.name);
            }
        }
    }

    #[test]
    fn test_set_status_is_idempotent() {
        let mut store = ApplicantStore::seeded();
        store.set_status("2", ApplicantStatus::Rejected).unwrap();
        let once: Vec<Applicant> = store.all().to_vec();
        store.set_status("2", ApplicantStatus::Rejected).unwrap();
        for (a, b) in once.iter().zip(store.all()) {
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_set_status_unknown_id_is_not_found() {
        let mut store = ApplicantStore::seeded();
        let err = store
            .set_status("999", ApplicantStatus::New)
            .expect_err("unknown id");
        assert!(matches!(err, StoreError::NotFound { entity: "applicant", .. }));
    }

    #[test]
    fn test_create_job_prepends_with_zero_applicants() {
        let mut store = JobStore::seeded();
        let before = store.all().len();

        let id = store
            .create(JobDraft {
                title: "QA Engineer".into(),
                department: Department::Engineering,
                location: "Remote".into(),
                status: JobStatus::Active,
            })
            .expect("valid draft")
            .id
            .clone();

        assert_eq!(store.all().len(), before + 1);
        let head = &store.all()[0];
        assert_eq!(head.id, id);
        assert_eq!(head.title, "QA Engineer");
        assert_eq!(head.department, Department::Engineering);
        assert_eq!(head.location, "Remote");
        assert_eq!(head.status, JobStatus::Active);
        assert_eq!(head.applicants, 0);
    }

    #[test]
    fn test_create_job_rejects_blank_title() {
        let mut store = JobStore::seeded();
        let err = store
            .create(JobDraft {
                title: "   ".into(),
                department: Department::Sales,
                location: "Remote".into(),
                status: JobStatus::Active,
            })
            .expect_err("blank title");
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.all().len(), 5);
    }

    #[test]
    fn test_update_job_merges_partial_fields() {
        let mut store = JobStore::seeded();
        store
            .update(
                "3",
                JobPatch {
                    status: Some(JobStatus::Active),
                    ..JobPatch::default()
                },
            )
            .unwrap();

        let job = store.get("3").unwrap();
        assert_eq!(job.status, JobStatus::Active);
        // Unspecified fields retain their prior values.
        assert_eq!(job.title, "UI/UX Designer");
        assert_eq!(job.location, "San Francisco");
        assert_eq!(job.applicants, 28);
    }

    #[test]
    fn test_delete_job_removes_exactly_one_record() {
        let mut store = JobStore::seeded();
        let before: Vec<Job> = store.all().to_vec();

        let removed = store.delete("3").unwrap();
        assert_eq!(removed.title, "UI/UX Designer");
        assert_eq!(store.all().len(), before.len() - 1);
        assert!(store.get("3").is_none());

        for job in store.all() {
            let prev = before.iter().find(|j| j.id == job.id).unwrap();
            assert_eq!(job.title, prev.title);
            assert_eq!(job.status, prev.status);
            assert_eq!(job.applicants, prev.applicants);
        }
    }

    #[test]
    fn test_delete_job_leaves_applicants_dangling() {
        let mut jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        jobs.delete("4").unwrap();
        // Lisa Anderson still references job 4; no cascade.
        assert_eq!(applicants.get("6").unwrap().job_id, "4");
    }

    #[test]
    fn test_delete_unknown_job_is_not_found() {
        let mut store = JobStore::seeded();
        let err = store.delete("999").expect_err("unknown id");
        assert!(matches!(err, StoreError::NotFound { entity: "job", .. }));
    }

    #[test]
    fn test_toggle_user_status_round_trips() {
        let mut store = UserStore::seeded();
        assert_eq!(store.get("2").unwrap().status, UserStatus::Active);

        assert_eq!(store.toggle_status("2").unwrap(), UserStatus::Inactive);
        assert_eq!(store.toggle_status("2").unwrap(), UserStatus::Active);
        assert_eq!(store.get("2").unwrap().status, UserStatus::Active);
    }

    #[test]
    fn test_toggle_user_status_leaves_others_alone() {
        let mut store = UserStore::seeded();
        store.toggle_status("4").unwrap();
        assert_eq!(store.get("4").unwrap().status, UserStatus::Active);
        assert_eq!(store.get("1").unwrap().status, UserStatus::Active);
        assert_eq!(store.get("2").unwrap().status, UserStatus::Active);
        assert_eq!(store.get("3").unwrap().status, UserStatus::Active);
    }
}
