//! Derived views over the stores: dashboard KPIs, per-job applicant tallies,
//! the status distribution, and the quick stats block on the reports page.
//! Everything here is a pure read; nothing mutates a store.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::models::{ApplicantStatus, Job};
use crate::store::{ApplicantStore, JobStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    All,
    Applicants,
    Jobs,
    Hires,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Applicants => "applicants",
            Self::Jobs => "jobs",
            Self::Hires => "hires",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub total_jobs: usize,
    pub total_applicants: usize,
    pub shortlisted: usize,
}

impl KpiSummary {
    /// Shortlisted share of all applicants, in percent.
    pub fn shortlisted_share(&self) -> f64 {
        if self.total_applicants == 0 {
            0.0
        } else {
            self.shortlisted as f64 * 100.0 / self.total_applicants as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickStats {
    pub new_applications: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

pub fn kpi_summary(jobs: &JobStore, applicants: &ApplicantStore) -> KpiSummary {
    KpiSummary {
        total_jobs: jobs.all().len(),
        total_applicants: applicants.all().len(),
        shortlisted: count_status(applicants, ApplicantStatus::Shortlisted),
    }
}

/// Applicant record count per posting, in posting order. Counts actual
/// applicant records, not the seeded `Job.applicants` headcount.
pub fn applicants_per_job(jobs: &JobStore, applicants: &ApplicantStore) -> Vec<(String, usize)> {
    jobs.all()
        .iter()
        .map(|job| {
            let count = applicants
                .all()
                .iter()
                .filter(|a| a.job_id == job.id)
                .count();
            (job.title.clone(), count)
        })
        .collect()
}

pub fn status_distribution(applicants: &ApplicantStore) -> Vec<(ApplicantStatus, usize)> {
    ApplicantStatus::ALL
        .iter()
        .map(|&status| (status, count_status(applicants, status)))
        .collect()
}

pub fn quick_stats(applicants: &ApplicantStore) -> QuickStats {
    QuickStats {
        new_applications: count_status(applicants, ApplicantStatus::New),
        shortlisted: count_status(applicants, ApplicantStatus::Shortlisted),
        rejected: count_status(applicants, ApplicantStatus::Rejected),
    }
}

fn count_status(applicants: &ApplicantStore, status: ApplicantStatus) -> usize {
    applicants
        .all()
        .iter()
        .filter(|a| a.status == status)
        .count()
}

/// Jobs whose creation date falls inside the optional range, in posting order.
fn jobs_in_range<'a>(
    jobs: &'a JobStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a Job> {
    jobs.all()
        .iter()
        .filter(|job| !start.is_some_and(|d| job.created_at < d))
        .filter(|job| !end.is_some_and(|d| job.created_at > d))
        .collect()
}

/// Text report for stdout. The optional date range narrows the jobs section
/// by creation date; applicants carry no dates, so it does not apply there.
pub fn render(
    kind: ReportType,
    jobs: &JobStore,
    applicants: &ApplicantStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> String {
    let mut out = String::new();

    if matches!(kind, ReportType::All | ReportType::Jobs) {
        out.push_str("Job Postings\n");
        for job in jobs_in_range(jobs, start, end) {
            out.push_str(&format!(
                "  {:<30} {:<12} {:<15} {:<8} {:>4} applicants\n",
                job.title, job.department, job.location, job.status, job.applicants
            ));
        }
        out.push('\n');
    }

    if matches!(kind, ReportType::All | ReportType::Applicants) {
        out.push_str("Applicants\n");
        for applicant in applicants.all() {
            out.push_str(&format!(
                "  {:<18} {:<30} {:<12} {:>3}%\n",
                applicant.name, applicant.job_title, applicant.status, applicant.score
            ));
        }
        out.push('\n');
    }

    if matches!(kind, ReportType::All | ReportType::Hires) {
        out.push_str("Shortlisted\n");
        for applicant in applicants.all() {
            if applicant.status != ApplicantStatus::Shortlisted {
                continue;
            }
            out.push_str(&format!(
                "  {:<18} {:<30} {:>3}%\n",
                applicant.name, applicant.job_title, applicant.score
            ));
        }
        out.push('\n');
    }

    let stats = quick_stats(applicants);
    out.push_str("Quick Stats\n");
    out.push_str(&format!("  New applications: {}\n", stats.new_applications));
    out.push_str(&format!("  Shortlisted:      {}\n", stats.shortlisted));
    out.push_str(&format!("  Rejected:         {}\n", stats.rejected));

    out
}

/// JSON report for stdout. Carries the same sections `render` prints for the
/// given report type, with the date range applied to the jobs data.
pub fn render_json(
    kind: ReportType,
    jobs: &JobStore,
    applicants: &ApplicantStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> serde_json::Value {
    let mut payload = json!({
        "kind": kind,
        "kpi": kpi_summary(jobs, applicants),
        "quickStats": quick_stats(applicants),
    });

    if matches!(kind, ReportType::All | ReportType::Jobs) {
        let ranged = jobs_in_range(jobs, start, end);
        let tallies: Vec<_> = ranged
            .iter()
            .map(|job| {
                let count = applicants
                    .all()
                    .iter()
                    .filter(|a| a.job_id == job.id)
                    .count();
                (job.title.clone(), count)
            })
            .collect();
        payload["jobs"] = json!(ranged);
        payload["applicantsPerJob"] = json!(tallies);
    }

    if matches!(kind, ReportType::All | ReportType::Applicants) {
        payload["applicants"] = json!(applicants.all());
        payload["statusDistribution"] = json!(status_distribution(applicants));
    }

    if matches!(kind, ReportType::All | ReportType::Hires) {
        let shortlisted: Vec<_> = applicants
            .all()
            .iter()
            .filter(|a| a.status == ApplicantStatus::Shortlisted)
            .collect();
        payload["shortlisted"] = json!(shortlisted);
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, JobStatus};
    use crate::store::JobDraft;

    #[test]
    fn test_kpi_summary_counts_seeded_stores() {
        let jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        let kpi = kpi_summary(&jobs, &applicants);

        assert_eq!(kpi.total_jobs, 5);
        assert_eq!(kpi.total_applicants, 6);
        assert_eq!(kpi.shortlisted, 2);
        assert!((kpi.shortlisted_share() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_applicants_per_job_counts_records_not_headcounts() {
        let jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        let tallies = applicants_per_job(&jobs, &applicants);

        assert_eq!(
            tallies,
            vec![
                ("Senior Frontend Developer".to_string(), 3),
                ("Backend Engineer".to_string(), 1),
                ("UI/UX Designer".to_string(), 1),
                ("Product Manager".to_string(), 1),
                ("DevOps Engineer".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_status_distribution_covers_every_status() {
        let applicants = ApplicantStore::seeded();
        let dist = status_distribution(&applicants);

        assert_eq!(dist.len(), 5);
        let total: usize = dist.iter().map(|(_, n)| n).sum();
        assert_eq!(total, applicants.all().len());
        assert!(dist.contains(&(ApplicantStatus::Shortlisted, 2)));
        assert!(dist.contains(&(ApplicantStatus::Rejected, 1)));
    }

    #[test]
    fn test_quick_stats_follow_status_mutations() {
        let mut applicants = ApplicantStore::seeded();
        applicants
            .set_status("5", ApplicantStatus::Shortlisted)
            .unwrap();

        let stats = quick_stats(&applicants);
        assert_eq!(stats.new_applications, 0);
        assert_eq!(stats.shortlisted, 3);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_render_jobs_section_honors_date_range() {
        let jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = render(ReportType::Jobs, &jobs, &applicants, Some(start), None);

        // DevOps Engineer was created 2023-12-20 and falls outside the range.
        assert!(report.contains("Senior Frontend Developer"));
        assert!(!report.contains("DevOps Engineer"));
    }

    #[test]
    fn test_render_json_honors_kind_and_date_range() {
        let jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let payload = render_json(ReportType::Jobs, &jobs, &applicants, Some(start), None);

        assert_eq!(payload["kind"], "jobs");
        let titles: Vec<&str> = payload["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles.len(), 4);
        assert!(!titles.contains(&"DevOps Engineer"));

        // A jobs-only report carries no applicant sections.
        assert!(payload.get("applicants").is_none());
        assert!(payload.get("statusDistribution").is_none());
        assert!(payload.get("shortlisted").is_none());
        assert!(payload["quickStats"].is_object());
    }

    #[test]
    fn test_render_json_all_carries_every_section() {
        let jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        let payload = render_json(ReportType::All, &jobs, &applicants, None, None);

        assert_eq!(payload["jobs"].as_array().unwrap().len(), 5);
        assert_eq!(payload["applicants"].as_array().unwrap().len(), 6);
        assert_eq!(payload["shortlisted"].as_array().unwrap().len(), 2);
        assert_eq!(payload["applicantsPerJob"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_new_job_shows_up_in_tallies_with_zero_applicants() {
        let mut jobs = JobStore::seeded();
        let applicants = ApplicantStore::seeded();
        jobs.create(JobDraft {
            title: "QA Engineer".into(),
            department: Department::Engineering,
            location: "Remote".into(),
            status: JobStatus::Active,
        })
        .unwrap();

        let tallies = applicants_per_job(&jobs, &applicants);
        assert_eq!(tallies[0], ("QA Engineer".to_string(), 0));
    }
}
