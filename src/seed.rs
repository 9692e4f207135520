//! Fixture data every session starts from. Nothing persists across runs;
//! these literals are the entire universe at startup.

use chrono::NaiveDate;

use crate::models::{
    Applicant, ApplicantStatus, Department, Education, Job, JobStatus, Role, User, UserStatus,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

pub fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: "1".into(),
            title: "Senior Frontend Developer".into(),
            department: Department::Engineering,
            location: "Remote".into(),
            status: JobStatus::Active,
            applicants: 45,
            created_at: date(2024, 1, 15),
        },
        Job {
            id: "2".into(),
            title: "Backend Engineer".into(),
            department: Department::Engineering,
            location: "New York".into(),
            status: JobStatus::Active,
            applicants: 32,
            created_at: date(2024, 1, 10),
        },
        Job {
            id: "3".into(),
            title: "UI/UX Designer".into(),
            department: Department::Design,
            location: "San Francisco".into(),
            status: JobStatus::Paused,
            applicants: 28,
            created_at: date(2024, 1, 5),
        },
        Job {
            id: "4".into(),
            title: "Product Manager".into(),
            department: Department::Product,
            location: "Remote".into(),
            status: JobStatus::Active,
            applicants: 22,
            created_at: date(2024, 1, 1),
        },
        Job {
            id: "5".into(),
            title: "DevOps Engineer".into(),
            department: Department::Engineering,
            location: "Austin".into(),
            status: JobStatus::Closed,
            applicants: 18,
            created_at: date(2023, 12, 20),
        },
    ]
}

pub fn applicants() -> Vec<Applicant> {
    vec![
        Applicant {
            id: "1".into(),
            name: "Alex Johnson".into(),
            email: "alex@email.com".into(),
            education: Education::Bachelors,
            experience: 5,
            score: 92,
            status: ApplicantStatus::Shortlisted,
            job_id: "1".into(),
            job_title: "Senior Frontend Developer".into(),
            resume_summary: "Experienced frontend developer with expertise in React, \
                             TypeScript, and modern CSS frameworks. Led multiple successful \
                             product launches."
                .into(),
        },
        Applicant {
            id: "2".into(),
            name: "Sarah Williams".into(),
            email: "sarah@email.com".into(),
            education: Education::Masters,
            experience: 3,
            score: 88,
            status: ApplicantStatus::Interview,
            job_id: "1".into(),
            job_title: "Senior Frontend Developer".into(),
            resume_summary: "Full-stack developer transitioning to frontend. Strong \
                             background in user experience and design systems."
                .into(),
        },
        Applicant {
            id: "3".into(),
            name: "Michael Chen".into(),
            email: "michael@email.com".into(),
            education: Education::Phd,
            experience: 7,
            score: 95,
            status: ApplicantStatus::Shortlisted,
            job_id: "2".into(),
            job_title: "Backend Engineer".into(),
            resume_summary: "Senior backend engineer specializing in distributed systems \
                             and microservices architecture."
                .into(),
        },
        Applicant {
            id: "4".into(),
            name: "Emily Davis".into(),
            email: "emily@email.com".into(),
            education: Education::Bachelors,
            experience: 2,
            score: 75,
            status: ApplicantStatus::Screening,
            job_id: "3".into(),
            job_title: "UI/UX Designer".into(),
            resume_summary: "Creative designer with a portfolio of award-winning mobile \
                             and web applications."
                .into(),
        },
        Applicant {
            id: "5".into(),
            name: "James Wilson".into(),
            email: "james@email.com".into(),
            education: Education::Masters,
            experience: 4,
            score: 82,
            status: ApplicantStatus::New,
            job_id: "1".into(),
            job_title: "Senior Frontend Developer".into(),
            resume_summary: "Frontend specialist focused on performance optimization and \
                             accessibility."
                .into(),
        },
        Applicant {
            id: "6".into(),
            name: "Lisa Anderson".into(),
            email: "lisa@email.com".into(),
            education: Education::Bachelors,
            experience: 1,
            score: 65,
            status: ApplicantStatus::Rejected,
            job_id: "4".into(),
            job_title: "Product Manager".into(),
            resume_summary: "Entry-level product enthusiast with strong analytical skills."
                .into(),
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            name: "Jane Doe".into(),
            email: "jane@company.com".into(),
            role: Role::Admin,
            status: UserStatus::Active,
            last_active: date(2024, 1, 20),
        },
        User {
            id: "2".into(),
            name: "John Smith".into(),
            email: "john@company.com".into(),
            role: Role::Recruiter,
            status: UserStatus::Active,
            last_active: date(2024, 1, 19),
        },
        User {
            id: "3".into(),
            name: "Emily Brown".into(),
            email: "emily@company.com".into(),
            role: Role::HiringManager,
            status: UserStatus::Active,
            last_active: date(2024, 1, 18),
        },
        User {
            id: "4".into(),
            name: "Michael Lee".into(),
            email: "michael@company.com".into(),
            role: Role::Recruiter,
            status: UserStatus::Inactive,
            last_active: date(2024, 1, 10),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique_per_collection() {
        let job_ids: HashSet<_> = jobs().into_iter().map(|j| j.id).collect();
        assert_eq!(job_ids.len(), 5);

        let applicant_ids: HashSet<_> = applicants().into_iter().map(|a| a.id).collect();
        assert_eq!(applicant_ids.len(), 6);

        let user_ids: HashSet<_> = users().into_iter().map(|u| u.id).collect();
        assert_eq!(user_ids.len(), 4);
    }

    #[test]
    fn test_seed_applicants_reference_seeded_jobs() {
        let job_ids: HashSet<_> = jobs().into_iter().map(|j| j.id).collect();
        for applicant in applicants() {
            assert!(
                job_ids.contains(&applicant.job_id),
                "applicant {} points at unknown job {}",
                applicant.id,
                applicant.job_id
            );
        }
    }
}
