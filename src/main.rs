mod models;
mod report;
mod seed;
mod settings;
mod store;
mod tui;

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use models::{Applicant, ApplicantStatus, Department, Education, Job, JobStatus, User};
use report::ReportType;
use settings::{NotificationSettings, PendingChange, SettingKey, ToggleOutcome, EMAIL_TEMPLATES};
use store::{ApplicantFilter, ApplicantStore, JobDraft, JobFilter, JobPatch, JobStore, UserStore};

#[derive(Parser)]
#[command(name = "ats")]
#[command(about = "Mini ATS - jobs, applicants, and hiring activity from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recruitment pipeline overview
    Dashboard,

    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Review and manage applicants
    Applicants {
        #[command(subcommand)]
        command: ApplicantCommands,
    },

    /// Manage system users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Generate a recruitment report
    Report {
        /// Which sections to include
        #[arg(short, long, value_enum, default_value_t = ReportType::All)]
        kind: ReportType,

        /// Only include jobs created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Only include jobs created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Notification settings and email templates
    Settings {
        #[command(subcommand)]
        command: SettingCommands,
    },

    /// Browse the full-screen dashboard
    Browse,
}

#[derive(Subcommand)]
enum JobCommands {
    /// List job postings
    List {
        /// Filter by status (active, paused, closed)
        #[arg(short, long)]
        status: Option<JobStatus>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a job posting
    Add {
        /// Job title
        #[arg(short, long)]
        title: String,

        /// Department
        #[arg(short, long)]
        department: Department,

        /// Location, e.g. "Remote" or "New York"
        #[arg(short, long)]
        location: String,

        /// Initial status
        #[arg(short, long, default_value = "active")]
        status: JobStatus,
    },

    /// Update fields on an existing posting
    Edit {
        /// Job ID
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        department: Option<Department>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        status: Option<JobStatus>,
    },

    /// Delete a posting
    Delete {
        /// Job ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ApplicantCommands {
    /// List applicants
    List {
        /// Filter by job posting ID
        #[arg(short, long)]
        job: Option<String>,

        /// Filter by education level
        #[arg(short, long)]
        education: Option<Education>,

        /// Minimum years of experience (inclusive)
        #[arg(long, default_value = "0")]
        min_exp: u32,

        /// Maximum years of experience (inclusive)
        #[arg(long, default_value = "10")]
        max_exp: u32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show an applicant profile
    Show {
        /// Applicant ID
        id: String,
    },

    /// Set an applicant's pipeline status
    Status {
        /// Applicant ID
        id: String,

        /// Target status
        status: ApplicantStatus,
    },

    /// Shortlist an applicant
    Shortlist {
        /// Applicant ID
        id: String,
    },

    /// Reject an applicant
    Reject {
        /// Applicant ID
        id: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List system users
    List,

    /// Flip a user between active and inactive
    Toggle {
        /// User ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingCommands {
    /// Show notification settings
    Show,

    /// Flip a notification setting
    Toggle {
        /// Setting to flip
        key: SettingKey,

        /// Skip the confirmation prompt for gated settings
        #[arg(short, long)]
        yes: bool,
    },

    /// List email templates
    Templates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard => {
            let jobs = JobStore::seeded();
            let applicants = ApplicantStore::seeded();
            print_dashboard(&jobs, &applicants);
        }

        Commands::Jobs { command } => {
            let mut jobs = JobStore::seeded();
            match command {
                JobCommands::List { status, json } => {
                    let visible: Vec<&Job> = jobs
                        .all()
                        .iter()
                        .filter(|j| status.is_none_or(|s| j.status == s))
                        .collect();
                    if json {
                        println!("{}", serde_json::to_string_pretty(&visible)?);
                    } else {
                        print_jobs(&visible);
                    }
                }

                JobCommands::Add {
                    title,
                    department,
                    location,
                    status,
                } => {
                    let created = jobs
                        .create(JobDraft {
                            title,
                            department,
                            location,
                            status,
                        })?
                        .clone();
                    println!("Created job '{}' (ID: {})", created.title, created.id);
                    print_jobs(&jobs.all().iter().collect::<Vec<_>>());
                }

                JobCommands::Edit {
                    id,
                    title,
                    department,
                    location,
                    status,
                } => {
                    let patch = JobPatch {
                        title,
                        department,
                        location,
                        status,
                    };
                    if patch.is_empty() {
                        println!(
                            "Nothing to update. Pass --title, --department, --location, or --status."
                        );
                    } else {
                        jobs.update(&id, patch)?;
                        println!("Updated job #{}", id);
                        print_jobs(&jobs.all().iter().collect::<Vec<_>>());
                    }
                }

                JobCommands::Delete { id } => {
                    let removed = jobs.delete(&id)?;
                    println!("Deleted job '{}' (ID: {})", removed.title, removed.id);
                    print_jobs(&jobs.all().iter().collect::<Vec<_>>());
                }
            }
        }

        Commands::Applicants { command } => {
            let mut applicants = ApplicantStore::seeded();
            match command {
                ApplicantCommands::List {
                    job,
                    education,
                    min_exp,
                    max_exp,
                    json,
                } => {
                    let filter = ApplicantFilter {
                        job: job.map_or(JobFilter::All, JobFilter::Job),
                        education,
                        experience: min_exp..=max_exp,
                    };
                    let visible = applicants.filtered(&filter);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&visible)?);
                    } else if visible.is_empty() {
                        println!("No applicants match the current filters.");
                    } else {
                        print_applicants(&visible);
                    }
                }

                ApplicantCommands::Show { id } => match applicants.get(&id) {
                    Some(applicant) => print_profile(applicant),
                    None => println!("Applicant #{} not found.", id),
                },

                ApplicantCommands::Status { id, status } => {
                    applicants.set_status(&id, status)?;
                    print_status_change(&applicants, &id);
                }

                ApplicantCommands::Shortlist { id } => {
                    applicants.set_status(&id, ApplicantStatus::Shortlisted)?;
                    print_status_change(&applicants, &id);
                }

                ApplicantCommands::Reject { id } => {
                    applicants.set_status(&id, ApplicantStatus::Rejected)?;
                    print_status_change(&applicants, &id);
                }
            }
        }

        Commands::Users { command } => {
            let mut users = UserStore::seeded();
            match command {
                UserCommands::List => print_users(users.all()),

                UserCommands::Toggle { id } => {
                    let status = users.toggle_status(&id)?;
                    let name = users.get(&id).map(|u| u.name.as_str()).unwrap_or("?");
                    println!("{} is now {}.", name, status);
                    print_users(users.all());
                }
            }
        }

        Commands::Report {
            kind,
            start,
            end,
            json,
        } => {
            let jobs = JobStore::seeded();
            let applicants = ApplicantStore::seeded();
            if json {
                let payload = report::render_json(kind, &jobs, &applicants, start, end);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", report::render(kind, &jobs, &applicants, start, end));
            }
        }

        Commands::Settings { command } => {
            let mut settings = NotificationSettings::default();
            match command {
                SettingCommands::Show => print_settings(&settings),

                SettingCommands::Toggle { key, yes } => {
                    let value = !settings.get(key);
                    match settings.request_toggle(key, value) {
                        ToggleOutcome::Committed => {
                            println!("Settings updated: {} is now {}.", key, on_off(value));
                        }
                        ToggleOutcome::NeedsConfirmation => {
                            let change = PendingChange { key, value };
                            if yes || prompt_confirmation(&change)? {
                                if let Some(applied) = settings.confirm() {
                                    println!(
                                        "Settings updated: {} is now {}.",
                                        applied.key,
                                        on_off(applied.value)
                                    );
                                }
                            } else {
                                settings.cancel();
                                println!(
                                    "Change discarded. {} stays {}.",
                                    key,
                                    on_off(settings.get(key))
                                );
                            }
                        }
                    }
                }

                SettingCommands::Templates => {
                    for template in &EMAIL_TEMPLATES {
                        println!("{}", template.name);
                        println!("  {}", template.description);
                        for line in template.body.lines() {
                            println!("  | {}", line);
                        }
                        println!();
                    }
                }
            }
        }

        Commands::Browse => {
            tui::run(
                JobStore::seeded(),
                ApplicantStore::seeded(),
                UserStore::seeded(),
            )?;
        }
    }

    Ok(())
}

fn print_dashboard(jobs: &JobStore, applicants: &ApplicantStore) {
    let kpi = report::kpi_summary(jobs, applicants);
    println!("Recruitment Pipeline");
    println!("{}", "-".repeat(52));
    println!("  Total Jobs        {}", kpi.total_jobs);
    println!("  Total Applicants  {}", kpi.total_applicants);
    println!(
        "  Shortlisted       {}  ({:.1}% of total)",
        kpi.shortlisted,
        kpi.shortlisted_share()
    );

    println!("\nApplicants per Job");
    println!("{}", "-".repeat(52));
    for (title, count) in report::applicants_per_job(jobs, applicants) {
        println!(
            "  {:<32} {:<12} {}",
            truncate(&title, 30),
            "#".repeat(count * 3),
            count
        );
    }

    println!("\nStatus Distribution");
    println!("{}", "-".repeat(52));
    for (status, count) in report::status_distribution(applicants) {
        println!(
            "  {:<14} {:<12} {}",
            status.label(),
            "#".repeat(count * 3),
            count
        );
    }
}

fn print_jobs(jobs: &[&Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }
    println!(
        "{:<14} {:<30} {:<12} {:<15} {:>10} {:<8} {:<10}",
        "ID", "TITLE", "DEPARTMENT", "LOCATION", "APPLICANTS", "STATUS", "CREATED"
    );
    println!("{}", "-".repeat(106));
    for job in jobs {
        println!(
            "{:<14} {:<30} {:<12} {:<15} {:>10} {:<8} {:<10}",
            job.id,
            truncate(&job.title, 28),
            job.department.to_string(),
            truncate(&job.location, 13),
            job.applicants,
            job.status.to_string(),
            job.created_at
        );
    }
}

fn print_applicants(applicants: &[&Applicant]) {
    println!(
        "{:<4} {:<18} {:<28} {:<11} {:>4} {:>6} {:<12}",
        "ID", "NAME", "JOB", "EDUCATION", "EXP", "SCORE", "STATUS"
    );
    println!("{}", "-".repeat(90));
    for applicant in applicants {
        println!(
            "{:<4} {:<18} {:<28} {:<11} {:>4} {:>5}% {:<12}",
            applicant.id,
            truncate(&applicant.name, 16),
            truncate(&applicant.job_title, 26),
            applicant.education.to_string(),
            applicant.experience,
            applicant.score,
            applicant.status.to_string()
        );
    }
}

fn print_profile(applicant: &Applicant) {
    println!("{} (ID: {})", applicant.name, applicant.id);
    println!("Applied for: {}", applicant.job_title);
    println!("Status:      {}", applicant.status);
    println!("Score:       {}%", applicant.score);
    println!("Education:   {} Degree", applicant.education);
    println!("Experience:  {} years", applicant.experience);
    println!("Email:       {}", applicant.email);
    println!("\nResume Summary");
    for line in textwrap::fill(&applicant.resume_summary, 72).lines() {
        println!("  {}", line);
    }
}

fn print_status_change(applicants: &ApplicantStore, id: &str) {
    if let Some(applicant) = applicants.get(id) {
        println!(
            "{} is now {} for '{}'.",
            applicant.name, applicant.status, applicant.job_title
        );
    }
}

fn print_users(users: &[User]) {
    println!(
        "{:<4} {:<16} {:<24} {:<16} {:<10} {:<12}",
        "ID", "NAME", "EMAIL", "ROLE", "STATUS", "LAST ACTIVE"
    );
    println!("{}", "-".repeat(86));
    for user in users {
        println!(
            "{:<4} {:<16} {:<24} {:<16} {:<10} {:<12}",
            user.id,
            truncate(&user.name, 14),
            truncate(&user.email, 22),
            user.role.to_string(),
            user.status.to_string(),
            user.last_active
        );
    }
}

fn print_settings(settings: &NotificationSettings) {
    println!("{:<22} {:<6} {:<9} DESCRIPTION", "SETTING", "VALUE", "GATED");
    println!("{}", "-".repeat(100));
    for (key, value) in settings.entries() {
        println!(
            "{:<22} {:<6} {:<9} {}",
            key.to_string(),
            on_off(value),
            if key.requires_confirmation() {
                "confirm"
            } else {
                "-"
            },
            key.description()
        );
    }
}

fn prompt_confirmation(change: &PendingChange) -> Result<bool> {
    let action = if change.value { "enable" } else { "disable" };
    print!(
        "Are you sure you want to {} {}? This will affect how notifications are sent. [y/N] ",
        action, change.key
    );
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Back off to a char boundary so multibyte text never splits mid-char.
    let mut cut = max.saturating_sub(3);
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("Remote", 13), "Remote");
    }

    #[test]
    fn test_truncate_cuts_long_ascii() {
        assert_eq!(truncate("Senior Frontend Developer", 10), "Senior ...");
    }

    #[test]
    fn test_truncate_backs_off_to_char_boundary() {
        // The en dash occupies bytes 8..11; a byte-index cut at 10 would
        // land inside it. 13 is the location column width in print_jobs.
        assert_eq!(truncate("Zürich – Bäckerstrasse 12", 13), "Zürich ...");
        assert_eq!(truncate("München Süd", 8), "Münc...");
    }
}
