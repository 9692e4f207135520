//! Notification settings with a two-phase commit on the sensitive toggles:
//! applicant emails and HR notifications park the change as pending until an
//! explicit confirm; everything else commits immediately.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    ApplicantEmails,
    StatusChangeEmails,
    HrNotifications,
    WeeklyDigest,
}

impl SettingKey {
    pub const ALL: [Self; 4] = [
        Self::ApplicantEmails,
        Self::StatusChangeEmails,
        Self::HrNotifications,
        Self::WeeklyDigest,
    ];

    pub fn requires_confirmation(self) -> bool {
        matches!(self, Self::ApplicantEmails | Self::HrNotifications)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ApplicantEmails => {
                "Send automated emails to applicants about their application status"
            }
            Self::StatusChangeEmails => "Notify applicants when their status is updated",
            Self::HrNotifications => {
                "Receive notifications about new applications and status changes"
            }
            Self::WeeklyDigest => "Receive a weekly summary of recruitment activity",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ApplicantEmails => "applicant-emails",
            Self::StatusChangeEmails => "status-change-emails",
            Self::HrNotifications => "hr-notifications",
            Self::WeeklyDigest => "weekly-digest",
        };
        f.write_str(s)
    }
}

/// A proposed change held until the user confirms or cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChange {
    pub key: SettingKey,
    pub value: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Committed,
    NeedsConfirmation,
}

#[derive(Debug, Clone)]
pub struct NotificationSettings {
    applicant_emails: bool,
    status_change_emails: bool,
    hr_notifications: bool,
    weekly_digest: bool,
    pending: Option<PendingChange>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            applicant_emails: true,
            status_change_emails: false,
            hr_notifications: true,
            weekly_digest: true,
            pending: None,
        }
    }
}

impl NotificationSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::ApplicantEmails => self.applicant_emails,
            SettingKey::StatusChangeEmails => self.status_change_emails,
            SettingKey::HrNotifications => self.hr_notifications,
            SettingKey::WeeklyDigest => self.weekly_digest,
        }
    }

    pub fn entries(&self) -> [(SettingKey, bool); 4] {
        SettingKey::ALL.map(|key| (key, self.get(key)))
    }

    pub fn pending(&self) -> Option<PendingChange> {
        self.pending
    }

    /// Gated keys hold the proposed value as pending; the rest commit on the
    /// spot. A new request replaces any prior pending change.
    pub fn request_toggle(&mut self, key: SettingKey, value: bool) -> ToggleOutcome {
        if key.requires_confirmation() {
            self.pending = Some(PendingChange { key, value });
            ToggleOutcome::NeedsConfirmation
        } else {
            self.set(key, value);
            ToggleOutcome::Committed
        }
    }

    /// Commits exactly the pending value, if any.
    pub fn confirm(&mut self) -> Option<PendingChange> {
        let change = self.pending.take()?;
        self.set(change.key, change.value);
        Some(change)
    }

    /// Discards the pending change; committed values stay untouched.
    pub fn cancel(&mut self) -> Option<PendingChange> {
        self.pending.take()
    }

    fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::ApplicantEmails => self.applicant_emails = value,
            SettingKey::StatusChangeEmails => self.status_change_emails = value,
            SettingKey::HrNotifications => self.hr_notifications = value,
            SettingKey::WeeklyDigest => self.weekly_digest = value,
        }
    }
}

pub struct EmailTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

pub const EMAIL_TEMPLATES: [EmailTemplate; 3] = [
    EmailTemplate {
        name: "Application Received",
        description: "Sent to applicants when their application is submitted",
        body: "Dear {{applicant_name}},\n\nThank you for applying to {{job_title}} at Mini \
               ATS. We have received your application and will review it shortly.\n\nBest \
               regards,\nThe HR Team",
    },
    EmailTemplate {
        name: "Interview Invitation",
        description: "Sent when an applicant is invited for an interview",
        body: "Dear {{applicant_name}},\n\nCongratulations! We would like to invite you for \
               an interview for the {{job_title}} position.\n\nPlease reply to schedule a \
               convenient time.\n\nBest regards,\nThe HR Team",
    },
    EmailTemplate {
        name: "Application Status Update",
        description: "Sent when an applicant's status changes",
        body: "Dear {{applicant_name}},\n\nWe wanted to update you on the status of your \
               application for {{job_title}}.\n\nYour current status: {{status}}\n\nBest \
               regards,\nThe HR Team",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungated_toggle_commits_immediately() {
        let mut settings = NotificationSettings::default();
        assert!(!settings.get(SettingKey::StatusChangeEmails));

        let outcome = settings.request_toggle(SettingKey::StatusChangeEmails, true);
        assert_eq!(outcome, ToggleOutcome::Committed);
        assert!(settings.get(SettingKey::StatusChangeEmails));
        assert!(settings.pending().is_none());
    }

    #[test]
    fn test_gated_toggle_parks_a_pending_change() {
        let mut settings = NotificationSettings::default();
        let outcome = settings.request_toggle(SettingKey::ApplicantEmails, false);

        assert_eq!(outcome, ToggleOutcome::NeedsConfirmation);
        // Nothing committed yet.
        assert!(settings.get(SettingKey::ApplicantEmails));
        assert_eq!(
            settings.pending(),
            Some(PendingChange {
                key: SettingKey::ApplicantEmails,
                value: false,
            })
        );
    }

    #[test]
    fn test_confirm_commits_exactly_the_proposed_value() {
        let mut settings = NotificationSettings::default();
        settings.request_toggle(SettingKey::HrNotifications, false);

        let change = settings.confirm().expect("pending change");
        assert_eq!(change.key, SettingKey::HrNotifications);
        assert!(!settings.get(SettingKey::HrNotifications));
        assert!(settings.pending().is_none());
    }

    #[test]
    fn test_cancel_discards_the_pending_change() {
        let mut settings = NotificationSettings::default();
        settings.request_toggle(SettingKey::ApplicantEmails, false);

        settings.cancel();
        assert!(settings.get(SettingKey::ApplicantEmails));
        assert!(settings.pending().is_none());
        // Confirm after cancel is a no-op.
        assert!(settings.confirm().is_none());
    }

    #[test]
    fn test_new_request_replaces_prior_pending_change() {
        let mut settings = NotificationSettings::default();
        settings.request_toggle(SettingKey::ApplicantEmails, false);
        settings.request_toggle(SettingKey::HrNotifications, false);

        let change = settings.confirm().expect("pending change");
        assert_eq!(change.key, SettingKey::HrNotifications);
        // The replaced request never committed.
        assert!(settings.get(SettingKey::ApplicantEmails));
    }

    #[test]
    fn test_templates_carry_placeholders() {
        for template in &EMAIL_TEMPLATES {
            assert!(template.body.contains("{{applicant_name}}"));
            assert!(template.body.contains("{{job_title}}"));
        }
    }
}
