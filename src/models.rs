use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Records are plain data: "foreign keys" are opaque string ids compared by
// value, with no relational integrity. A lookup for a deleted referent
// returns None and callers render a placeholder.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Applicant,
    Employer,
    Moderator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    Basic,
    Pro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub role: UserRole,
    pub username: String,
    pub subscription: SubscriptionTier,
    pub notifications_enabled: bool,
    pub profile_visible: bool,
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub username: Option<String>,
    pub subscription: Option<SubscriptionTier>,
    pub notifications_enabled: Option<bool>,
    pub profile_visible: Option<bool>,
}

// --- Applicant / employer profiles ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedQuestionnaire {
    pub about: String,
    pub achievements: String,
    pub preferred_schedule: String,
    pub relocation_ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub birth_date: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub experience_years: u32,
    pub specializations: Vec<String>,
    pub questionnaire: ExtendedQuestionnaire,
    // data URIs, stored verbatim
    pub avatar: String,
    pub cover: String,
}

/// Incremental onboarding patch: each wizard step fills only the fields it
/// knows about, so `None` means "leave as is", never "clear".
#[derive(Debug, Clone, Default)]
pub struct ApplicantProfilePatch {
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<u32>,
    pub specializations: Option<Vec<String>>,
    pub questionnaire: Option<ExtendedQuestionnaire>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
}

impl ApplicantProfile {
    pub fn apply(&mut self, patch: ApplicantProfilePatch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.birth_date {
            self.birth_date = v;
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.experience_years {
            self.experience_years = v;
        }
        if let Some(v) = patch.specializations {
            self.specializations = v;
        }
        if let Some(v) = patch.questionnaire {
            self.questionnaire = v;
        }
        if let Some(v) = patch.avatar {
            self.avatar = v;
        }
        if let Some(v) = patch.cover {
            self.cover = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub company_name: String,
    pub legal_name: String,
    pub city: String,
    pub address: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub referral_code: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default)]
pub struct EmployerProfilePatch {
    pub company_name: Option<String>,
    pub legal_name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub referral_code: Option<String>,
    pub logo: Option<String>,
}

impl EmployerProfile {
    pub fn apply(&mut self, patch: EmployerProfilePatch) {
        if let Some(v) = patch.company_name {
            self.company_name = v;
        }
        if let Some(v) = patch.legal_name {
            self.legal_name = v;
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.contact_person {
            self.contact_person = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.referral_code {
            self.referral_code = v;
        }
        if let Some(v) = patch.logo {
            self.logo = v;
        }
    }
}

// --- Jobs ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Moderating,
    Approved,
    Rejected,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub employer_id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub requirements: Vec<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Employer-entered fields of a new posting; id, status and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub city: String,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub requirements: Vec<String>,
    pub contact_phone: String,
    pub contact_email: String,
}

// --- Responses ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Sent,
    Viewed,
    Interested,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub status: ResponseStatus,
    pub employer_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub viewed_at: Option<DateTime<Utc>>,
}

// --- Portfolio ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPost {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    // data URI
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Platform name -> profile URL, replaced wholesale on save.
pub type SocialLinks = HashMap<String, String>;

// --- Education ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub duration_hours: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Enrolled,
    Completed,
    Certified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub education_id: String,
    pub status: EnrollmentStatus,
    pub certificate_id: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub education_id: String,
    pub enrollment_id: String,
    pub certificate_number: String,
    pub issued_at: DateTime<Utc>,
}

// --- Events ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub venue: String,
    pub starts_at: String,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub city: String,
    pub venue: String,
    pub starts_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ParticipationStatus {
    /// Rejected and cancelled participations never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: ParticipationStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_profile_patches_compose() {
        let mut profile = ApplicantProfile::default();
        profile.apply(ApplicantProfilePatch {
            full_name: Some("Anna Kim".into()),
            ..Default::default()
        });
        profile.apply(ApplicantProfilePatch {
            city: Some("Tallinn".into()),
            ..Default::default()
        });
        assert_eq!(profile.full_name, "Anna Kim");
        assert_eq!(profile.city, "Tallinn");
    }

    #[test]
    fn none_fields_leave_values_untouched() {
        let mut profile = EmployerProfile {
            company_name: "Cafe Nord".into(),
            ..Default::default()
        };
        profile.apply(EmployerProfilePatch {
            phone: Some("+372 5555 001".into()),
            ..Default::default()
        });
        assert_eq!(profile.company_name, "Cafe Nord");
        assert_eq!(profile.phone, "+372 5555 001");
    }

    #[test]
    fn participation_terminality() {
        assert!(!ParticipationStatus::Pending.is_terminal());
        assert!(!ParticipationStatus::Approved.is_terminal());
        assert!(ParticipationStatus::Rejected.is_terminal());
        assert!(ParticipationStatus::Cancelled.is_terminal());
    }
}
