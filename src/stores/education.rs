use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::ids::IdGenerator;
use crate::models::{Certificate, EducationItem, Enrollment, EnrollmentStatus};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.education";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationState {
    pub items: Vec<EducationItem>,
    pub enrollments: Vec<Enrollment>,
    pub certificates: Vec<Certificate>,
}

/// Course catalog, enrollments and issued certificates. The enrollment
/// lifecycle is strictly forward-only: enrolled -> completed -> certified,
/// with no rollback. Out-of-order calls are no-ops.
pub struct EducationStore {
    inner: Store<EducationState>,
    ids: Rc<dyn IdGenerator>,
}

impl EducationStore {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            inner: Store::new(backend, KEY, EducationState::default()),
            ids,
        }
    }

    pub fn add_item(&self, author_id: &str, title: &str, description: &str, duration_hours: u32) -> String {
        let id = self.ids.next_id();
        let item = EducationItem {
            id: id.clone(),
            author_id: author_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration_hours,
            created_at: Utc::now(),
        };
        self.inner.update(|state| state.items.insert(0, item));
        id
    }

    /// Enrolls without checking the catalog: a dangling education_id is
    /// tolerated like every other reference here.
    pub fn enroll(&self, user_id: &str, education_id: &str) -> String {
        let id = self.ids.next_id();
        let enrollment = Enrollment {
            id: id.clone(),
            user_id: user_id.to_string(),
            education_id: education_id.to_string(),
            status: EnrollmentStatus::Enrolled,
            certificate_id: None,
            enrolled_at: Utc::now(),
            completed_at: None,
        };
        self.inner.update(|state| state.enrollments.push(enrollment));
        id
    }

    /// enrolled -> completed. No-op unless the enrollment is currently
    /// `enrolled`, which keeps the progression one-directional.
    pub fn complete(&self, enrollment_id: &str) {
        self.inner.update(|state| {
            if let Some(enrollment) = state
                .enrollments
                .iter_mut()
                .find(|e| e.id == enrollment_id && e.status == EnrollmentStatus::Enrolled)
            {
                enrollment.status = EnrollmentStatus::Completed;
                enrollment.completed_at = Some(Utc::now());
            }
        });
    }

    /// completed -> certified. Appends the certificate and patches the
    /// enrollment's status and back-reference within one state update, so
    /// subscribers never observe one without the other. Returns the new
    /// certificate id, or None when the enrollment is missing or not yet
    /// completed.
    pub fn issue_certificate(&self, enrollment_id: &str) -> Option<String> {
        let mut issued = None;
        self.inner.update(|state| {
            let Some(enrollment) = state
                .enrollments
                .iter_mut()
                .find(|e| e.id == enrollment_id && e.status == EnrollmentStatus::Completed)
            else {
                return;
            };
            let id = self.ids.random_id();
            let certificate = Certificate {
                id: id.clone(),
                user_id: enrollment.user_id.clone(),
                education_id: enrollment.education_id.clone(),
                enrollment_id: enrollment.id.clone(),
                certificate_number: format!("CERT-{id}"),
                issued_at: Utc::now(),
            };
            enrollment.status = EnrollmentStatus::Certified;
            enrollment.certificate_id = Some(id.clone());
            state.certificates.push(certificate);
            issued = Some(id);
        });
        issued
    }

    pub fn item(&self, id: &str) -> Option<EducationItem> {
        self.inner.with(|state| state.items.iter().find(|i| i.id == id).cloned())
    }

    pub fn enrollment(&self, id: &str) -> Option<Enrollment> {
        self.inner.with(|state| state.enrollments.iter().find(|e| e.id == id).cloned())
    }

    pub fn enrollments_for(&self, user_id: &str) -> Vec<Enrollment> {
        self.inner.with(|state| {
            state.enrollments.iter().filter(|e| e.user_id == user_id).cloned().collect()
        })
    }

    pub fn certificates_for(&self, user_id: &str) -> Vec<Certificate> {
        self.inner.with(|state| {
            state.certificates.iter().filter(|c| c.user_id == user_id).cloned().collect()
        })
    }

    pub fn store(&self) -> &Store<EducationState> {
        &self.inner
    }
}
