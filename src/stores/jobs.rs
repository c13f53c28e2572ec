use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::ids::IdGenerator;
use crate::models::{JobDraft, JobPosting, JobStatus};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.jobs";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobsState {
    pub items: Vec<JobPosting>,
}

/// Employer-created postings moderated through
/// pending -> moderating -> {approved | rejected} -> closed.
///
/// Neither `set_status` nor `update_job` validates transitions, so a closed
/// posting can be moved back to approved through the generic escape hatch.
/// Known gap; callers gate moderation actions by role in the UI.
pub struct JobsStore {
    inner: Store<JobsState>,
    ids: Rc<dyn IdGenerator>,
}

impl JobsStore {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            inner: Store::new(backend, KEY, JobsState::default()),
            ids,
        }
    }

    /// Inserts at the front so default rendering order is newest-first.
    /// New postings always start out pending moderation.
    pub fn add_job(&self, draft: JobDraft, employer_id: &str) -> String {
        let id = self.ids.next_id();
        let job = JobPosting {
            id: id.clone(),
            employer_id: employer_id.to_string(),
            title: draft.title,
            description: draft.description,
            city: draft.city,
            salary_from: draft.salary_from,
            salary_to: draft.salary_to,
            requirements: draft.requirements,
            contact_phone: draft.contact_phone,
            contact_email: draft.contact_email,
            status: JobStatus::Pending,
            created_at: Utc::now(),
        };
        self.inner.update(|state| state.items.insert(0, job));
        id
    }

    /// Generic field-level edit. Silently does nothing for an unknown id.
    pub fn update_job(&self, id: &str, f: impl FnOnce(&mut JobPosting)) {
        self.inner.update(|state| {
            if let Some(job) = state.items.iter_mut().find(|j| j.id == id) {
                f(job);
            }
        });
    }

    /// Moderator transition. Unvalidated: any status can follow any other.
    pub fn set_status(&self, id: &str, status: JobStatus) {
        self.update_job(id, |job| job.status = status);
    }

    /// Hard removal. Responses pointing at the posting are left dangling;
    /// their lookups return None and callers render a placeholder.
    pub fn delete_job(&self, id: &str) {
        self.inner.update(|state| state.items.retain(|j| j.id != id));
    }

    pub fn job(&self, id: &str) -> Option<JobPosting> {
        self.inner.with(|state| state.items.iter().find(|j| j.id == id).cloned())
    }

    pub fn jobs(&self) -> Vec<JobPosting> {
        self.inner.with(|state| state.items.clone())
    }

    pub fn store(&self) -> &Store<JobsState> {
        &self.inner
    }
}
