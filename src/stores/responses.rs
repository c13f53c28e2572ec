use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::ids::IdGenerator;
use crate::models::{JobResponse, ResponseStatus};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.responses";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsesState {
    pub items: Vec<JobResponse>,
}

/// Applicant-to-job responses, sent -> viewed -> {interested | rejected}.
pub struct ResponsesStore {
    inner: Store<ResponsesState>,
    ids: Rc<dyn IdGenerator>,
}

impl ResponsesStore {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            inner: Store::new(backend, KEY, ResponsesState::default()),
            ids,
        }
    }

    /// Records a new response with status `sent`. Does NOT check for an
    /// existing (job, applicant) pair: duplicate prevention is the caller's
    /// lookup via `response_for`, not a store invariant.
    pub fn add_response(&self, job_id: &str, applicant_id: &str) -> String {
        let id = self.ids.random_id();
        let response = JobResponse {
            id: id.clone(),
            job_id: job_id.to_string(),
            applicant_id: applicant_id.to_string(),
            status: ResponseStatus::Sent,
            employer_comment: None,
            created_at: Utc::now(),
            viewed_at: None,
        };
        self.inner.update(|state| state.items.push(response));
        id
    }

    /// Employer/moderator-driven transition. Entering any post-`sent` status
    /// stamps `viewed_at` once; it is never reset afterwards.
    pub fn set_status(&self, id: &str, status: ResponseStatus) {
        self.inner.update(|state| {
            if let Some(response) = state.items.iter_mut().find(|r| r.id == id) {
                response.status = status;
                if status != ResponseStatus::Sent && response.viewed_at.is_none() {
                    response.viewed_at = Some(Utc::now());
                }
            }
        });
    }

    pub fn set_employer_comment(&self, id: &str, comment: &str) {
        self.inner.update(|state| {
            if let Some(response) = state.items.iter_mut().find(|r| r.id == id) {
                response.employer_comment = Some(comment.to_string());
            }
        });
    }

    /// First response matching the pair. Callers use this as the duplicate
    /// guard before `add_response`; if duplicates exist anyway, only the
    /// earliest is returned.
    pub fn response_for(&self, job_id: &str, applicant_id: &str) -> Option<JobResponse> {
        self.inner.with(|state| {
            state
                .items
                .iter()
                .find(|r| r.job_id == job_id && r.applicant_id == applicant_id)
                .cloned()
        })
    }

    pub fn for_applicant(&self, applicant_id: &str) -> Vec<JobResponse> {
        self.inner.with(|state| {
            state
                .items
                .iter()
                .filter(|r| r.applicant_id == applicant_id)
                .cloned()
                .collect()
        })
    }

    pub fn for_job(&self, job_id: &str) -> Vec<JobResponse> {
        self.inner.with(|state| {
            state.items.iter().filter(|r| r.job_id == job_id).cloned().collect()
        })
    }

    pub fn store(&self) -> &Store<ResponsesState> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::persist::MemoryBackend;

    fn store() -> ResponsesStore {
        ResponsesStore::new(Rc::new(MemoryBackend::new()), Rc::new(SequentialIds::new()))
    }

    #[test]
    fn filter_returns_exact_subset_in_order() {
        let responses = store();
        responses.add_response("j1", "a1");
        responses.add_response("j2", "a2");
        responses.add_response("j3", "a1");
        let mine = responses.for_applicant("a1");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].job_id, "j1");
        assert_eq!(mine[1].job_id, "j3");
        assert!(responses.for_applicant("a9").is_empty());
    }

    #[test]
    fn viewed_at_is_stamped_once_and_kept() {
        let responses = store();
        let id = responses.add_response("j1", "a1");
        assert_eq!(responses.response_for("j1", "a1").unwrap().viewed_at, None);

        responses.set_status(&id, ResponseStatus::Viewed);
        let viewed_at = responses.response_for("j1", "a1").unwrap().viewed_at;
        assert!(viewed_at.is_some());

        responses.set_status(&id, ResponseStatus::Interested);
        let after = responses.response_for("j1", "a1").unwrap();
        assert_eq!(after.status, ResponseStatus::Interested);
        assert_eq!(after.viewed_at, viewed_at);
    }

    #[test]
    fn duplicate_guard_is_caller_side() {
        // The store accepts the second insert for the same pair; the lookup
        // still returns the single earliest record.
        let responses = store();
        let first = responses.add_response("j1", "a1");
        let second = responses.add_response("j1", "a1");
        assert_ne!(first, second);
        assert_eq!(responses.for_job("j1").len(), 2);
        assert_eq!(responses.response_for("j1", "a1").unwrap().id, first);
    }

    #[test]
    fn employer_comment_is_attached() {
        let responses = store();
        let id = responses.add_response("j1", "a1");
        responses.set_employer_comment(&id, "Call us on Monday");
        assert_eq!(
            responses.response_for("j1", "a1").unwrap().employer_comment.as_deref(),
            Some("Call us on Monday")
        );
    }
}
