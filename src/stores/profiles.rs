use std::collections::HashMap;
use std::rc::Rc;

use crate::models::{ApplicantProfile, ApplicantProfilePatch, EmployerProfile, EmployerProfilePatch};
use crate::persist::StorageBackend;
use crate::store::Store;

const APPLICANT_KEY: &str = "crewboard.profiles.applicant";
const EMPLOYER_KEY: &str = "crewboard.profiles.employer";

// Profiles are keyed by owner id rather than held as one unkeyed record, so
// the same state layer serves more than a single-session demo. Onboarding
// stays incremental: each wizard step patches only its own fields.

pub struct ApplicantProfileStore {
    inner: Store<HashMap<String, ApplicantProfile>>,
}

impl ApplicantProfileStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            inner: Store::new(backend, APPLICANT_KEY, HashMap::new()),
        }
    }

    /// Shallow-merges the patch into the owner's profile, creating an empty
    /// profile first when this is the owner's first onboarding step.
    pub fn set_form_data(&self, owner_id: &str, patch: ApplicantProfilePatch) {
        self.inner.update(|profiles| {
            profiles.entry(owner_id.to_string()).or_default().apply(patch);
        });
    }

    pub fn profile(&self, owner_id: &str) -> Option<ApplicantProfile> {
        self.inner.with(|profiles| profiles.get(owner_id).cloned())
    }

    pub fn store(&self) -> &Store<HashMap<String, ApplicantProfile>> {
        &self.inner
    }
}

pub struct EmployerProfileStore {
    inner: Store<HashMap<String, EmployerProfile>>,
}

impl EmployerProfileStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            inner: Store::new(backend, EMPLOYER_KEY, HashMap::new()),
        }
    }

    pub fn set_form_data(&self, owner_id: &str, patch: EmployerProfilePatch) {
        self.inner.update(|profiles| {
            profiles.entry(owner_id.to_string()).or_default().apply(patch);
        });
    }

    pub fn profile(&self, owner_id: &str) -> Option<EmployerProfile> {
        self.inner.with(|profiles| profiles.get(owner_id).cloned())
    }

    pub fn store(&self) -> &Store<HashMap<String, EmployerProfile>> {
        &self.inner
    }
}
