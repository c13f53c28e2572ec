use anyhow::Result;
use std::rc::Rc;

use crate::ids::{ClockIds, IdGenerator};
use crate::persist::{NullBackend, SqliteBackend, StorageBackend};
use crate::stores::{
    ApplicantProfileStore, EducationStore, EmployerProfileStore, EventsStore, JobsStore,
    PortfolioStore, ResponsesStore, SessionStore,
};

/// Application context owning one instance of every domain store, all
/// sharing one backend and one id generator. Constructed once and passed
/// explicitly to whatever needs it; there are no module-level singletons.
pub struct AppContext {
    pub session: SessionStore,
    pub applicant_profiles: ApplicantProfileStore,
    pub employer_profiles: EmployerProfileStore,
    pub portfolio: PortfolioStore,
    pub jobs: JobsStore,
    pub responses: ResponsesStore,
    pub education: EducationStore,
    pub events: EventsStore,
}

impl AppContext {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            session: SessionStore::new(backend.clone()),
            applicant_profiles: ApplicantProfileStore::new(backend.clone()),
            employer_profiles: EmployerProfileStore::new(backend.clone()),
            portfolio: PortfolioStore::new(backend.clone(), ids.clone()),
            jobs: JobsStore::new(backend.clone(), ids.clone()),
            responses: ResponsesStore::new(backend.clone(), ids.clone()),
            education: EducationStore::new(backend.clone(), ids.clone()),
            events: EventsStore::new(backend, ids),
        }
    }

    /// Context persisted to the local SQLite state file.
    pub fn open() -> Result<Self> {
        let backend = Rc::new(SqliteBackend::open()?);
        Ok(Self::new(backend, Rc::new(ClockIds)))
    }

    /// Context for execution environments without a persistent medium:
    /// loads nothing, drops every write, never fails to construct.
    pub fn ephemeral() -> Self {
        Self::new(Rc::new(NullBackend), Rc::new(ClockIds))
    }
}
