// One store per entity family, each a persisted reactive collection with its
// own mutation/query methods. Collections are mock-scale, so every query is
// a linear scan.

pub mod education;
pub mod events;
pub mod jobs;
pub mod portfolio;
pub mod profiles;
pub mod responses;
pub mod session;

pub use education::{EducationState, EducationStore};
pub use events::{EventsState, EventsStore};
pub use jobs::{JobsState, JobsStore};
pub use portfolio::{PortfolioState, PortfolioStore};
pub use profiles::{ApplicantProfileStore, EmployerProfileStore};
pub use responses::{ResponsesState, ResponsesStore};
pub use session::SessionStore;
