use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::ids::IdGenerator;
use crate::models::{Event, EventDraft, EventStatus, Participation, ParticipationStatus};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.events";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsState {
    pub events: Vec<Event>,
    pub participations: Vec<Participation>,
}

/// Industry events plus participation records. Participations move
/// pending -> {approved | rejected}, with `cancelled` reachable from any
/// non-terminal state.
pub struct EventsStore {
    inner: Store<EventsState>,
    ids: Rc<dyn IdGenerator>,
}

impl EventsStore {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            inner: Store::new(backend, KEY, EventsState::default()),
            ids,
        }
    }

    pub fn add_event(&self, draft: EventDraft, organizer_id: &str) -> String {
        let id = self.ids.next_id();
        let event = Event {
            id: id.clone(),
            organizer_id: organizer_id.to_string(),
            title: draft.title,
            description: draft.description,
            city: draft.city,
            venue: draft.venue,
            starts_at: draft.starts_at,
            status: EventStatus::Pending,
            created_at: Utc::now(),
        };
        self.inner.update(|state| state.events.insert(0, event));
        id
    }

    /// Moderator action; like job moderation, transitions are unvalidated.
    pub fn set_event_status(&self, id: &str, status: EventStatus) {
        self.inner.update(|state| {
            if let Some(event) = state.events.iter_mut().find(|e| e.id == id) {
                event.status = status;
            }
        });
    }

    pub fn apply(&self, event_id: &str, user_id: &str) -> String {
        let id = self.ids.random_id();
        let participation = Participation {
            id: id.clone(),
            event_id: event_id.to_string(),
            user_id: user_id.to_string(),
            status: ParticipationStatus::Pending,
            created_at: Utc::now(),
        };
        self.inner.update(|state| state.participations.push(participation));
        id
    }

    /// Approve/reject. No-op once the participation has reached a terminal
    /// state.
    pub fn set_participation_status(&self, id: &str, status: ParticipationStatus) {
        self.inner.update(|state| {
            if let Some(participation) = state
                .participations
                .iter_mut()
                .find(|p| p.id == id && !p.status.is_terminal())
            {
                participation.status = status;
            }
        });
    }

    /// Cancellation is terminal and reachable from pending and approved.
    pub fn cancel_participation(&self, id: &str) {
        self.set_participation_status(id, ParticipationStatus::Cancelled);
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.inner.with(|state| state.events.iter().find(|e| e.id == id).cloned())
    }

    pub fn participations_for(&self, event_id: &str) -> Vec<Participation> {
        self.inner.with(|state| {
            state.participations.iter().filter(|p| p.event_id == event_id).cloned().collect()
        })
    }

    pub fn participation_of(&self, event_id: &str, user_id: &str) -> Option<Participation> {
        self.inner.with(|state| {
            state
                .participations
                .iter()
                .find(|p| p.event_id == event_id && p.user_id == user_id)
                .cloned()
        })
    }

    pub fn store(&self) -> &Store<EventsState> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::persist::MemoryBackend;

    fn store() -> EventsStore {
        EventsStore::new(Rc::new(MemoryBackend::new()), Rc::new(SequentialIds::new()))
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.into(),
            city: "Vilnius".into(),
            ..Default::default()
        }
    }

    #[test]
    fn events_are_prepended_and_start_pending() {
        let events = store();
        let first = events.add_event(draft("Barista cup"), "o1");
        let second = events.add_event(draft("Chef meetup"), "o1");
        let all = events.store().with(|s| s.events.clone());
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
        assert_eq!(all[0].status, EventStatus::Pending);
    }

    #[test]
    fn participation_is_moderated() {
        let events = store();
        let event = events.add_event(draft("Barista cup"), "o1");
        let id = events.apply(&event, "u1");
        assert_eq!(events.participation_of(&event, "u1").unwrap().status, ParticipationStatus::Pending);
        events.set_participation_status(&id, ParticipationStatus::Approved);
        assert_eq!(events.participation_of(&event, "u1").unwrap().status, ParticipationStatus::Approved);
    }

    #[test]
    fn cancel_works_from_any_non_terminal_state() {
        let events = store();
        let event = events.add_event(draft("Barista cup"), "o1");

        let pending = events.apply(&event, "u1");
        events.cancel_participation(&pending);
        assert_eq!(events.participation_of(&event, "u1").unwrap().status, ParticipationStatus::Cancelled);

        let approved = events.apply(&event, "u2");
        events.set_participation_status(&approved, ParticipationStatus::Approved);
        events.cancel_participation(&approved);
        assert_eq!(events.participation_of(&event, "u2").unwrap().status, ParticipationStatus::Cancelled);
    }

    #[test]
    fn terminal_states_never_change() {
        let events = store();
        let event = events.add_event(draft("Barista cup"), "o1");
        let id = events.apply(&event, "u1");
        events.set_participation_status(&id, ParticipationStatus::Rejected);
        events.set_participation_status(&id, ParticipationStatus::Approved);
        assert_eq!(events.participation_of(&event, "u1").unwrap().status, ParticipationStatus::Rejected);
        events.cancel_participation(&id);
        assert_eq!(events.participation_of(&event, "u1").unwrap().status, ParticipationStatus::Rejected);
    }
}
