use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

use crate::ids::IdGenerator;
use crate::models::{PortfolioPost, SocialLinks};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.portfolio";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioState {
    pub posts: Vec<PortfolioPost>,
    // owner id -> platform -> url, replaced wholesale on save
    pub social_links: HashMap<String, SocialLinks>,
}

pub struct PortfolioStore {
    inner: Store<PortfolioState>,
    ids: Rc<dyn IdGenerator>,
}

impl PortfolioStore {
    pub fn new(backend: Rc<dyn StorageBackend>, ids: Rc<dyn IdGenerator>) -> Self {
        Self {
            inner: Store::new(backend, KEY, PortfolioState::default()),
            ids,
        }
    }

    /// Prepends, so a portfolio page reads newest-first without sorting.
    pub fn add_post(&self, author_id: &str, title: &str, body: &str, image: &str) -> String {
        let id = self.ids.next_id();
        let now = Utc::now();
        let post = PortfolioPost {
            id: id.clone(),
            author_id: author_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            image: image.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.inner.update(|state| state.posts.insert(0, post));
        id
    }

    /// Edits a post in place and bumps `updated_at`. Unknown ids are ignored.
    pub fn update_post(&self, id: &str, f: impl FnOnce(&mut PortfolioPost)) {
        self.inner.update(|state| {
            if let Some(post) = state.posts.iter_mut().find(|p| p.id == id) {
                f(post);
                post.updated_at = Utc::now();
            }
        });
    }

    pub fn delete_post(&self, id: &str) {
        self.inner.update(|state| state.posts.retain(|p| p.id != id));
    }

    pub fn post(&self, id: &str) -> Option<PortfolioPost> {
        self.inner.with(|state| state.posts.iter().find(|p| p.id == id).cloned())
    }

    pub fn posts_by(&self, author_id: &str) -> Vec<PortfolioPost> {
        self.inner.with(|state| {
            state.posts.iter().filter(|p| p.author_id == author_id).cloned().collect()
        })
    }

    /// Wholesale replacement: the save screen submits the complete map.
    pub fn set_social_links(&self, owner_id: &str, links: SocialLinks) {
        self.inner.update(|state| {
            state.social_links.insert(owner_id.to_string(), links);
        });
    }

    pub fn social_links(&self, owner_id: &str) -> SocialLinks {
        self.inner.with(|state| state.social_links.get(owner_id).cloned().unwrap_or_default())
    }

    pub fn store(&self) -> &Store<PortfolioState> {
        &self.inner
    }
}
