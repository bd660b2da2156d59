use std::sync::Arc;

use crate::store::{MemoryStore, ResumeStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Builds state where one store value serves both collections.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ResumeStore + UserStore + 'static,
    {
        Self {
            resumes: store.clone(),
            users: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}
