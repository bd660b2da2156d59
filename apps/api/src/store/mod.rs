//! Document store for resumes and users.
//!
//! `AppState` holds each store as an `Arc<dyn ...>`; `PgStore` backs production,
//! `MemoryStore` is used when no database is configured.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::user::User;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const DUPLICATE_USER: &str = "Username or email already in use";

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists a resume whose `id` has already been assigned.
    async fn insert_resume(&self, resume: &Resume) -> Result<(), AppError>;

    async fn find_resume(&self, id: &str) -> Result<Option<Resume>, AppError>;

    /// Resumes belonging to `user_id`, ordered by creation time then id.
    async fn list_resumes_by_user(&self, user_id: &str) -> Result<Vec<Resume>, AppError>;

    /// Replaces the stored document. Returns `false` when no resume has this id.
    async fn replace_resume(&self, resume: &Resume) -> Result<bool, AppError>;

    async fn delete_resume(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the username or email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Replaces the stored record. Returns `false` when no user has this id.
    /// Fails with `AppError::Conflict` when another user holds the username or email.
    async fn replace_user(&self, user: &User) -> Result<bool, AppError>;

    async fn delete_user(&self, id: &str) -> Result<bool, AppError>;
}
