use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::store::{ResumeStore, UserStore, DUPLICATE_USER};

/// In-process store keyed by document id. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    resumes: RwLock<HashMap<String, Resume>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn id_of(id: &Option<String>) -> Result<String, AppError> {
    id.clone()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("document stored without an id")))
}

/// Username and email must not be held by any other user.
fn ensure_unique(users: &HashMap<String, User>, user: &User) -> Result<(), AppError> {
    let taken = users.values().any(|existing| {
        existing.id != user.id
            && (existing.username == user.username || existing.email == user.email)
    });
    if taken {
        return Err(AppError::Conflict(DUPLICATE_USER.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert_resume(&self, resume: &Resume) -> Result<(), AppError> {
        let id = id_of(&resume.id)?;
        self.resumes.write().await.insert(id, resume.clone());
        Ok(())
    }

    async fn find_resume(&self, id: &str) -> Result<Option<Resume>, AppError> {
        Ok(self.resumes.read().await.get(id).cloned())
    }

    async fn list_resumes_by_user(&self, user_id: &str) -> Result<Vec<Resume>, AppError> {
        let mut resumes: Vec<Resume> = self
            .resumes
            .read()
            .await
            .values()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        resumes.sort_by(|a, b| (&a.created_at, &a.id).cmp(&(&b.created_at, &b.id)));
        Ok(resumes)
    }

    async fn replace_resume(&self, resume: &Resume) -> Result<bool, AppError> {
        let id = id_of(&resume.id)?;
        let mut resumes = self.resumes.write().await;
        match resumes.get_mut(&id) {
            Some(slot) => {
                *slot = resume.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_resume(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.resumes.write().await.remove(id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let id = id_of(&user.id)?;
        let mut users = self.users.write().await;
        ensure_unique(&users, user)?;
        users.insert(id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn replace_user(&self, user: &User) -> Result<bool, AppError> {
        let id = id_of(&user.id)?;
        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Ok(false);
        }
        ensure_unique(&users, user)?;
        users.insert(id, user.clone());
        Ok(true)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(id: &str, user_id: &str, created_at: &str) -> Resume {
        Resume {
            id: Some(id.into()),
            user_id: Some(user_id.into()),
            created_at: Some(created_at.into()),
            ..Default::default()
        }
    }

    fn user(id: &str, username: &str, email: &str) -> User {
        User {
            id: Some(id.into()),
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some("hash".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_user_and_orders_by_creation() {
        let store = MemoryStore::new();
        store.insert_resume(&resume("b", "u1", "2024-02-01T00:00:00Z")).await.unwrap();
        store.insert_resume(&resume("a", "u1", "2024-03-01T00:00:00Z")).await.unwrap();
        store.insert_resume(&resume("c", "u2", "2024-01-01T00:00:00Z")).await.unwrap();

        let listed = store.list_resumes_by_user("u1").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(store.list_resumes_by_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_delete_missing_resume() {
        let store = MemoryStore::new();
        let r = resume("x", "u1", "2024-01-01T00:00:00Z");
        assert!(!store.replace_resume(&r).await.unwrap());
        assert!(!store.delete_resume("x").await.unwrap());

        store.insert_resume(&r).await.unwrap();
        let mut renamed = r.clone();
        renamed.name = Some("Renamed".into());
        assert!(store.replace_resume(&renamed).await.unwrap());
        let found = store.find_resume("x").await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Renamed"));

        assert!(store.delete_resume("x").await.unwrap());
        assert!(store.find_resume("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let store = MemoryStore::new();
        store.insert_user(&user("1", "ada", "ada@example.com")).await.unwrap();

        let same_name = store.insert_user(&user("2", "ada", "other@example.com")).await;
        assert!(matches!(same_name, Err(AppError::Conflict(_))));

        let same_email = store.insert_user(&user("3", "grace", "ada@example.com")).await;
        assert!(matches!(same_email, Err(AppError::Conflict(_))));

        store.insert_user(&user("4", "grace", "grace@example.com")).await.unwrap();
        assert!(store.find_user("4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_replace_user_may_keep_own_username_and_email() {
        let store = MemoryStore::new();
        store.insert_user(&user("1", "ada", "ada@example.com")).await.unwrap();

        let mut updated = user("1", "ada", "ada@example.com");
        updated.roles.insert("ROLE_ADMIN".into());
        assert!(store.replace_user(&updated).await.unwrap());

        let found = store.find_user("1").await.unwrap().unwrap();
        assert!(found.roles.contains("ROLE_ADMIN"));
    }

    #[tokio::test]
    async fn test_replace_user_conflicts_with_other_user() {
        let store = MemoryStore::new();
        store.insert_user(&user("1", "ada", "ada@example.com")).await.unwrap();
        store.insert_user(&user("2", "grace", "grace@example.com")).await.unwrap();

        let result = store.replace_user(&user("2", "ada", "grace@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let unchanged = store.find_user("2").await.unwrap().unwrap();
        assert_eq!(unchanged.username.as_deref(), Some("grace"));
    }

    #[tokio::test]
    async fn test_replace_missing_user_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.replace_user(&user("9", "x", "x@example.com")).await.unwrap());
        assert!(store.find_user("9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_without_id_is_internal_error() {
        let store = MemoryStore::new();
        let result = store.insert_resume(&Resume::default()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
