use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::resume::{Education, Experience, PersonalInfo, Resume, Skill};
use crate::models::user::User;
use crate::store::{ResumeStore, UserStore, DUPLICATE_USER};

/// PostgreSQL-backed store. Embedded resume sections live in JSONB columns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: String,
    user_id: String,
    name: Option<String>,
    created_at: String,
    updated_at: String,
    personal_info: Json<PersonalInfo>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    skills: Json<Vec<Skill>>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: Some(row.id),
            user_id: Some(row.user_id),
            name: row.name,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            personal_info: row.personal_info.0,
            experience: row.experience.0,
            education: row.education.0,
            skills: row.skills.0,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password: String,
    roles: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Some(row.id),
            username: Some(row.username),
            email: Some(row.email),
            password: Some(row.password),
            roles: row.roles.into_iter().collect(),
        }
    }
}

/// Roles as a `TEXT[]` value, in the set's sorted order.
fn roles_column(user: &User) -> Vec<String> {
    user.roles.iter().cloned().collect()
}

/// The users table carries UNIQUE constraints on username and email.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(e) if e.is_unique_violation() => {
            AppError::Conflict(DUPLICATE_USER.to_string())
        }
        e => e.into(),
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("missing required field '{field}'")))
}

const RESUME_COLUMNS: &str =
    "id, user_id, name, created_at, updated_at, personal_info, experience, education, skills";

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert_resume(&self, resume: &Resume) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resumes
                (id, user_id, name, created_at, updated_at,
                 personal_info, experience, education, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(required(&resume.id, "id")?)
        .bind(required(&resume.user_id, "userId")?)
        .bind(&resume.name)
        .bind(required(&resume.created_at, "createdAt")?)
        .bind(required(&resume.updated_at, "updatedAt")?)
        .bind(Json(&resume.personal_info))
        .bind(Json(&resume.experience))
        .bind(Json(&resume.education))
        .bind(Json(&resume.skills))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_resume(&self, id: &str) -> Result<Option<Resume>, AppError> {
        let row: Option<ResumeRow> =
            sqlx::query_as(&format!("SELECT {RESUME_COLUMNS} FROM resumes WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Resume::from))
    }

    async fn list_resumes_by_user(&self, user_id: &str) -> Result<Vec<Resume>, AppError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn replace_resume(&self, resume: &Resume) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET user_id = $2, name = $3, created_at = $4, updated_at = $5,
                personal_info = $6, experience = $7, education = $8, skills = $9
            WHERE id = $1
            "#,
        )
        .bind(required(&resume.id, "id")?)
        .bind(required(&resume.user_id, "userId")?)
        .bind(&resume.name)
        .bind(required(&resume.created_at, "createdAt")?)
        .bind(required(&resume.updated_at, "updatedAt")?)
        .bind(Json(&resume.personal_info))
        .bind(Json(&resume.experience))
        .bind(Json(&resume.education))
        .bind(Json(&resume.skills))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_resume(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password, roles) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(required(&user.id, "id")?)
        .bind(required(&user.username, "username")?)
        .bind(required(&user.email, "email")?)
        .bind(required(&user.password, "password")?)
        .bind(roles_column(user))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(())
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, email, password, roles FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(User::from))
    }

    async fn replace_user(&self, user: &User) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET username = $2, email = $3, password = $4, roles = $5 WHERE id = $1",
        )
        .bind(required(&user.id, "id")?)
        .bind(required(&user.username, "username")?)
        .bind(required(&user.email, "email")?)
        .bind(required(&user.password, "password")?)
        .bind(roles_column(user))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
