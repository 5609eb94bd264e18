use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account lifecycle tag. Records start as `pending`; transitions are owned
/// by an external administrative process, not this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Active,
    Blocked,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub pin_hash: String, // argon2 PHC string, never exposed in JSON
    pub mobile_number: String,
    pub email: String,
    pub status: UserStatus,
    pub balance: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Persist a new user. Single atomic insert; status and balance take
    /// their column defaults (`pending`, 0).
    pub async fn create(
        db: &PgPool,
        name: &str,
        pin_hash: &str,
        mobile_number: &str,
        email: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, pin_hash, mobile_number, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, pin_hash, mobile_number, email, status, balance, created_at
            "#,
        )
        .bind(name)
        .bind(pin_hash)
        .bind(mobile_number)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Resolve a user by mobile number or email. The store does not enforce
    /// identifier uniqueness; when several records match, the oldest one wins
    /// deterministically.
    pub async fn find_by_identifier(db: &PgPool, identifier: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, pin_hash, mobile_number, email, status, balance, created_at
            FROM users
            WHERE mobile_number = $1 OR email = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, pin_hash, mobile_number, email, status, balance, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Check whether either identifier already resolves to a record. Empty
    /// identifiers are skipped so an absent field never collides with other
    /// records that also left it blank.
    pub async fn identifier_taken(
        db: &PgPool,
        mobile_number: &str,
        email: &str,
    ) -> anyhow::Result<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users
                WHERE (mobile_number = $1 AND $1 <> '')
                   OR (email = $2 AND $2 <> '')
            )
            "#,
        )
        .bind(mobile_number)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_never_contains_pin_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "A".into(),
            pin_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            mobile_number: "555".into(),
            email: "a@x.com".into(),
            status: UserStatus::Pending,
            balance: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("pin_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&UserStatus::Active).unwrap(), "\"active\"");
    }
}
