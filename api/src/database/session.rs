use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

/// How long a login stays valid.
pub const SESSION_DURATION_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Session {
    /// The unique identifier for the session.
    pub id: i64,
    /// Foreign key to the users table.
    pub user_id: i64,
    /// The time the session was created.
    pub created_at: DateTime<Utc>,
    /// The time the session expires or was invalidated.
    pub expires_at: DateTime<Utc>,
    /// The time the session was last used.
    pub last_used_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }

    pub async fn create(db: &PgPool, user_id: i64) -> sqlx::Result<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, expires_at) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(Utc::now() + Duration::days(SESSION_DURATION_DAYS))
        .fetch_one(db)
        .await
    }

    pub async fn by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Expires the session immediately.
    pub async fn invalidate(db: &PgPool, id: i64) -> sqlx::Result<()> {
        sqlx::query("UPDATE sessions SET expires_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    pub async fn touch(db: &PgPool, id: i64) -> sqlx::Result<()> {
        sqlx::query("UPDATE sessions SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        let mut session = Session::default();
        assert!(!session.is_valid());

        session.expires_at = Utc::now() + Duration::hours(1);
        assert!(session.is_valid());

        session.expires_at = Utc::now() - Duration::hours(1);
        assert!(!session.is_valid());
    }
}
