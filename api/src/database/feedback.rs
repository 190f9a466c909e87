use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Feedback {
    /// The unique identifier for the feedback entry.
    pub id: i64,
    /// The name the visitor signed with.
    pub name: String,
    /// The email the visitor signed with.
    pub email: String,
    /// The feedback message.
    pub message: String,
    /// The time the feedback was submitted.
    pub date: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl Feedback {
    pub fn validate(name: &str, email: &str, message: &str) -> Result<(), &'static str> {
        if name.trim().is_empty() || email.trim().is_empty() || message.trim().is_empty() {
            return Err("Please fill in all fields");
        }

        Ok(())
    }

    /// Stores a new feedback entry stamped with the current time.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Feedback, FeedbackError> {
        Self::validate(name, email, message).map_err(FeedbackError::Invalid)?;

        let feedback = sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (name, email, message) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(db)
        .await?;

        Ok(feedback)
    }

    /// The most recent entries, newest first.
    pub async fn recent(db: &PgPool, limit: i64) -> sqlx::Result<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>("SELECT * FROM feedback ORDER BY date DESC LIMIT $1")
            .bind(limit)
            .fetch_all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Feedback::validate("Ada", "ada@example.com", "Congratulations!").is_ok());

        assert!(Feedback::validate("", "ada@example.com", "Congratulations!").is_err());
        assert!(Feedback::validate("Ada", "", "Congratulations!").is_err());
        assert!(Feedback::validate("Ada", "ada@example.com", "").is_err());

        // Whitespace-only fields are still missing.
        assert!(Feedback::validate("  ", "ada@example.com", "Congratulations!").is_err());
        assert!(Feedback::validate("Ada", "ada@example.com", "\n\t").is_err());
    }
}
