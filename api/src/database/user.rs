use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The username of the user.
    pub username: String,
    /// The hashed password of the user. (argon2)
    pub password_hash: String,
    /// Whether the user may mutate draw records.
    pub is_admin: bool,
    /// The time the user was created.
    pub created_at: DateTime<Utc>,
    /// The time the user last logged in.
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Uses argon2 to verify the password hash against the provided password.
    pub fn verify_password(&self, password: &str) -> bool {
        let hash = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("failed to parse password hash: {}", err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }

    /// Generates a new password hash using argon2.
    pub fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("failed to hash password");

        hash.to_string()
    }

    pub async fn by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(db)
            .await
    }

    pub async fn by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn touch_login(db: &PgPool, id: i64) -> sqlx::Result<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Creates the admin account if it does not exist yet. Returns whether
    /// a new account was created.
    pub async fn ensure_admin(db: &PgPool, username: &str, password: &str) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, is_admin) VALUES ($1, $2, TRUE)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(Self::hash_password(password))
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let user = User {
            password_hash: User::hash_password("hunter2!"),
            ..Default::default()
        };

        assert!(user.verify_password("hunter2!"));
        assert!(!user.verify_password("hunter2"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let user = User {
            password_hash: "not-a-phc-string".to_string(),
            ..Default::default()
        };

        assert!(!user.verify_password("hunter2!"));
    }
}
