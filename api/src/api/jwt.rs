use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::{Claims, Header, RegisteredClaims, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;

use crate::config::JwtConfig;
use crate::database::Session;

/// The claims carried by a session token.
pub struct JwtState {
    pub user_id: i64,
    pub session_id: i64,
    pub expiration: Option<DateTime<Utc>>,
    pub issued_at: DateTime<Utc>,
}

impl JwtState {
    pub fn serialize(&self, config: &JwtConfig) -> Option<String> {
        let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
        let claims = Claims::new(RegisteredClaims {
            issued_at: Some(self.issued_at.timestamp() as u64),
            expiration: self.expiration.map(|x| x.timestamp() as u64),
            issuer: Some(config.issuer.clone()),
            json_web_token_id: Some(self.session_id.to_string()),
            subject: Some(self.user_id.to_string()),
            not_before: None,
            audience: None,
        });

        claims.sign_with_key(&key).ok()
    }

    pub fn verify(config: &JwtConfig, token: &str) -> Option<Self> {
        let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
        let token: Token<Header, Claims, _> = token.verify_with_key(&key).ok()?;

        let claims = token.claims();

        if claims.registered.issuer.clone()? != config.issuer {
            return None;
        }

        let iat = Utc
            .timestamp_opt(claims.registered.issued_at? as i64, 0)
            .single()?;
        if iat > Utc::now() {
            return None;
        }

        let exp = claims
            .registered
            .expiration
            .and_then(|x| Utc.timestamp_opt(x as i64, 0).single());
        if let Some(exp) = exp {
            if exp < Utc::now() {
                return None;
            }
        }

        let user_id = claims.registered.subject.clone()?.parse::<i64>().ok()?;

        let session_id = claims
            .registered
            .json_web_token_id
            .clone()?
            .parse::<i64>()
            .ok()?;

        Some(JwtState {
            user_id,
            session_id,
            expiration: exp,
            issued_at: iat,
        })
    }
}

impl From<Session> for JwtState {
    fn from(session: Session) -> Self {
        JwtState {
            user_id: session.user_id,
            session_id: session.id,
            expiration: Some(session.expires_at),
            issued_at: session.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "lottery".to_string(),
        }
    }

    fn state() -> JwtState {
        JwtState {
            user_id: 42,
            session_id: 7,
            expiration: Some(Utc::now() + Duration::days(1)),
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_roundtrip() {
        let token = state().serialize(&config()).expect("failed to sign token");

        let verified = JwtState::verify(&config(), &token).expect("failed to verify token");
        assert_eq!(verified.user_id, 42);
        assert_eq!(verified.session_id, 7);
    }

    #[test]
    fn test_wrong_secret() {
        let token = state().serialize(&config()).expect("failed to sign token");

        let other = JwtConfig {
            secret: "other-secret".to_string(),
            ..config()
        };
        assert!(JwtState::verify(&other, &token).is_none());
    }

    #[test]
    fn test_wrong_issuer() {
        let token = state().serialize(&config()).expect("failed to sign token");

        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        };
        assert!(JwtState::verify(&other, &token).is_none());
    }

    #[test]
    fn test_expired() {
        let mut expired = state();
        expired.expiration = Some(Utc::now() - Duration::hours(1));

        let token = expired.serialize(&config()).expect("failed to sign token");
        assert!(JwtState::verify(&config(), &token).is_none());
    }

    #[test]
    fn test_garbage() {
        assert!(JwtState::verify(&config(), "not-a-token").is_none());
        assert!(JwtState::verify(&config(), "").is_none());
    }
}
