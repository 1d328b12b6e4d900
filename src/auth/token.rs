use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::User;

/// JWT payload for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue an access token for a user.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            user_id: user.id.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// Generate a cryptographically random 32-byte hex secret.
pub fn generate_secret() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Role;

    fn user() -> User {
        User {
            id: "42".to_string(),
            email: "amy@university.edu".to_string(),
            name: "Amy".to_string(),
            role: Role::Student,
            password_hash: String::new(),
            joined_date: Utc::now(),
            points: 100,
            verified: true,
            updated_at: None,
        }
    }

    #[test]
    fn issued_token_verifies() {
        let keys = TokenKeys::new(b"secret", Duration::minutes(30));
        let token = keys.issue(&user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, "42");
        assert_eq!(claims.sub, "amy@university.edu");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenKeys::new(b"one", Duration::minutes(30)).issue(&user()).unwrap();
        assert!(TokenKeys::new(b"two", Duration::minutes(30)).verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new(b"secret", Duration::minutes(30));
        let past = Utc::now() - Duration::hours(2);
        let token = keys
            .sign(&Claims {
                sub: "amy@university.edu".into(),
                user_id: "42".into(),
                iat: past.timestamp(),
                exp: (past + Duration::minutes(30)).timestamp(),
            })
            .unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn generate_secret_is_64_hex_chars() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, generate_secret());
    }
}
