//! JWT token service
//!
//! Tokens identify a staff member and their restaurant. They carry no role:
//! the role is read from the staff store on every authorization check, so a
//! role change takes effect on the very next request.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::AppError;

const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 key (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_*` variables. Outside production a missing secret is
    /// replaced by a random one, so tokens die with the process.
    pub fn from_vars(
        var: &impl Fn(&str) -> Option<String>,
        production: bool,
    ) -> Result<Self, JwtError> {
        let secret = match var("JWT_SECRET") {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Some(_) => {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            None if production => {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                generate_printable_secret()
            }
        };

        Ok(Self {
            secret,
            expiration_minutes: var("JWT_EXPIRATION_MINUTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "a7-server".to_string()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "a7-clients".to_string()),
        })
    }
}

/// Random 64-char alphanumeric secret
pub fn generate_printable_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff id (Subject)
    pub sub: String,
    pub restaurant_id: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => {
                AppError::invalid_token("Invalid token")
            }
            JwtError::GenerationFailed(msg) => AppError::internal(msg),
            JwtError::ConfigError(msg) => AppError::config(msg),
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a staff member
    pub fn generate_token(&self, staff_id: &str, restaurant_id: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: staff_id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, expiry, issuer and audience
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-that-is-long-enough-32".to_string(),
            expiration_minutes: 60,
            issuer: "a7-server".to_string(),
            audience: "a7-clients".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let service = JwtService::with_config(config());
        let token = service.generate_token("s1", "r1").unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "s1");
        assert_eq!(claims.restaurant_id, "r1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired() {
        let service = JwtService::with_config(JwtConfig {
            expiration_minutes: -10,
            ..config()
        });
        let token = service.generate_token("s1", "r1").unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::ExpiredToken)));
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtService::with_config(config());
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-key-that-is-long-enough".to_string(),
            ..config()
        });
        let token = issuer.generate_token("s1", "r1").unwrap();
        assert!(matches!(other.validate_token(&token), Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_wrong_audience() {
        let issuer = JwtService::with_config(config());
        let other = JwtService::with_config(JwtConfig {
            audience: "someone-else".to_string(),
            ..config()
        });
        let token = issuer.generate_token("s1", "r1").unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage() {
        let service = JwtService::with_config(config());
        assert!(service.validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Bearer   "), None);
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("abc"), None);
    }

    #[test]
    fn test_generated_secret() {
        let a = generate_printable_secret();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, generate_printable_secret());
    }
}
