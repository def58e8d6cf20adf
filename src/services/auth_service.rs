//! Authentication service - password hashing and JWT handling.
//!
//! This service handles:
//! - Argon2id password hashing and verification
//! - Bearer token issuance and verification
//! - Timing-equalized credential checks
//!
//! The signing secret, issuer, audience, and lifetime all come from
//! configuration; nothing here reads process-wide static state.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    config::Config,
    error::AppError,
    models::user::{Claims, TokenResponse, User},
};

/// Token and password service shared by all routes.
///
/// Cloning is cheap: the prepared keys and validation rules are small and
/// the Argon2 instance carries no state.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_secs: i64,
    argon2: Argon2<'static>,
    /// Pre-computed hash verified when a username lookup fails, so the
    /// credential check takes the same time whether or not the user exists.
    dummy_password_hash: String,
}

impl AuthService {
    /// Build the service from configuration.
    ///
    /// # Validation Rules
    ///
    /// Issued tokens always carry `iss` and `aud`. Verification checks them
    /// only when the corresponding `JWT_VALIDATE_*` flag is enabled; both
    /// default to enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if computing the dummy password hash fails.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut validation = Validation::default();
        if config.jwt_validate_issuer {
            validation.set_issuer(&[&config.jwt_issuer]);
        }
        if config.jwt_validate_audience {
            validation.set_audience(&[&config.jwt_audience]);
        } else {
            // Without this the default validation rejects any token that
            // carries an aud claim, and ours always do.
            validation.validate_aud = false;
        }

        let argon2 = Argon2::default();
        let dummy_salt = SaltString::generate(&mut OsRng);
        let dummy_password_hash = argon2
            .hash_password(b"timing equalization placeholder", &dummy_salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            ttl_secs: config.jwt_ttl_secs,
            argon2,
            dummy_password_hash,
        })
    }

    /// Issue a signed bearer token for an authenticated user.
    ///
    /// # Errors
    ///
    /// - `Token`: signing failed (corrupt key material)
    pub fn issue_token(&self, user: &User) -> Result<TokenResponse, AppError> {
        let claims = Claims::new(user, &self.issuer, &self.audience, self.ttl_secs);
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(TokenResponse::new(token, self.ttl_secs))
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// - `InvalidToken`: expired, malformed, bad signature, or claim
    ///   mismatch under the configured validation rules
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                AppError::InvalidToken
            })?;

        Ok(token_data.claims)
    }

    /// Check a credential pair against an optional stored user.
    ///
    /// When the lookup found nothing, a dummy hash is still verified so the
    /// response time does not reveal whether the username exists.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials`: unknown username or wrong password
    pub fn authenticate(&self, user: Option<User>, password: &str) -> Result<User, AppError> {
        match user {
            Some(user) => {
                if self.verify_password(password, &user.password_hash)? {
                    Ok(user)
                } else {
                    tracing::warn!(username = %user.username, "login failed: wrong password");
                    Err(AppError::InvalidCredentials)
                }
            }
            None => {
                // Burn the same verification time as the found case.
                let _ = self.verify_password(password, &self.dummy_password_hash);
                tracing::warn!("login failed: unknown username");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Hash a password with Argon2id.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against an Argon2id hash.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
