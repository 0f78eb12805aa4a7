//! Token signing and credential comparison.
//!
//! Tokens are compact JWTs signed with HS256 under a single process-wide
//! secret, so any holder of the secret can verify them.

use crate::errors::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::constant_time;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim set carried by an issued session token.
///
/// Only the authenticated email and the issue timestamp are asserted;
/// tokens carry no expiration, issuer, or audience claims. The `email`
/// field identifies a user and is redacted from Debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("email", &"[REDACTED]")
            .field("iat", &self.iat)
            .finish()
    }
}

/// Sign a claim set for `email` with the process-wide secret.
///
/// An empty secret is a fatal misconfiguration, reported as
/// `AuthError::Configuration` rather than a credential failure.
pub fn sign_token(
    email: &str,
    issued_at: i64,
    secret: &SecretString,
) -> Result<String, AuthError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(AuthError::Configuration(
            "signing secret is empty".to_string(),
        ));
    }

    let claims = Claims {
        email: email.to_string(),
        iat: issued_at,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Configuration(format!("Failed to sign token: {}", e)))
}

/// Decode and verify a token produced by [`sign_token`].
pub fn verify_token(token: &str, secret: &SecretString) -> Result<Claims, AuthError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(AuthError::Configuration(
            "signing secret is empty".to_string(),
        ));
    }

    // Issued tokens have no exp claim; validate the signature only.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::InvalidToken(format!("Token verification failed: {}", e)))
}

/// Constant-time equality over a submitted and a stored password.
///
/// The stored value is a cleartext placeholder; a production deployment
/// swaps this for a salted-hash verification.
pub fn passwords_match(submitted: &SecretString, stored: &str) -> bool {
    constant_time::verify_slices_are_equal(submitted.expose_secret().as_bytes(), stored.as_bytes())
        .is_ok()
}
