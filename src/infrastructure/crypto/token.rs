use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::token_issuer::{TokenError, TokenIssuer};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub exp: u64,
}

/// Issues and verifies HMAC-signed tokens binding a bearer to one account
/// number. Holds no state beyond the signing secret and expiry policy.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_secs: i64,
    enforce_expiry: bool,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .field("enforce_expiry", &self.enforce_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_secs: i64, enforce_expiry: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            enforce_expiry,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // HMAC family only; anything else is rejected before the MAC check
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = self.enforce_expiry;
        if self.enforce_expiry {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.required_spec_claims.clear();
        }
        validation
    }
}

impl TokenIssuer for TokenService {
    fn issue(&self, account_number: i64) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            account_number,
            exp: (now + self.ttl_secs).max(0) as u64,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &self.validation(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;
        Ok(data.claims.account_number)
    }
}
