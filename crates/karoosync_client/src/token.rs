//! Reading the subject out of a Hammerhead access token.
//!
//! The token has just been issued to us over TLS by the service that signed
//! it, so its signature is NOT checked here. This is not a token verifier and
//! must not be used on tokens received from anyone else.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::ClientError;

#[derive(Deserialize)]
struct Claims {
    #[serde(default, deserialize_with = "crate::deserialize_opt_string")]
    sub: Option<String>,
}

/// Return the `sub` claim of a JWT.
pub fn identity_of(token: &str) -> Result<String, ClientError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    // The library only counts string subjects as present; numeric ones are
    // accepted below and presence is checked on our own claims.
    validation.required_spec_claims = HashSet::new();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ClientError::Token(format!("cannot read access token: {e}")))?;
    data.claims
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClientError::Token("missing sub claim".into()))
}
