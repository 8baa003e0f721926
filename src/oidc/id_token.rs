//! ID token decoding for HS256 providers
//!
//! FranceConnect signs ID tokens with the shared client secret rather than
//! a published JWKS, so verification is a symmetric HS256 check.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::core::{IdTokenClaims, SocialAuthError};

/// Clock skew tolerated on `exp` and `iat`, in seconds
pub const ID_TOKEN_LEEWAY_SECS: u64 = 130;

/// Decodes and validates HS256 ID tokens with a shared secret
pub struct IdTokenDecoder {
	secret: String,
	leeway: u64,
}

impl IdTokenDecoder {
	/// Creates a decoder keyed with the provider's client secret
	pub fn new(secret: impl Into<String>) -> Self {
		Self {
			secret: secret.into(),
			leeway: ID_TOKEN_LEEWAY_SECS,
		}
	}

	/// Overrides the default clock skew tolerance
	pub fn with_leeway(mut self, leeway: u64) -> Self {
		self.leeway = leeway;
		self
	}

	/// Verifies the token signature and time claims, returning its claims
	///
	/// `exp` is checked by the JWT library with the configured leeway. `iat`
	/// is checked here with the same leeway; the library stopped validating
	/// it. The nonce claim is returned untouched for validation by the
	/// caller.
	pub fn decode(&self, token: &str) -> Result<IdTokenClaims, SocialAuthError> {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.leeway = self.leeway;
		// FranceConnect tokens carry `aud`; with no expected audience
		// configured the default check would reject every one of them
		validation.validate_aud = false;

		let key = DecodingKey::from_secret(self.secret.as_bytes());
		let data = decode::<IdTokenClaims>(token, &key, &validation)?;

		let now = chrono::Utc::now().timestamp();
		if data.claims.iat > now + self.leeway as i64 {
			return Err(SocialAuthError::TokenValidation(
				"ID token issued in the future".to_string(),
			));
		}

		Ok(data.claims)
	}
}
