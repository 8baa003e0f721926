//! Authentication error types

use thiserror::Error;

/// Errors surfaced by the FranceConnect login flow
///
/// Every failure is fatal for the current login attempt; nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialAuthError {
	/// Network error during HTTP requests
	#[error("Network error: {0}")]
	Network(String),

	/// Malformed or unexpected response body from the provider
	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	/// Token endpoint rejected the code exchange
	#[error("Token exchange failed: {0}")]
	TokenExchange(String),

	/// ID token failed signature or time-claim verification
	#[error("Token validation failed: {0}")]
	TokenValidation(String),

	/// Callback state does not match the one issued at redirect (CSRF)
	#[error("Invalid state")]
	InvalidState,

	/// ID token nonce failed structural, lookup, or comparison checks
	#[error("Invalid nonce")]
	InvalidNonce,

	/// No nonce record while building the code-exchange request
	///
	/// Reaching this means the redirect step never ran for the session or
	/// the record vanished; a bug or tampering, not a user error.
	#[error("Nonce record not found: {0}")]
	NonceRecordNotFound(String),

	/// UserInfo endpoint error
	#[error("UserInfo error: {0}")]
	UserInfo(String),

	/// Required claim missing while mapping the user identity
	#[error("User mapping error: {0}")]
	UserMapping(String),

	/// Nonce store backend failure
	#[error("Storage error: {0}")]
	Storage(String),

	/// Configuration error
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Conversion from reqwest::Error
impl From<reqwest::Error> for SocialAuthError {
	fn from(error: reqwest::Error) -> Self {
		SocialAuthError::Network(error.to_string())
	}
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for SocialAuthError {
	fn from(error: serde_json::Error) -> Self {
		SocialAuthError::InvalidResponse(error.to_string())
	}
}

/// Conversion from jsonwebtoken::errors::Error
impl From<jsonwebtoken::errors::Error> for SocialAuthError {
	fn from(error: jsonwebtoken::errors::Error) -> Self {
		SocialAuthError::TokenValidation(error.to_string())
	}
}
