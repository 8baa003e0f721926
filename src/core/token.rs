//! Token endpoint response types

use serde::{Deserialize, Serialize};

/// Response body of the token endpoint
///
/// `id_token` is optional at the parse level; the FranceConnect flow
/// requires it and fails the login when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token for the userinfo endpoint
	pub access_token: String,

	/// Token type, normally `Bearer`
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,

	/// Access token lifetime in seconds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<i64>,

	/// Refresh token, when the provider grants one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,

	/// Granted scopes
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,

	/// Signed OIDC ID token
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
}
