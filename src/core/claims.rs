//! OIDC claim types for FranceConnect responses

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Claims decoded from a FranceConnect ID token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
	/// Issuer
	#[serde(skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,

	/// Audience (client ID)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub aud: Option<String>,

	/// Subject (user ID)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,

	/// Expiration time (Unix timestamp)
	pub exp: i64,

	/// Issued at time (Unix timestamp)
	pub iat: i64,

	/// Echoed composite nonce (replay attack prevention)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,

	/// Additional claims
	#[serde(flatten)]
	pub additional_claims: HashMap<String, Value>,
}

/// Claims returned by the FranceConnect userinfo endpoint
///
/// Every field is optional at the parse level so that identity mapping can
/// report exactly which required claim is missing instead of a generic
/// deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoClaims {
	/// Subject (user ID)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,

	/// Given name (first name)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,

	/// Family name (last name)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,

	/// Email address
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,

	/// Additional claims (birthdate, gender, birthplace, ...)
	#[serde(flatten)]
	pub additional_claims: HashMap<String, Value>,
}
